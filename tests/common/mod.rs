//! AES-128 adapter shared by the integration tests.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;
use unchecked_gcm::{Block, BlockCipher};

pub struct Aes128Cipher(Aes128);

impl Aes128Cipher {
    pub fn new(key: &[u8; 16]) -> Self {
        Self(Aes128::new(key.into()))
    }
}

impl BlockCipher for Aes128Cipher {
    fn encrypt_block(&self, src: &Block, dst: &mut Block) {
        let mut block = (*src).into();
        self.0.encrypt_block(&mut block);
        dst.copy_from_slice(&block);
    }
}
