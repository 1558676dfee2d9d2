//! CTR keystream with a 32-bit big-endian block counter.

use crate::{block_cipher::BlockCipher, Block, BLOCK_SIZE};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// XOR `mask` into the front of `buf`, returning how many bytes were masked.
///
/// Processes `min(buf.len(), mask.len())` bytes with a data-independent
/// access pattern. `buf` doubles as input and output, which is the exact
/// aliasing this core permits.
#[inline]
fn xor_bytes(buf: &mut [u8], mask: &[u8]) -> usize {
    let n = buf.len().min(mask.len());
    for (b, m) in buf[..n].iter_mut().zip(&mask[..n]) {
        *b ^= m;
    }
    n
}

/// Counter-mode keystream state.
///
/// One keystream block is produced per counter value. The unused suffix of
/// the most recent block is retained (always fewer than 16 bytes) so that
/// successive calls need not align to block boundaries.
pub(crate) struct Ctr32 {
    /// Current counter block; bytes 12..16 are a big-endian block counter.
    block: Block,
    /// Most recently produced keystream block.
    mask: Block,
    /// Bytes of `mask` already consumed; `BLOCK_SIZE` means none remain.
    mask_used: usize,
}

impl Ctr32 {
    pub(crate) fn new(block: Block) -> Self {
        Self {
            block,
            mask: [0u8; BLOCK_SIZE],
            mask_used: BLOCK_SIZE,
        }
    }

    /// Step the 32-bit counter tail, wrapping modulo 2^32.
    ///
    /// On wrap the keystream repeats; that is GCM's documented limit, not a
    /// condition this layer can detect.
    pub(crate) fn increment(&mut self) {
        let tail = u32::from_be_bytes(self.block[12..].try_into().unwrap());
        self.block[12..].copy_from_slice(&tail.wrapping_add(1).to_be_bytes());
    }

    /// XOR keystream over `buf` in place, consuming leftover mask bytes
    /// before producing fresh blocks.
    pub(crate) fn apply<C: BlockCipher>(&mut self, cipher: &C, buf: &mut [u8]) {
        let mut pos = 0;

        if self.mask_used < BLOCK_SIZE {
            let n = xor_bytes(buf, &self.mask[self.mask_used..]);
            self.mask_used += n;
            pos = n;
        }

        while pos < buf.len() {
            cipher.encrypt_block(&self.block, &mut self.mask);
            self.increment();

            let n = xor_bytes(&mut buf[pos..], &self.mask);
            self.mask_used = n;
            pos += n;
        }
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Ctr32 {
    fn zeroize(&mut self) {
        self.block.zeroize();
        self.mask.zeroize();
        self.mask_used.zeroize();
    }
}
