//! Streaming AES-GCM-style encryption that **decrypts without authenticating**.
//!
//! This crate implements the GCM state machine (GHASH over GF(2^128), a CTR
//! keystream with a 32-bit block counter, and on-demand tag computation) for
//! interoperating with a legacy peer that expects incremental plaintext
//! delivery and deferred, out-of-band tag checking. It departs from
//! NIST SP 800-38D in three ways, all of them deliberate:
//!
//! - [`Decrypter::decrypt`] returns plaintext unconditionally, before (or
//!   without ever) verifying the tag. [`Decrypter::verify`] is a separate,
//!   optional step.
//! - Nonces are 16 bytes. The initial counter block is derived by GHASH-ing
//!   the nonce under `H` and folding the nonce's bit length into the high
//!   half, not by the standard 12-byte `J0` construction.
//! - The encrypt path hashes **plaintext** into GHASH (standard GCM hashes
//!   ciphertext in both directions). Matched encrypt/decrypt sessions still
//!   agree on tags for the streams they actually exchanged, but tag values
//!   differ from standard GCM for non-zero messages. Wire compatibility with
//!   the legacy peer requires preserving this as-is.
//!
//! # ⚠️ Security Warning
//!
//! **This is not a general-purpose AEAD.** Plaintext released by
//! [`Decrypter::decrypt`] is unauthenticated until (unless!) a later
//! [`Decrypter::verify`] succeeds, and nothing is erased or revoked when
//! verification fails. Use a conventional AEAD unless you are talking to the
//! specific peer this crate exists for.
//!
//! The block cipher itself is out of scope: sessions consume any
//! implementation of the [`BlockCipher`] capability, a single pure 16-byte
//! block permutation.
//!
//! # Usage
//!
//! ```
//! use aes::Aes128;
//! use aes::cipher::{BlockEncrypt, KeyInit};
//! use unchecked_gcm::{Block, BlockCipher, Decrypter, Encrypter};
//!
//! struct Aes128Block(Aes128);
//!
//! impl BlockCipher for Aes128Block {
//!     fn encrypt_block(&self, src: &Block, dst: &mut Block) {
//!         let mut block = (*src).into();
//!         self.0.encrypt_block(&mut block);
//!         dst.copy_from_slice(&block);
//!     }
//! }
//!
//! let cipher = Aes128Block(Aes128::new(&[0x42; 16].into()));
//! let nonce = [0x24; 16];
//!
//! let mut enc = Encrypter::new(&cipher, &nonce, b"header");
//! let mut ciphertext = Vec::new();
//! enc.encrypt(&mut ciphertext, b"hello ");
//! enc.encrypt(&mut ciphertext, b"world");
//! let tag = enc.tag();
//!
//! let mut dec = Decrypter::new(&cipher, &nonce, b"header");
//! let mut plaintext = Vec::new();
//! dec.decrypt(&mut plaintext, &ciphertext);
//! assert_eq!(plaintext, b"hello world");
//! assert!(dec.verify(&tag).is_ok());
//! ```

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, rust_2018_idioms)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod block_cipher;
mod ctr;
mod field_element;
mod ghash;
mod product_table;
mod session;

pub use crate::{
    block_cipher::BlockCipher,
    session::{Decrypter, Encrypter},
};

/// Size of a GCM block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of a nonce in bytes. This core accepts exactly this length.
pub const NONCE_SIZE: usize = 16;

/// Size of an authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// GCM blocks (16 bytes).
pub type Block = [u8; BLOCK_SIZE];

/// GCM authentication tags (16 bytes).
pub type Tag = [u8; TAG_SIZE];

/// Authentication failure returned by [`Decrypter::verify`].
///
/// Raised when the candidate tag has the wrong length or does not match the
/// tag for the ciphertext processed so far. Deliberately opaque.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Error;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("gcm: message authentication failed")
    }
}
