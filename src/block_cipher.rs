//! The block cipher capability consumed by sessions.

use crate::Block;

/// A 128-bit block cipher in the encrypt direction.
///
/// Sessions drive the cipher as an opaque capability: a single pure,
/// deterministic permutation over 16-byte blocks. The block size is fixed by
/// the [`Block`] array type. An implementation shared by reference across
/// sessions must be safe for concurrent read-only use.
pub trait BlockCipher {
    /// Encrypt `src` into `dst`.
    ///
    /// Must be deterministic and free of side effects.
    fn encrypt_block(&self, src: &Block, dst: &mut Block);
}
