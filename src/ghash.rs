//! Streaming GHASH accumulator.

use crate::{field_element::FieldElement, product_table::ProductTable, Block, BLOCK_SIZE};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// GHASH over GF(2^128), absorbing byte strings in 16-byte blocks.
///
/// A trailing partial block is buffered across calls and zero-padded only
/// when [`Ghash::pad`] or [`Ghash::finalize`] runs, so a byte stream hashes
/// identically no matter how it is chunked.
pub(crate) struct Ghash {
    table: ProductTable,
    y: FieldElement,
    /// Pending bytes of an incomplete block. `buf[buf_len..]` stays zero so
    /// the buffer can be absorbed as-is when padding.
    buf: Block,
    buf_len: usize,
}

impl Ghash {
    /// Initialize the accumulator for the subkey `H`.
    pub(crate) fn new(h: &Block) -> Self {
        Self {
            table: ProductTable::new(h),
            y: FieldElement::default(),
            buf: [0u8; BLOCK_SIZE],
            buf_len: 0,
        }
    }

    /// Absorb `data`, carrying any trailing partial block over to the next
    /// call.
    pub(crate) fn update(&mut self, mut data: &[u8]) {
        if self.buf_len != 0 {
            let n = data.len().min(BLOCK_SIZE - self.buf_len);
            self.buf[self.buf_len..self.buf_len + n].copy_from_slice(&data[..n]);
            self.buf_len += n;
            data = &data[n..];

            if self.buf_len < BLOCK_SIZE {
                return;
            }

            let block = self.buf;
            self.buf = [0u8; BLOCK_SIZE];
            self.buf_len = 0;
            self.absorb(&block);
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            self.absorb(block.try_into().unwrap());
        }

        let rest = blocks.remainder();
        self.buf[..rest.len()].copy_from_slice(rest);
        self.buf_len = rest.len();
    }

    /// Absorb `data` and zero-pad it to the next block boundary.
    pub(crate) fn update_padded(&mut self, data: &[u8]) {
        self.update(data);
        self.pad();
    }

    /// Zero-pad and absorb any pending partial block.
    pub(crate) fn pad(&mut self) {
        if self.buf_len != 0 {
            let block = self.buf;
            self.buf = [0u8; BLOCK_SIZE];
            self.buf_len = 0;
            self.absorb(&block);
        }
    }

    #[inline]
    fn absorb(&mut self, block: &Block) {
        self.y = (self.y + FieldElement::from_be_bytes(block)) * &self.table;
    }

    /// Derive the initial counter block from a nonce: hash it under `H`,
    /// fold the nonce's bit length into the high half, and multiply once
    /// more. The result is serialized `low || high`, big-endian.
    pub(crate) fn nonce_counter(&self, nonce: &[u8]) -> Block {
        let mut y = FieldElement::default();
        for chunk in nonce.chunks(BLOCK_SIZE) {
            let mut block = [0u8; BLOCK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            y = (y + FieldElement::from_be_bytes(&block)) * &self.table;
        }

        y.high ^= (nonce.len() as u64).wrapping_mul(8);
        y = y * &self.table;
        y.to_be_bytes()
    }

    /// Hash value with the AAD and data bit lengths folded in.
    ///
    /// Works on a snapshot: a pending partial block is zero-padded into the
    /// snapshot only, leaving the live accumulator free to keep absorbing.
    pub(crate) fn finalize(&self, aad_len: u64, data_len: u64) -> Block {
        let mut y = self.y;
        if self.buf_len != 0 {
            y = (y + FieldElement::from_be_bytes(&self.buf)) * &self.table;
        }

        y.low ^= aad_len.wrapping_mul(8);
        y.high ^= data_len.wrapping_mul(8);
        (y * &self.table).to_be_bytes()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Ghash {
    fn zeroize(&mut self) {
        self.table.zeroize();
        self.y.zeroize();
        self.buf.zeroize();
        self.buf_len.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const H: [u8; 16] = hex!("b83b533708bf535d0aa6e52980d53b78");

    #[test]
    fn chunk_boundaries_do_not_change_the_hash() {
        let data: [u8; 45] = core::array::from_fn(|i| (i as u8).wrapping_mul(47));

        let mut whole = Ghash::new(&H);
        whole.update(&data);

        for split in [0, 1, 15, 16, 17, 32, 44, 45] {
            let mut pieces = Ghash::new(&H);
            pieces.update(&data[..split]);
            pieces.update(&data[split..]);

            assert_eq!(
                pieces.finalize(0, data.len() as u64),
                whole.finalize(0, data.len() as u64),
                "split at {}",
                split
            );
        }
    }

    #[test]
    fn pending_partial_block_pads_like_an_explicit_pad() {
        let mut pending = Ghash::new(&H);
        pending.update(b"ab");

        let mut padded = Ghash::new(&H);
        padded.update_padded(b"ab");

        assert_eq!(pending.finalize(0, 2), padded.finalize(0, 2));
    }

    #[test]
    fn finalize_leaves_the_accumulator_intact() {
        let mut ghash = Ghash::new(&H);
        ghash.update(b"0123456789");

        let first = ghash.finalize(0, 10);
        assert_eq!(ghash.finalize(0, 10), first);

        ghash.update(b"abcdef");
        assert_ne!(ghash.finalize(0, 16), first);
    }

    #[test]
    fn nonce_counter_depends_on_length_and_content() {
        let ghash = Ghash::new(&H);

        let a = ghash.nonce_counter(&[0u8; 16]);
        let b = ghash.nonce_counter(&[1u8; 16]);
        assert_ne!(a, b);

        // Same leading content, different length: the folded bit length
        // must separate them.
        let c = ghash.nonce_counter(&[0u8; 12]);
        assert_ne!(a, c);
    }
}
