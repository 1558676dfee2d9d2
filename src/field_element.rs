//! GCM field element arithmetic over GF(2^128).

use crate::{Block, BLOCK_SIZE};
use core::ops::Add;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// An element of GCM's field GF(2^128), modulo `x^128 + x^7 + x^2 + x + 1`.
///
/// The wire form is the concatenation `low || high` with each half
/// big-endian. GCM's bit ordering treats bit 0 of the first byte as the
/// highest-degree polynomial coefficient, so "shifting toward higher degree"
/// moves toward the numerically lower bits of `low`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct FieldElement {
    pub(crate) low: u64,
    pub(crate) high: u64,
}

impl FieldElement {
    /// Decode a field element from its big-endian bytestring representation.
    #[inline]
    pub(crate) fn from_be_bytes(bytes: &Block) -> Self {
        Self {
            low: u64::from_be_bytes(bytes[..8].try_into().unwrap()),
            high: u64::from_be_bytes(bytes[8..].try_into().unwrap()),
        }
    }

    /// Encode this field element as its big-endian bytestring representation.
    #[inline]
    pub(crate) fn to_be_bytes(self) -> Block {
        let mut block = [0u8; BLOCK_SIZE];
        block[..8].copy_from_slice(&self.low.to_be_bytes());
        block[8..].copy_from_slice(&self.high.to_be_bytes());
        block
    }

    /// Multiply by `x`: shift one bit toward the higher-degree coefficients,
    /// reducing by the field polynomial.
    ///
    /// Branch-free; the reduction constant is folded in under a mask derived
    /// from the outgoing coefficient.
    #[inline]
    pub(crate) fn mulx(self) -> Self {
        let carry = 0u64.wrapping_sub(self.high & 1) & 0xe100_0000_0000_0000;

        Self {
            low: (self.low >> 1) ^ carry,
            high: (self.high >> 1) | (self.low << 63),
        }
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Add for FieldElement {
    type Output = Self;

    /// Adds two GCM field elements. In GF(2^128), addition is XOR.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            low: self.low ^ rhs.low,
            high: self.high ^ rhs.high,
        }
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.low.zeroize();
        self.high.zeroize();
    }
}
