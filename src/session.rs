//! Streaming encrypt and decrypt sessions.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::{
    block_cipher::BlockCipher, ctr::Ctr32, ghash::Ghash, Error, Tag, BLOCK_SIZE, NONCE_SIZE,
    TAG_SIZE,
};
use subtle::ConstantTimeEq;

/// State shared by the two session roles.
///
/// Both roles hash their *input* bytes: the encrypter absorbs plaintext and
/// the decrypter absorbs ciphertext. When an encrypt session and a decrypt
/// session exchange the same stream, the decrypter's input is the
/// encrypter's output, and the two tags agree.
struct Session<'c, C> {
    cipher: &'c C,
    ghash: Ghash,
    ctr: Ctr32,
    /// `E_K(J0)`, folded into every tag. Never modified after construction.
    tag_mask: [u8; BLOCK_SIZE],
    aad_len: u64,
    data_len: u64,
}

impl<'c, C: BlockCipher> Session<'c, C> {
    fn new(cipher: &'c C, nonce: &[u8], aad: &[u8]) -> Self {
        assert_eq!(
            nonce.len(),
            NONCE_SIZE,
            "incorrect nonce length given to GCM"
        );

        let mut h = [0u8; BLOCK_SIZE];
        cipher.encrypt_block(&[0u8; BLOCK_SIZE], &mut h);

        let mut ghash = Ghash::new(&h);
        ghash.update_padded(aad);

        let j0 = ghash.nonce_counter(nonce);
        let mut tag_mask = [0u8; BLOCK_SIZE];
        cipher.encrypt_block(&j0, &mut tag_mask);

        let mut ctr = Ctr32::new(j0);
        ctr.increment();

        Session {
            cipher,
            ghash,
            ctr,
            tag_mask,
            aad_len: aad.len() as u64,
            data_len: 0,
        }
    }

    /// Absorb the input bytes into GHASH, then XOR keystream over them.
    fn process_in_place(&mut self, buf: &mut [u8]) {
        self.ghash.update(buf);
        self.data_len = self.data_len.wrapping_add(buf.len() as u64);
        self.ctr.apply(self.cipher, buf);
    }

    #[cfg(feature = "alloc")]
    fn process_append<'a>(&mut self, dst: &'a mut Vec<u8>, data: &[u8]) -> &'a [u8] {
        let start = dst.len();
        dst.extend_from_slice(data);
        self.process_in_place(&mut dst[start..]);
        dst
    }

    fn tag(&self) -> Tag {
        let mut tag = self.ghash.finalize(self.aad_len, self.data_len);
        for (t, m) in tag.iter_mut().zip(&self.tag_mask) {
            *t ^= m;
        }
        tag
    }
}

/// Streaming GCM encrypter.
///
/// Created for one `(key, nonce, aad)` triple, fed plaintext in arbitrary
/// chunks, and asked for the tag on demand. Chunk boundaries affect neither
/// the ciphertext nor the tag. A session must not be reused across nonces
/// and is not safe for concurrent use.
pub struct Encrypter<'c, C> {
    session: Session<'c, C>,
}

impl<'c, C: BlockCipher> Encrypter<'c, C> {
    /// Create an encrypt session over a borrowed block cipher.
    ///
    /// The AAD is absorbed immediately and cannot be extended later.
    ///
    /// # Panics
    ///
    /// If `nonce` is not exactly [`NONCE_SIZE`] bytes.
    pub fn new(cipher: &'c C, nonce: &[u8], aad: &[u8]) -> Self {
        Self {
            session: Session::new(cipher, nonce, aad),
        }
    }

    /// Encrypt `plaintext`, appending the ciphertext to `dst`.
    ///
    /// Returns the extended buffer; the newly produced ciphertext is its
    /// trailing `plaintext.len()` bytes.
    #[cfg(feature = "alloc")]
    pub fn encrypt<'a>(&mut self, dst: &'a mut Vec<u8>, plaintext: &[u8]) -> &'a [u8] {
        self.session.process_append(dst, plaintext)
    }

    /// Encrypt `buf` in place.
    pub fn encrypt_in_place(&mut self, buf: &mut [u8]) {
        self.session.process_in_place(buf);
    }

    /// The tag over the AAD and all plaintext encrypted so far.
    ///
    /// May be called at any time, any number of times; it does not disturb
    /// the session.
    pub fn tag(&self) -> Tag {
        self.session.tag()
    }
}

/// Streaming GCM decrypter that **releases plaintext before verifying**.
///
/// The dual of [`Encrypter`]: ciphertext goes in, plaintext comes out
/// unconditionally. Authentication happens only if and when the caller
/// invokes [`Decrypter::verify`], and nothing already returned is revoked on
/// failure.
pub struct Decrypter<'c, C> {
    session: Session<'c, C>,
}

impl<'c, C: BlockCipher> Decrypter<'c, C> {
    /// Create a decrypt session over a borrowed block cipher.
    ///
    /// The AAD is absorbed immediately and cannot be extended later.
    ///
    /// # Panics
    ///
    /// If `nonce` is not exactly [`NONCE_SIZE`] bytes.
    pub fn new(cipher: &'c C, nonce: &[u8], aad: &[u8]) -> Self {
        Self {
            session: Session::new(cipher, nonce, aad),
        }
    }

    /// Decrypt `ciphertext`, appending the plaintext to `dst`.
    ///
    /// Returns the extended buffer; the newly recovered plaintext is its
    /// trailing `ciphertext.len()` bytes. The plaintext is **not**
    /// authenticated by this call.
    #[cfg(feature = "alloc")]
    pub fn decrypt<'a>(&mut self, dst: &'a mut Vec<u8>, ciphertext: &[u8]) -> &'a [u8] {
        self.session.process_append(dst, ciphertext)
    }

    /// Decrypt `buf` in place, without authenticating it.
    pub fn decrypt_in_place(&mut self, buf: &mut [u8]) {
        self.session.process_in_place(buf);
    }

    /// The tag over the AAD and all ciphertext processed so far.
    ///
    /// May be called at any time, any number of times; it does not disturb
    /// the session.
    pub fn tag(&self) -> Tag {
        self.session.tag()
    }

    /// Check `candidate` against the expected tag in constant time.
    ///
    /// A candidate of the wrong length fails outright. On mismatch no state
    /// is disturbed, and plaintext already released by
    /// [`Decrypter::decrypt`] stays released.
    pub fn verify(&self, candidate: &[u8]) -> Result<(), Error> {
        if candidate.len() != TAG_SIZE {
            return Err(Error);
        }

        let expected = self.tag();
        if bool::from(expected[..].ct_eq(candidate)) {
            Ok(())
        } else {
            Err(Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Block;

    /// Keyless stand-in block transform; enough structure for state-machine
    /// tests, no cryptographic claims.
    struct Scramble;

    impl BlockCipher for Scramble {
        fn encrypt_block(&self, src: &Block, dst: &mut Block) {
            let sum = src.iter().fold(0xc3u8, |acc, b| acc.wrapping_mul(37) ^ b);
            for (i, d) in dst.iter_mut().enumerate() {
                *d = sum ^ src[(i + 5) % BLOCK_SIZE].wrapping_add(i as u8);
            }
        }
    }

    const NONCE: [u8; NONCE_SIZE] = [7u8; NONCE_SIZE];

    #[test]
    #[cfg(feature = "alloc")]
    fn in_place_matches_append() {
        let data: [u8; 37] = core::array::from_fn(|i| (i as u8).wrapping_mul(11));

        let mut appended = Vec::new();
        let mut enc = Encrypter::new(&Scramble, &NONCE, b"aad");
        enc.encrypt(&mut appended, &data);

        let mut in_place = data;
        let mut enc2 = Encrypter::new(&Scramble, &NONCE, b"aad");
        enc2.encrypt_in_place(&mut in_place);

        assert_eq!(appended, in_place);
        assert_eq!(enc.tag(), enc2.tag());
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn append_extends_rather_than_replaces() {
        let mut dst = alloc::vec![0xee; 3];
        let mut enc = Encrypter::new(&Scramble, &NONCE, b"");

        let full = enc.encrypt(&mut dst, &[1, 2, 3, 4]);
        assert_eq!(full.len(), 7);
        assert_eq!(&full[..3], &[0xee; 3]);
    }

    #[test]
    fn tags_are_stable_across_calls() {
        let mut enc = Encrypter::new(&Scramble, &NONCE, b"");
        enc.encrypt_in_place(&mut [0u8; 5]);

        assert_eq!(enc.tag(), enc.tag());
    }

    #[test]
    fn roles_agree_on_exchanged_streams() {
        let mut buf = *b"attack at dawn";

        let mut enc = Encrypter::new(&Scramble, &NONCE, b"hdr");
        enc.encrypt_in_place(&mut buf);

        let mut dec = Decrypter::new(&Scramble, &NONCE, b"hdr");
        dec.decrypt_in_place(&mut buf);

        assert_eq!(&buf, b"attack at dawn");
        assert_eq!(enc.tag(), dec.tag());
        assert!(dec.verify(&enc.tag()).is_ok());
    }

    #[test]
    fn verify_rejects_wrong_lengths() {
        let dec = Decrypter::new(&Scramble, &NONCE, b"");
        let tag = dec.tag();

        assert_eq!(dec.verify(&tag[..15]), Err(Error));
        let mut long = [0u8; 17];
        long[..16].copy_from_slice(&tag);
        assert_eq!(dec.verify(&long), Err(Error));
    }

    #[test]
    #[should_panic(expected = "incorrect nonce length")]
    fn short_nonces_are_refused() {
        let _ = Encrypter::new(&Scramble, &[0u8; 12], b"");
    }
}
