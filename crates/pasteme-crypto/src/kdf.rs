//! Key derivation: PBKDF2-HMAC-SHA256 passphrase + salt → field key

use pasteme_core::PasteResult;
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::passphrase::Passphrase;
use crate::{fill_random, KDF_ITERATIONS, KEY_SIZE, SALT_SIZE};

/// A 256-bit AES key for a single field.
///
/// Zeroized on drop to prevent secrets lingering in memory.
#[derive(Clone)]
pub struct FieldKey {
    bytes: [u8; KEY_SIZE],
}

impl FieldKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for FieldKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive the key for a field from the paste passphrase and that field's salt.
pub fn derive_key(passphrase: &Passphrase, salt: &[u8]) -> FieldKey {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2::pbkdf2_hmac::<Sha256>(
        passphrase.expose().as_bytes(),
        salt,
        KDF_ITERATIONS,
        &mut key,
    );
    FieldKey::from_bytes(key)
}

/// Draw a fresh 8-byte salt and derive the key for it.
///
/// The salt is returned so it can travel next to the ciphertext.
pub fn derive_key_salted<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    passphrase: &Passphrase,
) -> PasteResult<(FieldKey, [u8; SALT_SIZE])> {
    let mut salt = [0u8; SALT_SIZE];
    fill_random(rng, &mut salt, "salt")?;
    Ok((derive_key(passphrase, &salt), salt))
}
