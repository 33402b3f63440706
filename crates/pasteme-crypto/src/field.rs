//! Per-field AES-256-GCM sealing
//!
//! Each field gets its own salt (hence its own key) and its own IV:
//! ```text
//! salt: 8 bytes   → hex, 16 chars
//! iv:   12 bytes  → hex, 24 chars
//! data: [N bytes: ciphertext][16 bytes: GCM tag] → hex
//! AAD = empty
//! ```

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use pasteme_core::types::EncryptedField;
use pasteme_core::{PasteError, PasteResult};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::kdf::derive_key_salted;
use crate::passphrase::Passphrase;
use crate::{fill_random, IV_SIZE};

/// Seal one plaintext field under the paste passphrase, using the OS CSPRNG.
pub fn seal_field(passphrase: &Passphrase, plaintext: &[u8]) -> PasteResult<EncryptedField> {
    seal_field_with(&mut OsRng, passphrase, plaintext)
}

/// Seal one plaintext field, drawing salt and IV from `rng`.
///
/// Any RNG failure aborts with an entropy error before anything is produced.
pub fn seal_field_with<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    passphrase: &Passphrase,
    plaintext: &[u8],
) -> PasteResult<EncryptedField> {
    let (key, salt) = derive_key_salted(rng, passphrase)?;

    let mut iv = [0u8; IV_SIZE];
    fill_random(rng, &mut iv, "iv")?;

    let cipher = Aes256Gcm::new(key.as_bytes().into());
    let sealed = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| PasteError::Crypto(format!("AES-256-GCM seal failed: {e}")))?;

    Ok(EncryptedField {
        data: hex::encode(sealed),
        iv: hex::encode(iv),
        salt: hex::encode(salt),
    })
}
