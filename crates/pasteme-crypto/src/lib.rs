//! pasteme-crypto: client-side encryption for Paste.me
//!
//! Every plaintext field of a paste is sealed independently:
//!
//! ```text
//! Passphrase = hex(SHA-256(28 random bytes))          (one per paste, URL fragment only)
//!   └── per field:
//!         salt  = 8 random bytes
//!         key   = PBKDF2-HMAC-SHA256(passphrase, salt, 1000 iterations, 32 bytes)
//!         iv    = 12 random bytes
//!         data  = AES-256-GCM(key, iv, plaintext, AAD = empty)  → ciphertext || 16-byte tag
//! ```
//!
//! The iteration count, salt size and IV size are shared with every other
//! Paste.me client and must not change.

use pasteme_core::{PasteError, PasteResult};
use rand::RngCore;

pub mod field;
pub mod kdf;
pub mod passphrase;

pub use field::{seal_field, seal_field_with};
pub use kdf::{derive_key, derive_key_salted, FieldKey};
pub use passphrase::{generate_passphrase, generate_passphrase_with, Passphrase};

/// Size of a derived AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of the per-field PBKDF2 salt
pub const SALT_SIZE: usize = 8;

/// Size of an AES-GCM IV (96-bit)
pub const IV_SIZE: usize = 12;

/// Size of a GCM authentication tag
pub const TAG_SIZE: usize = 16;

/// PBKDF2 iteration count
pub const KDF_ITERATIONS: u32 = 1000;

/// Random bytes hashed into a passphrase
pub const PASSPHRASE_SEED_SIZE: usize = 28;

/// Fill `buf` from a CSPRNG, surfacing any failure as an entropy error.
pub(crate) fn fill_random<R: RngCore + ?Sized>(
    rng: &mut R,
    buf: &mut [u8],
    what: &str,
) -> PasteResult<()> {
    rng.try_fill_bytes(buf)
        .map_err(|e| PasteError::Entropy(format!("{what}: {e}")))
}
