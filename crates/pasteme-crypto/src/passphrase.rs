//! Per-paste passphrase generation
//!
//! The passphrase is hex(SHA-256(28 random bytes)): 64 lowercase hex chars.
//! It lives only for one invocation and only ever leaves the process inside
//! the URL fragment, which browsers never send to the server.

use pasteme_core::PasteResult;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::{fill_random, PASSPHRASE_SEED_SIZE};

/// The secret every field key of a paste is derived from.
pub struct Passphrase {
    secret: SecretString,
}

impl Passphrase {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(passphrase.into()),
        }
    }

    pub fn expose(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Passphrase")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Generate a fresh passphrase from the operating system's CSPRNG.
pub fn generate_passphrase() -> PasteResult<Passphrase> {
    generate_passphrase_with(&mut OsRng)
}

/// Generate a passphrase from the given CSPRNG.
///
/// Fails with an entropy error if the RNG cannot fill the seed; nothing is
/// returned in that case.
pub fn generate_passphrase_with<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
) -> PasteResult<Passphrase> {
    let mut seed = Zeroizing::new([0u8; PASSPHRASE_SEED_SIZE]);
    fill_random(rng, &mut seed[..], "passphrase seed")?;

    let digest = Sha256::digest(&seed[..]);
    tracing::debug!("passphrase generated");
    Ok(Passphrase::new(hex::encode(digest)))
}
