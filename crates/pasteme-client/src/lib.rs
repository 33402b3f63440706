//! pasteme-client: publish an end-to-end encrypted paste
//!
//! One invocation walks a fixed sequence of stages:
//! ```text
//! parsing → validated → passphrase-ready → envelope-built → sent → succeeded
//!    └──────────────┴───────────────┴────────────────┴─────────┴──→ failed
//! ```
//! Every field is sealed before the single POST, so a failure at any stage
//! leaves nothing on the server.

pub mod envelope;
pub mod input;
pub mod response;
pub mod transport;

use pasteme_core::config::ApiConfig;
use pasteme_core::{PasteError, PasteResult};
use pasteme_crypto::generate_passphrase_with;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

pub use envelope::{build_document, build_document_with};
pub use input::{resolve_inputs, InputStream, PasteOptions, PlainInputs};
pub use response::interpret_reply;
pub use transport::{HttpReply, HttpTransport, Transport};

/// Progress of a single publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parsing,
    Validated,
    PassphraseReady,
    EnvelopeBuilt,
    Sent,
    Succeeded,
    Failed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::Parsing => "parsing",
            Stage::Validated => "validated",
            Stage::PassphraseReady => "passphrase-ready",
            Stage::EnvelopeBuilt => "envelope-built",
            Stage::Sent => "sent",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        })
    }
}

/// A paste the service accepted.
pub struct Published {
    pub uuid: String,
    /// Share URL; the passphrase rides in the fragment
    pub url: String,
    pub msg: String,
}

impl std::fmt::Debug for Published {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Published")
            .field("uuid", &self.uuid)
            .field("url", &"[REDACTED]")
            .field("msg", &self.msg)
            .finish()
    }
}

/// The two lines shown to the user on success.
impl std::fmt::Display for Published {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Paste added successfully!")?;
        write!(f, "Share this url to your friends: {}", self.url)
    }
}

/// Resolve the inputs and publish them.
pub fn publish(
    options: &PasteOptions,
    stdin: &mut dyn InputStream,
    api: &ApiConfig,
    transport: &dyn Transport,
) -> PasteResult<Published> {
    tracing::debug!(stage = %Stage::Parsing);
    let inputs = resolve_inputs(options, stdin).inspect_err(log_failure)?;
    publish_inputs(&inputs, api, transport)
}

/// Publish already-validated inputs using the OS CSPRNG.
pub fn publish_inputs(
    inputs: &PlainInputs,
    api: &ApiConfig,
    transport: &dyn Transport,
) -> PasteResult<Published> {
    publish_inputs_with(&mut OsRng, inputs, api, transport)
}

/// Publish already-validated inputs, drawing all randomness from `rng`.
pub fn publish_inputs_with<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    inputs: &PlainInputs,
    api: &ApiConfig,
    transport: &dyn Transport,
) -> PasteResult<Published> {
    run_stages(rng, inputs, api, transport).inspect_err(log_failure)
}

fn run_stages<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    inputs: &PlainInputs,
    api: &ApiConfig,
    transport: &dyn Transport,
) -> PasteResult<Published> {
    tracing::debug!(stage = %Stage::Validated);

    let passphrase = generate_passphrase_with(rng)?;
    tracing::debug!(stage = %Stage::PassphraseReady);

    let document = build_document_with(rng, inputs, &passphrase)?;
    let body = document.to_json()?;
    tracing::debug!(stage = %Stage::EnvelopeBuilt, bytes = body.len());

    let reply = transport.post_json(&api.endpoint, body)?;
    tracing::debug!(stage = %Stage::Sent, status = reply.status);

    let response = interpret_reply(&reply)?;
    let url = api.share_url(&response.paste.uuid, passphrase.expose());
    tracing::info!(stage = %Stage::Succeeded, uuid = %response.paste.uuid, "paste published");

    Ok(Published {
        uuid: response.paste.uuid,
        url,
        msg: response.msg,
    })
}

fn log_failure(err: &PasteError) {
    tracing::debug!(stage = %Stage::Failed, kind = err.kind(), "publish aborted");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::PassphraseReady.to_string(), "passphrase-ready");
        assert_eq!(Stage::EnvelopeBuilt.to_string(), "envelope-built");
        assert_eq!(Stage::Failed.to_string(), "failed");
    }

    #[test]
    fn test_published_display_and_debug() {
        let published = Published {
            uuid: "abc".into(),
            url: "https://paste.me/paste/abc#deadbeef".into(),
            msg: "ok".into(),
        };

        assert_eq!(
            published.to_string(),
            "Paste added successfully!\n\
             Share this url to your friends: https://paste.me/paste/abc#deadbeef"
        );
        assert!(!format!("{published:?}").contains("deadbeef"));
    }
}
