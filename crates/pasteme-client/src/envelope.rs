//! Request assembly: seal every plaintext field and build the [`PasteDocument`].

use std::path::Path;

use pasteme_core::types::{
    FileEnvelope, PasteDocument, PasteFields, SELF_DESTRUCT_EXPIRES_MINUTES,
};
use pasteme_core::{PasteError, PasteResult};
use pasteme_crypto::{seal_field_with, Passphrase};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::input::{check_attachment, PlainInputs};

/// Build the request document using the OS CSPRNG.
pub fn build_document(inputs: &PlainInputs, passphrase: &Passphrase) -> PasteResult<PasteDocument> {
    build_document_with(&mut OsRng, inputs, passphrase)
}

/// Build the request document, drawing every salt and IV from `rng`.
///
/// Attachments keep the order they were given in. Any failure aborts the
/// whole document; nothing partial is returned.
pub fn build_document_with<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    inputs: &PlainInputs,
    passphrase: &Passphrase,
) -> PasteResult<PasteDocument> {
    let paste = PasteFields {
        name: seal_field_with(rng, passphrase, inputs.name.as_bytes())?,
        body: seal_field_with(rng, passphrase, &inputs.body)?,
    };

    let mut files = Vec::with_capacity(inputs.files.len());
    for path in &inputs.files {
        files.push(seal_attachment(rng, passphrase, path)?);
    }

    let expires_minutes = inputs
        .expiry
        .map(|e| e.minutes())
        .unwrap_or(SELF_DESTRUCT_EXPIRES_MINUTES);

    tracing::debug!(files = files.len(), expires_minutes, "envelope built");

    Ok(PasteDocument {
        paste,
        files,
        source_code: inputs.source_code,
        self_destruct: inputs.self_destruct,
        expires_minutes,
    })
}

/// Read an attachment whole and seal its base name and contents separately.
fn seal_attachment<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    passphrase: &Passphrase,
    path: &Path,
) -> PasteResult<FileEnvelope> {
    check_attachment(path)?;
    let base_name = path
        .file_name()
        .ok_or_else(|| PasteError::FileMissing(path.to_path_buf()))?
        .to_string_lossy();

    let content = std::fs::read(path).map_err(|source| PasteError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(bytes = content.len(), "attachment read");

    Ok(FileEnvelope {
        name: seal_field_with(rng, passphrase, base_name.as_bytes())?,
        content: seal_field_with(rng, passphrase, &content)?,
    })
}
