//! Input resolution and validation
//!
//! Turns the caller's raw options plus standard input into [`PlainInputs`].
//! Checks run in a fixed order so the first failing one decides the error:
//! name, body, expiry, attachments. No randomness or crypto happens here.

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use pasteme_core::types::Expiry;
use pasteme_core::{PasteError, PasteResult};

/// Option values as delivered by the argument parser.
#[derive(Debug, Clone, Default)]
pub struct PasteOptions {
    pub name: Option<String>,
    pub body: Option<String>,
    pub expires: Option<i64>,
    pub destroy: bool,
    pub source: bool,
    pub files: Vec<PathBuf>,
}

/// Validated plaintext inputs for one paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainInputs {
    pub name: String,
    /// Raw bytes; piped input need not be UTF-8
    pub body: Vec<u8>,
    /// `None` when the paste self-destructs
    pub expiry: Option<Expiry>,
    pub self_destruct: bool,
    pub source_code: bool,
    pub files: Vec<PathBuf>,
}

/// A byte source standing in for standard input.
pub trait InputStream {
    /// True when attached to an interactive terminal (nothing piped in).
    fn is_terminal(&self) -> bool;

    /// Read everything up to end-of-file.
    fn read_all(&mut self) -> std::io::Result<Vec<u8>>;
}

impl InputStream for std::io::Stdin {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }

    fn read_all(&mut self) -> std::io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.lock().read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Resolve and validate the paste inputs.
///
/// Piped standard input takes precedence over `--body`; if the pipe turns out
/// to be empty the `--body` value is used instead.
pub fn resolve_inputs(
    options: &PasteOptions,
    stdin: &mut dyn InputStream,
) -> PasteResult<PlainInputs> {
    let name = match options.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(PasteError::PasteName),
    };

    let body = resolve_body(options.body.as_deref(), stdin)?;
    if body.is_empty() {
        return Err(PasteError::PasteLength);
    }

    let expiry = if options.destroy {
        None
    } else {
        let minutes = options.expires.ok_or(PasteError::ExpiresNotFound)?;
        Some(Expiry::try_from(minutes)?)
    };

    for path in &options.files {
        check_attachment(path)?;
    }

    tracing::debug!(
        body_len = body.len(),
        files = options.files.len(),
        self_destruct = options.destroy,
        "inputs validated"
    );

    Ok(PlainInputs {
        name,
        body,
        expiry,
        self_destruct: options.destroy,
        source_code: options.source,
        files: options.files.clone(),
    })
}

fn resolve_body(option: Option<&str>, stdin: &mut dyn InputStream) -> PasteResult<Vec<u8>> {
    if !stdin.is_terminal() {
        let piped = stdin.read_all().map_err(PasteError::Stdin)?;
        if !piped.is_empty() {
            tracing::debug!("paste body read from standard input");
            return Ok(piped);
        }
    }
    Ok(option.unwrap_or_default().as_bytes().to_vec())
}

/// An attachment must exist and must not be a directory.
pub fn check_attachment(path: &Path) -> PasteResult<()> {
    match std::fs::metadata(path) {
        Ok(meta) if !meta.is_dir() => Ok(()),
        _ => Err(PasteError::FileMissing(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct Terminal;

    impl InputStream for Terminal {
        fn is_terminal(&self) -> bool {
            true
        }

        fn read_all(&mut self) -> io::Result<Vec<u8>> {
            panic!("a terminal must not be read")
        }
    }

    struct Piped(Vec<u8>);

    impl InputStream for Piped {
        fn is_terminal(&self) -> bool {
            false
        }

        fn read_all(&mut self) -> io::Result<Vec<u8>> {
            Ok(std::mem::take(&mut self.0))
        }
    }

    struct BrokenPipe;

    impl InputStream for BrokenPipe {
        fn is_terminal(&self) -> bool {
            false
        }

        fn read_all(&mut self) -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
        }
    }

    fn options(name: &str, body: Option<&str>, expires: Option<i64>) -> PasteOptions {
        PasteOptions {
            name: Some(name.to_string()),
            body: body.map(str::to_string),
            expires,
            ..PasteOptions::default()
        }
    }

    #[test]
    fn test_missing_name() {
        let opts = PasteOptions {
            body: Some("hi".into()),
            expires: Some(5),
            ..PasteOptions::default()
        };
        let err = resolve_inputs(&opts, &mut Terminal).unwrap_err();
        assert_eq!(err.kind(), "paste_name_error");
    }

    #[test]
    fn test_empty_name_checked_before_stdin() {
        // reading BrokenPipe would fail, so stdin must not be touched yet
        let err = resolve_inputs(&options("", Some("hi"), Some(5)), &mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), "paste_name_error");
    }

    #[test]
    fn test_terminal_without_body() {
        let err = resolve_inputs(&options("t", None, Some(5)), &mut Terminal).unwrap_err();
        assert_eq!(err.kind(), "paste_length_error");
    }

    #[test]
    fn test_terminal_with_empty_body() {
        let err = resolve_inputs(&options("t", Some(""), Some(5)), &mut Terminal).unwrap_err();
        assert_eq!(err.kind(), "paste_length_error");
    }

    #[test]
    fn test_body_option_used_on_terminal() {
        let inputs = resolve_inputs(&options("t", Some("hello"), Some(5)), &mut Terminal).unwrap();
        assert_eq!(inputs.body, b"hello");
        assert_eq!(inputs.expiry, Some(Expiry::FiveMinutes));
    }

    #[test]
    fn test_piped_stdin_wins_over_body() {
        let mut stdin = Piped(b"from the pipe\n".to_vec());
        let inputs = resolve_inputs(&options("t", Some("hello"), Some(60)), &mut stdin).unwrap();
        assert_eq!(inputs.body, b"from the pipe\n");
    }

    #[test]
    fn test_non_utf8_pipe_kept_verbatim() {
        let mut stdin = Piped(b"caf\xe9\n".to_vec());
        let inputs = resolve_inputs(&options("t", None, Some(5)), &mut stdin).unwrap();
        assert_eq!(inputs.body, b"caf\xe9\n");
    }

    #[test]
    fn test_empty_pipe_falls_back_to_body() {
        let mut stdin = Piped(Vec::new());
        let inputs = resolve_inputs(&options("t", Some("hello"), Some(60)), &mut stdin).unwrap();
        assert_eq!(inputs.body, b"hello");
    }

    #[test]
    fn test_empty_pipe_and_no_body() {
        let err = resolve_inputs(&options("t", None, Some(60)), &mut Piped(Vec::new()))
            .unwrap_err();
        assert_eq!(err.kind(), "paste_length_error");
    }

    #[test]
    fn test_unreadable_stdin() {
        let err = resolve_inputs(&options("t", Some("hello"), Some(5)), &mut BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), "stdin_error");
    }

    #[test]
    fn test_missing_expires() {
        let err = resolve_inputs(&options("t", Some("hello"), None), &mut Terminal).unwrap_err();
        assert_eq!(err.kind(), "expires_not_found");
    }

    #[test]
    fn test_invalid_expires() {
        let err = resolve_inputs(&options("t", Some("hello"), Some(7)), &mut Terminal).unwrap_err();
        assert_eq!(err.kind(), "expires_not_found");
    }

    #[test]
    fn test_destroy_ignores_expires() {
        for expires in [None, Some(7), Some(5)] {
            let opts = PasteOptions {
                destroy: true,
                ..options("t", Some("hello"), expires)
            };
            let inputs = resolve_inputs(&opts, &mut Terminal).unwrap();
            assert!(inputs.self_destruct);
            assert_eq!(inputs.expiry, None);
        }
    }

    #[test]
    fn test_source_flag_copied() {
        let opts = PasteOptions {
            source: true,
            ..options("t", Some("fn main() {}"), Some(10))
        };
        assert!(resolve_inputs(&opts, &mut Terminal).unwrap().source_code);
    }

    #[test]
    fn test_missing_attachment() {
        let tmp = tempfile::TempDir::new().unwrap();
        let opts = PasteOptions {
            files: vec![tmp.path().join("nope.txt")],
            ..options("t", Some("hello"), Some(5))
        };
        let err = resolve_inputs(&opts, &mut Terminal).unwrap_err();
        assert_eq!(err.kind(), "file_missing");
    }

    #[test]
    fn test_directory_attachment() {
        let tmp = tempfile::TempDir::new().unwrap();
        let opts = PasteOptions {
            files: vec![tmp.path().to_path_buf()],
            ..options("t", Some("hello"), Some(5))
        };
        let err = resolve_inputs(&opts, &mut Terminal).unwrap_err();
        assert!(matches!(err, PasteError::FileMissing(p) if p == tmp.path()));
    }

    #[test]
    fn test_expires_checked_before_files() {
        let opts = PasteOptions {
            files: vec![PathBuf::from("/definitely/not/here")],
            ..options("t", Some("hello"), None)
        };
        let err = resolve_inputs(&opts, &mut Terminal).unwrap_err();
        assert_eq!(err.kind(), "expires_not_found");
    }
}
