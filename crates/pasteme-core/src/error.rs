use std::path::PathBuf;

use thiserror::Error;

pub type PasteResult<T> = Result<T, PasteError>;

/// Exit code for input, validation, and local failures.
pub const EXIT_INPUT: u8 = 1;
/// Exit code when the request never got a response.
pub const EXIT_TRANSPORT: u8 = 15;
/// Exit code when a 200 response body could not be understood.
pub const EXIT_BAD_RESPONSE: u8 = 16;
/// Exit code for any HTTP status other than 200.
pub const EXIT_SERVER: u8 = 17;

#[derive(Debug, Error)]
pub enum PasteError {
    #[error("Please provide a name for your paste. Use the --help if in doubt.")]
    PasteName,

    #[error("Your paste has a length of 0. Try again, but this time try to put some content.")]
    PasteLength,

    #[error("You did not provide a valid expires flag. See --help for more insight on this one.")]
    ExpiresNotFound,

    #[error(
        "The file {} either does not exist or is a directory! Please provide a correct path!",
        .0.display()
    )]
    FileMissing(PathBuf),

    #[error("There was an error while reading the file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read the paste body from standard input: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Not enough entropy for random bytes! Please try again! ({0})")]
    Entropy(String),

    #[error("encryption failed: {0}")]
    Crypto(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("could not encode the paste request: {0}")]
    Encode(String),

    #[error(
        "There was some problem while sending the paste data. Please try again later or contact the site administrator. ({0})"
    )]
    Transport(String),

    #[error(
        "There was some error while pasting your data (HTTP {status}). Please try again later or contact the Paste.me admin!"
    )]
    Server { status: u16 },

    #[error(
        "We received an invalid response from the server. Please contact the site administrator. ({0})"
    )]
    BadResponse(String),
}

impl PasteError {
    /// Stable snake_case name of the error condition.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PasteName => "paste_name_error",
            Self::PasteLength => "paste_length_error",
            Self::ExpiresNotFound => "expires_not_found",
            Self::FileMissing(_) => "file_missing",
            Self::FileRead { .. } => "file_read_error",
            Self::Stdin(_) => "stdin_error",
            Self::Entropy(_) => "entropy_error",
            Self::Crypto(_) => "crypto_error",
            Self::Config(_) => "config_error",
            Self::Encode(_) => "encode_error",
            Self::Transport(_) => "transport_error",
            Self::Server { .. } => "server_error",
            Self::BadResponse(_) => "bad_response",
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Transport(_) => EXIT_TRANSPORT,
            Self::BadResponse(_) => EXIT_BAD_RESPONSE,
            Self::Server { .. } => EXIT_SERVER,
            _ => EXIT_INPUT,
        }
    }
}
