use serde::{Deserialize, Serialize};

use crate::error::{PasteError, PasteResult};

/// Expiry sent for self-destructing pastes; the service ignores it but the
/// web UI always sends a valid value.
pub const SELF_DESTRUCT_EXPIRES_MINUTES: u32 = 60;

/// Paste lifetimes accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expiry {
    FiveMinutes,
    TenMinutes,
    OneHour,
    OneDay,
    OneWeek,
    OneMonth,
}

impl Expiry {
    pub const ALL: [Expiry; 6] = [
        Expiry::FiveMinutes,
        Expiry::TenMinutes,
        Expiry::OneHour,
        Expiry::OneDay,
        Expiry::OneWeek,
        Expiry::OneMonth,
    ];

    pub fn minutes(self) -> u32 {
        match self {
            Expiry::FiveMinutes => 5,
            Expiry::TenMinutes => 10,
            Expiry::OneHour => 60,
            Expiry::OneDay => 1440,
            Expiry::OneWeek => 10080,
            Expiry::OneMonth => 43800,
        }
    }
}

impl TryFrom<i64> for Expiry {
    type Error = PasteError;

    fn try_from(minutes: i64) -> PasteResult<Self> {
        Expiry::ALL
            .into_iter()
            .find(|e| i64::from(e.minutes()) == minutes)
            .ok_or(PasteError::ExpiresNotFound)
    }
}

impl std::fmt::Display for Expiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

/// One encrypted field on the wire: hex salt, hex IV, hex `ciphertext || tag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedField {
    pub data: String,
    pub iv: String,
    pub salt: String,
}

/// `salt-iv-data`, the single-string form older clients exchanged.
impl std::fmt::Display for EncryptedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.salt, self.iv, self.data)
    }
}

/// An attached file: its encrypted base name and encrypted contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEnvelope {
    pub name: EncryptedField,
    pub content: EncryptedField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteFields {
    pub name: EncryptedField,
    pub body: EncryptedField,
}

/// The request document POSTed to the paste endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasteDocument {
    pub paste: PasteFields,
    pub files: Vec<FileEnvelope>,
    pub source_code: bool,
    pub self_destruct: bool,
    pub expires_minutes: u32,
}

impl PasteDocument {
    /// Serialize to compact JSON bytes
    pub fn to_json(&self) -> PasteResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| PasteError::Encode(e.to_string()))
    }
}

/// Body of a successful (200) response.
#[derive(Debug, Clone, Deserialize)]
pub struct PasteResponse {
    #[serde(default)]
    pub msg: String,
    pub paste: PasteRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasteRef {
    pub uuid: String,
}
