//! Response interpretation

use pasteme_core::types::PasteResponse;
use pasteme_core::{PasteError, PasteResult};

use crate::transport::HttpReply;

/// Map a raw reply to the service's success document.
///
/// Only 200 counts as success. The body must be the nested
/// `{"msg": ..., "paste": {"uuid": ...}}` form with a non-empty uuid.
pub fn interpret_reply(reply: &HttpReply) -> PasteResult<PasteResponse> {
    if reply.status != 200 {
        return Err(PasteError::Server {
            status: reply.status,
        });
    }

    let response: PasteResponse = serde_json::from_slice(&reply.body)
        .map_err(|e| PasteError::BadResponse(e.to_string()))?;

    if response.paste.uuid.is_empty() {
        return Err(PasteError::BadResponse("empty paste uuid".into()));
    }

    tracing::debug!(msg = %response.msg, "paste accepted");
    Ok(response)
}
