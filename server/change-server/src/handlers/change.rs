use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::server::ChangeServer;
use crate::types::Change;

/// Largest request body `/change` will buffer
pub const MAX_CHANGE_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Acknowledgement returned for an accepted change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeAccepted {
    pub status: String,
    pub message: String,
    pub change: Change,
}

impl ChangeAccepted {
    pub fn new(change: Change) -> Self {
        Self {
            status: "accepted".to_string(),
            message: "Change request received successfully".to_string(),
            change,
        }
    }
}

/// Submit a change request
///
/// The body is taken as raw bytes so that malformed JSON is reported as
/// `invalid_request` instead of axum's extractor rejection. Body read
/// failures, including bodies over [`MAX_CHANGE_BODY_BYTES`], keep the JSON
/// error shape.
pub async fn submit_change(
    State(server): State<ChangeServer>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<ChangeAccepted>> {
    let body = body?;
    let change = server.validator().validate_payload(&body)?;
    Ok(Json(ChangeAccepted::new(change)))
}
