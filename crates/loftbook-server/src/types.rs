//! Shared API response types

use serde::Serialize;

/// Generic success acknowledgement.
#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
