//! Shared response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Plain status message body used by most mutation endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    /// Human-readable outcome description
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
