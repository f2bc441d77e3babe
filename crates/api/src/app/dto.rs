//! Response payloads placed in the envelope's `data` field.

use serde::{Deserialize, Serialize};

/// `GET /health` payload: `{"status":"OK"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}

/// `GET /database-health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub message: String,
}

impl DatabaseStatus {
    pub fn connected() -> Self {
        Self {
            message: "database connection successful".to_string(),
        }
    }
}
