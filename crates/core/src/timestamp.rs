//! Audit timestamps shared by persisted entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation / last-update instants.
///
/// Embed with `#[serde(flatten)]` so the fields sit next to the entity's own
/// fields on the wire (`createdAt`, `updatedAt`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timestamps {
    /// Both instants set to `at`.
    pub fn at(at: DateTime<Utc>) -> Self {
        Self {
            created_at: at,
            updated_at: at,
        }
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Record a modification at `at`. `updated_at` never moves backwards.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        if at > self.updated_at {
            self.updated_at = at;
        }
    }
}
