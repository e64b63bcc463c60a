// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request and response bodies of the patch endpoint.

use serde::{Deserialize, Serialize};
use tessera_build::Transaction;

/// Body of a patch request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchRequest {
    /// Transactions in commit order.
    pub transactions: Vec<Transaction>,
    /// The patched build.
    pub build_id: String,
    /// The project owning the build.
    pub project_id: String,
    /// The build version the transactions were made against.
    pub version: u64,
}

impl PatchRequest {
    /// Returns the id of the last transaction, used to detect retries of
    /// an already applied request.
    #[must_use]
    pub fn last_transaction_id(&self) -> Option<&str> {
        self.transactions
            .last()
            .map(|transaction| transaction.transaction_id.as_str())
    }
}

/// Body of a patch response.
///
/// On the wire this is `{"status":"ok"}`, `{"status":"version_mismatched"}`
/// or `{"errors":"..."}`.
///
/// ```rust
/// use tessera_sync::PatchResponse;
///
/// let json = serde_json::to_string(&PatchResponse::VersionMismatched).unwrap();
/// assert_eq!(json, r#"{"status":"version_mismatched"}"#);
/// let back: PatchResponse = serde_json::from_str(r#"{"errors":"nope"}"#).unwrap();
/// assert_eq!(back, PatchResponse::Errors("nope".into()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireResponse", into = "WireResponse")]
pub enum PatchResponse {
    /// Applied, or already applied earlier.
    Ok,
    /// The build moved on; reload and rebase before retrying.
    VersionMismatched,
    /// Rejected.
    Errors(String),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WireResponse {
    Status { status: WireStatus },
    Errors { errors: String },
}

#[derive(Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum WireStatus {
    Ok,
    VersionMismatched,
}

impl From<WireResponse> for PatchResponse {
    fn from(wire: WireResponse) -> Self {
        match wire {
            WireResponse::Status {
                status: WireStatus::Ok,
            } => Self::Ok,
            WireResponse::Status {
                status: WireStatus::VersionMismatched,
            } => Self::VersionMismatched,
            WireResponse::Errors { errors } => Self::Errors(errors),
        }
    }
}

impl From<PatchResponse> for WireResponse {
    fn from(response: PatchResponse) -> Self {
        match response {
            PatchResponse::Ok => Self::Status {
                status: WireStatus::Ok,
            },
            PatchResponse::VersionMismatched => Self::Status {
                status: WireStatus::VersionMismatched,
            },
            PatchResponse::Errors(errors) => Self::Errors { errors },
        }
    }
}
