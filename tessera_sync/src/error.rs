// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tessera_build::{Namespace, PatchError};
use tessera_property::ValueError;

use crate::wire::PatchResponse;

/// Error returned by a [`BuildStorage`](crate::BuildStorage) or an
/// [`AssetPatcher`](crate::AssetPatcher).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("storage failure: {0}")]
pub struct StorageError(pub String);

/// A patched namespace does not match its schema.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The namespace is not a JSON object.
    #[error("`{0}` must be a keyed map")]
    NotAMap(Namespace),
    /// An entry of a map of records is not an object.
    #[error("`{namespace}` entry `{key}` must be an object")]
    NotAnObject {
        /// The namespace.
        namespace: Namespace,
        /// The entry key.
        key: String,
    },
    /// An entry does not decode.
    #[error("`{namespace}` entry `{key}` is malformed: {source}")]
    Malformed {
        /// The namespace.
        namespace: Namespace,
        /// The entry key.
        key: String,
        /// The decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// An entry is stored under a key other than the one it derives.
    #[error("`{namespace}` entry `{key}` must be stored under `{expected}`")]
    KeyMismatch {
        /// The namespace.
        namespace: Namespace,
        /// The key it is stored under.
        key: String,
        /// The key derived from the entry.
        expected: String,
    },
    /// A declaration holds an editor-only value.
    #[error("style `{key}` cannot be committed: {source}")]
    NotPersistable {
        /// The declaration key.
        key: String,
        /// Why the value was rejected.
        #[source]
        source: ValueError,
    },
    /// Breakpoints must contain exactly one base breakpoint.
    #[error("expected exactly one base breakpoint, found {0}")]
    BaseBreakpoints(usize),
}

/// Why the server rejected a request.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The body did not decode, e.g. an unknown namespace.
    #[error("malformed request: {0}")]
    Decode(#[from] serde_json::Error),
    /// The build id is empty.
    #[error("build id required")]
    MissingBuildId,
    /// The project id is empty.
    #[error("project id required")]
    MissingProjectId,
    /// There is nothing to apply.
    #[error("transactions required")]
    NoTransactions,
    /// The caller may not edit the project.
    #[error("you don't have edit access to this project")]
    PermissionDenied,
    /// No build row exists.
    #[error("build `{0}` not found")]
    BuildNotFound(String),
    /// A patch did not apply.
    #[error("transaction `{transaction_id}` failed on `{namespace}`: {source}")]
    Patch {
        /// The failing transaction.
        transaction_id: String,
        /// The failing namespace.
        namespace: Namespace,
        /// The patch failure.
        #[source]
        source: PatchError,
    },
    /// A patched namespace is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Loading or persisting failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServerError {
    /// Returns the wire response for this error.
    #[must_use]
    pub fn response(&self) -> PatchResponse {
        PatchResponse::Errors(self.to_string())
    }
}
