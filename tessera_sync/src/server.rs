// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The server side of patch synchronization.

use std::collections::BTreeMap;

use tessera_build::{Namespace, Patch};

use crate::error::ServerError;
use crate::storage::{AssetPatcher, BuildRow, BuildStorage};
use crate::validate::{Touched, validate_namespace};
use crate::wire::{PatchRequest, PatchResponse};

/// Decides whether an actor may edit a project.
pub trait Authorizer {
    /// Returns `true` if `actor` holds edit access to `project_id`.
    fn can_edit(&self, actor: &str, project_id: &str) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn(&str, &str) -> bool,
{
    fn can_edit(&self, actor: &str, project_id: &str) -> bool {
        self(actor, project_id)
    }
}

/// Applies patch requests to versioned builds.
///
/// A request is applied all-or-nothing: its transactions are replayed on a
/// copy of the stored build, every touched namespace is validated, and the
/// copy is persisted with a conditional update on the version the request
/// was made against. A concurrent writer that got there first turns the
/// request into [`PatchResponse::VersionMismatched`].
///
/// ```rust
/// use tessera_build::{BuildData, Change, Namespace, Patch, Transaction};
/// use tessera_sync::{BuildRow, MemoryStorage, PatchRequest, PatchResponse, PatchServer};
///
/// let storage = MemoryStorage::new();
/// storage.insert("build", "project", BuildRow {
///     version: 1,
///     last_transaction_id: None,
///     data: BuildData::new(),
/// });
/// let server = PatchServer::new(storage, (), |_: &str, _: &str| true);
///
/// let request = PatchRequest {
///     transactions: vec![Transaction {
///         transaction_id: "t-1".into(),
///         changes: vec![Change {
///             namespace: Namespace::Props,
///             patches: vec![Patch::add(["p"], serde_json::json!({ "id": "p" }))],
///         }],
///     }],
///     build_id: "build".into(),
///     project_id: "project".into(),
///     version: 1,
/// };
/// assert_eq!(server.handle("alice", &request), PatchResponse::Ok);
/// // A retry whose response got lost is acknowledged again.
/// assert_eq!(server.handle("alice", &request), PatchResponse::Ok);
/// assert_eq!(server.storage().get("build", "project").unwrap().version, 2);
/// ```
#[derive(Debug)]
pub struct PatchServer<S, A, P> {
    storage: S,
    assets: A,
    authorizer: P,
}

impl<S, A, P> PatchServer<S, A, P>
where
    S: BuildStorage,
    A: AssetPatcher,
    P: Authorizer,
{
    /// Creates a server.
    pub fn new(storage: S, assets: A, authorizer: P) -> Self {
        Self {
            storage,
            assets,
            authorizer,
        }
    }

    /// Returns the storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Handles a JSON request body.
    pub fn handle_json(&self, actor: &str, body: &str) -> PatchResponse {
        match serde_json::from_str::<PatchRequest>(body) {
            Ok(request) => self.handle(actor, &request),
            Err(err) => {
                let err = ServerError::from(err);
                log::warn!("{err}");
                err.response()
            }
        }
    }

    /// Handles a request.
    pub fn handle(&self, actor: &str, request: &PatchRequest) -> PatchResponse {
        match self.try_handle(actor, request) {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    ServerError::PermissionDenied | ServerError::Storage(_) => {
                        log::error!("rejecting patch for {}: {err}", request.build_id);
                    }
                    _ => log::warn!("rejecting patch for {}: {err}", request.build_id),
                }
                err.response()
            }
        }
    }

    /// Handles a request, keeping failures typed.
    pub fn try_handle(
        &self,
        actor: &str,
        request: &PatchRequest,
    ) -> Result<PatchResponse, ServerError> {
        if request.build_id.is_empty() {
            return Err(ServerError::MissingBuildId);
        }
        if request.project_id.is_empty() {
            return Err(ServerError::MissingProjectId);
        }
        let Some(last_transaction_id) = request.last_transaction_id() else {
            return Err(ServerError::NoTransactions);
        };
        if !self.authorizer.can_edit(actor, &request.project_id) {
            return Err(ServerError::PermissionDenied);
        }
        let row = self
            .storage
            .load(&request.build_id, &request.project_id)?
            .ok_or_else(|| ServerError::BuildNotFound(request.build_id.clone()))?;

        if row.version != request.version {
            if row.last_transaction_id.as_deref() == Some(last_transaction_id) {
                log::debug!(
                    "{last_transaction_id} already applied to {}",
                    request.build_id
                );
                return Ok(PatchResponse::Ok);
            }
            log::warn!(
                "{} is at version {}, request made against {}",
                request.build_id,
                row.version,
                request.version
            );
            return Ok(PatchResponse::VersionMismatched);
        }

        let mut data = row.data;
        let mut touched: BTreeMap<Namespace, Touched> = BTreeMap::new();
        let mut asset_patches: Vec<Patch> = Vec::new();
        for transaction in &request.transactions {
            for change in &transaction.changes {
                if change.namespace == Namespace::Assets {
                    asset_patches.extend(change.patches.iter().cloned());
                    continue;
                }
                data.apply(change).map_err(|source| ServerError::Patch {
                    transaction_id: transaction.transaction_id.clone(),
                    namespace: change.namespace,
                    source,
                })?;
                let entries = touched.entry(change.namespace).or_default();
                for patch in &change.patches {
                    entries.record(patch);
                }
            }
        }
        log::debug!(
            "applied {} transaction(s) to {} touching {:?}",
            request.transactions.len(),
            request.build_id,
            touched.keys().collect::<Vec<_>>()
        );

        for (namespace, entries) in &touched {
            validate_namespace(*namespace, data.get(*namespace), entries)?;
        }

        let updated = self.storage.update_if_version(
            &request.build_id,
            &request.project_id,
            request.version,
            BuildRow {
                version: request.version + 1,
                last_transaction_id: Some(last_transaction_id.into()),
                data,
            },
        )?;
        if updated == 0 {
            log::warn!("lost the version race on {}", request.build_id);
            return Ok(PatchResponse::VersionMismatched);
        }

        if !asset_patches.is_empty() {
            self.assets
                .patch_assets(&request.project_id, &asset_patches)?;
        }
        Ok(PatchResponse::Ok)
    }
}
