// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Versioned build persistence.

use std::sync::{Mutex, PoisonError};

use hashbrown::HashMap;
use tessera_build::{BuildData, Patch};

use crate::error::StorageError;

/// The persisted state of one build.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildRow {
    /// Incremented by one on every applied request.
    pub version: u64,
    /// Id of the last transaction of the last applied request.
    pub last_transaction_id: Option<String>,
    /// Every namespace except `assets`, which lives elsewhere.
    pub data: BuildData,
}

/// Storage of build rows keyed by build and project id.
pub trait BuildStorage {
    /// Loads a row.
    fn load(&self, build_id: &str, project_id: &str) -> Result<Option<BuildRow>, StorageError>;

    /// Replaces a row only while its stored version is still
    /// `expected_version`, as one atomic conditional update.
    ///
    /// Returns the number of rows updated: `0` means another writer got
    /// there first.
    fn update_if_version(
        &self,
        build_id: &str,
        project_id: &str,
        expected_version: u64,
        row: BuildRow,
    ) -> Result<usize, StorageError>;
}

/// Receives `assets` patches once the rest of a request is persisted.
pub trait AssetPatcher {
    /// Applies asset patches for a project.
    fn patch_assets(&self, project_id: &str, patches: &[Patch]) -> Result<(), StorageError>;
}

impl AssetPatcher for () {
    fn patch_assets(&self, _project_id: &str, _patches: &[Patch]) -> Result<(), StorageError> {
        Ok(())
    }
}

impl<T: AssetPatcher + ?Sized> AssetPatcher for &T {
    fn patch_assets(&self, project_id: &str, patches: &[Patch]) -> Result<(), StorageError> {
        (**self).patch_assets(project_id, patches)
    }
}

/// In-memory [`BuildStorage`].
///
/// The conditional update runs under one lock, so it has no window between
/// the version read and the write.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    rows: Mutex<HashMap<(String, String), BuildRow>>,
}

impl MemoryStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a row unconditionally.
    pub fn insert(&self, build_id: &str, project_id: &str, row: BuildRow) {
        self.lock()
            .insert((build_id.into(), project_id.into()), row);
    }

    /// Returns a copy of a row.
    #[must_use]
    pub fn get(&self, build_id: &str, project_id: &str) -> Option<BuildRow> {
        self.lock()
            .get(&(build_id.into(), project_id.into()))
            .cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), BuildRow>> {
        // A panicking writer never leaves a row half-replaced.
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BuildStorage for MemoryStorage {
    fn load(&self, build_id: &str, project_id: &str) -> Result<Option<BuildRow>, StorageError> {
        Ok(self.get(build_id, project_id))
    }

    fn update_if_version(
        &self,
        build_id: &str,
        project_id: &str,
        expected_version: u64,
        row: BuildRow,
    ) -> Result<usize, StorageError> {
        let mut rows = self.lock();
        match rows.get_mut(&(build_id.into(), project_id.into())) {
            Some(stored) if stored.version == expected_version => {
                *stored = row;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
