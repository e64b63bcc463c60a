// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Sync: optimistic, versioned patch synchronization.
//!
//! The editor commits [`Transaction`](tessera_build::Transaction)s locally.
//! A [`SyncClient`] batches them into [`PatchRequest`]s against the build
//! version it last saw, and a [`PatchServer`] replays them on the stored
//! build.
//!
//! ## Client states
//!
//! ```text
//! idle ──flush──▶ sending ──ok──────────────▶ idle
//!                    │    ──network failure──▶ recovering ──(too many)──▶ error
//!                    │    ──errors / version_mismatched / forbidden──▶ error
//! ```
//!
//! Intervals per state come from [`SyncConfig`]. Any successful flush returns
//! the client to `idle`.
//!
//! ## Server guarantees
//!
//! - A retry of a request that was applied but whose response was lost is
//!   recognized by its last transaction id and acknowledged with `ok`.
//! - Patches, validation and persistence are all-or-nothing per request.
//! - Persistence is a compare-and-swap on the version through
//!   [`BuildStorage::update_if_version`]; of two concurrent requests against
//!   the same version exactly one wins.

mod client;
mod config;
mod error;
mod server;
mod storage;
mod validate;
mod wire;

pub use client::{SyncClient, SyncStatus, Transport, TransportError};
pub use config::SyncConfig;
pub use error::{ServerError, StorageError, ValidationError};
pub use server::{Authorizer, PatchServer};
pub use storage::{AssetPatcher, BuildRow, BuildStorage, MemoryStorage};
pub use validate::{Touched, validate_namespace};
pub use wire::{PatchRequest, PatchResponse};
