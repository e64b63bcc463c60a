// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The client side of patch synchronization.

use std::time::Instant;

use serde::Serialize;
use tessera_build::Transaction;

use crate::config::SyncConfig;
use crate::wire::{PatchRequest, PatchResponse};

/// Where the sync client is in its flush cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Nothing in flight; queued transactions flush on the next tick.
    Idle,
    /// A request is in flight.
    Sending,
    /// The last request failed in transit; retrying quietly.
    Recovering,
    /// Failures are surfaced to the user; retrying slowly, or parked.
    Error,
}

/// Why a request did not produce a response.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The server could not be reached, or answered with a server error.
    #[error("network failure: {0}")]
    Network(String),
    /// The caller may not edit the project.
    #[error("forbidden")]
    Forbidden,
}

/// Delivers one request and waits for its response.
pub trait Transport {
    /// Sends a request.
    fn send(&mut self, request: &PatchRequest) -> Result<PatchResponse, TransportError>;
}

impl<F> Transport for F
where
    F: FnMut(&PatchRequest) -> Result<PatchResponse, TransportError>,
{
    fn send(&mut self, request: &PatchRequest) -> Result<PatchResponse, TransportError> {
        self(request)
    }
}

/// Queues committed transactions and flushes them on a timer.
///
/// The embedder calls [`SyncClient::poll`] from its loop. Each poll sends at
/// most one request carrying every queued transaction, and only once the
/// interval of the current [`SyncStatus`] has elapsed. Since `poll` takes
/// `&mut self` and waits for the transport, two requests are never in
/// flight together.
///
/// A request that did not succeed is resent unchanged; transactions queued
/// meanwhile wait for the next one. The server recognizes a retry by its
/// last transaction id, even when the lost response hid a success.
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use tessera_build::Transaction;
/// use tessera_sync::{PatchRequest, PatchResponse, SyncClient, SyncConfig, SyncStatus, TransportError};
///
/// let mut client = SyncClient::new(SyncConfig::default(), "build", "project", 1);
/// client.enqueue([Transaction { transaction_id: "t-1".into(), changes: Vec::new() }]);
///
/// let start = Instant::now();
/// let mut offline =
///     |_: &PatchRequest| Err::<PatchResponse, _>(TransportError::Network("offline".into()));
/// assert_eq!(client.poll(start, &mut offline), SyncStatus::Recovering);
///
/// let mut online = |request: &PatchRequest| -> Result<PatchResponse, TransportError> {
///     assert_eq!(request.version, 1);
///     Ok(PatchResponse::Ok)
/// };
/// // Too early: the recovery interval has not elapsed.
/// assert_eq!(client.poll(start + Duration::from_millis(1000), &mut online), SyncStatus::Recovering);
/// assert_eq!(client.poll(start + Duration::from_millis(2000), &mut online), SyncStatus::Idle);
/// assert_eq!(client.version(), 2);
/// assert!(client.pending().is_empty());
/// ```
#[derive(Debug)]
pub struct SyncClient {
    config: SyncConfig,
    build_id: String,
    project_id: String,
    version: u64,
    queue: Vec<Transaction>,
    /// Length of the queue prefix sent by the unacknowledged request.
    unacknowledged: usize,
    status: SyncStatus,
    next_attempt: Option<Instant>,
    failures: u32,
    needs_rebase: bool,
    halted: bool,
    last_error: Option<String>,
}

impl SyncClient {
    /// Creates an idle client for a build loaded at `version`.
    #[must_use]
    pub fn new(config: SyncConfig, build_id: &str, project_id: &str, version: u64) -> Self {
        Self {
            config,
            build_id: build_id.into(),
            project_id: project_id.into(),
            version,
            queue: Vec::new(),
            unacknowledged: 0,
            status: SyncStatus::Idle,
            next_attempt: None,
            failures: 0,
            needs_rebase: false,
            halted: false,
            last_error: None,
        }
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// Returns the build version the queued transactions apply to.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the queued transactions, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[Transaction] {
        &self.queue
    }

    /// Returns `true` after a version mismatch until [`SyncClient::rebase`].
    #[must_use]
    pub fn needs_rebase(&self) -> bool {
        self.needs_rebase
    }

    /// Returns `true` after the server refused edit access.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Returns the message of the last rejected request, if the client is
    /// still failing.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns when the next poll may send, or `None` if it may send now.
    #[must_use]
    pub fn next_attempt(&self) -> Option<Instant> {
        self.next_attempt
    }

    /// Queues committed transactions.
    pub fn enqueue(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.queue.extend(transactions);
    }

    /// Resumes after a version mismatch, once the embedder reloaded the
    /// build at `version` and rebased or discarded the queue.
    pub fn rebase(&mut self, version: u64) {
        log::debug!("rebasing sync client onto version {version}");
        self.version = version;
        self.unacknowledged = 0;
        self.needs_rebase = false;
        self.failures = 0;
        self.last_error = None;
        self.status = SyncStatus::Idle;
        self.next_attempt = None;
    }

    /// Removes and returns every queued transaction.
    pub fn take_pending(&mut self) -> Vec<Transaction> {
        self.unacknowledged = 0;
        core::mem::take(&mut self.queue)
    }

    /// Runs one timer tick and returns the resulting status.
    ///
    /// An empty queue, a parked client or a tick before the current
    /// interval elapsed are no-ops.
    pub fn poll(&mut self, now: Instant, transport: &mut impl Transport) -> SyncStatus {
        if self.halted || self.needs_rebase || self.queue.is_empty() {
            return self.status;
        }
        if self.next_attempt.is_some_and(|due| now < due) {
            return self.status;
        }

        if self.unacknowledged == 0 {
            self.unacknowledged = self.queue.len();
        }
        let sent = self.unacknowledged;
        let request = PatchRequest {
            transactions: self.queue[..sent].to_vec(),
            build_id: self.build_id.clone(),
            project_id: self.project_id.clone(),
            version: self.version,
        };
        let previous = self.status;
        self.status = SyncStatus::Sending;
        log::debug!(
            "flushing {sent} transaction(s) against version {}",
            self.version
        );

        match transport.send(&request) {
            Ok(PatchResponse::Ok) => {
                // Transactions queued during the request stay for the next flush.
                self.queue.drain(..sent);
                self.unacknowledged = 0;
                self.version += 1;
                self.failures = 0;
                self.last_error = None;
                self.status = SyncStatus::Idle;
            }
            Ok(PatchResponse::VersionMismatched) => {
                log::warn!("build moved past version {}; rebase required", self.version);
                self.needs_rebase = true;
                self.status = SyncStatus::Error;
            }
            Ok(PatchResponse::Errors(message)) => {
                log::error!("patch request rejected: {message}");
                self.last_error = Some(message);
                self.status = SyncStatus::Error;
            }
            Err(TransportError::Forbidden) => {
                log::error!("edit access denied; sync halted");
                self.halted = true;
                self.last_error = Some(TransportError::Forbidden.to_string());
                self.status = SyncStatus::Error;
            }
            Err(TransportError::Network(message)) => {
                self.failures += 1;
                self.status = if previous == SyncStatus::Error
                    || self.failures > self.config.max_recovery_attempts
                {
                    SyncStatus::Error
                } else {
                    SyncStatus::Recovering
                };
                if self.status == SyncStatus::Error {
                    log::error!("sync failing after {} attempt(s): {message}", self.failures);
                } else {
                    log::warn!("sync attempt {} failed: {message}", self.failures);
                }
            }
        }
        self.next_attempt = Some(now + self.config.interval_for(self.status));
        self.status
    }
}
