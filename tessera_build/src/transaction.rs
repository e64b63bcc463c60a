// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transactions: atomic, ordered sets of namespaced patches.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::namespace::Namespace;
use crate::patch::Patch;

/// The patches one transaction applies to one namespace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    /// The patched namespace.
    pub namespace: Namespace,
    /// Patches, applied in order.
    pub patches: Vec<Patch>,
}

/// An atomic set of changes with a client-unique id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique id, used by the server to detect retries.
    pub transaction_id: String,
    /// Changes in application order.
    pub changes: Vec<Change>,
}

impl Transaction {
    /// Returns the namespaces this transaction touches, in first-touch order.
    pub fn namespaces(&self) -> impl Iterator<Item = Namespace> + '_ {
        let mut seen = Vec::new();
        self.changes.iter().filter_map(move |change| {
            if seen.contains(&change.namespace) {
                None
            } else {
                seen.push(change.namespace);
                Some(change.namespace)
            }
        })
    }
}

/// Committed transactions not yet handed to the sync client.
#[derive(Clone, Debug, Default)]
pub struct TransactionLog {
    pending: VecDeque<Transaction>,
}

impl TransactionLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transaction.
    pub fn push(&mut self, transaction: Transaction) {
        self.pending.push_back(transaction);
    }

    /// Removes and returns every pending transaction, oldest first.
    pub fn drain(&mut self) -> Vec<Transaction> {
        self.pending.drain(..).collect()
    }

    /// Returns the pending transactions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.pending.iter()
    }

    /// Returns the number of pending transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_shape_is_camel_case() {
        let transaction = Transaction {
            transaction_id: "c-1".into(),
            changes: vec![Change {
                namespace: Namespace::StyleSources,
                patches: vec![Patch::remove(["s"])],
            }],
        };
        assert_eq!(
            serde_json::to_value(&transaction).unwrap(),
            json!({
                "transactionId": "c-1",
                "changes": [{
                    "namespace": "styleSources",
                    "patches": [{ "op": "remove", "path": ["s"] }],
                }],
            })
        );
    }

    #[test]
    fn namespaces_are_deduplicated() {
        let change = |namespace| Change {
            namespace,
            patches: Vec::new(),
        };
        let transaction = Transaction {
            transaction_id: "t".into(),
            changes: vec![
                change(Namespace::Styles),
                change(Namespace::StyleSources),
                change(Namespace::Styles),
            ],
        };
        let namespaces: Vec<_> = transaction.namespaces().collect();
        assert_eq!(namespaces, [Namespace::Styles, Namespace::StyleSources]);
    }

    #[test]
    fn log_drains_in_order() {
        let mut log = TransactionLog::new();
        for id in ["a", "b"] {
            log.push(Transaction {
                transaction_id: id.into(),
                changes: Vec::new(),
            });
        }
        assert_eq!(log.len(), 2);
        let ids: Vec<_> = log.drain().into_iter().map(|t| t.transaction_id).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(log.is_empty());
    }
}
