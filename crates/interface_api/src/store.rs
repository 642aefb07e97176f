//! In-memory transaction store
//!
//! Transactions are independent: the outer map lock is only held long
//! enough to look up or insert an entry, and each transaction carries its
//! own mutex so inquiries against different transactions run in parallel
//! while a single transaction sees one mutation at a time.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use core_kernel::TransactionId;
use domain_transfer::TransferTransaction;

/// Shared store of live transfer transactions
#[derive(Clone, Default)]
pub struct TransactionStore {
    inner: Arc<RwLock<HashMap<TransactionId, Arc<Mutex<TransferTransaction>>>>>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a transaction, replacing any prior entry with the same id
    pub async fn insert(&self, transaction: TransferTransaction) -> TransactionId {
        let id = transaction.id;
        self.inner
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(transaction)));
        id
    }

    /// Hands out the per-transaction handle for exclusive mutation
    pub async fn checkout(&self, id: TransactionId) -> Option<Arc<Mutex<TransferTransaction>>> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Point-in-time copy of a transaction
    pub async fn snapshot(&self, id: TransactionId) -> Option<TransferTransaction> {
        let handle = self.checkout(id).await?;
        let guard = handle.lock().await;
        Some(guard.clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Drops every stored transaction
    pub async fn reset(&self) {
        self.inner.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn insert_then_snapshot_round_trips() {
        let store = TransactionStore::new();
        let id = store.insert(TransferTransaction::new(Utc::now())).await;

        let snapshot = store.snapshot(id).await.expect("stored transaction");
        assert_eq!(snapshot.id, id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn checkout_mutations_are_visible_in_snapshots() {
        let store = TransactionStore::new();
        let start = Utc::now();
        let id = store.insert(TransferTransaction::new(start)).await;

        let handle = store.checkout(id).await.expect("stored transaction");
        {
            let mut txn = handle.lock().await;
            txn.append_status(
                domain_transfer::TransactionStatus::ManifestReceived,
                start + chrono::Duration::seconds(1),
                None,
                false,
            )
            .unwrap();
        }

        let snapshot = store.snapshot(id).await.unwrap();
        assert_eq!(snapshot.ledger.len(), 2);
    }

    #[tokio::test]
    async fn reset_empties_the_store() {
        let store = TransactionStore::new();
        store.insert(TransferTransaction::new(Utc::now())).await;
        store.reset().await;
        assert!(store.is_empty().await);
    }
}
