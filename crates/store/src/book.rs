//! Transactional service over the persisted finance state.
//!
//! Reads take a snapshot (`Arc<FinanceState>`) and never block writers for
//! longer than a pointer swap. Every mutation goes through one write gate:
//!
//! ```text
//! lock gate ─> clone snapshot ─> apply op ─> encode ─> put ─> swap snapshot
//!                                   │                   │
//!                                   └── Err ────────────┴──> drop clone
//! ```
//!
//! Because the gate is held from the counter read to the swap, two
//! concurrent invoice issuances can never observe the same counter value.

use std::sync::Arc;

use barrkeh_core::invoice::{Invoice, NewInvoice};
use barrkeh_core::ledger::{JournalEntry, NewJournalEntry};
use barrkeh_core::{FinanceResult, FinanceState};
use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::StoreResult;
use crate::kv::KeyValueStore;
use crate::snapshot;

/// The single owner of all finance writes.
pub struct FinanceBook {
    store: Arc<dyn KeyValueStore>,
    key: String,
    clock: Arc<dyn Clock>,
    current: RwLock<Arc<FinanceState>>,
    write_gate: Mutex<()>,
}

impl FinanceBook {
    /// Loads the state under `key`, or persists `seed` when the store has
    /// none yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored blob does not
    /// decode.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        seed: FinanceState,
    ) -> StoreResult<Self> {
        Self::open_with_clock(store, key, seed, Arc::new(SystemClock)).await
    }

    /// Like [`Self::open`] with an explicit time source.
    ///
    /// # Errors
    ///
    /// See [`Self::open`].
    pub async fn open_with_clock(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        seed: FinanceState,
        clock: Arc<dyn Clock>,
    ) -> StoreResult<Self> {
        let key = key.into();
        let state = if let Some(bytes) = store.get(&key).await? {
            let state = snapshot::decode(&bytes)?;
            debug!(
                key = %key,
                bytes = bytes.len(),
                transactions = state.transactions.len(),
                journal_entries = state.journal_entries.len(),
                "Loaded finance snapshot"
            );
            state
        } else {
            store.put(&key, snapshot::encode(&seed)?).await?;
            info!(key = %key, "Seeded new finance store");
            seed
        };

        Ok(Self {
            store,
            key,
            clock,
            current: RwLock::new(Arc::new(state)),
            write_gate: Mutex::new(()),
        })
    }

    /// Current state.
    pub async fn snapshot(&self) -> Arc<FinanceState> {
        Arc::clone(&*self.current.read().await)
    }

    /// Today's date per the book's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The book's clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Applies `op` to a copy of the state and commits it.
    ///
    /// The new state is persisted before it becomes visible. A rejected op
    /// or a failed persist leaves the previous snapshot in place.
    ///
    /// # Errors
    ///
    /// The op's `FinanceError`, or a backend/serialization error.
    pub async fn write<T, F>(&self, operation: &'static str, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut FinanceState) -> FinanceResult<T>,
    {
        let _gate = self.write_gate.lock().await;
        let mut next = FinanceState::clone(&*self.snapshot().await);

        let value = match op(&mut next) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    operation,
                    code = err.error_code(),
                    error = %err,
                    "Write rejected"
                );
                return Err(err.into());
            }
        };

        let bytes = snapshot::encode(&next)?;
        if let Err(err) = self.store.put(&self.key, bytes).await {
            warn!(operation, error = %err, "Persist failed, keeping previous snapshot");
            return Err(err);
        }
        *self.current.write().await = Arc::new(next);
        debug!(operation, "Write committed");
        Ok(value)
    }

    /// Posts a journal entry.
    ///
    /// # Errors
    ///
    /// See `FinanceState::post_entry`.
    pub async fn post_entry(&self, input: NewJournalEntry) -> StoreResult<JournalEntry> {
        let entry = self.write("post_entry", |s| s.post_entry(input)).await?;
        info!(
            entry_id = %entry.id,
            date = %entry.date,
            total = %entry.total_debit(),
            "Journal entry posted"
        );
        Ok(entry)
    }

    /// Issues the next numbered invoice.
    ///
    /// # Errors
    ///
    /// See `FinanceState::issue_invoice`.
    pub async fn issue_invoice(&self, input: NewInvoice) -> StoreResult<Invoice> {
        let today = self.clock.today();
        let now = self.clock.now();
        let invoice = self
            .write("issue_invoice", |s| s.issue_invoice(input, today, now))
            .await?;
        info!(
            invoice_id = %invoice.id,
            number = %invoice.number,
            amount = %invoice.amount,
            "Invoice issued"
        );
        Ok(invoice)
    }

    /// Moves the lock date forward and locks the journal through it.
    ///
    /// # Errors
    ///
    /// See `FinanceState::lock_period`.
    pub async fn lock_period(&self, date: NaiveDate) -> StoreResult<usize> {
        let now = self.clock.now();
        let locked = self.write("lock_period", |s| s.lock_period(date, now)).await?;
        info!(lock_date = %date, entries_locked = locked, "Period locked");
        Ok(locked)
    }

    /// Clears the lock date.
    ///
    /// # Errors
    ///
    /// See `FinanceState::unlock_period`.
    pub async fn unlock_period(&self, reason: &str) -> StoreResult<NaiveDate> {
        let now = self.clock.now();
        let previous = self
            .write("unlock_period", |s| s.unlock_period(reason, now))
            .await?;
        info!(previous_lock_date = %previous, reason, "Period unlocked");
        Ok(previous)
    }

    /// The persisted blob of the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub async fn export_blob(&self) -> StoreResult<Vec<u8>> {
        snapshot::encode(&*self.snapshot().await)
    }

    /// Replaces the whole state with a previously exported blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob does not decode or cannot be persisted;
    /// the current state is kept in that case.
    pub async fn import_blob(&self, bytes: &[u8]) -> StoreResult<Arc<FinanceState>> {
        let _gate = self.write_gate.lock().await;
        let state = Arc::new(snapshot::decode(bytes)?);
        self.store.put(&self.key, bytes.to_vec()).await?;
        *self.current.write().await = Arc::clone(&state);
        info!(
            bytes = bytes.len(),
            transactions = state.transactions.len(),
            invoices = state.invoices.len(),
            "Finance blob imported"
        );
        Ok(state)
    }
}
