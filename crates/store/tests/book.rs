//! Integration tests for `FinanceBook` over the in-memory and file stores.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use barrkeh_core::invoice::NewInvoice;
use barrkeh_core::ledger::{JournalLineInput, JournalSource, NewJournalEntry};
use barrkeh_core::subledger::{CounterpartyKind, NewLedgerEntry};
use barrkeh_core::tax::TaxSettings;
use barrkeh_core::transactions::{NewTransaction, TransactionType};
use barrkeh_core::{FinanceError, FinanceState};
use barrkeh_shared::types::Currency;
use barrkeh_store::{
    FinanceBook, FixedClock, KeyValueStore, MemoryStore, OpendalStore, StoreError, StoreResult,
};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const KEY: &str = "barrkeh-super-system";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seed() -> FinanceState {
    FinanceState::seeded(date(2024, 1, 1), TaxSettings::default())
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap()))
}

async fn memory_book() -> (Arc<MemoryStore>, FinanceBook) {
    let store = Arc::new(MemoryStore::new());
    let book = FinanceBook::open_with_clock(store.clone(), KEY, seed(), clock())
        .await
        .unwrap();
    (store, book)
}

fn journal(day: NaiveDate, amount: Decimal) -> NewJournalEntry {
    NewJournalEntry {
        date: day,
        description: "Owner contribution".to_string(),
        lines: vec![
            JournalLineInput::debit("1100", amount),
            JournalLineInput::credit("3000", amount),
        ],
        source: JournalSource::Manual,
        reference: None,
        allow_locked_period: false,
    }
}

/// Store whose writes can be switched to fail.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("disk unavailable".to_string()));
        }
        self.inner.put(key, value).await
    }
}

#[tokio::test]
async fn test_open_seeds_and_reopens() {
    let (store, book) = memory_book().await;
    assert!(store.get(KEY).await.unwrap().is_some());

    book.post_entry(journal(date(2024, 2, 1), dec!(500))).await.unwrap();

    let reopened = FinanceBook::open(store.clone(), KEY, seed()).await.unwrap();
    assert_eq!(reopened.snapshot().await.journal_entries.len(), 1);
}

#[tokio::test]
async fn test_concurrent_invoice_numbers_are_unique() {
    let (_, book) = memory_book().await;
    let book = Arc::new(book);

    let tasks: Vec<_> = (0..25)
        .map(|i| {
            let book = Arc::clone(&book);
            tokio::spawn(async move {
                book.issue_invoice(NewInvoice::new(format!("Client {i}"), dec!(100)))
                    .await
                    .map(|inv| inv.number)
            })
        })
        .collect();

    let mut numbers: Vec<String> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();
    numbers.sort();

    let expected: Vec<String> = (1..=25).map(|n| format!("INV-2024-{n:03}")).collect();
    assert_eq!(numbers, expected);

    let state = book.snapshot().await;
    assert_eq!(state.fiscal_settings.next_invoice_number, 26);
    assert_eq!(state.invoices.len(), 25);
    assert_eq!(state.journal_entries.len(), 25);
}

#[tokio::test]
async fn test_rejected_write_keeps_snapshot() {
    let (_, book) = memory_book().await;
    let before = book.snapshot().await;

    let mut unbalanced = journal(date(2024, 2, 1), dec!(100));
    unbalanced.lines[1].credit = dec!(90);
    let err = book.post_entry(unbalanced).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Finance(FinanceError::UnbalancedEntry { .. })
    ));
    assert!(Arc::ptr_eq(&before, &book.snapshot().await));
}

#[tokio::test]
async fn test_failed_persist_keeps_snapshot() {
    let store = Arc::new(FlakyStore::default());
    let book = FinanceBook::open_with_clock(store.clone(), KEY, seed(), clock())
        .await
        .unwrap();

    store.failing.store(true, Ordering::SeqCst);
    let err = book.issue_invoice(NewInvoice::new("Client", dec!(50))).await.unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));
    assert!(err.is_retryable());

    let state = book.snapshot().await;
    assert!(state.invoices.is_empty());
    assert_eq!(state.fiscal_settings.next_invoice_number, 1);

    store.failing.store(false, Ordering::SeqCst);
    let invoice = book.issue_invoice(NewInvoice::new("Client", dec!(50))).await.unwrap();
    assert_eq!(invoice.number, "INV-2024-001");
}

#[tokio::test]
async fn test_period_lock_enforcement() {
    let (_, book) = memory_book().await;
    book.post_entry(journal(date(2024, 1, 10), dec!(10))).await.unwrap();
    assert_eq!(book.lock_period(date(2024, 1, 31)).await.unwrap(), 1);

    let err = book.post_entry(journal(date(2024, 1, 15), dec!(10))).await.unwrap_err();
    assert_eq!(err.error_code(), "PERIOD_LOCKED");
    book.post_entry(journal(date(2024, 2, 1), dec!(10))).await.unwrap();

    let previous = book.unlock_period("Correct January bank fee").await.unwrap();
    assert_eq!(previous, date(2024, 1, 31));
    book.post_entry(journal(date(2024, 1, 15), dec!(10))).await.unwrap();

    let state = book.snapshot().await;
    assert_eq!(state.fiscal_settings.lock_history.len(), 2);
    // Entries locked by the close stay locked after an unlock.
    assert!(state.journal_entries[0].locked);
}

#[tokio::test]
async fn test_blob_roundtrip_is_lossless() {
    let (_, book) = memory_book().await;
    book.issue_invoice(NewInvoice::new("Studio Noord", dec!(450.50)))
        .await
        .unwrap();
    book.write("add_ledger_entry", |s| {
        s.add_ledger_entry(
            NewLedgerEntry {
                kind: CounterpartyKind::Creditor,
                name: "Print shop".to_string(),
                balance: dec!(80),
                currency: Currency::Eur,
                due_date: Some(date(2024, 3, 31)),
                contact_email: None,
                notes: None,
            },
            Utc::now(),
        )
    })
    .await
    .unwrap();
    book.write("record_transaction", |s| {
        s.record_transaction(
            NewTransaction {
                transaction_type: TransactionType::Expense,
                amount: dec!(19.99),
                currency: Currency::Eur,
                category: "Software".to_string(),
                stream: None,
                counterparty: None,
                counterparty_kind: None,
                status: None,
                account_id: None,
                description: "Font license".to_string(),
                vat_relevant: true,
                receipt_id: None,
                date: date(2024, 3, 1),
            },
            Utc::now(),
        )
    })
    .await
    .unwrap();

    let blob = book.export_blob().await.unwrap();
    let (_, other) = memory_book().await;
    let imported = other.import_blob(&blob).await.unwrap();

    assert_eq!(*imported, *book.snapshot().await);
    assert_eq!(other.export_blob().await.unwrap(), blob);
}

#[tokio::test]
async fn test_import_rejects_garbage() {
    let (_, book) = memory_book().await;
    let before = book.snapshot().await;
    let err = book.import_blob(b"{\"version\": \"nope\"}").await.unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));
    assert_eq!(err.http_status_code(), 400);
    assert!(Arc::ptr_eq(&before, &book.snapshot().await));
}

#[tokio::test]
async fn test_import_rejects_blobs_that_break_invariants() {
    let (store, book) = memory_book().await;
    book.issue_invoice(NewInvoice::new("Studio Noord", dec!(450)))
        .await
        .unwrap();
    let blob = book.export_blob().await.unwrap();
    let before = book.snapshot().await;

    let corruptions: [fn(&mut serde_json::Value); 4] = [
        |v| v["journalEntries"][0]["lines"][1]["credit"] = "1".into(),
        |v| v["taxSettings"]["setAsidePercent"] = "500".into(),
        |v| v["fiscalSettings"]["nextInvoiceNumber"] = 1.into(),
        |v| {
            let copy = v["chartOfAccounts"][0].clone();
            v["chartOfAccounts"].as_array_mut().unwrap().push(copy);
        },
    ];
    for corrupt in corruptions {
        let mut value: serde_json::Value = serde_json::from_slice(&blob).unwrap();
        corrupt(&mut value);
        let bytes = serde_json::to_vec(&value).unwrap();

        let err = book.import_blob(&bytes).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
        assert_eq!(err.http_status_code(), 400);
        assert!(Arc::ptr_eq(&before, &book.snapshot().await));
        assert_eq!(store.get(KEY).await.unwrap(), Some(blob.clone()));
    }
}

#[tokio::test]
async fn test_open_refuses_a_corrupted_stored_blob() {
    let (store, book) = memory_book().await;
    book.issue_invoice(NewInvoice::new("Studio Noord", dec!(450)))
        .await
        .unwrap();
    let mut value: serde_json::Value =
        serde_json::from_slice(&book.export_blob().await.unwrap()).unwrap();
    value["journalEntries"][0]["lines"][0]["debit"] = "449".into();
    store.put(KEY, serde_json::to_vec(&value).unwrap()).await.unwrap();

    let reopened = FinanceBook::open_with_clock(store, KEY, seed(), clock()).await;
    assert!(matches!(reopened, Err(StoreError::Serialization(_))));
}

#[tokio::test]
async fn test_file_store_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(OpendalStore::local_fs(dir.path()).unwrap());
    assert_eq!(store.get("missing").await.unwrap(), None);

    let book = FinanceBook::open_with_clock(store.clone(), KEY, seed(), clock())
        .await
        .unwrap();
    let invoice = book
        .issue_invoice(NewInvoice::new("Atelier Zuid", dec!(1200)))
        .await
        .unwrap();
    drop(book);

    let reopened = FinanceBook::open(
        Arc::new(OpendalStore::local_fs(dir.path()).unwrap()),
        KEY,
        seed(),
    )
    .await
    .unwrap();
    let state = reopened.snapshot().await;
    assert_eq!(state.invoices, vec![invoice]);
    assert_eq!(state.fiscal_settings.next_invoice_number, 2);
}
