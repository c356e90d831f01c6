//! Persistence and write coordination for Barrkeh Books.
//!
//! This crate provides:
//! - `KeyValueStore`, the injected persistence port, with in-memory and
//!   OpenDAL file-system backends
//! - the blob codec for `FinanceState`
//! - `FinanceBook`, which serialises every mutation and commits it
//!   copy-on-write

pub mod book;
pub mod clock;
pub mod error;
pub mod kv;
pub mod snapshot;

pub use book::FinanceBook;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{StoreError, StoreResult};
pub use kv::{KeyValueStore, MemoryStore, OpendalStore, store_from_config};
