//! Dashboard read model.

pub mod stats;

pub use stats::{DashboardStats, RECENT_TRANSACTIONS};
