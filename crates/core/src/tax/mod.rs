//! Tax set-aside computation and VAT profile.
//!
//! Everything here except the profile/settings setters is pure: the engine
//! reads a slice of transactions and returns aggregates.

pub mod engine;
pub mod profile;
pub mod settings;
pub mod window;

#[cfg(test)]
mod engine_props;

pub use engine::{StreamBreakdown, TaxEngine, TaxSummary};
pub use profile::{Country, ReturnFrequency, TaxProfile, TaxProfilePatch, VatCode, VatRate, VatScope};
pub use settings::{TaxSetAsideMethod, TaxSettings};
pub use window::DateWindow;
