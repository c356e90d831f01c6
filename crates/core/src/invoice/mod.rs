//! Invoice issuer.
//!
//! Numbers come from the fiscal counter (`prefix + zero-padded sequence`)
//! and are never reused; there is no invoice delete.

pub mod render;
pub mod service;
pub mod types;

#[cfg(test)]
mod invoice_props;

pub use render::render_invoice_text;
pub use service::DEFAULT_PAYMENT_TERM_DAYS;
pub use types::{Invoice, InvoiceStatus, NewInvoice};
