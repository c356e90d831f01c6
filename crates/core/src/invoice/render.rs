//! Plain-text invoice export.

use barrkeh_shared::types::format_amount;

use super::types::Invoice;

/// Renders the text export of an invoice.
#[must_use]
pub fn render_invoice_text(invoice: &Invoice) -> String {
    let client = match &invoice.email {
        Some(email) => format!("{} ({email})", invoice.client),
        None => invoice.client.clone(),
    };
    format!(
        "Invoice {}\nClient: {client}\nAmount: {}{}\nDue: {}\nNotes: {}",
        invoice.number,
        invoice.currency.symbol(),
        format_amount(invoice.amount),
        invoice.due_date.format("%Y-%m-%d"),
        invoice.description.as_deref().unwrap_or("N/A"),
    )
}
