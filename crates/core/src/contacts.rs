//! Supplier and customer contacts.
//!
//! Contacts are referenced loosely by name from ledger entries and
//! transactions; nothing enforces the link.

use barrkeh_shared::types::{AccountId, CustomerId, SupplierId};
use serde::{Deserialize, Serialize};

use crate::accounts::Channel;
use crate::error::{FinanceError, FinanceResult};
use crate::state::FinanceState;

/// A supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Unique identifier.
    pub id: SupplierId,
    /// Name.
    pub name: String,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// VAT number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    /// Expense account bills from this supplier usually go to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_account_id: Option<AccountId>,
}

/// A customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier.
    pub id: CustomerId,
    /// Name.
    pub name: String,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// VAT number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    /// Country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Sales channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
}

/// Input for adding a supplier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    /// Required.
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// VAT number.
    #[serde(default)]
    pub vat_number: Option<String>,
    /// Default expense account.
    #[serde(default)]
    pub default_account_id: Option<AccountId>,
}

/// Input for adding a customer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    /// Required.
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// VAT number.
    #[serde(default)]
    pub vat_number: Option<String>,
    /// Country code.
    #[serde(default)]
    pub country: Option<String>,
    /// Sales channel.
    #[serde(default)]
    pub channel: Option<Channel>,
}

fn required_name(name: &str) -> FinanceResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FinanceError::validation("contact name is required"));
    }
    Ok(name.to_string())
}

impl FinanceState {
    /// Adds a supplier.
    pub fn add_supplier(&mut self, input: NewSupplier) -> FinanceResult<Supplier> {
        let supplier = Supplier {
            id: SupplierId::new(),
            name: required_name(&input.name)?,
            email: input.email,
            vat_number: input.vat_number,
            default_account_id: input.default_account_id,
        };
        self.suppliers.push(supplier.clone());
        Ok(supplier)
    }

    /// Adds a customer.
    pub fn add_customer(&mut self, input: NewCustomer) -> FinanceResult<Customer> {
        let customer = Customer {
            id: CustomerId::new(),
            name: required_name(&input.name)?,
            email: input.email,
            vat_number: input.vat_number,
            country: input.country,
            channel: input.channel,
        };
        self.customers.push(customer.clone());
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::TaxSettings;
    use chrono::NaiveDate;

    #[test]
    fn test_contacts_require_name() {
        let mut state = FinanceState::seeded(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            TaxSettings::default(),
        );
        assert!(
            state
                .add_supplier(NewSupplier {
                    name: " ".to_string(),
                    email: None,
                    vat_number: None,
                    default_account_id: None,
                })
                .is_err()
        );

        let customer = state
            .add_customer(NewCustomer {
                name: "Atelier Zuid".to_string(),
                email: Some("hi@atelierzuid.nl".to_string()),
                vat_number: None,
                country: Some("NL".to_string()),
                channel: Some(Channel::Services),
            })
            .unwrap();
        assert_eq!(state.customers, vec![customer]);
        assert!(state.suppliers.is_empty());
    }
}
