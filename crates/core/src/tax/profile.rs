//! VAT profile.
//!
//! Storage and validation only; no VAT return netting is computed.

use barrkeh_shared::types::VatRateId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{FinanceError, FinanceResult};
use crate::state::FinanceState;

/// Tax jurisdiction of the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Country {
    /// The Netherlands.
    #[default]
    #[serde(rename = "NL")]
    Nl,
}

/// Where a VAT rate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VatScope {
    /// Domestic supplies.
    Domestic,
    /// Intra-EU supplies.
    Eu,
    /// Exports outside the EU.
    NonEu,
}

/// VAT rate band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VatCode {
    /// Standard rate.
    High,
    /// Reduced rate.
    Low,
    /// Zero rated.
    Zero,
    /// Exempt.
    Exempt,
}

/// How often VAT returns are filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnFrequency {
    /// Every month.
    Monthly,
    /// Every quarter.
    Quarterly,
    /// Once a year.
    Yearly,
}

/// One VAT rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatRate {
    /// Identifier referenced by accounts.
    pub id: VatRateId,
    /// Display name.
    pub name: String,
    /// Percentage in `[0, 100]`.
    pub rate: Decimal,
    /// Scope.
    pub scope: VatScope,
    /// Band.
    pub code: VatCode,
}

/// VAT registration details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxProfile {
    /// Jurisdiction.
    pub country: Country,
    /// Small business scheme (KOR) enabled.
    pub kor_enabled: bool,
    /// Available VAT rates.
    pub vat_rates: Vec<VatRate>,
    /// Free-form notes on place-of-supply rules.
    pub place_of_supply_notes: String,
    /// VAT registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    /// Filing cadence.
    pub return_frequency: ReturnFrequency,
}

impl TaxProfile {
    /// Dutch defaults: 21% standard, 9% reduced, 0% intra-EU, quarterly
    /// returns, KOR off.
    #[must_use]
    pub fn default_nl() -> Self {
        let rate = |id: &str, name: &str, rate: u32, scope, code| VatRate {
            id: VatRateId::new(id),
            name: name.to_string(),
            rate: Decimal::from(rate),
            scope,
            code,
        };
        Self {
            country: Country::Nl,
            kor_enabled: false,
            vat_rates: vec![
                rate("VAT-HIGH", "Standard 21%", 21, VatScope::Domestic, VatCode::High),
                rate("VAT-LOW", "Reduced 9%", 9, VatScope::Domestic, VatCode::Low),
                rate("VAT-ZERO", "Zero Rated", 0, VatScope::Eu, VatCode::Zero),
            ],
            place_of_supply_notes: "EU B2C digital services: VAT based on customer location; \
                                    keep two pieces of evidence."
                .to_string(),
            vat_number: None,
            return_frequency: ReturnFrequency::Quarterly,
        }
    }

    /// Finds a rate by id.
    #[must_use]
    pub fn rate(&self, id: &VatRateId) -> Option<&VatRate> {
        self.vat_rates.iter().find(|r| &r.id == id)
    }
}

/// Partial update of the tax profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxProfilePatch {
    /// Toggle the small business scheme.
    pub kor_enabled: Option<bool>,
    /// Replace the full rate list.
    pub vat_rates: Option<Vec<VatRate>>,
    /// New notes.
    pub place_of_supply_notes: Option<String>,
    /// New VAT number.
    pub vat_number: Option<String>,
    /// New cadence.
    pub return_frequency: Option<ReturnFrequency>,
}

fn validate_rates(rates: &[VatRate]) -> FinanceResult<()> {
    let mut seen = HashSet::new();
    for rate in rates {
        if rate.rate < Decimal::ZERO || rate.rate > Decimal::ONE_HUNDRED {
            return Err(FinanceError::validation(format!(
                "VAT rate {} must be between 0 and 100",
                rate.id
            )));
        }
        if !seen.insert(&rate.id) {
            return Err(FinanceError::validation(format!(
                "duplicate VAT rate id {}",
                rate.id
            )));
        }
    }
    Ok(())
}

impl FinanceState {
    /// Merges a tax profile patch.
    ///
    /// # Errors
    ///
    /// `Validation` for a rate outside `[0, 100]` or a repeated rate id.
    pub fn update_tax_profile(&mut self, patch: TaxProfilePatch) -> FinanceResult<TaxProfile> {
        if let Some(rates) = &patch.vat_rates {
            validate_rates(rates)?;
        }

        let profile = &mut self.tax_profile;
        if let Some(kor_enabled) = patch.kor_enabled {
            profile.kor_enabled = kor_enabled;
        }
        if let Some(rates) = patch.vat_rates {
            profile.vat_rates = rates;
        }
        if let Some(notes) = patch.place_of_supply_notes {
            profile.place_of_supply_notes = notes;
        }
        if patch.vat_number.is_some() {
            profile.vat_number = patch.vat_number;
        }
        if let Some(frequency) = patch.return_frequency {
            profile.return_frequency = frequency;
        }
        Ok(profile.clone())
    }
}
