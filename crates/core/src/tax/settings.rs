//! Tax set-aside settings.

use barrkeh_shared::types::round_cents;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::state::FinanceState;

/// Base the set-aside percentage is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxSetAsideMethod {
    /// Income minus expenses.
    #[default]
    Profit,
    /// Income only.
    Revenue,
}

impl TaxSetAsideMethod {
    /// Lowercase label used in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profit => "profit",
            Self::Revenue => "revenue",
        }
    }
}

impl std::str::FromStr for TaxSetAsideMethod {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "profit" => Ok(Self::Profit),
            "revenue" => Ok(Self::Revenue),
            other => Err(FinanceError::validation(format!(
                "unknown set-aside method {other}"
            ))),
        }
    }
}

/// Percentage and base of the tax set-aside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSettings {
    /// Percentage in `[0, 100]`.
    pub set_aside_percent: Decimal,
    /// Profit or revenue.
    pub method: TaxSetAsideMethod,
}

impl Default for TaxSettings {
    fn default() -> Self {
        Self {
            set_aside_percent: Decimal::from(25),
            method: TaxSetAsideMethod::Profit,
        }
    }
}

impl TaxSettings {
    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// `Validation` when `percent` is outside `[0, 100]`.
    pub fn new(percent: Decimal, method: TaxSetAsideMethod) -> FinanceResult<Self> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(FinanceError::validation(format!(
                "tax set-aside percent must be between 0 and 100, got {percent}"
            )));
        }
        Ok(Self {
            set_aside_percent: percent,
            method,
        })
    }

    /// `max(0, base * percent / 100)` rounded to cents.
    #[must_use]
    pub fn set_aside(&self, base: Decimal) -> Decimal {
        let raw = base.checked_mul(self.set_aside_percent).map_or_else(
            || base / Decimal::ONE_HUNDRED * self.set_aside_percent,
            |product| product / Decimal::ONE_HUNDRED,
        );
        round_cents(raw.max(Decimal::ZERO))
    }
}

impl FinanceState {
    /// Replaces the tax settings after validating them.
    pub fn update_tax_settings(&mut self, settings: TaxSettings) -> FinanceResult<TaxSettings> {
        let settings = TaxSettings::new(settings.set_aside_percent, settings.method)?;
        self.tax_settings = settings;
        Ok(settings)
    }
}
