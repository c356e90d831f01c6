//! Fixed asset register with straight-line depreciation.

use barrkeh_shared::types::AssetItemId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::ledger::check_amount;
use crate::state::FinanceState;

/// Asset category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// Tools and equipment.
    Equipment,
    /// Computers, phones, tablets.
    Device,
    /// Office furniture.
    Furniture,
    /// Anything else.
    Other,
}

/// A fixed asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetItem {
    /// Unique identifier.
    pub id: AssetItemId,
    /// Name.
    pub name: String,
    /// Category.
    pub category: AssetCategory,
    /// Purchase value.
    pub value: Decimal,
    /// Value left at the end of the useful life.
    pub salvage_value: Decimal,
    /// Useful life in years.
    pub depreciation_years: u32,
    /// Date depreciation starts.
    pub start_date: NaiveDate,
    /// Disposed of.
    #[serde(default)]
    pub disposed: bool,
    /// When it was disposed of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposal_date: Option<NaiveDate>,
}

impl AssetItem {
    /// `(value - salvage) / years`.
    #[must_use]
    pub fn annual_depreciation(&self) -> Decimal {
        if self.depreciation_years == 0 {
            return Decimal::ZERO;
        }
        (self.value - self.salvage_value) / Decimal::from(self.depreciation_years)
    }

    /// Book value after the whole years elapsed by `as_of`, never below
    /// salvage. Depreciation stops at disposal.
    #[must_use]
    pub fn book_value(&self, as_of: NaiveDate) -> Decimal {
        let end = match self.disposal_date {
            Some(disposed_on) if self.disposed && disposed_on < as_of => disposed_on,
            _ => as_of,
        };
        let years = end
            .years_since(self.start_date)
            .unwrap_or(0)
            .min(self.depreciation_years);
        let depreciated = self.value - self.annual_depreciation() * Decimal::from(years);
        depreciated.max(self.salvage_value)
    }
}

/// Input for registering an asset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    /// Required.
    pub name: String,
    /// Defaults to other.
    #[serde(default = "default_category")]
    pub category: AssetCategory,
    /// Positive purchase value.
    pub value: Decimal,
    /// Between zero and `value`.
    #[serde(default)]
    pub salvage_value: Decimal,
    /// At least one year.
    pub depreciation_years: u32,
    /// Depreciation start.
    pub start_date: NaiveDate,
}

fn default_category() -> AssetCategory {
    AssetCategory::Other
}

impl FinanceState {
    /// Registers an asset.
    pub fn add_asset(&mut self, input: NewAsset) -> FinanceResult<AssetItem> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(FinanceError::validation("asset name is required"));
        }
        if input.value <= Decimal::ZERO {
            return Err(FinanceError::validation("asset value must be positive"));
        }
        check_amount(input.value, "asset value")?;
        if input.salvage_value < Decimal::ZERO || input.salvage_value > input.value {
            return Err(FinanceError::validation(
                "salvage value must be between zero and the asset value",
            ));
        }
        if input.depreciation_years == 0 {
            return Err(FinanceError::validation(
                "depreciation period must be at least one year",
            ));
        }

        let asset = AssetItem {
            id: AssetItemId::new(),
            name: name.to_string(),
            category: input.category,
            value: input.value,
            salvage_value: input.salvage_value,
            depreciation_years: input.depreciation_years,
            start_date: input.start_date,
            disposed: false,
            disposal_date: None,
        };
        self.assets.push(asset.clone());
        Ok(asset)
    }

    /// Marks an asset as disposed of on `date`.
    pub fn dispose_asset(&mut self, id: AssetItemId, date: NaiveDate) -> FinanceResult<AssetItem> {
        let asset = self
            .assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| FinanceError::not_found("asset", id))?;
        if asset.disposed {
            return Err(FinanceError::validation("asset is already disposed of"));
        }
        if date < asset.start_date {
            return Err(FinanceError::validation(
                "disposal cannot precede the start date",
            ));
        }
        asset.disposed = true;
        asset.disposal_date = Some(date);
        Ok(asset.clone())
    }
}
