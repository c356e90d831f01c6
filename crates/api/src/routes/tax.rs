//! Tax summary, settings and VAT profile routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use barrkeh_core::close::SummaryPeriod;
use barrkeh_core::tax::{
    DateWindow, StreamBreakdown, TaxEngine, TaxProfile, TaxProfilePatch, TaxSettings, TaxSummary,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiResult};

/// Creates the tax routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tax/summary", get(get_summary))
        .route("/tax/settings", get(get_settings).put(update_settings))
        .route("/tax/profile", get(get_profile).patch(update_profile))
}

/// Reporting period selected by query parameters.
///
/// `year` and `month` pick a calendar month, `year` alone a calendar year.
/// Without either the current month is used.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// Calendar year.
    pub year: Option<i32>,
    /// Month 1-12; needs `year`.
    pub month: Option<u32>,
}

impl PeriodQuery {
    /// Resolves the query into a summary period.
    #[must_use]
    pub fn period(&self, today: NaiveDate) -> SummaryPeriod {
        match (self.year, self.month) {
            (Some(year), None) => SummaryPeriod::Year(year),
            (year, Some(month)) => SummaryPeriod::Month {
                year: year.unwrap_or_else(|| today.year()),
                month,
            },
            (None, None) => SummaryPeriod::Month {
                year: today.year(),
                month: today.month(),
            },
        }
    }

    /// Resolves the query into a date window. Without parameters the window
    /// runs from the first of the month through `today`.
    ///
    /// # Errors
    ///
    /// `Validation` for a month outside 1-12.
    pub fn window(&self, today: NaiveDate) -> ApiResult<DateWindow> {
        if self.year.is_none() && self.month.is_none() {
            return Ok(DateWindow::month_to_date(today));
        }
        Ok(self.period(today).window()?)
    }
}

/// Set-aside summary for a period.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummaryResponse {
    /// Covered window.
    pub window: DateWindow,
    /// Totals and the set-aside amount.
    pub summary: TaxSummary,
    /// Income split by revenue stream.
    pub by_stream: StreamBreakdown,
}

/// GET `/tax/summary?year=&month=`.
async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<TaxSummaryResponse>> {
    let window = query.window(state.book.today())?;
    let snapshot = state.book.snapshot().await;
    Ok(Json(TaxSummaryResponse {
        window,
        summary: TaxEngine::summarize(&snapshot.transactions, &window, &snapshot.tax_settings),
        by_stream: TaxEngine::income_by_stream(&snapshot.transactions, &window),
    }))
}

/// GET `/tax/settings`.
async fn get_settings(State(state): State<AppState>) -> Json<TaxSettings> {
    Json(state.book.snapshot().await.tax_settings)
}

/// PUT `/tax/settings`.
async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<TaxSettings>,
) -> ApiResult<Json<TaxSettings>> {
    let settings = state
        .book
        .write("update_tax_settings", |s| s.update_tax_settings(settings))
        .await?;
    Ok(Json(settings))
}

/// GET `/tax/profile`.
async fn get_profile(State(state): State<AppState>) -> Json<TaxProfile> {
    Json(state.book.snapshot().await.tax_profile.clone())
}

/// PATCH `/tax/profile`.
async fn update_profile(
    State(state): State<AppState>,
    Json(patch): Json<TaxProfilePatch>,
) -> ApiResult<Json<TaxProfile>> {
    let profile = state
        .book
        .write("update_tax_profile", |s| s.update_tax_profile(patch))
        .await?;
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    #[test]
    fn test_empty_query_is_month_to_date() {
        let window = PeriodQuery::default().window(today()).unwrap();
        assert_eq!(window, DateWindow::month_to_date(today()));
    }

    #[rstest]
    #[case(Some(2023), None, SummaryPeriod::Year(2023))]
    #[case(Some(2023), Some(11), SummaryPeriod::Month { year: 2023, month: 11 })]
    #[case(None, Some(1), SummaryPeriod::Month { year: 2024, month: 1 })]
    #[case(None, None, SummaryPeriod::Month { year: 2024, month: 3 })]
    fn test_period_resolution(
        #[case] year: Option<i32>,
        #[case] month: Option<u32>,
        #[case] expected: SummaryPeriod,
    ) {
        let query = PeriodQuery { year, month };
        assert_eq!(query.period(today()), expected);
    }

    #[test]
    fn test_bad_month_is_rejected() {
        let query = PeriodQuery {
            year: Some(2024),
            month: Some(13),
        };
        assert!(query.window(today()).is_err());
    }
}
