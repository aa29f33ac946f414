//! Reporting handlers for sales analytics and export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::render::{render_csv, render_pdf, ReportTable};
use crate::services::ReportingService;
use crate::AppState;
use shared::types::DateRange;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct TopSellersQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

fn reporting_service(state: &AppState) -> AppResult<ReportingService> {
    let cost_ratio = state
        .config
        .reporting
        .cost_ratio()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(ReportingService::new(state.db.clone(), cost_ratio))
}

/// Top sellers by quantity sold in the range
pub async fn top_selling_products(
    State(state): State<AppState>,
    Query(query): Query<TopSellersQuery>,
) -> AppResult<impl IntoResponse> {
    let service = reporting_service(&state)?;
    let range = DateRange::new(query.start_date, query.end_date);
    let rows = service.top_selling_products(&range, query.limit).await?;
    Ok(Json(serde_json::json!({ "top_selling_products": rows })))
}

/// Stock turnover rate per product in the range
pub async fn stock_turnover(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = reporting_service(&state)?;
    let range = DateRange::new(query.start_date, query.end_date);
    let rows = service.stock_turnover(&range).await?;
    Ok(Json(serde_json::json!({ "stock_turnover": rows })))
}

/// Revenue, cost, and profit per product in the range
pub async fn profit_analysis(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = reporting_service(&state)?;
    let range = DateRange::new(query.start_date, query.end_date);
    let rows = service.profit_analysis(&range).await?;
    Ok(Json(serde_json::json!({ "profit_analysis": rows })))
}

/// Export the profit report as CSV
pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = reporting_service(&state)?;
    let range = DateRange::new(query.start_date, query.end_date);
    let rows = service.profit_analysis(&range).await?;

    let table = ReportTable::profit(&rows, &range);
    let body = render_csv(&table)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_filename(&range, "csv")),
            ),
        ],
        body,
    ))
}

/// Export the profit report as PDF
pub async fn export_pdf(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = reporting_service(&state)?;
    let range = DateRange::new(query.start_date, query.end_date);
    let rows = service.profit_analysis(&range).await?;

    let table = ReportTable::profit(&rows, &range);
    let body = render_pdf(&table)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_filename(&range, "pdf")),
            ),
        ],
        body,
    ))
}

/// `report_{start}_{end}.{ext}` when both bounds were given, `report.{ext}`
/// otherwise.
fn export_filename(range: &DateRange, ext: &str) -> String {
    match range.file_suffix() {
        Some(suffix) => format!("report_{}.{}", suffix, ext),
        None => format!("report.{}", ext),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn filename_carries_both_bounds_or_neither() {
        let bounded = DateRange::new(Some(d(2025, 1, 1)), Some(d(2025, 3, 31)));
        assert_eq!(
            export_filename(&bounded, "csv"),
            "report_2025-01-01_2025-03-31.csv"
        );

        let open = DateRange::new(Some(d(2025, 1, 1)), None);
        assert_eq!(export_filename(&open, "pdf"), "report.pdf");
    }
}
