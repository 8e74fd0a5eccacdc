use crate::error::ReportsError;
use crate::models::{ReportListItem, ReportResponse};
use crate::render::render_text;
use crate::repository;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ihub_domain::constants::REPORTS_TAG;
use ihub_kernel::prelude::{ApiState, ChangeAction, EntityChanged, EntityKind, ListParams};
use tracing::warn;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(generate_report))
        .routes(routes!(list_reports))
        .routes(routes!(get_report))
        .routes(routes!(get_report_text))
}

#[utoipa::path(
    post,
    path = "/api/work-orders/{id}/report",
    tag = REPORTS_TAG,
    params(("id" = String, Path, description = "Work order ID")),
    responses(
        (status = 201, description = "Report generated", body = ReportResponse),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Work order is not completed"),
    )
)]
async fn generate_report(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ReportsError> {
    let report = repository::generate_report(&state.database, &id).await?;

    if let Err(error) = state.events.publish(EntityChanged::new(
        EntityKind::Report,
        &report.id,
        ChangeAction::Created,
    )) {
        warn!(%error, "Failed to publish report change event");
    }

    Ok((StatusCode::CREATED, Json(report)))
}

#[utoipa::path(
    get,
    path = "/api/reports",
    tag = REPORTS_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Reports, newest first", body = [ReportListItem]),
    )
)]
async fn list_reports(
    State(state): State<ApiState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ReportListItem>>, ReportsError> {
    let (limit, start) = params.effective();
    let reports = repository::list_reports(&state.database, limit, start).await?;
    Ok(Json(reports))
}

#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = REPORTS_TAG,
    params(("id" = String, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Structured report document", body = ReportResponse),
        (status = 404, description = "Report not found"),
    )
)]
async fn get_report(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ReportResponse>, ReportsError> {
    let report = repository::get_report(&state.database, &id).await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/reports/{id}/text",
    tag = REPORTS_TAG,
    params(("id" = String, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Plain-text rendering of the report", body = String),
        (status = 404, description = "Report not found"),
    )
)]
async fn get_report_text(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<String, ReportsError> {
    let report = repository::get_report(&state.database, &id).await?;
    Ok(render_text(&report))
}
