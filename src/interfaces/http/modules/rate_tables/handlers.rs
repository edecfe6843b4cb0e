//! Rate table handlers (TRANSPORTADOR, own tables only)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AddRowRequest, CreateRateTableRequest, RateTableDetailDto, RateTableDto, RateTableRowDto,
    RenameRateTableRequest, SetActiveRequest,
};
use crate::application::RateTableService;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/api/v1/rate-tables",
    tag = "Rate Tables",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's rate tables", body = ApiResponse<Vec<RateTableDto>>),
        (status = 403, description = "Caller is not linked to a carrier")
    )
)]
pub async fn list_rate_tables(
    State(tables): State<Arc<RateTableService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<RateTableDto>> {
    let list = tables.list_tables(&actor).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        list.into_iter().map(RateTableDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/rate-tables",
    tag = "Rate Tables",
    security(("bearer_auth" = [])),
    request_body = CreateRateTableRequest,
    responses(
        (status = 201, description = "Table created", body = ApiResponse<RateTableDto>),
        (status = 403, description = "Caller is not linked to a carrier")
    )
)]
pub async fn create_rate_table(
    State(tables): State<Arc<RateTableService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<CreateRateTableRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RateTableDto>>), ApiError> {
    let table = tables
        .create_table(&actor, body.name.as_deref())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(table.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/rate-tables/{id}",
    tag = "Rate Tables",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Rate table ID")),
    responses(
        (status = 200, description = "Table and rows", body = ApiResponse<RateTableDetailDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_rate_table(
    State(tables): State<Arc<RateTableService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<RateTableDetailDto> {
    let (table, rows) = tables.get_table(&actor, &id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(RateTableDetailDto {
        table: table.into(),
        rows: rows.into_iter().map(RateTableRowDto::from).collect(),
    })))
}

#[utoipa::path(
    put,
    path = "/api/v1/rate-tables/{id}",
    tag = "Rate Tables",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Rate table ID")),
    request_body = RenameRateTableRequest,
    responses(
        (status = 200, description = "Table renamed", body = ApiResponse<RateTableDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn rename_rate_table(
    State(tables): State<Arc<RateTableService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<RenameRateTableRequest>,
) -> ApiResult<RateTableDto> {
    let table = tables
        .rename_table(&actor, &id, &body.name)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(table.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/rate-tables/{id}/active",
    tag = "Rate Tables",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Rate table ID")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Table (de)activated", body = ApiResponse<RateTableDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn set_rate_table_active(
    State(tables): State<Arc<RateTableService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<SetActiveRequest>,
) -> ApiResult<RateTableDto> {
    let table = tables
        .set_table_active(&actor, &id, body.is_active)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(table.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/rate-tables/{id}/rows",
    tag = "Rate Tables",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Rate table ID")),
    request_body = AddRowRequest,
    responses(
        (status = 201, description = "Row added", body = ApiResponse<RateTableRowDto>),
        (status = 400, description = "Invalid UF, weight band or price"),
        (status = 404, description = "Table not found")
    )
)]
pub async fn add_rate_row(
    State(tables): State<Arc<RateTableService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<AddRowRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RateTableRowDto>>), ApiError> {
    let row = tables
        .add_row(&actor, &id, body.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(row.into()))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rate-tables/{id}/rows/{row_id}",
    tag = "Rate Tables",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Rate table ID"),
        ("row_id" = String, Path, description = "Row ID")
    ),
    responses(
        (status = 200, description = "Row removed"),
        (status = 404, description = "Table or row not found")
    )
)]
pub async fn remove_rate_row(
    State(tables): State<Arc<RateTableService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path((id, row_id)): Path<(String, String)>,
) -> ApiResult<()> {
    tables
        .remove_row(&actor, &id, &row_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}
