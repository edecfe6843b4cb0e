//! Quote handlers (ADMIN / CLIENTE)

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateQuoteRequest, QuoteDetailDto, QuoteDto};
use crate::application::QuoteEngine;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, PaginatedResponse, PaginationQuery,
    ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[utoipa::path(
    post,
    path = "/api/v1/quotes",
    tag = "Quotes",
    security(("bearer_auth" = [])),
    request_body = CreateQuoteRequest,
    responses(
        (status = 201, description = "Quote priced against every active rate table", body = ApiResponse<QuoteDetailDto>),
        (status = 400, description = "Invalid input or unknown postal code"),
        (status = 403, description = "Only clients and administrators"),
        (status = 502, description = "Postal code lookup unavailable")
    )
)]
pub async fn create_quote(
    State(engine): State<Arc<QuoteEngine>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<QuoteDetailDto>>), ApiError> {
    let quoted = engine
        .create_quote(&actor, body.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(quoted.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/quotes",
    tag = "Quotes",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Visible quotes, newest first", body = ApiResponse<PaginatedResponse<QuoteDto>>)
    )
)]
pub async fn list_quotes(
    State(engine): State<Arc<QuoteEngine>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<PaginatedResponse<QuoteDto>> {
    let page = engine
        .list_quotes(&actor, pagination.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/quotes/{id}",
    tag = "Quotes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote and offers", body = ApiResponse<QuoteDetailDto>),
        (status = 404, description = "Not found or not visible")
    )
)]
pub async fn get_quote(
    State(engine): State<Arc<QuoteEngine>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<QuoteDetailDto> {
    let quoted = engine.get_quote(&actor, &id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(quoted.into())))
}
