//! Freight request handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    CreateFreightRequestBody, FreightRequestDto, ListFreightRequestsParams,
    SelectProposalRequest,
};
use crate::application::FreightRequestService;
use crate::domain::FreightRequestStatus;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::PaginationParams;

#[utoipa::path(
    post,
    path = "/api/v1/freight-requests",
    tag = "Freight Requests",
    security(("bearer_auth" = [])),
    request_body = CreateFreightRequestBody,
    responses(
        (status = 201, description = "Request opened", body = ApiResponse<FreightRequestDto>),
        (status = 400, description = "Invalid input or unknown postal code"),
        (status = 403, description = "Only clients and administrators"),
        (status = 502, description = "Postal code lookup unavailable")
    )
)]
pub async fn create_freight_request(
    State(requests): State<Arc<FreightRequestService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<CreateFreightRequestBody>,
) -> Result<(StatusCode, Json<ApiResponse<FreightRequestDto>>), ApiError> {
    let request = requests
        .create(&actor, body.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(request.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/freight-requests",
    tag = "Freight Requests",
    security(("bearer_auth" = [])),
    params(ListFreightRequestsParams),
    responses(
        (status = 200, description = "Visible requests, newest first", body = ApiResponse<PaginatedResponse<FreightRequestDto>>)
    )
)]
pub async fn list_freight_requests(
    State(requests): State<Arc<FreightRequestService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Query(params): Query<ListFreightRequestsParams>,
) -> ApiResult<PaginatedResponse<FreightRequestDto>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<FreightRequestStatus>)
        .transpose()
        .map_err(domain_error)?;

    let page = requests
        .list(&actor, status, PaginationParams::new(params.page, params.limit))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/freight-requests/{id}",
    tag = "Freight Requests",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Freight request ID")),
    responses(
        (status = 200, description = "Freight request", body = ApiResponse<FreightRequestDto>),
        (status = 404, description = "Not found or not visible")
    )
)]
pub async fn get_freight_request(
    State(requests): State<Arc<FreightRequestService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<FreightRequestDto> {
    let request = requests.get(&actor, &id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(request.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/freight-requests/{id}/cancel",
    tag = "Freight Requests",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Freight request ID")),
    responses(
        (status = 200, description = "Request cancelled", body = ApiResponse<FreightRequestDto>),
        (status = 409, description = "Request is no longer open")
    )
)]
pub async fn cancel_freight_request(
    State(requests): State<Arc<FreightRequestService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<FreightRequestDto> {
    let request = requests.cancel(&actor, &id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(request.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/freight-requests/{id}/select-proposal",
    tag = "Freight Requests",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Freight request ID")),
    request_body = SelectProposalRequest,
    responses(
        (status = 200, description = "Request closed with the chosen proposal", body = ApiResponse<FreightRequestDto>),
        (status = 404, description = "Request or proposal not found"),
        (status = 409, description = "Request closed or proposal not selectable")
    )
)]
pub async fn select_proposal(
    State(requests): State<Arc<FreightRequestService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<SelectProposalRequest>,
) -> ApiResult<FreightRequestDto> {
    let request = requests
        .select_proposal(&actor, &id, &body.proposal_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(request.into())))
}
