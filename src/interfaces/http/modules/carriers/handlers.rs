//! Carrier handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{CarrierDto, CreateCarrierRequest};
use crate::application::CarrierService;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/api/v1/carriers",
    tag = "Carriers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All carriers", body = ApiResponse<Vec<CarrierDto>>),
        (status = 403, description = "Administrator role required")
    )
)]
pub async fn list_carriers(
    State(carriers): State<Arc<CarrierService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<CarrierDto>> {
    let list = carriers.list(&actor).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        list.into_iter().map(CarrierDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/carriers",
    tag = "Carriers",
    security(("bearer_auth" = [])),
    request_body = CreateCarrierRequest,
    responses(
        (status = 201, description = "Carrier created", body = ApiResponse<CarrierDto>),
        (status = 400, description = "Owner is not a TRANSPORTADOR user"),
        (status = 409, description = "Owner already operates a carrier")
    )
)]
pub async fn create_carrier(
    State(carriers): State<Arc<CarrierService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateCarrierRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CarrierDto>>), ApiError> {
    let carrier = carriers
        .create(&actor, &request.name, request.owner_user_id.as_deref())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(carrier.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/carriers/me",
    tag = "Carriers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Carrier operated by the caller", body = ApiResponse<CarrierDto>),
        (status = 403, description = "Caller is not linked to a carrier")
    )
)]
pub async fn my_carrier(
    State(carriers): State<Arc<CarrierService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
) -> ApiResult<CarrierDto> {
    let carrier = carriers.my_carrier(&actor).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(carrier.into())))
}
