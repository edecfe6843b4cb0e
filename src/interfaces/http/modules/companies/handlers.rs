//! Shipper company handlers (ADMIN)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CompanyDto, CreateCompanyRequest};
use crate::application::CompanyService;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/api/v1/companies",
    tag = "Companies",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All companies", body = ApiResponse<Vec<CompanyDto>>),
        (status = 403, description = "Administrator role required")
    )
)]
pub async fn list_companies(
    State(companies): State<Arc<CompanyService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<CompanyDto>> {
    let list = companies.list(&actor).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        list.into_iter().map(CompanyDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company", body = ApiResponse<CompanyDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_company(
    State(companies): State<Arc<CompanyService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<CompanyDto> {
    let company = companies.get(&actor, &id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(company.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/companies",
    tag = "Companies",
    security(("bearer_auth" = [])),
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = ApiResponse<CompanyDto>),
        (status = 409, description = "Document already registered")
    )
)]
pub async fn create_company(
    State(companies): State<Arc<CompanyService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyDto>>), ApiError> {
    let company = companies
        .create(&actor, &request.name, request.document.as_deref())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(company.into()))))
}
