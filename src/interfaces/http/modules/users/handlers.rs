//! User management API handlers (ADMIN)

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::dto::{ListUsersParams, UpdateUserRequest, UserDto};
use crate::application::UserService;
use crate::domain::{UserFilter, UserRole, UserUpdate};
use crate::interfaces::http::common::{
    domain_error, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::PaginationParams;

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListUsersParams),
    responses(
        (status = 200, description = "User page", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 403, description = "Administrator role required")
    )
)]
pub async fn list_users(
    State(users): State<Arc<UserService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Query(params): Query<ListUsersParams>,
) -> ApiResult<PaginatedResponse<UserDto>> {
    let role = params
        .role
        .as_deref()
        .map(str::parse::<UserRole>)
        .transpose()
        .map_err(domain_error)?;
    let filter = UserFilter {
        search: params.search,
        role,
        company_id: params.company_id,
    };

    let page = users
        .list_users(&actor, filter, PaginationParams::new(params.page, params.limit))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Unknown role or company"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    State(users): State<Arc<UserService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    let role = request
        .role
        .as_deref()
        .map(str::parse::<UserRole>)
        .transpose()
        .map_err(domain_error)?;
    let update = UserUpdate {
        role,
        company_id: request.company_id,
        is_active: request.is_active,
    };

    let user = users
        .update_user(&actor, &id, update)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}
