//! Proposal handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{ProposalDto, SubmitProposalRequest};
use crate::application::ProposalService;
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

fn to_dtos(list: Vec<crate::domain::FreightProposal>) -> Vec<ProposalDto> {
    list.into_iter().map(ProposalDto::from).collect()
}

#[utoipa::path(
    post,
    path = "/api/v1/freight-requests/{id}/proposals",
    tag = "Proposals",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Freight request ID")),
    request_body = SubmitProposalRequest,
    responses(
        (status = 201, description = "Proposal sent", body = ApiResponse<ProposalDto>),
        (status = 403, description = "Caller is not linked to a carrier"),
        (status = 409, description = "Request closed or carrier already proposed")
    )
)]
pub async fn submit_proposal(
    State(proposals): State<Arc<ProposalService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(request_id): Path<String>,
    ValidatedJson(body): ValidatedJson<SubmitProposalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProposalDto>>), ApiError> {
    let proposal = proposals
        .submit(&actor, &request_id, &body.price, body.deadline_days, body.notes)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(proposal.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/freight-requests/{id}/proposals",
    tag = "Proposals",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Freight request ID")),
    responses(
        (status = 200, description = "Proposals, cheapest first (carriers see their own)", body = ApiResponse<Vec<ProposalDto>>),
        (status = 404, description = "Request not found")
    )
)]
pub async fn list_request_proposals(
    State(proposals): State<Arc<ProposalService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(request_id): Path<String>,
) -> ApiResult<Vec<ProposalDto>> {
    let list = proposals
        .list_for_request(&actor, &request_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(to_dtos(list))))
}

#[utoipa::path(
    get,
    path = "/api/v1/proposals/mine",
    tag = "Proposals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's proposals, newest first", body = ApiResponse<Vec<ProposalDto>>),
        (status = 403, description = "Carrier role required")
    )
)]
pub async fn my_proposals(
    State(proposals): State<Arc<ProposalService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<ProposalDto>> {
    let list = proposals.list_mine(&actor).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(to_dtos(list))))
}

#[utoipa::path(
    post,
    path = "/api/v1/proposals/{id}/withdraw",
    tag = "Proposals",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Proposal ID")),
    responses(
        (status = 200, description = "Proposal withdrawn", body = ApiResponse<ProposalDto>),
        (status = 409, description = "Proposal or request no longer open")
    )
)]
pub async fn withdraw_proposal(
    State(proposals): State<Arc<ProposalService>>,
    Extension(AuthenticatedUser(actor)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<ProposalDto> {
    let proposal = proposals.withdraw(&actor, &id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(proposal.into())))
}
