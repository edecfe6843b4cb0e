//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    CarrierService, CompanyService, FreightRequestService, ProposalService, QuoteEngine,
    RateTableService, UserService,
};
use crate::domain::{PostalCodeResolver, RepositoryProvider};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::modules::metrics::{http_metrics_middleware, MetricsState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{
    auth, carriers, companies, freight_requests, health, metrics, proposals, quotes, rate_tables,
    users,
};

/// Everything the handlers need. Each handler extracts only its own piece
/// through `FromRef`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub auth: AuthState,
    pub health: HealthState,
    pub metrics: MetricsState,
    pub users: Arc<UserService>,
    pub companies: Arc<CompanyService>,
    pub carriers: Arc<CarrierService>,
    pub freight_requests: Arc<FreightRequestService>,
    pub proposals: Arc<ProposalService>,
    pub rate_tables: Arc<RateTableService>,
    pub quotes: Arc<QuoteEngine>,
}

impl AppState {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        resolver: Arc<dyn PostalCodeResolver>,
        db: DatabaseConnection,
        jwt_config: JwtConfig,
        prometheus: PrometheusHandle,
    ) -> Self {
        Self {
            auth: AuthState {
                jwt_config: jwt_config.clone(),
                repos: repos.clone(),
            },
            health: HealthState {
                db,
                started_at: Arc::new(Instant::now()),
            },
            metrics: MetricsState { handle: prometheus },
            users: Arc::new(UserService::new(repos.clone(), jwt_config)),
            companies: Arc::new(CompanyService::new(repos.clone())),
            carriers: Arc::new(CarrierService::new(repos.clone())),
            freight_requests: Arc::new(FreightRequestService::new(
                repos.clone(),
                resolver.clone(),
            )),
            proposals: Arc::new(ProposalService::new(repos.clone())),
            rate_tables: Arc::new(RateTableService::new(repos.clone())),
            quotes: Arc::new(QuoteEngine::new(repos, resolver)),
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::get_current_user,
        auth::change_password,
        users::list_users,
        users::update_user,
        companies::list_companies,
        companies::get_company,
        companies::create_company,
        carriers::list_carriers,
        carriers::create_carrier,
        carriers::my_carrier,
        freight_requests::create_freight_request,
        freight_requests::list_freight_requests,
        freight_requests::get_freight_request,
        freight_requests::cancel_freight_request,
        freight_requests::select_proposal,
        proposals::submit_proposal,
        proposals::list_request_proposals,
        proposals::my_proposals,
        proposals::withdraw_proposal,
        rate_tables::list_rate_tables,
        rate_tables::create_rate_table,
        rate_tables::get_rate_table,
        rate_tables::rename_rate_table,
        rate_tables::set_rate_table_active,
        rate_tables::add_rate_row,
        rate_tables::remove_rate_row,
        quotes::create_quote,
        quotes::list_quotes,
        quotes::get_quote,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginatedResponse<users::UserDto>,
            PaginatedResponse<freight_requests::FreightRequestDto>,
            PaginatedResponse<quotes::QuoteDto>,
            PaginationQuery,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::ChangePasswordRequest,
            users::UserDto,
            users::UpdateUserRequest,
            companies::CompanyDto,
            companies::CreateCompanyRequest,
            carriers::CarrierDto,
            carriers::CreateCarrierRequest,
            freight_requests::FreightRequestDto,
            freight_requests::CreateFreightRequestBody,
            freight_requests::SelectProposalRequest,
            proposals::ProposalDto,
            proposals::SubmitProposalRequest,
            rate_tables::RateTableDto,
            rate_tables::RateTableRowDto,
            rate_tables::RateTableDetailDto,
            rate_tables::CreateRateTableRequest,
            rate_tables::RenameRateTableRequest,
            rate_tables::SetActiveRequest,
            rate_tables::AddRowRequest,
            quotes::QuoteDto,
            quotes::QuoteResultDto,
            quotes::QuoteDetailDto,
            quotes::CreateQuoteRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Login (JWT), registration, password change"),
        (name = "Users", description = "User administration"),
        (name = "Companies", description = "Shipper companies"),
        (name = "Carriers", description = "Carrier registry"),
        (name = "Freight Requests", description = "Shipment requests answered by carrier proposals"),
        (name = "Proposals", description = "Carrier price and deadline offers"),
        (name = "Rate Tables", description = "Carrier price grids by state pair and weight band"),
        (name = "Quotes", description = "Instant quotes against active rate tables"),
    ),
    info(
        title = "Freight Quote API",
        version = "1.0.0",
        description = "B2B freight quoting: requests, proposals, rate tables and instant quotes"
    )
)]
pub struct ApiDoc;

/// Build the full router: public routes, bearer-protected `/api/v1`, docs and metrics
pub fn create_api_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register));

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/change-password", put(auth::change_password))
        .route("/users", get(users::list_users))
        .route("/users/{id}", put(users::update_user))
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route("/companies/{id}", get(companies::get_company))
        .route(
            "/carriers",
            get(carriers::list_carriers).post(carriers::create_carrier),
        )
        .route("/carriers/me", get(carriers::my_carrier))
        .route(
            "/freight-requests",
            get(freight_requests::list_freight_requests)
                .post(freight_requests::create_freight_request),
        )
        .route(
            "/freight-requests/{id}",
            get(freight_requests::get_freight_request),
        )
        .route(
            "/freight-requests/{id}/cancel",
            post(freight_requests::cancel_freight_request),
        )
        .route(
            "/freight-requests/{id}/select-proposal",
            post(freight_requests::select_proposal),
        )
        .route(
            "/freight-requests/{id}/proposals",
            get(proposals::list_request_proposals).post(proposals::submit_proposal),
        )
        .route("/proposals/mine", get(proposals::my_proposals))
        .route("/proposals/{id}/withdraw", post(proposals::withdraw_proposal))
        .route(
            "/rate-tables",
            get(rate_tables::list_rate_tables).post(rate_tables::create_rate_table),
        )
        .route(
            "/rate-tables/{id}",
            get(rate_tables::get_rate_table).put(rate_tables::rename_rate_table),
        )
        .route(
            "/rate-tables/{id}/active",
            put(rate_tables::set_rate_table_active),
        )
        .route("/rate-tables/{id}/rows", post(rate_tables::add_rate_row))
        .route(
            "/rate-tables/{id}/rows/{row_id}",
            delete(rate_tables::remove_rate_row),
        )
        .route("/quotes", get(quotes::list_quotes).post(quotes::create_quote))
        .route("/quotes/{id}", get(quotes::get_quote))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .nest("/api/v1", public_routes.merge(protected_routes))
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}
