//! Bearer-token authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::{RepositoryProvider, User};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};
use crate::interfaces::http::common::ApiResponse;

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    AccountDisabled,
    Unavailable,
}

/// What the middleware needs to turn a token into a [`User`]
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub repos: Arc<dyn RepositoryProvider>,
}

/// The caller, freshly loaded from the database.
///
/// Extract in handlers: `Extension(AuthenticatedUser(user))`
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Verifies the JWT, then loads the user so role changes and deactivation
/// take effect without waiting for the token to expire.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) if claims.is_expired() => return auth_error_response(AuthError::ExpiredToken),
        Ok(claims) => claims,
        Err(_) => return auth_error_response(AuthError::InvalidToken),
    };

    let user = match auth_state.repos.users().find_by_id(&claims.sub).await {
        Ok(Some(user)) if user.is_active => user,
        Ok(Some(_)) => return auth_error_response(AuthError::AccountDisabled),
        Ok(None) => return auth_error_response(AuthError::InvalidToken),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load authenticated user");
            return auth_error_response(AuthError::Unavailable);
        }
    };

    tracing::debug!(user = %user.username, role = %user.role, "Authenticated");
    request.extensions_mut().insert(AuthenticatedUser(user));
    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::AccountDisabled => (StatusCode::UNAUTHORIZED, "Account is disabled"),
        AuthError::Unavailable => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication backend unavailable",
        ),
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{middleware, Extension, Router};
    use tower::ServiceExt;

    use crate::application::test_support;
    use crate::domain::{UserRole, UserUpdate};
    use crate::infrastructure::crypto::jwt::create_token;

    async fn whoami(Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>) -> String {
        user.username
    }

    fn app(state: AuthState) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    fn get_with(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_token("Basic abc"), None);
        assert_eq!(extract_token("Bearer "), None);
    }

    #[tokio::test]
    async fn valid_token_loads_the_user() {
        let repos = test_support::repos().await;
        let maria = test_support::user(&repos, "maria", UserRole::Client, None).await;
        let state = AuthState {
            jwt_config: JwtConfig::default(),
            repos,
        };
        let token = create_token(&maria, &state.jwt_config).unwrap();

        let response = app(state).oneshot(get_with(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"maria");
    }

    #[tokio::test]
    async fn missing_or_garbage_tokens_are_rejected() {
        let state = AuthState {
            jwt_config: JwtConfig::default(),
            repos: test_support::repos().await,
        };
        let response = app(state.clone()).oneshot(get_with(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app(state).oneshot(get_with(Some("not-a-jwt"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn deactivated_users_are_locked_out() {
        let repos = test_support::repos().await;
        let maria = test_support::user(&repos, "maria", UserRole::Client, None).await;
        let jwt_config = JwtConfig::default();
        let token = create_token(&maria, &jwt_config).unwrap();
        repos
            .users()
            .update(
                &maria.id,
                UserUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let response = app(AuthState { jwt_config, repos })
            .oneshot(get_with(Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
