//! User management service
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::access::require_admin;
use crate::config::AdminConfig;
use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, User, UserFilter, UserRole, UserUpdate,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::{PaginatedResult, PaginationParams};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Login, registration and user administration
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate user by username/email + password and return a JWT.
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthResult> {
        let users = self.repos.users();
        let user = match users.find_by_username(username_or_email).await? {
            Some(u) => Some(u),
            None => users.find_by_email(username_or_email).await?,
        };

        let Some(mut user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash);
        if !valid {
            warn!(username = %user.username, "Failed login attempt");
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        users.touch_last_login(&user.id).await?;
        user.last_login_at = Some(Utc::now());

        let token = create_token(&user, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user. New accounts are CLIENTE with no company until an
    /// administrator links one.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> DomainResult<User> {
        let username = username.trim();
        let email = email.trim().to_lowercase();

        if username.len() < 3 || username.len() > 50 {
            return Err(DomainError::Validation(
                "Username must be 3-50 characters".into(),
            ));
        }
        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        let users = self.repos.users();
        if users.find_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }
        if users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let user = users
            .create(new_user(username, &email, password, UserRole::Client)?)
            .await?;

        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn me(&self, user_id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }

    pub async fn list_users(
        &self,
        actor: &User,
        filter: UserFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<User>> {
        require_admin(actor)?;
        self.repos.users().list(filter, pagination).await
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Admin update of role, company link and activation.
    pub async fn update_user(&self, actor: &User, id: &str, update: UserUpdate) -> DomainResult<User> {
        require_admin(actor)?;

        if let Some(Some(ref company_id)) = update.company_id {
            if self.repos.companies().find_by_id(company_id).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "Unknown company {}",
                    company_id
                )));
            }
        }
        if actor.id == id && update.is_active == Some(false) {
            return Err(DomainError::Validation(
                "Administrators cannot deactivate themselves".into(),
            ));
        }

        let user = self.repos.users().update(id, update).await?;
        info!(user_id = %user.id, role = %user.role, company = ?user.company_id, "User updated");
        Ok(user)
    }

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.len() < 8 {
            return Err(DomainError::Validation(
                "New password must be at least 8 characters".into(),
            ));
        }

        let user = self.me(user_id).await?;

        let valid = verify_password(current_password, &user.password_hash);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        let new_hash = hash_password(new_password)?;

        self.repos.users().update_password(user_id, &new_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Create the configured administrator when no user exists yet.
    pub async fn ensure_admin(&self, admin: &AdminConfig) -> DomainResult<Option<User>> {
        if self.repos.users().count().await? > 0 {
            return Ok(None);
        }

        let user = self
            .repos
            .users()
            .create(new_user(
                &admin.username,
                &admin.email,
                &admin.password,
                UserRole::Admin,
            )?)
            .await?;

        info!(username = %user.username, "Default admin user created");
        Ok(Some(user))
    }
}

fn new_user(username: &str, email: &str, password: &str, role: UserRole) -> DomainResult<User> {
    let password_hash = hash_password(password)?;
    let now = Utc::now();
    Ok(User {
        id: uuid::Uuid::new_v4().to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
        role,
        company_id: None,
        is_active: true,
        created_at: now,
        updated_at: now,
        last_login_at: None,
    })
}
