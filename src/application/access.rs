//! Role and ownership checks shared by the services

use crate::domain::{Carrier, DomainError, DomainResult, RepositoryProvider, User, UserRole};

pub fn require_admin(user: &User) -> DomainResult<()> {
    if user.role == UserRole::Admin {
        Ok(())
    } else {
        Err(DomainError::Forbidden("Administrator role required".into()))
    }
}

/// ADMIN or CLIENTE
pub fn require_shipper(user: &User) -> DomainResult<()> {
    if user.role.is_shipper() {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "Only clients and administrators can do this".into(),
        ))
    }
}

/// Company a shipper acts for.
///
/// Clients always act for their own company. Administrators may name any
/// existing company and otherwise fall back to their own.
pub async fn acting_company(
    repos: &dyn RepositoryProvider,
    user: &User,
    requested: Option<&str>,
) -> DomainResult<String> {
    require_shipper(user)?;

    match (user.role, requested) {
        (UserRole::Admin, Some(company_id)) => {
            repos
                .companies()
                .find_by_id(company_id)
                .await?
                .ok_or_else(|| DomainError::Validation(format!("Unknown company {}", company_id)))?;
            Ok(company_id.to_string())
        }
        (UserRole::Client, Some(company_id)) if user.company_id.as_deref() != Some(company_id) => {
            Err(DomainError::Forbidden(
                "Clients can only act for their own company".into(),
            ))
        }
        _ => user.require_company().map(str::to_string),
    }
}

/// Carrier operated by a TRANSPORTADOR user
pub async fn require_carrier(repos: &dyn RepositoryProvider, user: &User) -> DomainResult<Carrier> {
    if user.role != UserRole::Carrier {
        return Err(DomainError::Forbidden("Carrier role required".into()));
    }
    repos
        .carriers()
        .find_by_owner(&user.id)
        .await?
        .ok_or_else(|| DomainError::Forbidden("User is not linked to a carrier".into()))
}
