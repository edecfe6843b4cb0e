//! Freight request lifecycle: open, list, cancel and close by selecting a proposal

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::application::access::{acting_company, require_shipper};
use crate::domain::freight_request::{FreightRequestFilter, NewFreightRequest};
use crate::domain::{
    DomainError, DomainResult, FreightRequest, FreightRequestStatus, PostalCodeResolver,
    RepositoryProvider, User, UserRole,
};
use crate::shared::parsing::{check_positive, parse_money_cents, parse_postal_code, parse_state_code};
use crate::shared::{PaginatedResult, PaginationParams};

/// Raw input for a new freight request
#[derive(Debug, Clone, Default)]
pub struct CreateFreightRequest {
    /// Administrators may open requests for any company
    pub company_id: Option<String>,
    pub origin_zip: String,
    pub origin_city: Option<String>,
    pub origin_state: Option<String>,
    pub destination_zip: String,
    pub destination_city: Option<String>,
    pub destination_state: Option<String>,
    pub cargo_type: String,
    pub cargo_description: Option<String>,
    pub weight_kg: Option<f64>,
    pub volume_m3: Option<f64>,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub invoice_value: Option<String>,
    pub pickup_date: Option<NaiveDate>,
}

pub struct FreightRequestService {
    repos: Arc<dyn RepositoryProvider>,
    resolver: Arc<dyn PostalCodeResolver>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FreightRequestService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, resolver: Arc<dyn PostalCodeResolver>) -> Self {
        Self { repos, resolver }
    }

    /// City and state for a CEP: taken from the input when both are given,
    /// otherwise looked up.
    async fn locate(
        &self,
        cep: &str,
        city: Option<String>,
        state: Option<String>,
    ) -> DomainResult<(String, String)> {
        match (non_blank(city), non_blank(state)) {
            (Some(city), Some(state)) => Ok((city, parse_state_code(&state)?)),
            (city, state) => {
                let address = self.resolver.resolve(cep).await?;
                let state = match state {
                    Some(s) => parse_state_code(&s)?,
                    None => address.state,
                };
                Ok((city.unwrap_or(address.city), state))
            }
        }
    }

    pub async fn create(
        &self,
        actor: &User,
        input: CreateFreightRequest,
    ) -> DomainResult<FreightRequest> {
        let company_id =
            acting_company(self.repos.as_ref(), actor, input.company_id.as_deref()).await?;

        let origin_zip = parse_postal_code(&input.origin_zip)?;
        let destination_zip = parse_postal_code(&input.destination_zip)?;
        let cargo_type = input.cargo_type.trim().to_string();
        if cargo_type.is_empty() {
            return Err(DomainError::Validation("Cargo type is required".into()));
        }
        let pickup_date = input
            .pickup_date
            .ok_or_else(|| DomainError::Validation("Pickup date is required".into()))?;

        check_positive(input.weight_kg, "weight")?;
        check_positive(input.volume_m3, "volume")?;
        check_positive(input.length_cm, "length")?;
        check_positive(input.width_cm, "width")?;
        check_positive(input.height_cm, "height")?;
        let invoice_value_cents = match non_blank(input.invoice_value) {
            Some(raw) => Some(parse_money_cents(&raw)?),
            None => None,
        };

        let ((origin_city, origin_state), (destination_city, destination_state)) = tokio::try_join!(
            self.locate(&origin_zip, input.origin_city, input.origin_state),
            self.locate(
                &destination_zip,
                input.destination_city,
                input.destination_state
            ),
        )?;

        let request = self
            .repos
            .freight_requests()
            .create(NewFreightRequest {
                company_id,
                created_by: actor.id.clone(),
                origin_zip,
                origin_city,
                origin_state,
                destination_zip,
                destination_city,
                destination_state,
                cargo_type,
                cargo_description: non_blank(input.cargo_description),
                weight_kg: input.weight_kg,
                volume_m3: input.volume_m3,
                length_cm: input.length_cm,
                width_cm: input.width_cm,
                height_cm: input.height_cm,
                invoice_value_cents,
                pickup_date,
            })
            .await?;

        info!(
            request_id = %request.id,
            company_id = %request.company_id,
            route = %format!("{}->{}", request.origin_state, request.destination_state),
            "Freight request opened"
        );
        Ok(request)
    }

    /// Admins see everything, clients their company, carriers open requests
    pub async fn list(
        &self,
        actor: &User,
        status: Option<FreightRequestStatus>,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<FreightRequest>> {
        let filter = match actor.role {
            UserRole::Admin => FreightRequestFilter {
                company_id: None,
                status,
            },
            UserRole::Client => FreightRequestFilter {
                company_id: Some(actor.require_company()?.to_string()),
                status,
            },
            UserRole::Carrier => FreightRequestFilter {
                company_id: None,
                status: Some(FreightRequestStatus::Open),
            },
        };
        self.repos.freight_requests().list(filter, pagination).await
    }

    /// Requests the caller may not see are reported as missing
    pub async fn get(&self, actor: &User, id: &str) -> DomainResult<FreightRequest> {
        self.repos
            .freight_requests()
            .find_by_id(id)
            .await?
            .filter(|r| r.is_visible_to(actor))
            .ok_or_else(|| DomainError::not_found("FreightRequest", id))
    }

    async fn managed(&self, actor: &User, id: &str) -> DomainResult<FreightRequest> {
        require_shipper(actor)?;
        self.repos
            .freight_requests()
            .find_by_id(id)
            .await?
            .filter(|r| r.is_managed_by(actor))
            .ok_or_else(|| DomainError::not_found("FreightRequest", id))
    }

    pub async fn cancel(&self, actor: &User, id: &str) -> DomainResult<FreightRequest> {
        let mut request = self.managed(actor, id).await?;
        request.ensure_open()?;

        self.repos
            .freight_requests()
            .transition_status(id, FreightRequestStatus::Open, FreightRequestStatus::Cancelled)
            .await?;
        request.status = FreightRequestStatus::Cancelled;

        info!(request_id = %id, by = %actor.username, "Freight request cancelled");
        Ok(request)
    }

    /// Close the request with the chosen proposal; the rest of the offers lose
    pub async fn select_proposal(
        &self,
        actor: &User,
        request_id: &str,
        proposal_id: &str,
    ) -> DomainResult<FreightRequest> {
        let request = self.managed(actor, request_id).await?;
        request.ensure_open()?;

        let proposal = self
            .repos
            .proposals()
            .find_by_id(proposal_id)
            .await?
            .filter(|p| p.freight_request_id == request.id)
            .ok_or_else(|| DomainError::not_found("FreightProposal", proposal_id))?;
        proposal.ensure_sent()?;

        let closed = self
            .repos
            .freight_requests()
            .select_proposal(request_id, proposal_id)
            .await?;

        info!(
            request_id,
            proposal_id,
            carrier_id = %proposal.carrier_id,
            price_cents = proposal.price_cents,
            "Proposal selected"
        );
        Ok(closed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::test_support;
    use crate::infrastructure::StaticPostalCodeResolver;

    pub(crate) fn resolver() -> Arc<dyn PostalCodeResolver> {
        Arc::new(
            StaticPostalCodeResolver::new()
                .with("01310-100", "São Paulo", "SP")
                .with("20040-020", "Rio de Janeiro", "RJ")
                .with("30130-010", "Belo Horizonte", "MG"),
        )
    }

    pub(crate) fn input() -> CreateFreightRequest {
        CreateFreightRequest {
            origin_zip: "01310-100".into(),
            destination_zip: "20040-020".into(),
            cargo_type: "Pallets".into(),
            weight_kg: Some(350.0),
            invoice_value: Some("12.500,00".into()),
            pickup_date: NaiveDate::from_ymd_opt(2026, 11, 20),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_resolves_missing_city_and_state() {
        let repos = test_support::repos().await;
        test_support::company(&repos, "acme").await;
        let client = test_support::user(&repos, "maria", UserRole::Client, Some("acme")).await;
        let service = FreightRequestService::new(repos, resolver());

        let mut with_origin = input();
        with_origin.origin_city = Some("Sampa".into());
        with_origin.origin_state = Some("sp".into());
        let request = service.create(&client, with_origin).await.unwrap();

        assert_eq!(request.company_id, "acme");
        assert_eq!(request.status, FreightRequestStatus::Open);
        assert_eq!(request.origin_zip, "01310100");
        assert_eq!(request.origin_city, "Sampa");
        assert_eq!(request.origin_state, "SP");
        assert_eq!(request.destination_city, "Rio de Janeiro");
        assert_eq!(request.destination_state, "RJ");
        assert_eq!(request.invoice_value_cents, Some(1_250_000));
    }

    #[tokio::test]
    async fn create_validates_input() {
        let repos = test_support::repos().await;
        test_support::company(&repos, "acme").await;
        let client = test_support::user(&repos, "maria", UserRole::Client, Some("acme")).await;
        let orphan = test_support::user(&repos, "ze", UserRole::Client, None).await;
        let (driver, _) = test_support::carrier_user(&repos, "joao").await;
        let service = FreightRequestService::new(repos, resolver());

        let mut bad_cep = input();
        bad_cep.origin_zip = "0131".into();
        assert!(matches!(service.create(&client, bad_cep).await, Err(DomainError::Validation(_))));

        let mut bad_weight = input();
        bad_weight.weight_kg = Some(0.0);
        assert!(matches!(
            service.create(&client, bad_weight).await,
            Err(DomainError::Validation(_))
        ));

        let mut no_date = input();
        no_date.pickup_date = None;
        assert!(matches!(service.create(&client, no_date).await, Err(DomainError::Validation(_))));

        let mut unknown_cep = input();
        unknown_cep.destination_zip = "99999-999".into();
        assert!(matches!(
            service.create(&client, unknown_cep).await,
            Err(DomainError::PostalCodeNotFound(_))
        ));

        assert!(matches!(service.create(&orphan, input()).await, Err(DomainError::Validation(_))));
        assert!(matches!(service.create(&driver, input()).await, Err(DomainError::Forbidden(_))));

        let mut other_company = input();
        other_company.company_id = Some("globex".into());
        assert!(matches!(
            service.create(&client, other_company).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn visibility_depends_on_role() {
        let repos = test_support::repos().await;
        test_support::company(&repos, "acme").await;
        test_support::company(&repos, "globex").await;
        let admin = test_support::user(&repos, "root", UserRole::Admin, None).await;
        let maria = test_support::user(&repos, "maria", UserRole::Client, Some("acme")).await;
        let bob = test_support::user(&repos, "bob", UserRole::Client, Some("globex")).await;
        let (driver, _) = test_support::carrier_user(&repos, "joao").await;
        let service = FreightRequestService::new(repos, resolver());

        let open = service.create(&maria, input()).await.unwrap();
        let cancelled = service.create(&maria, input()).await.unwrap();
        service.cancel(&maria, &cancelled.id).await.unwrap();
        let mut for_globex = input();
        for_globex.company_id = Some("globex".into());
        service.create(&admin, for_globex).await.unwrap();

        let page = PaginationParams::default();
        assert_eq!(service.list(&admin, None, page).await.unwrap().total, 3);
        assert_eq!(service.list(&maria, None, page).await.unwrap().total, 2);
        assert_eq!(service.list(&bob, None, page).await.unwrap().total, 1);
        // carriers only see open requests, whatever they ask for
        let carrier_view = service
            .list(&driver, Some(FreightRequestStatus::Cancelled), page)
            .await
            .unwrap();
        assert_eq!(carrier_view.total, 2);

        assert!(service.get(&driver, &open.id).await.is_ok());
        assert!(matches!(
            service.get(&driver, &cancelled.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.get(&bob, &open.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn cancel_requires_owner_and_open_request() {
        let repos = test_support::repos().await;
        test_support::company(&repos, "acme").await;
        test_support::company(&repos, "globex").await;
        let maria = test_support::user(&repos, "maria", UserRole::Client, Some("acme")).await;
        let bob = test_support::user(&repos, "bob", UserRole::Client, Some("globex")).await;
        let service = FreightRequestService::new(repos, resolver());

        let request = service.create(&maria, input()).await.unwrap();
        assert!(matches!(
            service.cancel(&bob, &request.id).await,
            Err(DomainError::NotFound { .. })
        ));

        let cancelled = service.cancel(&maria, &request.id).await.unwrap();
        assert_eq!(cancelled.status, FreightRequestStatus::Cancelled);
        assert!(matches!(
            service.cancel(&maria, &request.id).await,
            Err(DomainError::Conflict(_))
        ));
    }
}
