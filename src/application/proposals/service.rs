use std::sync::Arc;

use tracing::info;

use crate::application::access::require_carrier;
use crate::domain::proposal::NewProposal;
use crate::domain::{
    DomainError, DomainResult, FreightProposal, ProposalStatus, RepositoryProvider, User, UserRole,
};
use crate::shared::parsing::parse_money_cents;

pub struct ProposalService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProposalService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Send the caller's carrier offer for an open request
    pub async fn submit(
        &self,
        actor: &User,
        request_id: &str,
        price: &str,
        deadline_days: i32,
        notes: Option<String>,
    ) -> DomainResult<FreightProposal> {
        let carrier = require_carrier(self.repos.as_ref(), actor).await?;

        let request = self
            .repos
            .freight_requests()
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| DomainError::not_found("FreightRequest", request_id))?;
        request.ensure_open()?;

        let price_cents = parse_money_cents(price)?;
        if deadline_days < 1 {
            return Err(DomainError::Validation(
                "Deadline must be at least one day".into(),
            ));
        }
        let notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

        let proposal = self
            .repos
            .proposals()
            .create(NewProposal {
                freight_request_id: request.id,
                carrier_id: carrier.id,
                price_cents,
                deadline_days,
                notes,
            })
            .await?;

        info!(
            proposal_id = %proposal.id,
            request_id,
            carrier_id = %proposal.carrier_id,
            price_cents,
            deadline_days,
            "Proposal submitted"
        );
        Ok(proposal)
    }

    /// Request owners and admins see every offer (cheapest first);
    /// a carrier sees only its own.
    pub async fn list_for_request(
        &self,
        actor: &User,
        request_id: &str,
    ) -> DomainResult<Vec<FreightProposal>> {
        let request = self
            .repos
            .freight_requests()
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| DomainError::not_found("FreightRequest", request_id))?;

        let proposals = self.repos.proposals().list_by_request(&request.id).await?;

        match actor.role {
            UserRole::Carrier => {
                let carrier = require_carrier(self.repos.as_ref(), actor).await?;
                Ok(proposals
                    .into_iter()
                    .filter(|p| p.carrier_id == carrier.id)
                    .collect())
            }
            _ if request.is_managed_by(actor) => Ok(proposals),
            _ => Err(DomainError::not_found("FreightRequest", request_id)),
        }
    }

    /// The caller's carrier proposals, newest first
    pub async fn list_mine(&self, actor: &User) -> DomainResult<Vec<FreightProposal>> {
        let carrier = require_carrier(self.repos.as_ref(), actor).await?;
        self.repos.proposals().list_by_carrier(&carrier.id).await
    }

    pub async fn withdraw(&self, actor: &User, proposal_id: &str) -> DomainResult<FreightProposal> {
        let carrier = require_carrier(self.repos.as_ref(), actor).await?;

        let mut proposal = self
            .repos
            .proposals()
            .find_by_id(proposal_id)
            .await?
            .filter(|p| p.carrier_id == carrier.id)
            .ok_or_else(|| DomainError::not_found("FreightProposal", proposal_id))?;
        proposal.ensure_sent()?;

        let request = self
            .repos
            .freight_requests()
            .find_by_id(&proposal.freight_request_id)
            .await?
            .ok_or_else(|| DomainError::not_found("FreightRequest", &proposal.freight_request_id))?;
        request.ensure_open()?;

        self.repos
            .proposals()
            .transition_status(proposal_id, ProposalStatus::Sent, ProposalStatus::Withdrawn)
            .await?;
        proposal.status = ProposalStatus::Withdrawn;

        info!(proposal_id, carrier_id = %carrier.id, "Proposal withdrawn");
        Ok(proposal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::freight_requests::service::tests::{input, resolver};
    use crate::application::freight_requests::FreightRequestService;
    use crate::application::test_support;
    use crate::domain::{FreightRequest, FreightRequestStatus};

    struct Fixture {
        maria: User,
        joao: User,
        ana: User,
        request: FreightRequest,
        requests: FreightRequestService,
        proposals: ProposalService,
    }

    async fn fixture() -> Fixture {
        let repos = test_support::repos().await;
        test_support::company(&repos, "acme").await;
        let maria = test_support::user(&repos, "maria", UserRole::Client, Some("acme")).await;
        let (joao, _) = test_support::carrier_user(&repos, "joao").await;
        let (ana, _) = test_support::carrier_user(&repos, "ana").await;
        let requests = FreightRequestService::new(repos.clone(), resolver());
        let request = requests.create(&maria, input()).await.unwrap();
        Fixture {
            maria,
            joao,
            ana,
            request,
            requests,
            proposals: ProposalService::new(repos),
        }
    }

    #[tokio::test]
    async fn one_proposal_per_carrier_and_request() {
        let f = fixture().await;
        let p = f
            .proposals
            .submit(&f.joao, &f.request.id, "1.500,00", 4, Some("  coleta amanhã ".into()))
            .await
            .unwrap();
        assert_eq!(p.price_cents, 150_000);
        assert_eq!(p.status, ProposalStatus::Sent);
        assert_eq!(p.notes.as_deref(), Some("coleta amanhã"));

        let again = f.proposals.submit(&f.joao, &f.request.id, "1400", 3, None).await;
        assert!(matches!(again, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn submit_validates_price_deadline_and_role() {
        let f = fixture().await;
        assert!(matches!(
            f.proposals.submit(&f.joao, &f.request.id, "0", 3, None).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            f.proposals.submit(&f.joao, &f.request.id, "100", 0, None).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            f.proposals.submit(&f.maria, &f.request.id, "100", 2, None).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            f.proposals.submit(&f.joao, "missing", "100", 2, None).await,
            Err(DomainError::NotFound { .. })
        ));

        f.requests.cancel(&f.maria, &f.request.id).await.unwrap();
        assert!(matches!(
            f.proposals.submit(&f.joao, &f.request.id, "100", 2, None).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn owners_see_all_offers_carriers_only_theirs() {
        let f = fixture().await;
        f.proposals.submit(&f.joao, &f.request.id, "900", 2, None).await.unwrap();
        f.proposals.submit(&f.ana, &f.request.id, "700", 5, None).await.unwrap();

        let all = f.proposals.list_for_request(&f.maria, &f.request.id).await.unwrap();
        let prices: Vec<_> = all.iter().map(|p| p.price_cents).collect();
        assert_eq!(prices, vec![70_000, 90_000]);

        let mine = f.proposals.list_for_request(&f.joao, &f.request.id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].price_cents, 90_000);

        assert_eq!(f.proposals.list_mine(&f.ana).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn selection_closes_request_and_blocks_withdrawal() {
        let f = fixture().await;
        let cheap = f.proposals.submit(&f.ana, &f.request.id, "700", 5, None).await.unwrap();
        let fast = f.proposals.submit(&f.joao, &f.request.id, "900", 2, None).await.unwrap();

        let closed = f
            .requests
            .select_proposal(&f.maria, &f.request.id, &fast.id)
            .await
            .unwrap();
        assert_eq!(closed.status, FreightRequestStatus::Closed);
        assert_eq!(closed.selected_proposal_id.as_deref(), Some(fast.id.as_str()));

        let statuses: Vec<_> = f
            .proposals
            .list_for_request(&f.maria, &f.request.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| (p.id, p.status))
            .collect();
        assert!(statuses.contains(&(cheap.id.clone(), ProposalStatus::Lost)));
        assert!(statuses.contains(&(fast.id.clone(), ProposalStatus::Won)));

        assert!(matches!(
            f.proposals.withdraw(&f.ana, &cheap.id).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            f.requests.select_proposal(&f.maria, &f.request.id, &cheap.id).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn withdraw_only_own_sent_proposals() {
        let f = fixture().await;
        let p = f.proposals.submit(&f.joao, &f.request.id, "900", 2, None).await.unwrap();

        assert!(matches!(
            f.proposals.withdraw(&f.ana, &p.id).await,
            Err(DomainError::NotFound { .. })
        ));

        let withdrawn = f.proposals.withdraw(&f.joao, &p.id).await.unwrap();
        assert_eq!(withdrawn.status, ProposalStatus::Withdrawn);
        assert!(matches!(
            f.proposals.withdraw(&f.joao, &p.id).await,
            Err(DomainError::Conflict(_))
        ));

        // withdrawn offers cannot be selected
        assert!(matches!(
            f.requests.select_proposal(&f.maria, &f.request.id, &p.id).await,
            Err(DomainError::Conflict(_))
        ));
    }
}
