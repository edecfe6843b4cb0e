//! Quote engine
//!
//! Resolves both postal codes, then asks every carrier with an active rate
//! table for its best row on the route and weight. Carriers without a match
//! (or whose lookup fails) are skipped; the quote itself only fails when the
//! input is invalid, a postal code cannot be resolved, or storage is down.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info, instrument, warn};

use crate::application::access::{acting_company, require_shipper};
use crate::domain::quote::{rank_results, NewQuote, NewQuoteResult, QuoteFilter};
use crate::domain::rate_table::pick_best_rate_row;
use crate::domain::{
    DomainError, DomainResult, OfferSource, PostalCodeResolver, Quote, QuoteResult,
    RepositoryProvider, User,
};
use crate::shared::parsing::{check_positive, parse_postal_code};
use crate::shared::{PaginatedResult, PaginationParams};

#[derive(Debug, Clone, Default)]
pub struct QuoteInput {
    /// Administrators may quote for any company
    pub company_id: Option<String>,
    pub origin_zip: String,
    pub destination_zip: String,
    pub weight_kg: f64,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub cargo_type: Option<String>,
}

/// A quote and its offers, cheapest first
#[derive(Debug, Clone)]
pub struct QuoteWithResults {
    pub quote: Quote,
    pub results: Vec<QuoteResult>,
}

pub struct QuoteEngine {
    repos: Arc<dyn RepositoryProvider>,
    resolver: Arc<dyn PostalCodeResolver>,
}

impl QuoteEngine {
    pub fn new(repos: Arc<dyn RepositoryProvider>, resolver: Arc<dyn PostalCodeResolver>) -> Self {
        Self { repos, resolver }
    }

    #[instrument(skip_all, fields(user = %actor.username))]
    pub async fn create_quote(&self, actor: &User, input: QuoteInput) -> DomainResult<QuoteWithResults> {
        require_shipper(actor)?;
        let company_id =
            acting_company(self.repos.as_ref(), actor, input.company_id.as_deref()).await?;

        let origin_zip = parse_postal_code(&input.origin_zip)?;
        let destination_zip = parse_postal_code(&input.destination_zip)?;
        if !input.weight_kg.is_finite() || input.weight_kg <= 0.0 {
            return Err(DomainError::Validation(
                "Invalid weight: must be greater than zero".into(),
            ));
        }
        check_positive(input.length_cm, "length")?;
        check_positive(input.width_cm, "width")?;
        check_positive(input.height_cm, "height")?;

        // Nothing is written until both addresses are known
        let (origin, destination) = tokio::try_join!(
            self.resolver.resolve(&origin_zip),
            self.resolver.resolve(&destination_zip),
        )?;

        let quote = self
            .repos
            .quotes()
            .create(NewQuote {
                company_id,
                created_by: actor.id.clone(),
                origin_zip,
                destination_zip,
                weight_kg: input.weight_kg,
                length_cm: input.length_cm,
                width_cm: input.width_cm,
                height_cm: input.height_cm,
                cargo_type: input
                    .cargo_type
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty()),
                origin_city: origin.city,
                origin_state: origin.state,
                destination_city: destination.city,
                destination_state: destination.state,
            })
            .await?;
        counter!("quotes_created_total").increment(1);

        let carriers = self.repos.rate_tables().carriers_with_active_table().await?;
        debug!(quote_id = %quote.id, carriers = carriers.len(), "Pricing quote");

        let mut results = Vec::with_capacity(carriers.len());
        for carrier_id in carriers {
            if let Some(result) = self.offer_for(&quote, &carrier_id).await {
                results.push(result);
            }
        }
        rank_results(&mut results);
        counter!("quote_offers_total").increment(results.len() as u64);

        info!(
            quote_id = %quote.id,
            route = %format!("{}->{}", quote.origin_state, quote.destination_state),
            weight_kg = quote.weight_kg,
            offers = results.len(),
            "Quote created"
        );
        Ok(QuoteWithResults { quote, results })
    }

    /// Best table offer of one carrier, or `None` when it has to be skipped
    async fn offer_for(&self, quote: &Quote, carrier_id: &str) -> Option<QuoteResult> {
        let rows = match self
            .repos
            .rate_tables()
            .candidate_rows(
                carrier_id,
                &quote.origin_state,
                &quote.destination_state,
                quote.weight_kg,
            )
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!(carrier_id, error = %e, "Rate lookup failed, skipping carrier");
                counter!("quote_carriers_skipped_total", "reason" => "lookup_error").increment(1);
                return None;
            }
        };

        let Some(row) = pick_best_rate_row(
            &rows,
            &quote.origin_state,
            &quote.destination_state,
            quote.weight_kg,
        ) else {
            debug!(carrier_id, "No rate row covers the route and weight");
            counter!("quote_carriers_skipped_total", "reason" => "no_match").increment(1);
            return None;
        };

        match self
            .repos
            .quotes()
            .add_result(NewQuoteResult {
                quote_id: quote.id.clone(),
                carrier_id: carrier_id.to_string(),
                origin_source: OfferSource::Table,
                price_cents: row.price_cents,
                deadline_days: row.deadline_days,
                rate_row_id: Some(row.id.clone()),
            })
            .await
        {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(carrier_id, error = %e, "Could not store offer, skipping carrier");
                counter!("quote_carriers_skipped_total", "reason" => "insert_error").increment(1);
                None
            }
        }
    }

    /// Admins see every quote, clients their company's; newest first
    pub async fn list_quotes(
        &self,
        actor: &User,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Quote>> {
        require_shipper(actor)?;
        let filter = if actor.is_admin() {
            QuoteFilter::default()
        } else {
            QuoteFilter {
                company_id: Some(actor.require_company()?.to_string()),
            }
        };
        self.repos.quotes().list(filter, pagination).await
    }

    pub async fn get_quote(&self, actor: &User, id: &str) -> DomainResult<QuoteWithResults> {
        require_shipper(actor)?;
        let quote = self
            .repos
            .quotes()
            .find_by_id(id)
            .await?
            .filter(|q| q.is_visible_to(actor))
            .ok_or_else(|| DomainError::not_found("Quote", id))?;

        let mut results = self.repos.quotes().results_for(&quote.id).await?;
        rank_results(&mut results);
        Ok(QuoteWithResults { quote, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::freight_requests::service::tests::resolver;
    use crate::application::rate_tables::service::tests::row;
    use crate::application::rate_tables::RateTableService;
    use crate::application::test_support;
    use crate::domain::quote::QuoteRepository;
    use crate::domain::rate_table::{NewRateTableRow, RateTable, RateTableRepository, RateTableRow};
    use crate::domain::{
        Address, CarrierRepository, CompanyRepository, FreightRequestRepository,
        ProposalRepository, UserRepository, UserRole,
    };

    fn input(weight_kg: f64) -> QuoteInput {
        QuoteInput {
            origin_zip: "01310-100".into(),
            destination_zip: "20040020".into(),
            weight_kg,
            ..Default::default()
        }
    }

    /// Three carriers on SP->RJ: one cheap but slow, one fast, one off-route
    async fn priced_market() -> (Arc<dyn RepositoryProvider>, User) {
        let repos = test_support::repos().await;
        test_support::company(&repos, "acme").await;
        let maria = test_support::user(&repos, "maria", UserRole::Client, Some("acme")).await;
        let tables = RateTableService::new(repos.clone());

        let (joao, _) = test_support::carrier_user(&repos, "joao").await;
        let t = tables.create_table(&joao, None).await.unwrap();
        tables.add_row(&joao, &t.id, row("SP", "RJ", 0.0, 100.0, "300,00", 6)).await.unwrap();
        tables.add_row(&joao, &t.id, row("SP", "RJ", 100.0, 1000.0, "800,00", 6)).await.unwrap();

        let (ana, _) = test_support::carrier_user(&repos, "ana").await;
        let t = tables.create_table(&ana, None).await.unwrap();
        tables.add_row(&ana, &t.id, row("SP", "RJ", 0.0, 500.0, "450,00", 2)).await.unwrap();

        let (leo, _) = test_support::carrier_user(&repos, "leo").await;
        let t = tables.create_table(&leo, None).await.unwrap();
        tables.add_row(&leo, &t.id, row("SP", "MG", 0.0, 500.0, "50,00", 1)).await.unwrap();

        (repos, maria)
    }

    #[tokio::test]
    async fn offers_are_ranked_by_price_then_deadline() {
        let (repos, maria) = priced_market().await;
        let engine = QuoteEngine::new(repos, resolver());

        let quoted = engine.create_quote(&maria, input(50.0)).await.unwrap();
        assert_eq!(quoted.quote.origin_state, "SP");
        assert_eq!(quoted.quote.destination_city, "Rio de Janeiro");
        assert_eq!(quoted.quote.company_id, "acme");

        let offers: Vec<_> = quoted
            .results
            .iter()
            .map(|r| (r.carrier_id.as_str(), r.price_cents, r.deadline_days))
            .collect();
        assert_eq!(
            offers,
            vec![("carrier-joao", 30_000, 6), ("carrier-ana", 45_000, 2)]
        );
        assert!(quoted
            .results
            .iter()
            .all(|r| r.origin_source == OfferSource::Table && r.rate_row_id.is_some()));
    }

    #[tokio::test]
    async fn heavier_cargo_moves_to_the_next_band() {
        let (repos, maria) = priced_market().await;
        let engine = QuoteEngine::new(repos, resolver());

        let quoted = engine.create_quote(&maria, input(400.0)).await.unwrap();
        let offers: Vec<_> = quoted
            .results
            .iter()
            .map(|r| (r.carrier_id.as_str(), r.price_cents))
            .collect();
        assert_eq!(offers, vec![("carrier-ana", 45_000), ("carrier-joao", 80_000)]);

        let too_heavy = engine.create_quote(&maria, input(5000.0)).await.unwrap();
        assert!(too_heavy.results.is_empty());
    }

    #[tokio::test]
    async fn inactive_tables_are_ignored() {
        let (repos, maria) = priced_market().await;
        let tables = RateTableService::new(repos.clone());
        let joao = repos.users().find_by_username("joao").await.unwrap().unwrap();
        for t in tables.list_tables(&joao).await.unwrap() {
            tables.set_table_active(&joao, &t.id, false).await.unwrap();
        }
        let engine = QuoteEngine::new(repos, resolver());

        let quoted = engine.create_quote(&maria, input(50.0)).await.unwrap();
        assert_eq!(quoted.results.len(), 1);
        assert_eq!(quoted.results[0].carrier_id, "carrier-ana");
    }

    #[tokio::test]
    async fn invalid_input_writes_nothing() {
        let (repos, maria) = priced_market().await;
        let engine = QuoteEngine::new(repos, resolver());

        let mut bad_cep = input(10.0);
        bad_cep.destination_zip = "2004".into();
        assert!(matches!(
            engine.create_quote(&maria, bad_cep).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            engine.create_quote(&maria, input(0.0)).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            engine.create_quote(&maria, input(f64::NAN)).await,
            Err(DomainError::Validation(_))
        ));
        let mut bad_dim = input(10.0);
        bad_dim.height_cm = Some(-3.0);
        assert!(matches!(
            engine.create_quote(&maria, bad_dim).await,
            Err(DomainError::Validation(_))
        ));

        let mut unknown = input(10.0);
        unknown.origin_zip = "99999-999".into();
        assert!(matches!(
            engine.create_quote(&maria, unknown).await,
            Err(DomainError::PostalCodeNotFound(_))
        ));

        let listed = engine
            .list_quotes(&maria, PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(listed.total, 0);
    }

    #[tokio::test]
    async fn quotes_are_scoped_to_the_company() {
        let (repos, maria) = priced_market().await;
        test_support::company(&repos, "globex").await;
        let bob = test_support::user(&repos, "bob", UserRole::Client, Some("globex")).await;
        let admin = test_support::user(&repos, "root", UserRole::Admin, None).await;
        let joao = repos.users().find_by_username("joao").await.unwrap().unwrap();
        let engine = QuoteEngine::new(repos, resolver());

        let quoted = engine.create_quote(&maria, input(50.0)).await.unwrap();

        let fetched = engine.get_quote(&maria, &quoted.quote.id).await.unwrap();
        assert_eq!(fetched.results.len(), 2);
        assert_eq!(fetched.results[0].price_cents, 30_000);

        assert!(matches!(
            engine.get_quote(&bob, &quoted.quote.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(engine.get_quote(&admin, &quoted.quote.id).await.is_ok());
        assert!(matches!(
            engine.create_quote(&joao, input(50.0)).await,
            Err(DomainError::Forbidden(_))
        ));

        let page = PaginationParams::default();
        assert_eq!(engine.list_quotes(&bob, page).await.unwrap().total, 0);
        assert_eq!(engine.list_quotes(&admin, page).await.unwrap().total, 1);
    }

    /// Resolver that is always down
    struct Offline;

    #[async_trait::async_trait]
    impl PostalCodeResolver for Offline {
        async fn resolve(&self, _cep: &str) -> DomainResult<Address> {
            Err(DomainError::PostalCodeUnavailable("connection refused".into()))
        }
    }

    /// Real repositories, except that rate lookups fail for `broken_lookup`
    /// and storing an offer fails for `broken_insert`
    struct Faulty {
        inner: Arc<dyn RepositoryProvider>,
        broken_lookup: &'static str,
        broken_insert: &'static str,
    }

    impl RepositoryProvider for Faulty {
        fn users(&self) -> &dyn UserRepository {
            self.inner.users()
        }
        fn companies(&self) -> &dyn CompanyRepository {
            self.inner.companies()
        }
        fn carriers(&self) -> &dyn CarrierRepository {
            self.inner.carriers()
        }
        fn freight_requests(&self) -> &dyn FreightRequestRepository {
            self.inner.freight_requests()
        }
        fn proposals(&self) -> &dyn ProposalRepository {
            self.inner.proposals()
        }
        fn rate_tables(&self) -> &dyn RateTableRepository {
            self
        }
        fn quotes(&self) -> &dyn QuoteRepository {
            self
        }
    }

    #[async_trait::async_trait]
    impl RateTableRepository for Faulty {
        async fn create_table(&self, carrier_id: &str, name: &str) -> DomainResult<RateTable> {
            self.inner.rate_tables().create_table(carrier_id, name).await
        }
        async fn find_table(&self, id: &str) -> DomainResult<Option<RateTable>> {
            self.inner.rate_tables().find_table(id).await
        }
        async fn list_tables_by_carrier(&self, carrier_id: &str) -> DomainResult<Vec<RateTable>> {
            self.inner.rate_tables().list_tables_by_carrier(carrier_id).await
        }
        async fn rename_table(&self, id: &str, name: &str) -> DomainResult<RateTable> {
            self.inner.rate_tables().rename_table(id, name).await
        }
        async fn set_table_active(&self, id: &str, is_active: bool) -> DomainResult<RateTable> {
            self.inner.rate_tables().set_table_active(id, is_active).await
        }
        async fn add_row(&self, row: NewRateTableRow) -> DomainResult<RateTableRow> {
            self.inner.rate_tables().add_row(row).await
        }
        async fn list_rows(&self, table_id: &str) -> DomainResult<Vec<RateTableRow>> {
            self.inner.rate_tables().list_rows(table_id).await
        }
        async fn delete_row(&self, table_id: &str, row_id: &str) -> DomainResult<()> {
            self.inner.rate_tables().delete_row(table_id, row_id).await
        }
        async fn carriers_with_active_table(&self) -> DomainResult<Vec<String>> {
            self.inner.rate_tables().carriers_with_active_table().await
        }
        async fn candidate_rows(
            &self,
            carrier_id: &str,
            origin_state: &str,
            destination_state: &str,
            weight_kg: f64,
        ) -> DomainResult<Vec<RateTableRow>> {
            if carrier_id == self.broken_lookup {
                return Err(DomainError::Storage("database is locked".into()));
            }
            self.inner
                .rate_tables()
                .candidate_rows(carrier_id, origin_state, destination_state, weight_kg)
                .await
        }
    }

    #[async_trait::async_trait]
    impl QuoteRepository for Faulty {
        async fn create(&self, quote: NewQuote) -> DomainResult<Quote> {
            self.inner.quotes().create(quote).await
        }
        async fn find_by_id(&self, id: &str) -> DomainResult<Option<Quote>> {
            self.inner.quotes().find_by_id(id).await
        }
        async fn list(
            &self,
            filter: QuoteFilter,
            pagination: PaginationParams,
        ) -> DomainResult<PaginatedResult<Quote>> {
            self.inner.quotes().list(filter, pagination).await
        }
        async fn add_result(&self, result: NewQuoteResult) -> DomainResult<QuoteResult> {
            if result.carrier_id == self.broken_insert {
                return Err(DomainError::Conflict("offer already stored".into()));
            }
            self.inner.quotes().add_result(result).await
        }
        async fn results_for(&self, quote_id: &str) -> DomainResult<Vec<QuoteResult>> {
            self.inner.quotes().results_for(quote_id).await
        }
    }

    #[tokio::test]
    async fn failing_carriers_are_skipped_and_the_rest_still_quote() {
        let (repos, maria) = priced_market().await;
        let tables = RateTableService::new(repos.clone());
        let (bia, _) = test_support::carrier_user(&repos, "bia").await;
        let t = tables.create_table(&bia, None).await.unwrap();
        tables.add_row(&bia, &t.id, row("SP", "RJ", 0.0, 200.0, "500,00", 4)).await.unwrap();

        let faulty: Arc<dyn RepositoryProvider> = Arc::new(Faulty {
            inner: repos,
            broken_lookup: "carrier-joao",
            broken_insert: "carrier-ana",
        });
        let engine = QuoteEngine::new(faulty, resolver());

        let quoted = engine.create_quote(&maria, input(50.0)).await.unwrap();
        let offers: Vec<_> = quoted
            .results
            .iter()
            .map(|r| (r.carrier_id.as_str(), r.price_cents))
            .collect();
        assert_eq!(offers, vec![("carrier-bia", 50_000)]);

        let stored = engine.get_quote(&maria, &quoted.quote.id).await.unwrap();
        assert_eq!(stored.results.len(), 1);
    }

    #[tokio::test]
    async fn resolver_outage_fails_the_quote() {
        let (repos, maria) = priced_market().await;
        let engine = QuoteEngine::new(repos, Arc::new(Offline));
        assert!(matches!(
            engine.create_quote(&maria, input(50.0)).await,
            Err(DomainError::PostalCodeUnavailable(_))
        ));
    }
}
