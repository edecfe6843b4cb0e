use async_trait::async_trait;

use super::{NewQuote, NewQuoteResult, Quote, QuoteResult};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
    pub company_id: Option<String>,
}

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create(&self, quote: NewQuote) -> DomainResult<Quote>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Quote>>;
    /// Newest first
    async fn list(
        &self,
        filter: QuoteFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Quote>>;
    /// Fails with `Conflict` when the carrier already has an offer on the quote
    async fn add_result(&self, result: NewQuoteResult) -> DomainResult<QuoteResult>;
    /// Cheapest first, then shortest deadline
    async fn results_for(&self, quote_id: &str) -> DomainResult<Vec<QuoteResult>>;
}
