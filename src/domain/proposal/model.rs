use chrono::{DateTime, Utc};

use crate::shared::errors::{DomainError, DomainResult};

/// Offer status, shared by request proposals and instant-quote results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStatus {
    Sent,
    Withdrawn,
    Won,
    Lost,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "SENT",
            Self::Withdrawn => "WITHDRAWN",
            Self::Won => "WON",
            Self::Lost => "LOST",
        }
    }
}

impl Default for ProposalStatus {
    fn default() -> Self {
        Self::Sent
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProposalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SENT" => Ok(Self::Sent),
            "WITHDRAWN" => Ok(Self::Withdrawn),
            "WON" => Ok(Self::Won),
            "LOST" => Ok(Self::Lost),
            other => Err(DomainError::Validation(format!(
                "Unknown proposal status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FreightProposal {
    pub id: String,
    pub freight_request_id: String,
    pub carrier_id: String,
    pub price_cents: i64,
    pub deadline_days: i32,
    pub notes: Option<String>,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProposal {
    pub freight_request_id: String,
    pub carrier_id: String,
    pub price_cents: i64,
    pub deadline_days: i32,
    pub notes: Option<String>,
}

impl FreightProposal {
    /// Only proposals still in play can win or be withdrawn
    pub fn ensure_sent(&self) -> DomainResult<()> {
        if self.status == ProposalStatus::Sent {
            Ok(())
        } else {
            Err(DomainError::Conflict(format!(
                "Proposal {} is {}",
                self.id,
                self.status.as_str().to_lowercase()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names() {
        assert_eq!(ProposalStatus::Withdrawn.to_string(), "WITHDRAWN");
        assert_eq!("won".parse::<ProposalStatus>().unwrap(), ProposalStatus::Won);
        assert!("PENDING".parse::<ProposalStatus>().is_err());
    }

    #[test]
    fn only_sent_proposals_are_in_play() {
        let mut p = FreightProposal {
            id: "p1".into(),
            freight_request_id: "fr1".into(),
            carrier_id: "c1".into(),
            price_cents: 10_000,
            deadline_days: 3,
            notes: None,
            status: ProposalStatus::Sent,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(p.ensure_sent().is_ok());
        p.status = ProposalStatus::Lost;
        assert!(p.ensure_sent().is_err());
    }
}
