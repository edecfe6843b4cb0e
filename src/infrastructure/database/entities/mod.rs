//! Database entities module

pub mod carrier;
pub mod company;
pub mod freight_proposal;
pub mod freight_request;
pub mod quote;
pub mod quote_result;
pub mod rate_table;
pub mod rate_table_row;
pub mod user;

pub use carrier::Entity as Carrier;
pub use company::Entity as Company;
pub use freight_proposal::Entity as FreightProposal;
pub use freight_request::Entity as FreightRequest;
pub use quote::Entity as Quote;
pub use quote_result::Entity as QuoteResult;
pub use rate_table::Entity as RateTable;
pub use rate_table_row::Entity as RateTableRow;
pub use user::Entity as User;
