pub mod auth;
pub mod carriers;
pub mod companies;
pub mod freight_requests;
pub mod health;
pub mod metrics;
pub mod proposals;
pub mod quotes;
pub mod rate_tables;
pub mod request_id;
pub mod users;
