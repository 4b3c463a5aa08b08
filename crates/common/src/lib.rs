pub mod address;
pub mod config;
pub mod http;
pub mod observability;
pub mod okx;
pub mod types;
pub mod voyager;
