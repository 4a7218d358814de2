//! Postgres snapshot store.

pub mod postgres;

pub use postgres::MarketDatabase;
