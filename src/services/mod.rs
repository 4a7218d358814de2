//! External data providers.

pub mod fear_greed;
pub mod market_data;
pub mod yahoo;

pub use fear_greed::FearGreedClient;
pub use market_data::MarketDataGateway;
pub use yahoo::YahooGateway;
