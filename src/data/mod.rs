//! Source clients.
//!
//! Each client wraps the shared blocking `reqwest` client and turns one
//! upstream response shape into domain records. Parsing is split from the
//! request so every parser can be tested against a fixture.

pub mod fred;
pub mod http;
pub mod investing;
pub mod oecd;
pub mod tradingeconomics;
pub mod tradingview;
pub mod worldbank;
pub mod yahoo;

pub use fred::FredClient;
pub use investing::InvestingClient;
pub use oecd::OecdClient;
pub use tradingeconomics::{CalendarQuery, TradingEconomicsClient};
pub use tradingview::TradingViewClient;
pub use worldbank::WorldBankClient;
pub use yahoo::YahooClient;
