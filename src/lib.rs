//! `market-feeds` library crate.
//!
//! The binary (`mkt`) is a thin wrapper around this library so that:
//!
//! - source parsing and report rendering are testable without the network
//! - every subcommand shares one settings/HTTP/output path
//! - code stays easy to navigate as more sources are added

pub mod app;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
