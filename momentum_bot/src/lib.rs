//! Momentum scanning on top of `market_data_ingestor`: the momentum rule,
//! a thin brokerage client for orders and account status, and the
//! fetch → evaluate → order → export pipeline the CLI drives.

pub mod broker;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod strategy;
