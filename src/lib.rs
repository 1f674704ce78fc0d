// Library for tests to access modules

pub mod cli;
pub mod config;
pub mod input;
pub mod models;
pub mod provider;
pub mod ranking;
pub mod rates;
pub mod scheduler;
pub mod severity;
pub mod snapshot;
pub mod store;
pub mod ui;
