pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod fetch;
pub mod logging;
pub mod pipeline;
