pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod output;
pub mod status;
pub mod terms;
pub mod token;
pub mod workflow;
