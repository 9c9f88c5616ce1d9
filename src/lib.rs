pub mod api;
pub mod cli;
pub mod config;
pub mod estimator;
pub mod models;
pub mod network;
pub mod plan;
