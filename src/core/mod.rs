pub mod app;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod models;
pub mod persistence;
pub mod pipeline;
pub mod provider;
