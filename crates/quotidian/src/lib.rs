//! Quotidian core services
//!
//! Quote providers, favourites persistence, and the application controller
//! shared by all frontends.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod network;
pub mod providers;
