//! Terminal dashboard client.
//!
//! Polls the popdash API, regroups the returned rows into series and draws
//! them as text tables, one panel per chart.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod render;
