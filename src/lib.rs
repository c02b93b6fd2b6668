//! Indicator and squeeze-signal engine for the finance dashboard.

pub mod chart;
pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
