//! Subcommand handlers

pub mod config;
pub mod export;
pub mod loadtest;
pub mod report;
