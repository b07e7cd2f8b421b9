//! CLI command implementations.

pub mod backend;
pub mod common;
pub mod config;
pub mod download;
pub mod effects;
pub mod process;
