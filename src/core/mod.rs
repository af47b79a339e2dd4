//! Core library modules for butterfly-walk
//!
//! Record parsing, graph construction and the Bellman-Ford engine, plus the
//! configuration and file loading that feed them.

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod loader;
pub mod record;
pub mod route;
