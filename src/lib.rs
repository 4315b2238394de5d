//! # Valorant Tools
//!
//! Valorant player, match and leaderboard lookups over the HenrikDev API,
//! exposed as LLM-callable tools.
//!
//! ## Architecture
//!
//! - **upstream**: Authenticated HTTP client and endpoint catalogue
//! - **models**: Upstream payload shapes
//! - **calculate**: Match-performance join, aggregation and leaderboard search
//! - **tools**: Tool registry, argument decoding and result shaping
//! - **mcp**: JSON-RPC server over stdio
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod upstream;
