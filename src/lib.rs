//! # eCFR Explorer
//!
//! Browse federal regulation sample data from the command line or over a
//! JSON HTTP API: agency-filtered record search, a keyword-driven chat
//! assistant with canned replies, and dashboard statistics.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────────┐
//! │ Record table │──▶│ ecfr-explorer-core            │
//! │ sample/JSON  │   │ search · classify · session   │
//! └──────────────┘   └──────────────┬───────────────┘
//!                                   │
//!                      ┌────────────┴──────┐
//!                      ▼                   ▼
//!                 ┌──────────┐       ┌──────────┐
//!                 │   CLI    │       │   HTTP   │
//!                 │  (ecfr)  │       │  (axum)  │
//!                 └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! ecfr search "organic"
//! ecfr search "requirements" --agency "Department of Energy"
//! ecfr ask "What are the safety requirements?" --agency "Department of Energy"
//! ecfr chat
//! ecfr serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`catalog`] | Record table loading and facet resolution |
//! | [`classifier`] | Classifier construction and response delay |
//! | [`search`] | Search frontend |
//! | [`chat`] | `ask` and interactive `chat` |
//! | [`get`] | Record lookup |
//! | [`stats`] | Dashboard statistics |
//! | [`server`] | JSON HTTP server |

pub mod catalog;
pub mod chat;
pub mod classifier;
pub mod config;
pub mod get;
pub mod search;
pub mod server;
pub mod stats;
