//! # eCFR Explorer Core
//!
//! Runtime-agnostic logic for eCFR Explorer: the record model, the
//! built-in sample table, the filter/ranker, the intent classifier and
//! the chat session object.
//!
//! This crate contains no tokio, HTTP, or filesystem dependencies. The
//! application crate supplies configuration, record loading, the
//! response delay, and the CLI/HTTP frontends.

pub mod catalog;
pub mod classify;
pub mod models;
pub mod search;
pub mod session;
pub mod stats;
