//! Core library for the taskpilot to-do service: domain models, the
//! ownership-enforced task store, authentication, HTTP routing, the chat tool
//! adapter, and the stdio tool server. The binaries (`main.rs`,
//! `bin/tools.rs`) wire these pieces together; the offline CLI in
//! `bin/cli.rs` is intentionally standalone and uses none of this.

pub mod agent;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod routes;
pub mod store;
