//! HTTP surface of the ledger: entry and audit routes, health checks and
//! the OpenAPI document.

mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
