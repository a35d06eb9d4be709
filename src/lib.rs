//! Backwave: create and share anonymous feedback surveys.
//!
//! The crate carries both halves of the product. `server`, `store`, `ids`
//! and `results` implement the REST service; `api`, `routes` and `i18n` are
//! the client-side building blocks the web frontend composes. `survey`
//! holds the wire types shared by both.

pub mod api;
pub mod config;
pub mod error;
pub mod i18n;
pub mod ids;
pub mod results;
pub mod routes;
pub mod server;
pub mod store;
pub mod survey;
