//! Core of the case analytics dashboard.
//!
//! Nothing here computes statistics; the analytics service renders every
//! chart and aggregates every table. This crate covers what the client does
//! with that service:
//! - `filters`: filter values, option catalogues and the year correction rule
//! - `params`: endpoints and the projection of filters into requests
//! - `controls`: per-panel controls and the manual/auto fetch policy
//! - `debounce`: clock-agnostic value debouncing
//! - `fetch`: the per-panel fetch state machine with generation checks
//! - `transport`: the HTTP seam and response decoders
//! - `image`: owned image handles released on drop
//! - `cases`: cases-per-state normalization and the ranked view
//! - `status`: loading/error/empty/content precedence
//! - `client` (feature `api`): `reqwest` transport for native builds

pub mod cases;
pub mod config;
pub mod controls;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod image;
pub mod params;
pub mod status;
pub mod transport;

#[cfg(feature = "api")]
pub mod client;

pub use error::FetchError;
pub use fetch::{Completion, FetchState, Panel, Ticket};
pub use filters::FilterState;
pub use params::{ArtifactRequest, Endpoint, ParamBundle};
