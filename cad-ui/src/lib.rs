//! Shared Dioxus components, hooks and browser bridge for the dashboard.
//!
//! This crate provides:
//! - `web_fetch`: `fetch`-based transport and `blob:` URL image handles
//! - `state`: AppState with the service settings, shared via context
//! - `hooks`: debouncing and per-panel fetch lifecycles
//! - `components`: panels, filter controls, status container and table

pub mod components;
pub mod hooks;
pub mod state;
pub mod web_fetch;
