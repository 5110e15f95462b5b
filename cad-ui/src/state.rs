//! Application state managed via Dioxus context.
//!
//! `AppState` is provided once by the app with `use_context_provider` and
//! read by every panel with `use_context::<AppState>()`.

use cad_core::config::DashboardConfig;
use dioxus::prelude::*;

/// Settings shared by all panels.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Service base URL and debounce period
    pub config: Signal<DashboardConfig>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::web())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        Self {
            config: Signal::new(config),
        }
    }
}
