//! Case Analytics Dashboard
//!
//! Six independent panels, each with its own filters:
//! - CDF line plot, CDF line plot by state, India map, word cloud and
//!   stacked histogram show PNGs rendered by the analytics service
//! - cases per state shows the service's JSON as a ranked table
//!
//! The line plot and the map refetch on their own once the filters have
//! been still for the debounce period. The other panels wait for
//! "Generate".
//!
//! The service base URL is taken from `CAD_API_BASE_URL` at compile time;
//! when unset, requests go to the page's own origin.

use cad_core::controls::FetchPolicy;
use cad_core::Endpoint;
use cad_ui::components::{CasesPanel, ImagePanel};
use cad_ui::state::AppState;
use dioxus::prelude::*;

const IMAGE_PANELS: [(Endpoint, FetchPolicy); 5] = [
    (Endpoint::CdfLinePlot, FetchPolicy::Auto),
    (Endpoint::CdfLinePlotByState, FetchPolicy::Manual),
    (Endpoint::IndiaMap, FetchPolicy::Auto),
    (Endpoint::WordCloud, FetchPolicy::Manual),
    (Endpoint::StackedHistogram, FetchPolicy::Manual),
];

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("case-dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let state = use_context_provider(AppState::new);

    use_effect(move || {
        let config = state.config.peek();
        let base = if config.api_base_url.is_empty() {
            "same origin"
        } else {
            config.api_base_url.as_str()
        };
        log::info!(
            "[CAD] dashboard ready, api: {}, debounce: {}ms",
            base,
            config.debounce.as_millis()
        );
    });

    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 16px; font-family: sans-serif; background: #fafafa;",
            header {
                style: "margin-bottom: 24px;",
                h1 {
                    style: "margin: 0; font-size: 24px;",
                    "Data Visualization Dashboard"
                }
            }
            for (endpoint, policy) in IMAGE_PANELS {
                ImagePanel { key: "{endpoint}", endpoint, policy }
            }
            CasesPanel { policy: FetchPolicy::Manual }
        }
    }
}
