//! Cases-per-state panel: a JSON list rendered as a ranked table.

use super::{ChartHeader, FilterControls, RankedCasesTable, StatusContainer, PANEL_STYLE};
use crate::hooks::use_panel_fetch;
use cad_core::cases::rank_cases;
use cad_core::controls::{FetchPolicy, PanelControls};
use cad_core::transport::CasesDecoder;
use cad_core::Endpoint;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct CasesPanelProps {
    #[props(default = FetchPolicy::Manual)]
    pub policy: FetchPolicy,
}

#[component]
pub fn CasesPanel(props: CasesPanelProps) -> Element {
    let endpoint = Endpoint::CasesPerState;
    let policy = props.policy;
    let controls = use_signal(move || PanelControls::new(policy));
    let panel = use_panel_fetch(endpoint, || CasesDecoder, controls);

    let (loading, error, table) = {
        let panel = panel.read();
        let state = panel.state();
        (
            state.is_loading(),
            state.error_message(),
            state.data().map(|cases| rank_cases(cases)),
        )
    };
    let title = controls.read().title(endpoint);
    let has_data = table.as_ref().is_some_and(|t| !t.is_empty());

    rsx! {
        section {
            style: PANEL_STYLE,
            ChartHeader { title }
            FilterControls { controls, endpoint, loading }
            StatusContainer {
                loading,
                error,
                has_data,
                min_height: 200,
                if let Some(table) = table {
                    RankedCasesTable { table }
                }
            }
        }
    }
}
