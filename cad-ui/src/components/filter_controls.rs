//! Filter row of one panel: years, table type, column, state and, for
//! manual panels, the "Generate" button.

use super::{Dropdown, YearRangePicker};
use cad_core::controls::{FetchPolicy, PanelControls};
use cad_core::filters::{
    column_type_options, state_options, table_type_options, ColumnType, TableType,
};
use cad_core::Endpoint;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct FilterControlsProps {
    pub controls: Signal<PanelControls>,
    pub endpoint: Endpoint,
    /// A fetch is in flight
    #[props(default = false)]
    pub loading: bool,
}

#[component]
pub fn FilterControls(props: FilterControlsProps) -> Element {
    let mut controls = props.controls;
    let endpoint = props.endpoint;
    let current = controls.read().clone();
    let filters = current.filters();
    let can_generate = current.can_generate(props.loading);

    let on_table = move |value: String| match value.parse::<TableType>() {
        Ok(t) => controls.write().set_table_type(t),
        Err(e) => log::warn!("[CAD] {}", e),
    };
    let on_column = move |value: String| match value.parse::<ColumnType>() {
        Ok(c) => controls.write().set_column_type(c),
        Err(e) => log::warn!("[CAD] {}", e),
    };

    rsx! {
        div {
            style: "margin: 8px 0 16px 0; display: flex; flex-wrap: wrap; gap: 12px; align-items: center;",
            YearRangePicker {
                start_year: filters.start_year,
                end_year: filters.end_year,
                on_start: move |year: u16| controls.write().set_start_year(year),
                on_end: move |year: u16| controls.write().set_end_year(year),
            }
            Dropdown {
                label: "Table",
                value: filters.table_type.as_str().to_string(),
                options: table_type_options(),
                onchange: on_table,
            }
            if endpoint.uses_column() {
                Dropdown {
                    label: "Column",
                    value: filters.column_type.as_str().to_string(),
                    options: column_type_options(),
                    onchange: on_column,
                }
            }
            if endpoint.uses_state() {
                Dropdown {
                    label: "State",
                    value: filters.state.clone(),
                    options: state_options(),
                    onchange: move |value: String| controls.write().set_state(value),
                }
            }
            if current.policy() == FetchPolicy::Manual {
                button {
                    disabled: !can_generate,
                    style: "padding: 6px 14px; background: #1976D2; color: #fff; border: none; border-radius: 4px; cursor: pointer;",
                    onclick: move |_| {
                        if controls.write().generate() {
                            log::info!("[CAD] generate {}", endpoint);
                        }
                    },
                    if props.loading { "Generating..." } else { "Generate" }
                }
            }
        }
    }
}
