//! Start/end year selectors.
//!
//! The end year list only offers years after the start year, and the
//! underlying filter state corrects the end year whenever the start moves
//! past it.

use super::Dropdown;
use cad_core::filters::{end_year_options, parse_year, start_year_options};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct YearRangePickerProps {
    pub start_year: u16,
    pub end_year: u16,
    pub on_start: EventHandler<u16>,
    pub on_end: EventHandler<u16>,
    #[props(default = false)]
    pub disabled: bool,
}

#[component]
pub fn YearRangePicker(props: YearRangePickerProps) -> Element {
    let on_start = props.on_start;
    let on_end = props.on_end;
    let invalid = props.start_year >= props.end_year;

    rsx! {
        div {
            style: "display: flex; gap: 12px; align-items: center;",
            Dropdown {
                label: "Start Year",
                value: props.start_year.to_string(),
                options: start_year_options(),
                disabled: props.disabled,
                onchange: move |value: String| match parse_year(&value) {
                    Ok(year) => on_start.call(year),
                    Err(e) => log::warn!("[CAD] {}", e),
                },
            }
            Dropdown {
                label: "End Year",
                value: props.end_year.to_string(),
                options: end_year_options(props.start_year),
                disabled: props.disabled,
                onchange: move |value: String| match parse_year(&value) {
                    Ok(year) => on_end.call(year),
                    Err(e) => log::warn!("[CAD] {}", e),
                },
            }
            if invalid {
                span {
                    style: "color: #C62828; font-size: 12px;",
                    "End year must be greater than start year"
                }
            }
        }
    }
}
