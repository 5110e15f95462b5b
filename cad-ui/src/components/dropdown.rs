//! Labelled `<select>` over a list of options.

use cad_core::filters::SelectOption;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DropdownProps {
    pub label: String,
    /// Currently selected value
    pub value: String,
    pub options: Vec<SelectOption>,
    pub onchange: EventHandler<String>,
    #[props(default = false)]
    pub disabled: bool,
}

#[component]
pub fn Dropdown(props: DropdownProps) -> Element {
    let onchange = props.onchange;

    rsx! {
        label {
            style: "font-weight: bold; display: flex; gap: 6px; align-items: center;",
            "{props.label}: "
            select {
                disabled: props.disabled,
                onchange: move |evt: Event<FormData>| onchange.call(evt.value()),
                for opt in props.options.iter() {
                    option {
                        key: "{opt.value}",
                        value: "{opt.value}",
                        selected: opt.value == props.value,
                        "{opt.label}"
                    }
                }
            }
        }
    }
}
