//! Loading indicator.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    #[props(default = "Loading...".to_string())]
    pub label: String,
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; gap: 8px; padding: 40px; color: #666;",
            div {
                style: "width: 16px; height: 16px; border: 2px solid #ccc; border-top-color: #1976D2; border-radius: 50%; animation: spin 1s linear infinite;",
            }
            "{props.label}"
        }
    }
}
