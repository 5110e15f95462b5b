//! Status container: exactly one of loading, error, empty or content.

use super::{ErrorDisplay, LoadingSpinner};
use cad_core::status::{resolve_view, PanelView, EMPTY_MESSAGE};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct StatusContainerProps {
    #[props(default = false)]
    pub loading: bool,
    /// Banner text when the last fetch failed
    #[props(!optional)]
    pub error: Option<String>,
    /// Whether the last fetch produced something to show
    #[props(default = false)]
    pub has_data: bool,
    /// Minimum height in pixels so panels don't jump between states
    #[props(default = 300)]
    pub min_height: u32,
    pub children: Element,
}

#[component]
pub fn StatusContainer(props: StatusContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );
    let view = resolve_view(props.loading, props.error.as_deref(), props.has_data);

    rsx! {
        div {
            style: "{style}",
            match view {
                PanelView::Loading => rsx! { LoadingSpinner {} },
                PanelView::Error(message) => rsx! { ErrorDisplay { message: message.to_string() } },
                PanelView::Empty => rsx! {
                    div {
                        style: "padding: 40px; text-align: center; color: #888;",
                        "{EMPTY_MESSAGE}"
                    }
                },
                PanelView::Content => rsx! { {props.children} },
            }
        }
    }
}
