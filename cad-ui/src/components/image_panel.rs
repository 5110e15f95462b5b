//! Panel showing one chart image rendered by the service.

use super::{ChartHeader, FilterControls, StatusContainer, PANEL_STYLE};
use crate::hooks::use_panel_fetch;
use crate::web_fetch::BlobUrls;
use cad_core::controls::{FetchPolicy, PanelControls};
use cad_core::transport::ImageDecoder;
use cad_core::Endpoint;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ImagePanelProps {
    /// One of the image endpoints
    pub endpoint: Endpoint,
    pub policy: FetchPolicy,
}

#[component]
pub fn ImagePanel(props: ImagePanelProps) -> Element {
    let endpoint = props.endpoint;
    let policy = props.policy;
    let controls = use_signal(move || PanelControls::new(policy));
    let panel = use_panel_fetch(endpoint, || ImageDecoder::new(BlobUrls), controls);

    let (loading, error, image_url) = {
        let panel = panel.read();
        let state = panel.state();
        (
            state.is_loading(),
            state.error_message(),
            state.data().map(|image| image.image_url().to_string()),
        )
    };
    let title = controls.read().title(endpoint);

    rsx! {
        section {
            style: PANEL_STYLE,
            ChartHeader { title: title.clone() }
            FilterControls { controls, endpoint, loading }
            StatusContainer {
                loading,
                error,
                has_data: image_url.is_some(),
                if let Some(url) = image_url {
                    img {
                        src: "{url}",
                        alt: "{title}",
                        style: "max-width: 100%; height: auto; display: block; margin: 0 auto;",
                    }
                }
            }
        }
    }
}
