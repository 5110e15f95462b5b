//! Reusable Dioxus RSX components for the dashboard panels.

mod cases_panel;
mod chart_header;
mod dropdown;
mod error_display;
mod filter_controls;
mod image_panel;
mod loading_spinner;
mod ranked_table;
mod status_container;
mod year_range_picker;

pub use cases_panel::CasesPanel;
pub use chart_header::ChartHeader;
pub use dropdown::Dropdown;
pub use error_display::ErrorDisplay;
pub use filter_controls::FilterControls;
pub use image_panel::ImagePanel;
pub use loading_spinner::LoadingSpinner;
pub use ranked_table::RankedCasesTable;
pub use status_container::StatusContainer;
pub use year_range_picker::YearRangePicker;

/// Card style shared by every panel.
pub(crate) const PANEL_STYLE: &str = "background: #fff; border: 1px solid #e0e0e0; border-radius: 6px; padding: 16px; margin-bottom: 24px;";
