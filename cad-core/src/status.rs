//! Which single view a panel shows for a given loading/error/data triple.

/// Message shown when a fetch completed with nothing to display.
pub const EMPTY_MESSAGE: &str = "No data available for the selected criteria.";

/// The one thing a status container renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Content,
}

/// Strict precedence: loading, then error, then empty, then content.
pub fn resolve_view<'a>(loading: bool, error: Option<&'a str>, has_data: bool) -> PanelView<'a> {
    if loading {
        PanelView::Loading
    } else if let Some(message) = error {
        PanelView::Error(message)
    } else if !has_data {
        PanelView::Empty
    } else {
        PanelView::Content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(resolve_view(true, Some("boom"), true), PanelView::Loading);
        assert_eq!(resolve_view(false, Some("boom"), true), PanelView::Error("boom"));
        assert_eq!(resolve_view(false, None, false), PanelView::Empty);
        assert_eq!(resolve_view(false, None, true), PanelView::Content);
        assert_eq!(resolve_view(true, None, false), PanelView::Loading);
    }
}
