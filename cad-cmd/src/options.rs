//! `options`: the values each filter accepts.

use cad_core::filters::{
    column_type_options, state_options, table_type_options, year_options, SelectOption,
};
use cad_core::Endpoint;

fn section(out: &mut String, title: &str, options: &[SelectOption]) {
    out.push_str(&format!("{}:\n", title));
    for opt in options {
        if opt.value == opt.label {
            out.push_str(&format!("  {}\n", opt.value));
        } else {
            out.push_str(&format!("  {:<16} {}\n", opt.value, opt.label));
        }
    }
}

pub fn render_options() -> String {
    let mut out = String::new();

    out.push_str("Panels:\n");
    for endpoint in Endpoint::ALL {
        out.push_str(&format!("  {:<20} {}\n", endpoint.slug(), endpoint.title()));
    }

    let years = year_options();
    if let (Some(first), Some(last)) = (years.first(), years.last()) {
        out.push_str(&format!("Years:\n  {}..={}\n", first.value, last.value));
    }

    section(&mut out, "Table types", &table_type_options());
    section(&mut out, "Columns", &column_type_options());
    section(&mut out, "States", &state_options());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options() {
        let text = render_options();
        assert!(text.contains("  cases-per-state      Cases Per State\n"));
        assert!(text.contains("Years:\n  1990..=2023\n"));
        assert!(text.contains("  by               By\n"));
        assert!(text.contains("  a_aff_resolved   Affected Resolved (A)\n"));
        assert!(text.contains("  Bihar\n"));
    }
}
