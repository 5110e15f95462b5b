//! Ranked cases-per-state table with percentage bars.

use cad_core::cases::RankedTable;
use dioxus::prelude::*;

const CELL: &str = "padding: 6px 8px; border-bottom: 1px solid #eee;";

#[derive(Props, Clone, PartialEq)]
pub struct RankedCasesTableProps {
    pub table: RankedTable,
}

#[component]
pub fn RankedCasesTable(props: RankedCasesTableProps) -> Element {
    let table = &props.table;

    rsx! {
        div {
            p {
                style: "margin: 0 0 8px 0; font-weight: bold;",
                "{table.total_label()}"
            }
            table {
                style: "width: 100%; border-collapse: collapse; font-size: 14px;",
                thead {
                    tr {
                        th { style: "{CELL} text-align: left;", "Rank" }
                        th { style: "{CELL} text-align: left;", "State" }
                        th { style: "{CELL} text-align: right;", "Cases" }
                        th { style: "{CELL} text-align: right;", "Share" }
                        th { style: "{CELL} width: 35%;", "" }
                    }
                }
                tbody {
                    for row in table.rows.iter() {
                        tr {
                            key: "{row.rank}",
                            td { style: "{CELL} color: #666;", "{row.rank_label()}" }
                            td { style: "{CELL}", "{row.label}" }
                            td { style: "{CELL} text-align: right;", "{row.count_label()}" }
                            td { style: "{CELL} text-align: right;", "{row.percentage_label()}" }
                            td {
                                style: "{CELL}",
                                div {
                                    style: "height: 10px; background: #1976D2; border-radius: 2px; width: {row.bar_label()};",
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
