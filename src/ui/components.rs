use dioxus::prelude::*;

use crate::domain::entities::dataset::Notice;
use crate::domain::tabular::TabularData;
use crate::ui::format::{display_cell, format_inr};

const PANEL_STYLE: &str =
    "border: 1px solid #ddd; border-radius: 6px; padding: 12px; margin: 12px 0;";
const CELL_STYLE: &str = "border: 1px solid #bbb; padding: 6px;";
const HEADER_CELL_STYLE: &str = "border: 1px solid #bbb; padding: 6px; background: #f2f2f2;";

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64, color: &str) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.to_string(),
        }
    }
}

/// Share of the widest bar, in percent of the track.
fn bar_width(value: f64, max: f64) -> f64 {
    if max <= 0.0 || value <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).min(100.0)
    }
}

#[component]
pub fn KpiTile(label: String, value: String) -> Element {
    rsx! {
        div { style: "flex: 1; min-width: 160px; padding: 12px; border: 1px solid #ddd; border-radius: 6px;",
            div { style: "color: #666; font-size: 0.9rem;", "{label}" }
            div { style: "font-size: 1.6rem; font-weight: bold;", "{value}" }
        }
    }
}

#[component]
pub fn BarChart(title: String, bars: Vec<Bar>) -> Element {
    let max = bars
        .iter()
        .map(|bar| bar.value.abs())
        .fold(0.0_f64, f64::max);
    let rows: Vec<(String, String, String)> = bars
        .iter()
        .map(|bar| {
            let style = format!(
                "width: {:.1}%; background: {}; height: 18px;",
                bar_width(bar.value.abs(), max),
                bar.color
            );
            (bar.label.clone(), style, format_inr(bar.value))
        })
        .collect();

    rsx! {
        div { style: PANEL_STYLE,
            h3 { "{title}" }
            if rows.is_empty() {
                p { style: "color: #888;", "No data for this chart" }
            } else {
                for (label, style, value) in rows {
                    div { style: "display: flex; align-items: center; gap: 8px; margin: 4px 0;",
                        span { style: "width: 160px; text-align: right;", "{label}" }
                        div { style: "flex: 1; background: #f4f4f4;",
                            div { style: "{style}" }
                        }
                        span { style: "width: 120px;", "{value}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn DataTable(title: String, table: TabularData, on_export: EventHandler<()>) -> Element {
    let empty = table.rows.is_empty();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&table.columns)
                .map(|(value, column)| display_cell(column, value))
                .collect()
        })
        .collect();

    rsx! {
        div { style: PANEL_STYLE,
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h3 { "{title}" }
                button {
                    disabled: empty,
                    onclick: move |_| on_export.call(()),
                    "Export CSV"
                }
            }
            table { style: "border-collapse: collapse; width: 100%; border: 1px solid #bbb;",
                thead {
                    tr {
                        for header in table.columns.clone() {
                            th { style: HEADER_CELL_STYLE, "{header}" }
                        }
                    }
                }
                tbody {
                    if empty {
                        tr {
                            td { style: CELL_STYLE,
                                colspan: table.columns.len().max(1),
                                "No data"
                            }
                        }
                    } else {
                        for row in rows {
                            tr {
                                for cell in row {
                                    td { style: CELL_STYLE, "{cell}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn NoticeList(notices: Vec<Notice>) -> Element {
    rsx! {
        if !notices.is_empty() {
            ul { style: "background: #fff8e1; border: 1px solid #f0c36d; padding: 8px 24px;",
                for notice in notices {
                    li { "{notice}" }
                }
            }
        }
    }
}
