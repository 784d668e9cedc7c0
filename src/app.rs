use std::sync::Arc;

use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::{error, info};

use crate::config::{load_config, load_layout, AppConfig};
use crate::domain::aggregate::summarize;
use crate::domain::entities::dataset::EstateDataset;
use crate::domain::entities::layout::SheetLayout;
use crate::domain::tabular::{Section, TabularData};
use crate::infra::import::source::{LocalFile, RemoteUrl};
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::{Bar, BarChart, DataTable, KpiTile, NoticeList};
use crate::ui::format::{balance_color, balance_label, format_inr, format_percent};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::source::WorkbookSource;
use crate::usecase::services::export_service::{default_file_name, ExportService};
use crate::usecase::services::import_service::{ImportService, LoadOutcome};

const BILLED_COLOR: &str = "#636EFA";
const RECEIVED_COLOR: &str = "#00CC96";
const EXPENSE_COLOR: &str = "#EF553B";
const VENDOR_COLOR: &str = "#1f77b4";

fn load_startup() -> Result<(AppConfig, SheetLayout), String> {
    let config = load_config().map_err(|err| format!("{err:#}"))?;
    let layout = load_layout(&config).map_err(|err| format!("{err:#}"))?;
    Ok((config, layout))
}

fn load_with(service: &mut ImportService, source: &dyn WorkbookSource) -> LoadOutcome {
    run_blocking(|| service.load(source))
}

fn status_line(outcome: &LoadOutcome) -> String {
    let dataset = &outcome.dataset;
    if dataset.is_empty() {
        return format!("Nothing extracted from {}", outcome.source);
    }
    let cached = if outcome.cache_hit { " (cached)" } else { "" };
    format!(
        "Loaded {}{cached}: {} ({} vendor rows)",
        outcome.source,
        dataset.months().join(", "),
        dataset.vendors.len()
    )
}

fn export_section(dataset: &EstateDataset, section: Section) -> String {
    let Some(path) = FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name(default_file_name(section))
        .save_file()
    else {
        return "Export cancelled".to_string();
    };

    match ExportService::export(dataset, section, &path) {
        Ok(rows) => format!("Exported {} rows to {}", rows, path.display()),
        Err(err) => {
            error!(section = section.title(), error = %err, "export failed");
            format!("Export failed: {err}")
        }
    }
}

fn export_all_sections(dataset: &EstateDataset) -> String {
    let Some(dir) = FileDialog::new().pick_folder() else {
        return "Export cancelled".to_string();
    };

    match ExportService::export_all(dataset, &dir) {
        Ok(written) => format!("Exported {} files to {}", written.len(), dir.display()),
        Err(err) => {
            error!(dir = %dir.display(), error = %err, "export failed");
            format!("Export failed: {err}")
        }
    }
}

#[component]
pub fn App() -> Element {
    let startup = use_hook(load_startup);
    let (config, layout) = match startup {
        Ok(loaded) => loaded,
        Err(err) => {
            return rsx! {
                div {
                    p { "Failed to load configuration: {err}" }
                }
            };
        }
    };

    let AppState {
        mut import_service,
        mut dataset,
        mut source_label,
        source_url,
        top_vendors,
        mut busy,
        mut status,
    } = AppState::new(config, layout);

    let mut apply_outcome = move |outcome: LoadOutcome| {
        *status.write() = status_line(&outcome);
        *source_label.write() = outcome.source.clone();
        *dataset.write() = Some(outcome.dataset);
    };

    let current = dataset();
    let body = match current {
        Some(data) => dashboard(data, top_vendors(), source_label(), status),
        None => rsx! {
            div { style: "padding: 24px;",
                h3 { "Welcome!" }
                p { "Open the estate accounts workbook to see live data." }
            }
        },
    };

    rsx! {
        div { style: "font-family: sans-serif; padding: 16px;",
            h1 { style: "color: #1f77b4; text-align: center;", "Zen Estate Financial Dashboard" }

            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        if busy() {
                            return;
                        }
                        let Some(file_path) = FileDialog::new()
                            .add_filter("Excel", &["xlsx", "xls"])
                            .pick_file() else {
                            *status.write() = "Open cancelled".to_string();
                            return;
                        };

                        *busy.write() = true;
                        *status.write() = format!("Loading {}", file_path.display());
                        info!(path = %file_path.display(), "loading workbook");

                        let source = LocalFile::new(file_path);
                        let outcome = {
                            let mut service = import_service.write();
                            load_with(&mut service, &source)
                        };
                        apply_outcome(outcome);

                        *busy.write() = false;
                    },
                    "Open workbook"
                }

                button {
                    disabled: busy() || source_url().is_none(),
                    onclick: move |_| {
                        let Some(url) = source_url() else {
                            return;
                        };
                        *busy.write() = true;
                        *status.write() = format!("Fetching {url}");

                        let source = RemoteUrl::new(url);
                        let outcome = {
                            let mut service = import_service.write();
                            load_with(&mut service, &source)
                        };
                        apply_outcome(outcome);

                        *busy.write() = false;
                    },
                    "Fetch remote"
                }

                span { " {status}" }
            }

            {body}
        }
    }
}

fn dashboard(
    data: Arc<EstateDataset>,
    top_n: usize,
    source_label: String,
    status: Signal<String>,
) -> Element {
    let summary = summarize(&data, top_n);

    let monthly_bars: Vec<Bar> = data
        .monthly
        .iter()
        .flat_map(|m| {
            [
                Bar::new(format!("{} To Be", m.month), m.billed, BILLED_COLOR),
                Bar::new(format!("{} Received", m.month), m.received, RECEIVED_COLOR),
            ]
        })
        .collect();
    let expense_bars: Vec<Bar> = data
        .monthly
        .iter()
        .map(|m| Bar::new(m.month.clone(), m.expense, EXPENSE_COLOR))
        .collect();
    let vendor_bars: Vec<Bar> = summary
        .top_vendors
        .iter()
        .map(|v| Bar::new(v.vendor.clone(), v.amount, VENDOR_COLOR))
        .collect();
    let wing_bars: Vec<Bar> = summary
        .wing_totals
        .iter()
        .map(|w| {
            Bar::new(
                format!("{} ({})", w.wing, balance_label(w.balance)),
                w.difference,
                balance_color(w.balance),
            )
        })
        .collect();
    let income_bars: Vec<Bar> = summary
        .income_by_source
        .iter()
        .map(|s| Bar::new(s.source.clone(), s.amount, RECEIVED_COLOR))
        .collect();
    let export_all = {
        let data = Arc::clone(&data);
        let mut status = status;
        move |_: MouseEvent| {
            *status.write() = export_all_sections(&data);
        }
    };
    let top_title = format!("Top {top_n} Vendors");
    let tables: Vec<(String, Section, TabularData)> = Section::ALL
        .into_iter()
        .map(|section| (section.file_stem().to_string(), section, section.table(&data)))
        .collect();

    rsx! {
        div { style: "display: flex; gap: 12px; align-items: center;",
            p { style: "color: #666;", "Source: {source_label}" }
            button { onclick: export_all, "Export all CSV" }
        }
        NoticeList { notices: data.notices.clone() }

        div { style: "display: flex; gap: 12px; flex-wrap: wrap;",
            KpiTile { label: "Total Expenses", value: format_inr(summary.total_expense) }
            KpiTile { label: "Months", value: summary.month_count.to_string() }
            KpiTile { label: "Vendors", value: summary.vendor_count.to_string() }
            KpiTile { label: "Collection Rate", value: format_percent(summary.collection_rate) }
            KpiTile { label: "Pending", value: format_inr(summary.total_pending) }
            KpiTile { label: "Extra Income", value: format_inr(summary.total_extra_income) }
        }

        BarChart { title: "Billed vs Received", bars: monthly_bars }
        BarChart { title: "Monthly Expenses", bars: expense_bars }
        BarChart { title: top_title, bars: vendor_bars }
        BarChart { title: "Wing Balances", bars: wing_bars }
        BarChart { title: "Extra Income by Source", bars: income_bars }

        for (key, section, table) in tables {
            DataTable {
                key: "{key}",
                title: section.title().to_string(),
                table: table,
                on_export: export_handler(Arc::clone(&data), section, status),
            }
        }
    }
}

fn export_handler(
    data: Arc<EstateDataset>,
    section: Section,
    mut status: Signal<String>,
) -> EventHandler<()> {
    EventHandler::new(move |_| {
        *status.write() = export_section(&data, section);
    })
}
