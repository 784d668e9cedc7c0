use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::config::AppConfig;
use crate::domain::entities::dataset::EstateDataset;
use crate::domain::entities::layout::SheetLayout;
use crate::usecase::services::import_service::ImportService;

pub struct AppState {
    pub import_service: Signal<ImportService>,
    pub dataset: Signal<Option<Arc<EstateDataset>>>,
    pub source_label: Signal<String>,
    pub source_url: Signal<Option<String>>,
    pub top_vendors: Signal<usize>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(config: AppConfig, layout: SheetLayout) -> Self {
        let AppConfig {
            source_url,
            top_vendors,
            ..
        } = config;
        Self {
            import_service: use_signal(move || ImportService::new(layout)),
            dataset: use_signal(|| None::<Arc<EstateDataset>>),
            source_label: use_signal(String::new),
            source_url: use_signal(move || source_url),
            top_vendors: use_signal(move || top_vendors),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
