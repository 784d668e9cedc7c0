use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::info;

use crate::domain::entities::layout::SheetLayout;

pub const SOURCE_URL_ENV: &str = "ZEN_ESTATE_SOURCE_URL";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Workbook fetched by the "Fetch remote" button.
    pub source_url: Option<String>,
    /// Layout TOML; the embedded sample layout when unset.
    pub layout_path: Option<PathBuf>,
    pub top_vendors: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: None,
            layout_path: None,
            top_vendors: 10,
        }
    }
}

impl AppConfig {
    fn with_source_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.source_url = Some(url.trim().to_string());
        }
        self
    }
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "zenestate", "dashboard")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn parse_config(text: &str) -> Result<AppConfig> {
    toml::from_str(text).context("parse config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    let path = config_path()?;
    let config = if path.exists() {
        let text =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        parse_config(&text)?
    } else {
        AppConfig::default()
    };
    Ok(config.with_source_override(std::env::var(SOURCE_URL_ENV).ok()))
}

pub fn load_layout(config: &AppConfig) -> Result<SheetLayout> {
    match &config.layout_path {
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            let layout = SheetLayout::from_toml(&text)
                .with_context(|| format!("invalid layout {}", path.display()))?;
            info!(path = %path.display(), months = layout.months.len(), "layout loaded");
            Ok(layout)
        }
        None => SheetLayout::embedded().context("embedded layout"),
    }
}
