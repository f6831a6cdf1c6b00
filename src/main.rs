use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::domain::entities::edit::RowKey;
use crate::domain::entities::sort::{SortDirection, SortState};
use crate::domain::entities::user::UserField;
use crate::ui::state::table_state::TableState;

mod app;
mod config;

mod domain {
    pub mod entities {
        pub mod edit;
        pub mod email;
        pub mod sort;
        pub mod user;
    }
}

mod infra {
    pub mod http {
        pub mod repo;
    }
}

mod ui {
    pub mod state {
        pub mod app_state;
        pub mod table_state;
    }
}

mod usecase {
    pub mod ports {
        pub mod repo;
    }
    pub mod services {
        pub mod email_check_service;
        pub mod sync_service;
    }
}


fn main() {
    init_tracing();

    #[cfg(feature = "desktop")]
    {
        let webview_data_dir =
            default_webview_data_dir().expect("should resolve and create WebView2 data directory");

        dioxus::LaunchBuilder::desktop()
            .with_cfg(
                dioxus::desktop::Config::new()
                    .with_window(dioxus::desktop::WindowBuilder::new().with_title("使用者管理"))
                    .with_data_directory(webview_data_dir),
            )
            .launch(app::App);
    }

    #[cfg(not(feature = "desktop"))]
    dioxus::launch(app::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // dioxus may already have installed its own subscriber
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
fn init_tracing() {}

#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "user-table")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellHighlight {
    Plain,
    Filled,
    Dirty,
    Invalid,
}

fn cell_highlight(table: &TableState, key: RowKey, field: UserField) -> CellHighlight {
    if field == UserField::Email && table.email_error(key).is_some() {
        return CellHighlight::Invalid;
    }
    match key {
        RowKey::Draft(_) => {
            let filled = table
                .row(key)
                .is_some_and(|row| !row.field(field).is_empty());
            if filled {
                CellHighlight::Filled
            } else {
                CellHighlight::Plain
            }
        }
        RowKey::Persisted(_) if table.is_dirty(key, field) => CellHighlight::Dirty,
        RowKey::Persisted(_) => CellHighlight::Plain,
    }
}

fn cell_input_style(highlight: CellHighlight) -> String {
    let background = match highlight {
        CellHighlight::Plain => "transparent",
        CellHighlight::Filled => "#bbf7d0",
        CellHighlight::Dirty => "#fef08a",
        CellHighlight::Invalid => "#fca5a5",
    };
    format!(
        "width: 100%; box-sizing: border-box; padding: 6px 10px; border: 0; border-bottom: 2px solid #e5e7eb; outline: none; background: {background};"
    )
}

fn sort_indicator(sort: SortState, field: UserField) -> &'static str {
    match sort.direction_for(field) {
        Some(SortDirection::Asc) => "▲",
        Some(SortDirection::Desc) => "▼",
        None => "",
    }
}

fn table_container_style() -> &'static str {
    "position: relative; overflow: auto; flex: 1; min-height: 0;"
}

fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 1; background: #f3f4f6; border: 1px solid #bbb; padding: 8px 12px; text-align: left; white-space: nowrap; cursor: pointer; user-select: none;"
}

fn toolbar_button_style(disabled: bool) -> String {
    let cursor = if disabled { "not-allowed" } else { "pointer" };
    let opacity = if disabled { "0.5" } else { "1" };
    format!(
        "border: 1px solid #bbb; background: #fff; padding: 4px 12px; border-radius: 6px; cursor: {cursor}; opacity: {opacity};"
    )
}

fn error_banner_style() -> &'static str {
    "display: flex; align-items: center; gap: 6px; padding: 12px 16px; margin-bottom: 12px; color: #991b1b; background: #fecaca; border-radius: 8px;"
}

fn save_disabled(table: &TableState, loading: bool) -> bool {
    loading || table.is_saving() || table.has_errors() || table.has_pending_checks()
}

fn sync_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
