use std::sync::Arc;

use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::domain::entities::edit::RowKey;
use crate::domain::entities::user::UserField;
use crate::infra::http::repo::HttpUserRepo;
use crate::ui::state::app_state::AppState;
use crate::ui::state::table_state::TableState;
use crate::usecase::services::email_check_service::EmailCheckService;
use crate::usecase::services::sync_service::SyncService;
use crate::{
    cell_highlight, cell_input_style, error_banner_style, save_disabled, sort_indicator,
    sync_timestamp, table_container_style, table_header_cell_style, toolbar_button_style,
    CellHighlight,
};

#[derive(Clone)]
struct Services {
    sync: Arc<SyncService<HttpUserRepo>>,
    email: Arc<EmailCheckService<HttpUserRepo>>,
}

impl Services {
    fn from_config(config: &AppConfig) -> Self {
        tracing::info!(api = %config.api_base_url, "using user api");
        let repo = Arc::new(HttpUserRepo::new(config.api_base_url.clone()));
        Self {
            sync: Arc::new(SyncService::new(repo.clone())),
            email: Arc::new(EmailCheckService::new(repo)),
        }
    }
}

fn start_email_check(
    mut table: Signal<TableState>,
    email_service: Arc<EmailCheckService<HttpUserRepo>>,
    key: RowKey,
    email: String,
) {
    let ticket = table.write().begin_email_check(key);
    spawn(async move {
        let verdict = email_service.check(&email).await;
        if !table
            .write()
            .finish_email_check(key, ticket, verdict.error_message())
        {
            tracing::debug!(?key, ticket, "dropping stale email check");
        }
    });
}

#[component]
fn EditableCell(
    row_key: RowKey,
    field: UserField,
    value: String,
    highlight: CellHighlight,
    #[props(!optional)]
    error: Option<String>,
    on_edit: EventHandler<(RowKey, UserField, String)>,
) -> Element {
    rsx! {
        td { style: "position: relative; border: 1px solid #e5e7eb; padding: 0;",
            input {
                r#type: field.input_type(),
                value: "{value}",
                style: "{cell_input_style(highlight)}",
                oninput: move |event| on_edit.call((row_key, field, event.value())),
            }
            if let Some(message) = error {
                p {
                    style: "position: absolute; margin: 2px 0 0; padding: 6px 12px; font-size: 12px; color: #fff; background: #dc2626; border-radius: 6px; z-index: 2; white-space: nowrap;",
                    "{message}"
                }
            }
        }
    }
}

#[component]
fn UserRow(
    row_key: RowKey,
    table: Signal<TableState>,
    on_edit: EventHandler<(RowKey, UserField, String)>,
) -> Element {
    let snapshot = table.read();
    let Some(user) = snapshot.row(row_key) else {
        return rsx! {};
    };
    let row_style = match row_key {
        RowKey::Draft(_) => "background: #f0fdf4;",
        RowKey::Persisted(_) => "background: #fff; border-bottom: 1px solid #e5e7eb;",
    };
    let cells = UserField::ALL
        .iter()
        .map(|&field| {
            let error = match field {
                UserField::Email => snapshot.email_error(row_key).map(str::to_string),
                _ => None,
            };
            (
                field,
                user.field(field).to_string(),
                cell_highlight(&snapshot, row_key, field),
                error,
            )
        })
        .collect::<Vec<_>>();
    drop(snapshot);

    rsx! {
        tr { style: "{row_style}",
            for (field, value, highlight, error) in cells {
                EditableCell {
                    key: "{field:?}",
                    row_key,
                    field,
                    value,
                    highlight,
                    error,
                    on_edit,
                }
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let AppState {
        mut table,
        mut loading,
        mut status,
    } = AppState::new();

    let services = use_hook(|| Services::from_config(&AppConfig::load()));

    let sort_memo = use_memo(move || table.read().sort());
    let sync_for_fetch = services.sync.clone();
    use_effect(move || {
        let sort = sort_memo();
        let sync = sync_for_fetch.clone();
        *loading.write() += 1;
        spawn(async move {
            match sync.fetch(sort).await {
                Ok(users) => {
                    let count = users.len();
                    table.write().replace_rows(users);
                    status.set(format!("已載入 {count} 位使用者（{}）", sync_timestamp()));
                }
                Err(err) => {
                    table.write().set_error_message("載入使用者失敗");
                    status.set(format!("載入使用者失敗：{err}"));
                }
            }
            *loading.write() -= 1;
        });
    });

    let email_for_edit = services.email.clone();
    let on_edit = use_callback(move |(key, field, value): (RowKey, UserField, String)| {
        let email = (field == UserField::Email).then(|| value.clone());
        if !table.write().edit_cell(key, field, value) {
            return;
        }
        if let Some(email) = email {
            if table.write().restore_fetched_email(key, &email) {
                return;
            }
            start_email_check(table, email_for_edit.clone(), key, email);
        }
    });

    let sync_for_save = services.sync.clone();
    let on_save = move |_: MouseEvent| {
        if save_disabled(&table.read(), loading() > 0) {
            return;
        }
        let (plan, sort) = {
            let snapshot = table.read();
            (snapshot.save_plan(), snapshot.sort())
        };
        if plan.is_empty() {
            status.set("沒有需要儲存的變更".to_string());
            return;
        }
        if !table.write().begin_save() {
            return;
        }
        let sync = sync_for_save.clone();
        status.set("儲存中…".to_string());
        spawn(async move {
            match sync.save(plan, sort).await {
                Ok(users) => {
                    let count = users.len();
                    table.write().replace_rows(users);
                    status.set(format!("已儲存，共 {count} 位使用者（{}）", sync_timestamp()));
                }
                Err(err) => {
                    table.write().set_error_message("儲存使用者失敗");
                    status.set(format!("儲存失敗：{err}"));
                }
            }
            table.write().finish_save();
        });
    };

    let snapshot = table.read().clone();
    let sort_snapshot = snapshot.sort();
    let save_is_disabled = save_disabled(&snapshot, loading() > 0);
    let pending_hint = if snapshot.has_pending_changes() {
        "（有未儲存的變更）"
    } else {
        ""
    };

    rsx! {
        div { style: "height: 100vh; display: flex; flex-direction: column; overflow: hidden; padding: 24px; box-sizing: border-box; color: #111; background: #fff;",
            if let Some(message) = snapshot.error_message() {
                div { role: "alert", style: "{error_banner_style()}",
                    span { style: "font-weight: 600;", "錯誤！" }
                    span { "{message}" }
                    button {
                        style: "margin-left: auto; border: 0; background: transparent; cursor: pointer;",
                        onclick: move |_| table.write().clear_error_message(),
                        "✕"
                    }
                }
            }

            nav { style: "display: flex; justify-content: flex-end; gap: 12px; margin-bottom: 12px;",
                button {
                    style: "{toolbar_button_style(false)}",
                    onclick: move |_| {
                        table.write().add_draft();
                    },
                    "新增"
                }
                button {
                    style: "{toolbar_button_style(save_is_disabled)}",
                    disabled: save_is_disabled,
                    onclick: on_save,
                    "儲存"
                }
                button {
                    style: "{toolbar_button_style(false)}",
                    title: "復原",
                    "復原"
                }
            }

            div { style: "{table_container_style()}",
                table { style: "border-collapse: collapse; font-size: 14px; text-align: left;",
                    thead {
                        tr {
                            for field in UserField::ALL {
                                th {
                                    key: "{field:?}",
                                    style: "{table_header_cell_style()}",
                                    onclick: move |_| {
                                        if !table.write().toggle_sort(field) {
                                            tracing::debug!(?field, "sort ignored while saving");
                                        }
                                    },
                                    "{field.label()} {sort_indicator(sort_snapshot, field)}"
                                }
                            }
                        }
                    }
                    tbody {
                        for idx in 0..snapshot.drafts().len() {
                            UserRow {
                                key: "draft-{idx}",
                                row_key: RowKey::Draft(idx),
                                table,
                                on_edit,
                            }
                        }
                        for id in snapshot.users().iter().filter_map(|user| user.id) {
                            UserRow {
                                key: "user-{id}",
                                row_key: RowKey::Persisted(id),
                                table,
                                on_edit,
                            }
                        }
                    }
                }
            }

            p { style: "margin: 8px 0 0; font-size: 12px; color: #555;", "{status}{pending_hint}" }
        }
    }
}
