use dioxus::prelude::{use_signal, Signal};

use crate::ui::state::table_state::TableState;

#[derive(Clone, Copy)]
pub struct AppState {
    pub table: Signal<TableState>,
    /// Fetches in flight.
    pub loading: Signal<usize>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            table: use_signal(TableState::default),
            loading: use_signal(|| 0_usize),
            status: use_signal(|| "就緒".to_string()),
        }
    }
}
