use std::collections::BTreeMap;

use crate::domain::entities::edit::{partition_for_save, DirtyCells, EmailErrors, RowKey, SavePlan};
use crate::domain::entities::sort::{sort_users, SortState};
use crate::domain::entities::user::{User, UserField, UserId};

/// Everything the user table renders from. Kept free of Dioxus types so the
/// reconciliation rules can be exercised directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    users: Vec<User>,
    fetched_emails: BTreeMap<UserId, String>,
    drafts: Vec<User>,
    sort: SortState,
    dirty: DirtyCells,
    email_errors: EmailErrors,
    email_checks: BTreeMap<RowKey, u64>,
    next_check: u64,
    saving: bool,
    error_message: Option<String>,
}

impl TableState {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn drafts(&self) -> &[User] {
        &self.drafts
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn dirty(&self) -> &DirtyCells {
        &self.dirty
    }

    pub fn email_errors(&self) -> &EmailErrors {
        &self.email_errors
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn email_error(&self, key: RowKey) -> Option<&str> {
        self.email_errors.get(&key).and_then(|err| err.as_deref())
    }

    pub fn is_dirty(&self, key: RowKey, field: UserField) -> bool {
        match key {
            RowKey::Persisted(id) => self
                .dirty
                .get(&id)
                .is_some_and(|fields| fields.contains(&field)),
            RowKey::Draft(_) => false,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.email_errors.values().any(Option::is_some)
    }

    /// True while a uniqueness check has been sent but not answered.
    pub fn has_pending_checks(&self) -> bool {
        !self.email_checks.is_empty()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Marks a save as in flight. Returns false if one already is.
    pub fn begin_save(&mut self) -> bool {
        if self.saving {
            return false;
        }
        self.saving = true;
        true
    }

    pub fn finish_save(&mut self) {
        self.saving = false;
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.drafts.is_empty() || !self.dirty.is_empty()
    }

    /// Sort changes trigger a re-fetch that would drop the rows being
    /// saved, so they are refused mid-save.
    pub fn toggle_sort(&mut self, field: UserField) -> bool {
        if self.saving {
            return false;
        }
        self.sort = self.sort.toggled(field);
        sort_users(&mut self.users, self.sort);
        true
    }

    pub fn add_draft(&mut self) -> RowKey {
        self.drafts.push(User::draft());
        RowKey::Draft(self.drafts.len() - 1)
    }

    pub fn row(&self, key: RowKey) -> Option<&User> {
        match key {
            RowKey::Draft(idx) => self.drafts.get(idx),
            RowKey::Persisted(id) => self.users.iter().find(|user| user.id == Some(id)),
        }
    }

    /// Writes `value` into the draft or persisted row behind `key`. Returns
    /// false when the key no longer names a row.
    pub fn edit_cell(&mut self, key: RowKey, field: UserField, value: String) -> bool {
        match key {
            RowKey::Draft(idx) => match self.drafts.get_mut(idx) {
                Some(draft) => {
                    draft.set_field(field, value);
                    true
                }
                None => false,
            },
            RowKey::Persisted(id) => {
                let Some(user) = self.users.iter_mut().find(|user| user.id == Some(id)) else {
                    return false;
                };
                user.set_field(field, value);
                self.dirty.entry(id).or_default().insert(field);
                true
            }
        }
    }

    /// Installs freshly fetched rows and forgets every local edit.
    /// Rows the server sent without an id are dropped.
    pub fn replace_rows(&mut self, mut users: Vec<User>) {
        let fetched = users.len();
        users.retain(|user| user.id.is_some());
        if users.len() != fetched {
            tracing::warn!(dropped = fetched - users.len(), "fetched users without id");
        }
        sort_users(&mut users, self.sort);
        self.fetched_emails = users
            .iter()
            .filter_map(|user| user.id.map(|id| (id, user.email.clone())))
            .collect();
        self.users = users;
        self.drafts.clear();
        self.dirty.clear();
        self.email_errors.clear();
        self.email_checks.clear();
        self.error_message = None;
    }

    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error_message(&mut self) {
        self.error_message = None;
    }

    /// Registers a new email check for `key` and returns its ticket. Only
    /// the newest ticket per row may write a result.
    pub fn begin_email_check(&mut self, key: RowKey) -> u64 {
        self.next_check += 1;
        self.email_checks.insert(key, self.next_check);
        self.next_check
    }

    /// A persisted row typed back to the address it was fetched with is
    /// its own address and needs no uniqueness check. Clears any error and
    /// outstanding check for the row and returns true in that case.
    pub fn restore_fetched_email(&mut self, key: RowKey, email: &str) -> bool {
        let RowKey::Persisted(id) = key else {
            return false;
        };
        if self.fetched_emails.get(&id).map(String::as_str) != Some(email) {
            return false;
        }
        self.email_checks.remove(&key);
        self.email_errors.insert(key, None);
        true
    }

    pub fn finish_email_check(&mut self, key: RowKey, ticket: u64, error: Option<String>) -> bool {
        if self.email_checks.get(&key) != Some(&ticket) {
            return false;
        }
        self.email_checks.remove(&key);
        self.email_errors.insert(key, error);
        true
    }

    pub fn save_plan(&self) -> SavePlan {
        partition_for_save(self.drafts.iter().chain(self.users.iter()), &self.dirty)
    }
}
