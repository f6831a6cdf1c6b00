use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::user::{User, UserField, UserId};

/// Which collection a row lives in: drafts are addressed by position,
/// persisted rows by their server id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowKey {
    Draft(usize),
    Persisted(UserId),
}

pub type DirtyCells = BTreeMap<UserId, BTreeSet<UserField>>;

pub type EmailErrors = BTreeMap<RowKey, Option<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavePlan {
    pub to_create: Vec<User>,
    pub to_update: Vec<(UserId, User)>,
}

impl SavePlan {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty()
    }
}

/// Split rows by identifier. Rows with an id are only updated when one of
/// their cells was edited since the last fetch.
pub fn partition_for_save<'a, I>(rows: I, dirty: &DirtyCells) -> SavePlan
where
    I: IntoIterator<Item = &'a User>,
{
    let mut plan = SavePlan::default();
    for user in rows {
        match user.id {
            None => plan.to_create.push(user.clone()),
            Some(id) if dirty.contains_key(&id) => plan.to_update.push((id, user.clone())),
            Some(_) => {}
        }
    }
    plan
}
