use crate::domain::entities::user::{User, UserField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Column sort. `direction: None` means rows keep the order the server sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: UserField,
    pub direction: Option<SortDirection>,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: UserField::FirstName,
            direction: None,
        }
    }
}

impl SortState {
    /// Clicking the ascending column flips it to descending; anything else
    /// starts over at ascending.
    pub fn toggled(self, field: UserField) -> Self {
        let direction = if self.field == field && self.direction == Some(SortDirection::Asc) {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self {
            field,
            direction: Some(direction),
        }
    }

    pub fn direction_for(&self, field: UserField) -> Option<SortDirection> {
        if self.field == field {
            self.direction
        } else {
            None
        }
    }
}

pub fn sort_users(users: &mut [User], sort: SortState) {
    let Some(direction) = sort.direction else {
        return;
    };
    // slice::sort_by is stable, equal keys keep their fetched order
    users.sort_by(|a, b| {
        let ordering = a.field(sort.field).cmp(b.field(sort.field));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
