use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user row as the backend sees it. `id` is only present once persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn draft() -> Self {
        Self::default()
    }

    pub fn field(&self, field: UserField) -> &str {
        match field {
            UserField::FirstName => &self.first_name,
            UserField::LastName => &self.last_name,
            UserField::Position => &self.position,
            UserField::Phone => &self.phone,
            UserField::Email => &self.email,
        }
    }

    pub fn set_field(&mut self, field: UserField, value: String) {
        let slot = match field {
            UserField::FirstName => &mut self.first_name,
            UserField::LastName => &mut self.last_name,
            UserField::Position => &mut self.position,
            UserField::Phone => &mut self.phone,
            UserField::Email => &mut self.email,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    FirstName,
    LastName,
    Position,
    Phone,
    Email,
}

impl UserField {
    pub const ALL: [UserField; 5] = [
        UserField::FirstName,
        UserField::LastName,
        UserField::Position,
        UserField::Phone,
        UserField::Email,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UserField::FirstName => "名字",
            UserField::LastName => "姓氏",
            UserField::Position => "職位",
            UserField::Phone => "電話",
            UserField::Email => "Email",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            UserField::Email => "email",
            _ => "text",
        }
    }
}
