use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern should compile")
});

pub fn is_valid_email_format(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailVerdict {
    Valid,
    InvalidFormat,
    NotUnique,
    CheckFailed,
}

impl EmailVerdict {
    pub fn error_message(&self) -> Option<String> {
        match self {
            EmailVerdict::Valid => None,
            EmailVerdict::InvalidFormat => Some("Email 格式不正確".to_string()),
            EmailVerdict::NotUnique => Some("Email 已被使用".to_string()),
            EmailVerdict::CheckFailed => Some("檢查 Email 失敗".to_string()),
        }
    }
}
