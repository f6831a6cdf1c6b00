use std::sync::Arc;

use crate::domain::entities::email::{is_valid_email_format, EmailVerdict};
use crate::usecase::ports::repo::UserRepository;

pub struct EmailCheckService<R> {
    repo: Arc<R>,
}

impl<R: UserRepository> EmailCheckService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Format is checked locally first; the backend is only asked about
    /// addresses that pass it.
    pub async fn check(&self, email: &str) -> EmailVerdict {
        if !is_valid_email_format(email) {
            return EmailVerdict::InvalidFormat;
        }

        match self.repo.is_email_unique(email).await {
            Ok(true) => EmailVerdict::Valid,
            Ok(false) => EmailVerdict::NotUnique,
            Err(err) => {
                tracing::warn!(error = %err, "email uniqueness check failed");
                EmailVerdict::CheckFailed
            }
        }
    }
}
