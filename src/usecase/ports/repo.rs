use crate::domain::entities::user::{User, UserId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Backend for the user table. The futures are not required to be `Send`;
/// everything runs on the UI task.
#[allow(async_fn_in_trait)]
pub trait UserRepository {
    async fn list_users(&self) -> Result<Vec<User>, RepoError>;
    async fn is_email_unique(&self, email: &str) -> Result<bool, RepoError>;
    async fn create_users(&self, users: &[User]) -> Result<(), RepoError>;
    async fn update_user(&self, id: UserId, user: &User) -> Result<(), RepoError>;
}
