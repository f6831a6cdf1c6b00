use std::sync::Arc;

use crate::domain::entities::edit::SavePlan;
use crate::domain::entities::sort::{sort_users, SortState};
use crate::domain::entities::user::User;
use crate::usecase::ports::repo::{RepoError, UserRepository};

pub struct SyncService<R> {
    repo: Arc<R>,
}

impl<R: UserRepository> SyncService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn fetch(&self, sort: SortState) -> Result<Vec<User>, RepoError> {
        let mut users = self.repo.list_users().await.inspect_err(|err| {
            tracing::warn!(error = %err, "fetching users failed");
        })?;
        sort_users(&mut users, sort);
        tracing::debug!(count = users.len(), ?sort, "fetched users");
        Ok(users)
    }

    /// Creates drafts in one batch, then updates each dirty row in turn. The
    /// first failing call stops the batch. Returns the re-fetched rows.
    pub async fn save(&self, plan: SavePlan, sort: SortState) -> Result<Vec<User>, RepoError> {
        tracing::info!(
            create = plan.to_create.len(),
            update = plan.to_update.len(),
            "saving users"
        );

        if !plan.to_create.is_empty() {
            self.repo
                .create_users(&plan.to_create)
                .await
                .inspect_err(|err| tracing::warn!(error = %err, "creating users failed"))?;
        }

        for (id, user) in &plan.to_update {
            self.repo
                .update_user(*id, user)
                .await
                .inspect_err(|err| tracing::warn!(%id, error = %err, "updating user failed"))?;
        }

        self.fetch(sort).await
    }
}
