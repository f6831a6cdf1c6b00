use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{User, UserId};
use crate::usecase::ports::repo::{RepoError, UserRepository};

#[derive(Debug, Serialize)]
struct CheckEmailRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckEmailResponse {
    is_unique: bool,
}

#[derive(Debug, Serialize)]
struct CreateUsersRequest<'a> {
    users: &'a [User],
}

#[derive(Clone)]
pub struct HttpUserRepo {
    client: Client,
    base_url: String,
}

impl HttpUserRepo {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    pub fn check_email_url(&self) -> String {
        format!("{}/users/check-email", self.base_url)
    }

    pub fn user_url(&self, id: UserId) -> String {
        format!("{}/users/{}", self.base_url, id)
    }
}

fn ensure_success(response: Response) -> Result<Response, RepoError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RepoError::Status(status.as_u16()))
    }
}

fn request_error(err: reqwest::Error) -> RepoError {
    RepoError::Request(err.to_string())
}

fn decode_error(err: reqwest::Error) -> RepoError {
    RepoError::Decode(err.to_string())
}

impl UserRepository for HttpUserRepo {
    async fn list_users(&self) -> Result<Vec<User>, RepoError> {
        let response = self
            .client
            .get(self.users_url())
            .send()
            .await
            .map_err(request_error)?;
        ensure_success(response)?
            .json::<Vec<User>>()
            .await
            .map_err(decode_error)
    }

    async fn is_email_unique(&self, email: &str) -> Result<bool, RepoError> {
        let response = self
            .client
            .post(self.check_email_url())
            .json(&CheckEmailRequest { email })
            .send()
            .await
            .map_err(request_error)?;
        let body = ensure_success(response)?
            .json::<CheckEmailResponse>()
            .await
            .map_err(decode_error)?;
        Ok(body.is_unique)
    }

    async fn create_users(&self, users: &[User]) -> Result<(), RepoError> {
        let response = self
            .client
            .post(self.users_url())
            .json(&CreateUsersRequest { users })
            .send()
            .await
            .map_err(request_error)?;
        ensure_success(response).map(|_| ())
    }

    async fn update_user(&self, id: UserId, user: &User) -> Result<(), RepoError> {
        let response = self
            .client
            .put(self.user_url(id))
            .json(user)
            .send()
            .await
            .map_err(request_error)?;
        ensure_success(response).map(|_| ())
    }
}
