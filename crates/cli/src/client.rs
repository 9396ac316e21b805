//! HTTP client for the budgets service.
//!
//! Implements the engine's [`RemoteCollection`] so the repository can use
//! the service as its primary tier. HTTP statuses map onto the engine's
//! [`RemoteError`] taxonomy; transport trouble becomes `Unavailable`,
//! which the repository answers from the local mirror.

use reqwest::Url;
use uuid::Uuid;

use api_types::error::ErrorResponse;
use engine::{Budget, RemoteCollection, RemoteError};

use crate::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct HttpRemote {
    base_url: Url,
    http: reqwest::Client,
    username: String,
    password: String,
}

impl HttpRemote {
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Input(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|err| RemoteError::Protocol(format!("invalid base_url: {err}")))
    }
}

async fn error_for(res: reqwest::Response) -> RemoteError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        401 => RemoteError::Unauthorized,
        403 => RemoteError::Forbidden,
        404 => RemoteError::NotFound,
        422 => RemoteError::Validation(body),
        _ => RemoteError::Protocol(body),
    }
}

impl RemoteCollection for HttpRemote {
    async fn list(&self) -> std::result::Result<Vec<Budget>, RemoteError> {
        let res = self
            .http
            .get(self.endpoint("budgets")?)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|err| RemoteError::Unavailable(err.to_string()))?;

        if res.status().is_success() {
            return res
                .json::<Vec<Budget>>()
                .await
                .map_err(|err| RemoteError::Protocol(err.to_string()));
        }
        Err(error_for(res).await)
    }

    async fn get(&self, id: Uuid) -> std::result::Result<Budget, RemoteError> {
        let res = self
            .http
            .get(self.endpoint(&format!("budgets/{id}"))?)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|err| RemoteError::Unavailable(err.to_string()))?;

        if res.status().is_success() {
            return res
                .json::<Budget>()
                .await
                .map_err(|err| RemoteError::Protocol(err.to_string()));
        }
        Err(error_for(res).await)
    }

    async fn upsert(&self, budget: &Budget) -> std::result::Result<(), RemoteError> {
        let res = self
            .http
            .put(self.endpoint(&format!("budgets/{}", budget.id))?)
            .basic_auth(&self.username, Some(&self.password))
            .json(budget)
            .send()
            .await
            .map_err(|err| RemoteError::Unavailable(err.to_string()))?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_for(res).await)
    }

    async fn delete(&self, id: Uuid) -> std::result::Result<(), RemoteError> {
        let res = self
            .http
            .delete(self.endpoint(&format!("budgets/{id}"))?)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|err| RemoteError::Unavailable(err.to_string()))?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_for(res).await)
    }
}
