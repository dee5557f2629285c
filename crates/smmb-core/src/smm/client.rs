use std::time::Duration;

use async_trait::async_trait;

use crate::{errors::Error, Result};

use super::types::{ActionRequest, ActionResponse};

/// SMM panel interface used by the router.
#[async_trait]
pub trait SmmApi: Send + Sync {
    async fn request(&self, req: &ActionRequest) -> Result<ActionResponse>;
}

/// Form-POST client for SMM panels speaking the common `api/v2` dialect.
#[derive(Clone, Debug)]
pub struct HttpSmmClient {
    url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl HttpSmmClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;
        Ok(Self {
            url: url.into(),
            timeout,
            http,
        })
    }

    fn map_err(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.timeout.as_secs())
        } else {
            Error::Transport(e.to_string())
        }
    }
}

/// The exact form body sent for a request.
pub fn form_fields(req: &ActionRequest) -> [(&'static str, String); 3] {
    [
        ("key", req.api_key.clone()),
        ("action", req.action.as_api_str().to_string()),
        ("order", req.order.as_str().to_string()),
    ]
}

#[async_trait]
impl SmmApi for HttpSmmClient {
    async fn request(&self, req: &ActionRequest) -> Result<ActionResponse> {
        tracing::debug!(
            action = req.action.as_api_str(),
            order = %req.order,
            "smm api request"
        );

        let resp = self
            .http
            .post(&self.url)
            .form(&form_fields(req))
            .send()
            .await
            .map_err(|e| self.map_err(e))?;

        // Panels report most errors as JSON `{"error": ..}` regardless of status,
        // so the body decides; the status only enriches the message.
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_err(e))?;

        ActionResponse::decode(&body).map_err(|e| match e {
            Error::BadResponse(msg) => Error::BadResponse(format!("http {status}: {msg}")),
            other => other,
        })
    }
}
