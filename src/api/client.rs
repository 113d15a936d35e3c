use crate::error::{AppError, Result};
use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Thin JSON client for the external fleet API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let response = self.request(Method::GET, path, token).send().await?;
        decode_json(path, response).await
    }

    pub async fn post<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, token, body).await
    }

    pub async fn put<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, token, body).await
    }

    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("{} {}", method, path);
        let response = self.request(method, path, token).json(body).send().await?;
        decode_json(path, response).await
    }

    /// POST where only success matters; the response body is ignored.
    pub async fn post_unit<B>(&self, path: &str, token: Option<&str>, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .request(Method::POST, path, token)
            .json(body)
            .send()
            .await?;
        ensure_success(response).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<()> {
        let response = self.request(Method::DELETE, path, token).send().await?;
        ensure_success(response).await.map(|_| ())
    }

    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        form: Form,
    ) -> Result<T> {
        let response = self
            .request(Method::POST, path, token)
            .multipart(form)
            .send()
            .await?;
        decode_json(path, response).await
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::Upstream {
        status: status.as_u16(),
        message: error_message(&body).unwrap_or_else(|| {
            format!(
                "Request failed: {}",
                status.canonical_reason().unwrap_or("unknown status")
            )
        }),
    })
}

async fn decode_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
    let response = ensure_success(response).await?;
    let text = response.text().await?;

    serde_json::from_str(&text).map_err(|e| {
        tracing::warn!("Failed to decode response from {}: {}", path, e);
        AppError::Decode(e.to_string())
    })
}

/// Pulls a human readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    for key in ["detail", "error", "message", "non_field_errors"] {
        match value.get(key) {
            Some(serde_json::Value::String(msg)) => return Some(msg.clone()),
            Some(serde_json::Value::Array(items)) => {
                if let Some(serde_json::Value::String(msg)) = items.first() {
                    return Some(msg.clone());
                }
            }
            _ => {}
        }
    }

    // Field errors: {"email": ["This field is required."]}
    value.as_object().and_then(|fields| {
        fields.iter().find_map(|(field, errors)| {
            errors
                .as_array()
                .and_then(|e| e.first())
                .and_then(|e| e.as_str())
                .map(|msg| format!("{}: {}", field, msg))
        })
    })
}
