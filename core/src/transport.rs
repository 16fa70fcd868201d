//! Execution of a single authenticated request against the provider.
//!
//! # Design
//! Every call goes through `Transport::send`, which attaches the bearer
//! token, the default `Accept: application/json` (unless the request carries
//! its own), and a `Content-Type` only when a body is present. Two response
//! shapes exist on top of it:
//!
//! - `execute` buffers the whole body and classifies the status;
//! - `execute_stream` hands back the unread body for downloads, after reading
//!   and releasing it itself when the status is an error.
//!
//! Nothing is retried. Errors are returned to the caller, not logged.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::http::{
    HttpMethod, HttpRequest, HttpResponse, MultipartForm, MultipartPart, RequestBody,
    APPLICATION_JSON,
};
use crate::stream::ByteStream;

/// Immutable HTTP executor shared by all resource handles.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Arc<str>,
    authorization: Arc<str>,
}

impl Transport {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http: config.build_http_client()?,
            base_url: Arc::from(config.base_url()),
            authorization: Arc::from(format!("Bearer {}", config.api_key)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute `request` and buffer the response body.
    ///
    /// A status outside `200..300` becomes `Error::Api` with the raw body.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await?;
        trace!(status, bytes = body.len(), "response body read");

        check_status(status, &body)?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// Execute `request` and return the body unread.
    pub async fn execute_stream(&self, request: HttpRequest) -> Result<ByteStream> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            // A body that fails to arrive must not hide the status.
            let body = response.bytes().await.unwrap_or_default();
            return Err(ApiError::new(status, String::from_utf8_lossy(&body)).into());
        }
        Ok(ByteStream::new(response))
    }

    /// Execute and decode a JSON response into `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        self.execute(request).await?.json()
    }

    /// Execute and discard the response body.
    pub async fn send_unit(&self, request: HttpRequest) -> Result<()> {
        self.execute(request).await.map(drop)
    }

    async fn send(&self, request: HttpRequest) -> Result<reqwest::Response> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;

        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(to_reqwest_method(method), url)
            .header(AUTHORIZATION, &*self.authorization);

        if !headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("accept")) {
            builder = builder.header(ACCEPT, APPLICATION_JSON);
        }
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match body {
            None => builder,
            Some(RequestBody::Json(bytes)) => {
                trace!(bytes = bytes.len(), "JSON request body");
                builder.header(CONTENT_TYPE, APPLICATION_JSON).body(bytes)
            }
            Some(RequestBody::Multipart(form)) => builder.multipart(to_reqwest_form(form)?),
        };

        debug!(%method, %path, "sending request");
        let started = Instant::now();
        let response = builder.send().await?;
        debug!(
            %method,
            %path,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );
        Ok(response)
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<Form> {
    let mut out = Form::new();
    for part in form.parts {
        out = match part {
            MultipartPart::Text { name, value } => out.text(name, value),
            MultipartPart::File {
                name,
                filename,
                content_type,
                content,
            } => {
                let part = Part::bytes(content.to_vec())
                    .file_name(filename)
                    .mime_str(&content_type)?;
                out.part(name, part)
            }
        };
    }
    Ok(out)
}

/// Map a status outside `200..300` to `ApiError`, keeping the raw body.
fn check_status(status: u16, body: &[u8]) -> std::result::Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    Err(ApiError::new(status, String::from_utf8_lossy(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn check_status_accepts_2xx() {
        for status in [200, 201, 202, 204, 299] {
            assert!(check_status(status, b"").is_ok(), "status {status}");
        }
    }

    #[test]
    fn check_status_keeps_status_and_raw_body() {
        let err = check_status(404, br#"{"message":"not found"}"#).unwrap_err();
        assert_eq!(err.status, 404);
        assert_eq!(err.body, r#"{"message":"not found"}"#);
        assert!(err.is_not_found());

        let err = check_status(302, b"").unwrap_err();
        assert_eq!(err.status, 302);
    }

    #[test]
    fn new_rejects_missing_api_key() {
        let err = Transport::new(&Config::new("")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn debug_hides_authorization() {
        let transport = Transport::new(&Config::new("secret-key")).unwrap();
        let rendered = format!("{transport:?}");
        assert!(rendered.contains(crate::config::DEFAULT_BASE_URL));
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn form_conversion_accepts_guessed_mime_types() {
        let form = MultipartForm::new()
            .file("file", "scan.png", vec![1, 2, 3])
            .text("type", "voucher");
        assert!(to_reqwest_form(form).is_ok());
    }
}
