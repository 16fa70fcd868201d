//! HTTP transport types described as plain data.
//!
//! # Design
//! Resource methods never touch `reqwest` directly. They build an
//! `HttpRequest` (method, path with query string, header overrides, body) and
//! hand it to the `Transport`, which owns authentication, execution and
//! status classification. Keeping requests as data makes path and query
//! construction testable without a network.
//!
//! Query strings are assembled with `Query`, which drops unset or empty values
//! so that an empty filter produces no parameters at all.

use std::fmt;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_PDF: &str = "application/pdf";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Already-serialized JSON document.
    Json(Vec<u8>),
    /// `multipart/form-data`; the boundary is chosen at execution time.
    Multipart(MultipartForm),
}

/// One field of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: String,
        content: Bytes,
    },
}

/// A `multipart/form-data` body described as data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub parts: Vec<MultipartPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file part. The content type is guessed from `filename` and falls
    /// back to `application/octet-stream`.
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        let filename = filename.into();
        let content_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .to_string();
        self.parts.push(MultipartPart::File {
            name: name.into(),
            filename,
            content_type,
            content: content.into(),
        });
        self
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// An HTTP request described as plain data.
///
/// `path` is relative to the configured base URL and already carries its
/// query string. `headers` holds overrides only; `Authorization`, the default
/// `Accept` and the body's `Content-Type` are added by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn post_json<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        Ok(Self::new(HttpMethod::Post, path).with_body(RequestBody::Json(encode_json(body)?)))
    }

    pub fn put_json<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        Ok(Self::new(HttpMethod::Put, path).with_body(RequestBody::Json(encode_json(body)?)))
    }

    pub fn post_multipart(path: impl Into<String>, form: MultipartForm) -> Self {
        Self::new(HttpMethod::Post, path).with_body(RequestBody::Multipart(form))
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Append an encoded query string. An empty query leaves the path as is.
    pub fn with_query(mut self, query: &Query) -> Self {
        if !query.is_empty() {
            let separator = if self.path.contains('?') { '&' } else { '?' };
            self.path.push(separator);
            self.path.push_str(&query.encode());
        }
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header override, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

fn encode_json<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(Error::Encode)
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text; invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|source| Error::Decode {
            source,
            body: self.text(),
        })
    }
}

/// Ordered query-string parameters.
///
/// Parameters keep insertion order. Unset (`None`) and empty values are never
/// emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter unless its rendered value is empty.
    pub fn push(&mut self, name: &'static str, value: impl fmt::Display) {
        let value = value.to_string();
        if !value.is_empty() {
            self.params.push((name, value));
        }
    }

    pub fn push_opt<T: fmt::Display>(&mut self, name: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    pub fn extend(&mut self, params: &impl QueryParams) {
        params.append_to(self);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Form-urlencode the parameters, without the leading `?`.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(key, value)| (*key, value.as_str())))
            .finish()
    }
}

/// Types that translate into query-string parameters.
pub trait QueryParams {
    fn append_to(&self, query: &mut Query);

    fn to_query(&self) -> Query {
        let mut query = Query::new();
        self.append_to(&mut query);
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_request_has_no_body_or_headers() {
        let req = HttpRequest::get("/v1/profile");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/v1/profile");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn post_json_serializes_body() {
        let req = HttpRequest::post_json("/v1/articles", &serde_json::json!({"title": "Widget"}))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        match req.body {
            Some(RequestBody::Json(bytes)) => {
                let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
                assert_eq!(body["title"], "Widget");
            }
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn empty_query_leaves_path_untouched() {
        let req = HttpRequest::get("/v1/articles").with_query(&Query::new());
        assert_eq!(req.path, "/v1/articles");
    }

    #[test]
    fn query_appends_with_correct_separator() {
        let mut query = Query::new();
        query.push("page", 2);
        let req = HttpRequest::get("/v1/articles").with_query(&query);
        assert_eq!(req.path, "/v1/articles?page=2");

        let mut more = Query::new();
        more.push("size", 25);
        let req = req.with_query(&more);
        assert_eq!(req.path, "/v1/articles?page=2&size=25");
    }

    #[test]
    fn query_skips_empty_and_unset_values() {
        let mut query = Query::new();
        query.push("name", "");
        query.push_opt::<&str>("email", None);
        query.push_opt("number", Some(10_001));
        assert_eq!(query.len(), 1);
        assert_eq!(query.encode(), "number=10001");
    }

    #[test]
    fn query_encodes_reserved_characters() {
        let mut query = Query::new();
        query.push("name", "Müller & Söhne");
        assert_eq!(query.encode(), "name=M%C3%BCller+%26+S%C3%B6hne");
        assert_eq!(query.get("name"), Some("Müller & Söhne"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = HttpRequest::get("/v1/files/f1").with_header("Accept", APPLICATION_OCTET_STREAM);
        assert_eq!(req.header("accept"), Some(APPLICATION_OCTET_STREAM));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn multipart_file_guesses_content_type() {
        let form = MultipartForm::new()
            .file("file", "receipt.pdf", b"%PDF".to_vec())
            .file("file", "blob", b"\x00\x01".to_vec())
            .text("type", "voucher");
        match &form.parts[0] {
            MultipartPart::File { content_type, .. } => assert_eq!(content_type, "application/pdf"),
            other => panic!("expected file part, got {other:?}"),
        }
        match &form.parts[1] {
            MultipartPart::File { content_type, .. } => {
                assert_eq!(content_type, APPLICATION_OCTET_STREAM)
            }
            other => panic!("expected file part, got {other:?}"),
        }
        assert_eq!(
            form.parts[2],
            MultipartPart::Text {
                name: "type".to_string(),
                value: "voucher".to_string()
            }
        );
    }

    #[test]
    fn response_json_reports_body_on_failure() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: Bytes::from_static(b"not json"),
        };
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, Error::Decode { ref body, .. } if body == "not json"));
    }

    #[test]
    fn success_range_is_half_open() {
        let mut response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: Bytes::new(),
        };
        assert!(response.is_success());
        response.status = 299;
        assert!(response.is_success());
        response.status = 300;
        assert!(!response.is_success());
        response.status = 199;
        assert!(!response.is_success());
    }
}
