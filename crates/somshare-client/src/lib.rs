//! Typed HTTP client for the SomShare backend.
//!
//! One `ApiClient` per session. Auth rides in an `Authorization: Bearer`
//! header when a token is present; there is no cookie mode.

pub mod auth;
pub mod error;
pub mod files;
pub mod points;
pub mod posts;
pub mod validate;

pub use error::ApiError;

use reqwest::RequestBuilder;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut client = Self::new(base_url);
        client.token = Some(token.into());
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolve a server-provided URL that may be relative to the base.
    pub(crate) fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{}", self.base_url, url)
        } else {
            format!("{}/{}", self.base_url, url)
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    pub(crate) fn patch(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.patch(self.url(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.delete(self.url(path)))
    }

    pub(crate) fn get_absolute(&self, url: &str) -> RequestBuilder {
        self.authorize(self.http.get(url))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080///");
        assert_eq!(client.url("/api/posts"), "http://localhost:8080/api/posts");
    }

    #[test]
    fn resolve_handles_absolute_and_relative() {
        let client = ApiClient::new("http://localhost:8080");
        assert_eq!(
            client.resolve("https://cdn.example/a.pdf"),
            "https://cdn.example/a.pdf"
        );
        assert_eq!(
            client.resolve("/files/a.pdf"),
            "http://localhost:8080/files/a.pdf"
        );
        assert_eq!(
            client.resolve("files/a.pdf"),
            "http://localhost:8080/files/a.pdf"
        );
    }
}
