//! Incoming HTTP request type.

use std::collections::HashMap;

use crate::form::Form;
use crate::method::Method;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An incoming HTTP request with its body fully read.
///
/// The server builds one per hyper request; tests build them directly:
///
/// ```rust
/// use newsdesk::{Method, Request};
///
/// let req = Request::new(Method::Post, "/news")
///     .with_header("content-type", "application/x-www-form-urlencoded")
///     .with_body("title=Hello&body=0123456789");
/// assert_eq!(req.form().value("title"), "Hello");
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: Vec::new(),
            params: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/news/{slug}`, `req.param("slug")` on `/news/hello` returns `Some("hello")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The URL-encoded form body.
    ///
    /// Bodies sent with any other content type decode to an empty form. A
    /// request without a content type is read as a form.
    pub fn form(&self) -> Form {
        match self.header("content-type") {
            Some(ct) if !is_form_content_type(ct) => Form::default(),
            _ => Form::parse(&self.body),
        }
    }
}

fn is_form_content_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(Method::Get, "/").with_header("Content-Type", "text/html");
        assert_eq!(req.header("content-type"), Some("text/html"));
    }

    #[test]
    fn form_requires_urlencoded_content_type() {
        let body = "title=Hello";
        let form = Request::new(Method::Post, "/news")
            .with_header("content-type", "application/x-www-form-urlencoded; charset=UTF-8")
            .with_body(body);
        assert_eq!(form.form().value("title"), "Hello");

        let json = Request::new(Method::Post, "/news")
            .with_header("content-type", "application/json")
            .with_body(body);
        assert_eq!(json.form(), Form::default());
    }
}
