//! Declarative request descriptions consumed by the executor.

use serde::Serialize;
use serde_json::Value;

use kiosk_core::ApiError;
use kiosk_core::ports::HttpMethod;

/// What to call, not how: method, path, query, body, header overrides, and
/// whether the stored access token should be attached.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
    pub(crate) authorize: bool,
    /// Operation label used in log records, e.g. `orders.create`.
    pub(crate) context: String,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            method,
            context: path.clone(),
            path,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            authorize: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Head, path)
    }

    pub fn options(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Options, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present. Absent values
    /// are not serialized at all.
    pub fn maybe_query(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Override or add a header. Caller overrides win over defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| {
            ApiError::api(format!("Failed to encode request body: {e}"), 500, None, None)
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Send without the stored access token.
    pub fn no_auth(mut self) -> Self {
        self.authorize = false;
        self
    }

    /// Set the operation label used in log records.
    pub fn context(mut self, label: impl Into<String>) -> Self {
        self.context = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maybe_query_skips_absent_values() {
        let request = ApiRequest::get("/api/tools")
            .maybe_query("page", Some(2))
            .maybe_query("search", None::<String>);
        assert_eq!(request.query, vec![("page".to_string(), "2".to_string())]);
    }

    #[test]
    fn context_defaults_to_the_path() {
        let request = ApiRequest::get("/api/tools");
        assert_eq!(request.context, "/api/tools");
        let request = request.context("tools.list");
        assert_eq!(request.context, "tools.list");
    }

    #[test]
    fn authorization_is_on_by_default() {
        assert!(ApiRequest::get("/x").authorize);
        assert!(!ApiRequest::get("/x").no_auth().authorize);
    }
}
