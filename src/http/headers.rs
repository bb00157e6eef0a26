//! HTTP headers abstraction for [`HttpRequest`](crate::http::request::HttpRequest) and
//! [`HttpResponse`](crate::http::response::HttpResponse)
//!
//! Headers are stored in an ordered map to preserve insertion order.
//! Request parsing stores names lowercased; response building stores the
//! canonical names it was given. Duplicate names overwrite the previous
//! value in place.
//!
//! This abstraction does not enforce any HTTP semantics or constraints.
//! Higher-level types such as [`HttpRequest`](crate::http::request::HttpRequest)
//! and [`HttpResponse`](crate::http::response::HttpResponse) are responsible for
//! applying their own rules by wrapping or constraining access to this structure.

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct HttpHeaders {
    headers: IndexMap<String, String>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    pub fn set_raw(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for (name, value) in &self.headers {
            result.push_str(&format!("{}: {}\r\n", name, value));
        }
        result
    }
}
