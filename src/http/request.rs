use indexmap::IndexMap;

use crate::http::HttpMethod;
use crate::http::headers::HttpHeaders;

/// A fully parsed request.
///
/// Header names are lowercased and values trimmed by the parser; the body
/// is present iff the request carried a `content-length` header, and is
/// guaranteed valid UTF-8.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub http_version: (u8, u8),

    pub headers: HttpHeaders,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new() -> Self {
        Self {
            method: HttpMethod::Unknown,
            path: String::new(),
            http_version: (0, 0),
            headers: HttpHeaders::new(),
            body: None,
        }
    }

    /// Parses the `Cookie` header into a map of `k=v` pairs.
    ///
    /// Pairs are separated by `;` and trimmed; a pair without `=` is
    /// skipped. Returns an empty map when the header is absent.
    pub fn cookies(&self) -> IndexMap<String, String> {
        let mut out = IndexMap::new();
        let Some(raw) = self.headers.get("cookie") else {
            return out;
        };
        for pair in raw.split(';') {
            if let Some((k, v)) = pair.trim().split_once('=') {
                out.insert(k.trim().to_string(), v.trim().to_string());
            }
        }
        out
    }

    /// Decodes the body as `application/x-www-form-urlencoded` parameters.
    ///
    /// Returns an empty map when there is no body.
    pub fn form_params(&self) -> IndexMap<String, String> {
        match &self.body {
            Some(body) => parse_form(body),
            None => IndexMap::new(),
        }
    }
}

impl Default for HttpRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes `k1=v1&k2=v2` with percent-escapes. `+` means space in form
/// encoding, which `urlencoding` alone does not handle.
pub fn parse_form(body: &str) -> IndexMap<String, String> {
    let mut out = IndexMap::new();
    for pair in body.split('&') {
        let Some((k, v)) = pair.split_once('=') else {
            continue;
        };
        out.insert(form_decode(k), form_decode(v));
    }
    out
}

fn form_decode(s: &str) -> String {
    let plus_decoded = s.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => plus_decoded,
    }
}
