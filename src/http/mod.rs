use serde::Deserialize;

pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod validator;

/// HTTP versions a request line may carry.
/// The max version accepted is given in the server config
/// (see [`http_version`](crate::config::ServerConfig::http_version));
/// responses are always serialized as HTTP/1.0.
#[derive(PartialEq, PartialOrd, Debug, Clone, Deserialize)]
pub enum HttpVersion {
    V0_9,
    V1_0,
    V1_1,
}

impl HttpVersion {
    /// Check if a tuple (major, minor) corresponds to a known HTTP version
    pub fn from_parts(v: (u8, u8)) -> Result<HttpVersion, ()> {
        match (v.0, v.1) {
            (0, 9) => Ok(HttpVersion::V0_9),
            (1, 0) => Ok(HttpVersion::V1_0),
            (1, 1) => Ok(HttpVersion::V1_1),
            _ => Err(()),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
    Unknown,
}

pub fn http_method_from_str(method: &str) -> HttpMethod {
    match method {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        _ => HttpMethod::Unknown,
    }
}
