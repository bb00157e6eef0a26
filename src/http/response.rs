use std::time::SystemTime;

use crate::config::config;
use crate::http::headers::HttpHeaders;
use crate::http::status::HttpStatus;

pub enum ResponseHeader {
    ContentLength,
    ContentType,
    ContentEncoding,
    SetCookie,
    Server,
    Date,
}

pub struct HttpResponse {
    pub status: HttpStatus,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: HttpStatus::Ok,
            headers: HttpHeaders::new(),
            body: Vec::new(),
        }
    }

    /// Builds an HTML response with the standard header set.
    ///
    /// `Content-Length` is computed over the UTF-8 byte length of the
    /// body, never the character count.
    pub fn html(status: HttpStatus, body: String) -> Self {
        let mut res = HttpResponse::new();
        res.status = status;
        let body = body.into_bytes();

        res.set_header(ResponseHeader::ContentType, "text/html");
        res.set_header(ResponseHeader::ContentLength, &body.len().to_string());
        res.set_header(ResponseHeader::Server, &config().server_name);
        res.set_header(
            ResponseHeader::Date,
            &httpdate::fmt_http_date(SystemTime::now()),
        );

        res.body = body;
        res
    }

    pub fn set_header(&mut self, h: ResponseHeader, value: &str) {
        let name = match h {
            ResponseHeader::ContentLength => "Content-Length",
            ResponseHeader::ContentType => "Content-Type",
            ResponseHeader::ContentEncoding => "Content-Encoding",
            ResponseHeader::SetCookie => "Set-Cookie",
            ResponseHeader::Server => "Server",
            ResponseHeader::Date => "Date",
        };

        self.headers.set_raw(name, value);
    }

    /// Serializes the status line and headers.
    ///
    /// Responses are always HTTP/1.0; the connection closes after the
    /// body is written, whatever version the request line carried.
    pub fn build_headers(&self) -> String {
        // HTTP/1.0 <status> <reason>\r\n
        // <header_name>: <header_value>\r\n
        // ...
        // \r\n
        format!(
            "HTTP/1.0 {} {}\r\n{}\r\n",
            self.status as usize,
            self.status.reason(),
            self.headers.stringify(),
        )
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_length_counts_bytes_not_chars() {
        let body = "héllo, visiteur ✒";
        assert!(body.len() > body.chars().count());

        let res = HttpResponse::html(HttpStatus::Ok, body.to_string());
        assert_eq!(
            res.headers.get("Content-Length").unwrap(),
            body.len().to_string()
        );
        assert_eq!(res.body.len(), body.len());
    }

    #[test]
    fn status_line_is_http_1_0_with_reason() {
        let res = HttpResponse::html(HttpStatus::NotFound, "<h1>gone</h1>".to_string());
        let head = res.build_headers();
        assert!(head.starts_with("HTTP/1.0 404 Not Found\r\n"));
        assert!(head.ends_with("\r\n\r\n"));
    }

    #[test]
    fn html_sets_the_standard_header_set() {
        let res = HttpResponse::html(HttpStatus::Ok, "ok".to_string());
        assert_eq!(res.headers.get("Content-Type"), Some("text/html"));
        assert_eq!(res.headers.get("Content-Length"), Some("2"));
        assert!(res.headers.get("Server").is_some());
        assert!(res.headers.get("Date").is_some());
    }
}
