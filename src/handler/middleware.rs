use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

use crate::http::request::HttpRequest;
use crate::http::response::{HttpResponse, ResponseHeader};

/// Compresses the response body when the client advertises gzip
/// support. `Content-Length` is recomputed after compression so the
/// byte-length invariant holds on the wire.
pub fn apply(req: &HttpRequest, res: &mut HttpResponse) {
    if !accepts_gzip(req) || res.body.is_empty() {
        return;
    }
    if let Err(err) = compress_body(res) {
        eprintln!("Compression IO error: {}", err);
    }
}

fn accepts_gzip(req: &HttpRequest) -> bool {
    req.headers
        .get("accept-encoding")
        .map(|v| v.split(',').any(|a| a.trim().eq_ignore_ascii_case("gzip")))
        .unwrap_or(false)
}

fn compress_body(res: &mut HttpResponse) -> std::io::Result<()> {
    let mut e = GzEncoder::new(Vec::new(), Compression::default());
    e.write_all(&res.body)?;
    res.body = e.finish()?;

    res.set_header(ResponseHeader::ContentEncoding, "gzip");
    res.set_header(ResponseHeader::ContentLength, &res.body.len().to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::parser;
    use crate::http::status::HttpStatus;

    #[test]
    fn gzip_applied_when_advertised() {
        let req =
            parser::parse_bytes(b"GET / HTTP/1.0\r\nAccept-Encoding: deflate, gzip\r\n\r\n")
                .unwrap();
        let mut res = HttpResponse::html(HttpStatus::Ok, "x".repeat(256));
        apply(&req, &mut res);

        assert_eq!(res.headers.get("Content-Encoding"), Some("gzip"));
        assert_eq!(
            res.headers.get("Content-Length").unwrap(),
            res.body.len().to_string()
        );
        // gzip magic bytes
        assert_eq!(&res.body[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn untouched_without_accept_encoding() {
        let req = parser::parse_bytes(b"GET / HTTP/1.0\r\n\r\n").unwrap();
        let mut res = HttpResponse::html(HttpStatus::Ok, "plain".to_string());
        apply(&req, &mut res);

        assert_eq!(res.headers.get("Content-Encoding"), None);
        assert_eq!(res.body, b"plain");
    }
}
