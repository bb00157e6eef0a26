use std::fs::File;
use std::io::Read;
use std::time::SystemTime;

use crate::config::config;
use crate::handler::pages;
use crate::http::response::{HttpResponse, ResponseHeader};
use crate::http::status::HttpStatus;

/// The fixed set of asset paths the router may serve. No other path
/// ever reaches the filesystem.
const ASSETS: &[&str] = &["/comment.css", "/comment.js"];

pub fn is_asset(path: &str) -> bool {
    ASSETS.contains(&path)
}

pub fn serve(path: &str) -> HttpResponse {
    if !is_asset(path) {
        return pages::error_page(HttpStatus::NotFound);
    }

    let full_path = format!("{}{}", config().static_files_root, path);
    let mut file = match File::open(&full_path) {
        Ok(f) => f,
        Err(err) => {
            eprintln!("Fail to open static file {}: {err}", full_path);
            return match err.kind() {
                std::io::ErrorKind::NotFound => pages::error_page(HttpStatus::NotFound),
                _ => pages::error_page(HttpStatus::InternalServerError),
            };
        }
    };

    let mut body = Vec::new();
    if file.read_to_end(&mut body).is_err() {
        return pages::error_page(HttpStatus::InternalServerError);
    }

    let mut res = HttpResponse::new();
    res.set_header(ResponseHeader::ContentType, guess_mime(path));
    res.set_header(ResponseHeader::ContentLength, &body.len().to_string());
    res.set_header(ResponseHeader::Server, &config().server_name);
    res.set_header(
        ResponseHeader::Date,
        &httpdate::fmt_http_date(SystemTime::now()),
    );
    res.body = body;
    res
}

fn guess_mime(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        _ => "application/octet-stream",
    }
}
