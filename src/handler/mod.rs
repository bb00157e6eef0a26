mod middleware;
mod pages;
mod router;
mod static_files;

use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::status::HttpStatus;
use crate::store::AppState;

pub fn handle_request(req: &HttpRequest, state: &mut AppState) -> HttpResponse {
    let mut res = router::route(req, state);
    middleware::apply(req, &mut res);
    res
}

pub fn handle_error(err: HttpStatus) -> HttpResponse {
    pages::error_page(err)
}
