use crate::handler::pages;
use crate::handler::static_files;
use crate::http::HttpMethod;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::status::HttpStatus;
use crate::store::AppState;

pub fn route(req: &HttpRequest, state: &mut AppState) -> HttpResponse {
    let user = current_user(req, state);

    match (&req.method, req.path.as_str()) {
        (HttpMethod::Get, "/") => pages::guestbook(state, user.as_deref()),
        (HttpMethod::Get, "/login") => pages::login_form(),

        (HttpMethod::Post, "/") => pages::do_login(req, state),
        (HttpMethod::Post, "/add") => pages::do_add(req, state, user.as_deref()),

        (HttpMethod::Get, path) if static_files::is_asset(path) => static_files::serve(path),

        _ => pages::error_page(HttpStatus::NotFound),
    }
}

/// Resolves the authenticated username behind the request's `token`
/// cookie. Anonymous when the cookie is absent or the token unknown.
fn current_user(req: &HttpRequest, state: &AppState) -> Option<String> {
    let cookies = req.cookies();
    let token = cookies.get("token")?;
    state.sessions.resolve(token).map(str::to_string)
}
