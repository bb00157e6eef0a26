use crate::auth;
use crate::http::request::HttpRequest;
use crate::http::response::{HttpResponse, ResponseHeader};
use crate::http::status::HttpStatus;
use crate::store::AppState;
use crate::view::{GuestbookPage, LoginPage};

/// Renders the guestbook for `user` (or anonymously).
///
/// Every authenticated render issues a fresh nonce, replacing the
/// previous one for that user.
pub fn guestbook(state: &mut AppState, user: Option<&str>) -> HttpResponse {
    let nonce = user.map(|u| state.nonces.issue(u));
    let page = GuestbookPage {
        user,
        nonce: nonce.as_deref(),
        entries: state.guestbook.entries(),
    };
    HttpResponse::html(HttpStatus::Ok, page.render())
}

pub fn login_form() -> HttpResponse {
    HttpResponse::html(HttpStatus::Ok, LoginPage.render())
}

/// `POST /` — login attempt.
///
/// On success: new session, `Set-Cookie` with the token and its expiry,
/// authenticated guestbook view. On any failure: the anonymous view,
/// with no detail beyond the generic absence of a session.
pub fn do_login(req: &HttpRequest, state: &mut AppState) -> HttpResponse {
    let params = req.form_params();
    let (Some(username), Some(password)) = (params.get("username"), params.get("password"))
    else {
        return guestbook(state, None);
    };

    if !auth::check_login(username, password) {
        return guestbook(state, None);
    }

    let username = username.clone();
    let (token, expires_at) = state.sessions.create(&username);
    let mut res = guestbook(state, Some(&username));
    res.set_header(
        ResponseHeader::SetCookie,
        &format!(
            "token={}; expires={}",
            token,
            httpdate::fmt_http_date(expires_at)
        ),
    );
    res
}

/// `POST /add` — append a guestbook entry.
///
/// Requires an authenticated session, a nonce matching the stored one,
/// and a `guest` field within the length limit. Any failure drops the
/// submission silently; the page re-renders either way, issuing a fresh
/// nonce for authenticated users.
pub fn do_add(req: &HttpRequest, state: &mut AppState, user: Option<&str>) -> HttpResponse {
    let Some(user) = user else {
        return guestbook(state, None);
    };

    let params = req.form_params();
    let nonce_ok = params
        .get("nonce")
        .map(|n| state.nonces.matches(user, n))
        .unwrap_or(false);

    if nonce_ok {
        if let Some(text) = params.get("guest") {
            if let Err(err) = state.guestbook.append(text, user) {
                eprintln!("Guestbook entry from {} rejected: {:?}", user, err);
            }
        }
    }

    guestbook(state, Some(user))
}

pub fn error_page(status: HttpStatus) -> HttpResponse {
    let body = format!(
        "<!doctype html>\n<h1>{} {}</h1>\n",
        status as usize,
        status.reason()
    );
    HttpResponse::html(status, body)
}
