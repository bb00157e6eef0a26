//! HTML rendering through typed view-models.
//!
//! Pages are built from structs rather than ad hoc string
//! concatenation at the call sites; every user-controlled string passes
//! through [`escape_html`] inside `render`, so stored markup cannot
//! reach the output unescaped.

use crate::store::GuestbookEntry;

/// Escapes `&`, `<`, `>`, `"` and `'` for safe embedding in HTML text
/// and double-quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// The guestbook page, either anonymous or signed-in.
///
/// `nonce` must be present iff `user` is: the add-entry form embeds it
/// as a hidden field bound to the current render.
pub struct GuestbookPage<'a> {
    pub user: Option<&'a str>,
    pub nonce: Option<&'a str>,
    pub entries: &'a [GuestbookEntry],
}

impl GuestbookPage<'_> {
    pub fn render(&self) -> String {
        let mut out = String::from(
            "<!doctype html>\n\
             <link rel=\"stylesheet\" href=\"/comment.css\">\n\
             <script src=\"/comment.js\"></script>\n\
             <h1>Guest book</h1>\n",
        );

        match (self.user, self.nonce) {
            (Some(user), Some(nonce)) => {
                out.push_str(&format!(
                    "<p>Signed in as {}</p>\n\
                     <form action=\"/add\" method=\"post\">\n\
                     <p><input name=\"guest\"></p>\n\
                     <input name=\"nonce\" type=\"hidden\" value=\"{}\">\n\
                     <p><button>Sign the book!</button></p>\n\
                     </form>\n",
                    escape_html(user),
                    escape_html(nonce),
                ));
            }
            _ => {
                out.push_str(
                    "<p><a href=\"/login\">Sign in to write in the guest book</a></p>\n",
                );
            }
        }

        for entry in self.entries {
            out.push_str(&format!(
                "<p>{} <i>from {}</i></p>\n",
                escape_html(&entry.text),
                escape_html(&entry.author),
            ));
        }

        out
    }
}

/// The static login form.
pub struct LoginPage;

impl LoginPage {
    pub fn render(&self) -> String {
        "<!doctype html>\n\
         <h1>Log in</h1>\n\
         <form action=\"/\" method=\"post\">\n\
         <p>Username: <input name=\"username\"></p>\n\
         <p>Password: <input name=\"password\" type=\"password\"></p>\n\
         <p><button>Log in</button></p>\n\
         </form>\n"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<b>&"war's"</b>"#),
            "&lt;b&gt;&amp;&quot;war&#x27;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn anonymous_page_links_to_login() {
        let page = GuestbookPage {
            user: None,
            nonce: None,
            entries: &[],
        };
        let html = page.render();
        assert!(html.contains("<a href=\"/login\">"));
        assert!(!html.contains("<form action=\"/add\""));
    }

    #[test]
    fn signed_in_page_embeds_the_nonce() {
        let page = GuestbookPage {
            user: Some("crashoverride"),
            nonce: Some("deadbeef"),
            entries: &[],
        };
        let html = page.render();
        assert!(html.contains("<form action=\"/add\" method=\"post\">"));
        assert!(html.contains("name=\"nonce\" type=\"hidden\" value=\"deadbeef\""));
    }

    #[test]
    fn stored_markup_is_escaped_at_render() {
        let entries = vec![GuestbookEntry {
            text: "<script>alert(1)</script>".to_string(),
            author: "crashoverride".to_string(),
        }];
        let page = GuestbookPage {
            user: None,
            nonce: None,
            entries: &entries,
        };
        let html = page.render();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn entries_render_with_attribution() {
        let entries = vec![GuestbookEntry {
            text: "Hello".to_string(),
            author: "crashoverride".to_string(),
        }];
        let page = GuestbookPage {
            user: None,
            nonce: None,
            entries: &entries,
        };
        assert!(page.render().contains("<p>Hello <i>from crashoverride</i></p>"));
    }
}
