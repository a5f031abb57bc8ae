//! services/web/src/web/templates.rs
//!
//! HTML rendering. Plain functions that take data and return markup; the
//! handlers never build HTML themselves.
//!
//! Entry titles are escaped; entry text is spliced in raw so posts may carry
//! their own markup. That asymmetry is intended application behavior and is
//! covered by tests.

use miniblog_core::domain::Entry;

/// Escapes the HTML special characters in user-supplied text.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared page chrome: heading, log in/out link and any flashed message.
fn layout(body: &str, flash: Option<&str>, logged_in: bool) -> String {
    let nav = if logged_in {
        r#"<a href="/logout">log out</a>"#
    } else {
        r#"<a href="/login">log in</a>"#
    };
    let flash_html = match flash {
        Some(message) => format!("<div class=\"flash\">{}</div>\n", escape_html(message)),
        None => String::new(),
    };
    format!(
        "<!doctype html>\n<html>\n<head><title>Miniblog</title></head>\n<body>\n\
         <h1>Miniblog</h1>\n<div class=\"nav\">{nav}</div>\n{flash_html}{body}</body>\n</html>\n"
    )
}

/// The entry list page. Shows the add-entry form only to a logged-in admin.
pub fn render_entries(entries: &[Entry], flash: Option<&str>, logged_in: bool) -> String {
    let mut body = String::new();
    if logged_in {
        body.push_str(
            "<form action=\"/add\" method=\"post\">\n\
             <input type=\"text\" name=\"title\" placeholder=\"Title\">\n\
             <textarea name=\"text\" rows=\"5\"></textarea>\n\
             <input type=\"submit\" value=\"Share\">\n\
             </form>\n",
        );
    }
    if entries.is_empty() {
        body.push_str("<p><em>No entries here so far</em></p>\n");
    } else {
        body.push_str("<ul class=\"entries\">\n");
        for entry in entries {
            // Title escaped, text raw.
            body.push_str(&format!(
                "<li><h2>{}</h2>{}</li>\n",
                escape_html(&entry.title),
                entry.text
            ));
        }
        body.push_str("</ul>\n");
    }
    layout(&body, flash, logged_in)
}

/// The login form, optionally re-rendered with the rejection reason.
pub fn render_login(error: Option<&str>, flash: Option<&str>) -> String {
    let error_html = match error {
        Some(reason) => format!(
            "<p class=\"error\"><strong>Error:</strong> {}</p>\n",
            escape_html(reason)
        ),
        None => String::new(),
    };
    let body = format!(
        "<h2>Login</h2>\n{error_html}\
         <form action=\"/login\" method=\"post\">\n\
         <input type=\"text\" name=\"username\" placeholder=\"Username\">\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\">\n\
         <input type=\"submit\" value=\"Login\">\n\
         </form>\n"
    );
    layout(&body, flash, false)
}
