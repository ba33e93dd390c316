//! Server-rendered HTML pages.

use secretly_core::domain::{FeedEntry, Session};
use secretly_shared::ErrorResponse;

/// Escape text for safe inclusion in HTML element content and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(title: &str, session: &Session, body: &str) -> String {
    let nav = match session.identity() {
        Some(identity) => format!(
            r#"<span>Signed in as {}</span> <a href="/submit">Submit a secret</a> <a href="/logout">Log out</a>"#,
            escape(identity.username.as_deref().unwrap_or("a Google user"))
        ),
        None => r#"<a href="/login">Log in</a> <a href="/signup">Sign up</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Secretly</title>
</head>
<body>
<header><a href="/"><strong>Secretly</strong></a> <a href="/secretly">Secrets</a> {nav}</header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn landing(session: &Session) -> String {
    layout(
        "Welcome",
        session,
        r#"<h1>Secretly</h1>
<p>Share a secret anonymously. Read everyone else's.</p>
<p><a href="/secretly">See the secrets</a></p>"#,
    )
}

fn credentials_form(action: &str, submit_label: &str) -> String {
    format!(
        r#"<form action="{action}" method="post">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">{submit_label}</button>
</form>"#
    )
}

fn google_link(google_enabled: bool) -> &'static str {
    if google_enabled {
        r#"<p><a href="/auth/google">Continue with Google</a></p>"#
    } else {
        ""
    }
}

pub fn signup_form(session: &Session, google_enabled: bool) -> String {
    let body = format!(
        "<h1>Sign up</h1>\n{}\n{}",
        credentials_form("/signup", "Create account"),
        google_link(google_enabled)
    );
    layout("Sign up", session, &body)
}

pub fn login_form(session: &Session, google_enabled: bool) -> String {
    let body = format!(
        "<h1>Log in</h1>\n{}\n{}",
        credentials_form("/login", "Log in"),
        google_link(google_enabled)
    );
    layout("Log in", session, &body)
}

/// The public feed. Authors are never shown.
pub fn feed(entries: &[FeedEntry], session: &Session) -> String {
    let items = if entries.is_empty() {
        "<p>No secrets yet.</p>".to_string()
    } else {
        let rows: Vec<String> = entries
            .iter()
            .map(|entry| {
                format!(
                    r#"<li><p>{}</p><time datetime="{}">{}</time></li>"#,
                    escape(&entry.post.content),
                    entry.post.created_at.to_rfc3339(),
                    entry.post.created_at.format("%b %e, %Y %H:%M UTC"),
                )
            })
            .collect();
        format!("<ul>\n{}\n</ul>", rows.join("\n"))
    };

    layout(
        "Secrets",
        session,
        &format!("<h1>You've discovered my secret!</h1>\n{items}"),
    )
}

pub fn submit_form(session: &Session) -> String {
    layout(
        "Submit",
        session,
        r#"<h1>Share a secret</h1>
<form action="/submit" method="post">
<textarea name="content" rows="4" required></textarea>
<button type="submit">Submit</button>
</form>"#,
    )
}

pub fn error_page(error: &ErrorResponse) -> String {
    layout(
        &error.title,
        &Session::Anonymous,
        &format!(
            r#"<h1>{}</h1>
<p>Error {}. <a href="/">Back to the start</a></p>"#,
            escape(&error.title),
            error.status
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use secretly_core::domain::{Post, SessionIdentity};
    use uuid::Uuid;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_feed_escapes_content_and_hides_authors() {
        let entry = FeedEntry {
            author: SessionIdentity {
                id: Uuid::new_v4(),
                username: Some("alice".to_string()),
            },
            post: Post {
                id: Uuid::now_v7(),
                content: "<b>hi</b>".to_string(),
                created_at: Utc::now(),
            },
        };

        let page = feed(&[entry], &Session::Anonymous);

        assert!(page.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(!page.contains("<b>hi</b>"));
        assert!(!page.contains("alice"));
    }

    #[test]
    fn test_nav_reflects_session() {
        let signed_in = Session::Authenticated(SessionIdentity {
            id: Uuid::new_v4(),
            username: Some("bob".to_string()),
        });

        assert!(landing(&signed_in).contains("/logout"));
        assert!(landing(&Session::Anonymous).contains("/login"));
    }
}
