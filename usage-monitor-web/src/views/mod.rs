//! HTML presenter
//!
//! Pure functions from view data to markup. Every dynamic string goes
//! through [`escape_html`].

mod dashboard;
mod login;

pub use dashboard::render_dashboard;
pub use login::render_login;

/// Escapes text for use in HTML element content and quoted attributes.
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

/// Shared page chrome.
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

const STYLE: &str = "
body{margin:0;font-family:system-ui,-apple-system,'Segoe UI',sans-serif;background:#f4f5f7;color:#1f2328}
main{max-width:960px;margin:0 auto;padding:32px 16px}
header{display:flex;justify-content:space-between;align-items:center;gap:12px;flex-wrap:wrap}
h1{font-size:22px;margin:0}
.muted{color:#656d76;font-size:13px}
.actions a,.actions button{display:inline-block;padding:6px 14px;border-radius:6px;border:1px solid #d0d7de;background:#fff;color:#1f2328;text-decoration:none;font-size:14px;cursor:pointer}
.card{background:#fff;border:1px solid #d0d7de;border-radius:8px;padding:16px;margin-top:16px}
.card.failed{border-color:#cf222e}
.card h2{font-size:16px;margin:0 0 8px}
.stats{display:grid;grid-template-columns:repeat(4,1fr);gap:8px;font-size:14px}
.stats b{display:block;font-size:18px}
.bar{height:8px;background:#eaeef2;border-radius:4px;overflow:hidden;margin-top:12px}
.bar span{display:block;height:100%;background:#2da44e}
.bar span.warn{background:#bf8700}
.bar span.high{background:#cf222e}
.error{color:#cf222e;font-size:14px}
.badge{font-size:12px;padding:2px 8px;border-radius:10px;background:#ddf4ff;color:#0969da}
form.login{max-width:320px;margin:96px auto;background:#fff;border:1px solid #d0d7de;border-radius:8px;padding:24px}
form.login input{width:100%;box-sizing:border-box;padding:8px;margin:12px 0;border:1px solid #d0d7de;border-radius:6px}
form.login button{width:100%;padding:8px;border:0;border-radius:6px;background:#2da44e;color:#fff;font-size:15px}
";
