use super::{escape_html, layout};

/// Login page, optionally with an error line above the form.
pub fn render_login(message: Option<&str>) -> String {
    let error = message
        .map(|m| format!(r#"<p class="error">{}</p>"#, escape_html(m)))
        .unwrap_or_default();

    let body = format!(
        r#"<form class="login" method="post" action="/login">
<h1>Usage Monitor</h1>
{error}
<input type="password" name="password" placeholder="Password" autocomplete="current-password" required autofocus>
<button type="submit">Sign in</button>
</form>"#
    );

    layout("Sign in · Usage Monitor", &body)
}
