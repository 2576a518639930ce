use crate::session::CallbackStatus;

/// Page shown in the browser after the provider redirected back.
pub fn render_html(status: CallbackStatus, message: &str) -> String {
    let message = escape(message);
    let body = match status {
        CallbackStatus::Processing => format!("<p>{message}</p>"),
        CallbackStatus::Success => format!(
            "<h2>{message}</h2><p>You can close this window and return to the terminal.</p>"
        ),
        CallbackStatus::Error => format!(
            "<h4>{message}</h4><p>You'll be redirected to the login page shortly...</p>"
        ),
    };

    format!(
        "<!doctype html><html><head><title>Authenticating</title></head><body><h1>Authenticating</h1>{body}</body></html>"
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
