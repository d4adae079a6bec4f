//! Literal string substitutions applied to served HTML pages.
//!
//! Nothing here parses HTML: each marker must appear verbatim in the page, and only its first
//! occurrence is rewritten. Pages lacking a marker are returned unchanged.

const NAME_SECTION_ACTIVE: &str = r#"<div class="name-section active">"#;
const NAME_SECTION: &str = r#"<div class="name-section">"#;
const GAME_SELECTION: &str = r#"<div class="game-selection">"#;
const GAME_SELECTION_ACTIVE: &str = r#"<div class="game-selection active">"#;
const DISPLAY_NAME_PLACEHOLDER: &str = r#"<span id="displayName"></span>"#;
const BODY_OPEN: &str = "<body>";

/// Switch the main page to the game selection and greet `name`.
pub fn mark_user_known(html: &str, name: &str) -> String {
    let display_name = format!(r#"<span id="displayName">{}</span>"#, escape_html(name));
    html.replacen(NAME_SECTION_ACTIVE, NAME_SECTION, 1)
        .replacen(GAME_SELECTION, GAME_SELECTION_ACTIVE, 1)
        .replacen(DISPLAY_NAME_PLACEHOLDER, &display_name, 1)
}

/// Expose `user` to the page scripts through a `data-user` attribute on `<body>`.
pub fn inject_body_user(html: &str, user: &str) -> String {
    let body = format!(r#"<body data-user="{}">"#, escape_html(user));
    html.replacen(BODY_OPEN, &body, 1)
}

/// Escape text for use inside element content or a double-quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
