//! HTML rendering.
//!
//! Pages are plain HTML files under `templates/`, compiled into the binary
//! with `include_str!`.  Placeholders look like `{{name}}` and are filled in
//! a single left-to-right pass, so text substituted for one placeholder is
//! never re-scanned for another.  Every session-derived value goes through
//! [`escape_html`] before it is substituted.

use docbridge_core::Format;

use crate::domain::{ConverterState, TextToolState};

const LAYOUT: &str = include_str!("../../templates/layout.html");
const ROOT: &str = include_str!("../../templates/root.html");
const CONVERTER: &str = include_str!("../../templates/converter.html");
const TEXT_TOOL: &str = include_str!("../../templates/text_tool.html");

/// Which two-way text tool a page is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTool {
    Base64,
    UrlCodec,
}

impl TextTool {
    fn title(self) -> &'static str {
        match self {
            TextTool::Base64 => "Base64 encode / decode",
            TextTool::UrlCodec => "URL encode / decode",
        }
    }

    /// Form target of the tool's page.
    pub fn action(self) -> &'static str {
        match self {
            TextTool::Base64 => "/api/base64",
            TextTool::UrlCodec => "/api/htmlencode",
        }
    }

    /// Path of the tool's page.
    pub fn page(self) -> &'static str {
        match self {
            TextTool::Base64 => "/base64",
            TextTool::UrlCodec => "/htmlencode",
        }
    }
}

// ── Pages ─────────────────────────────────────────────────────────────────────

pub fn render_root() -> String {
    layout("Tools", ROOT.to_string())
}

/// Converter page pre-filled from the session.
pub fn render_converter(state: &ConverterState) -> String {
    let content = fill_template(
        CONVERTER,
        &[
            ("from_options", format_options(&state.from_lang)),
            ("to_options", format_options(&state.to_lang)),
            ("input", escape_html(&state.input)),
            ("output", escape_html(&state.output)),
            ("error", escape_html(&state.error)),
        ],
    );
    layout("JSON / YAML / TOML converter", content)
}

/// Base64 or URL-codec page pre-filled from the session.
pub fn render_text_tool(tool: TextTool, state: &TextToolState) -> String {
    // Encode is the default when nothing has been submitted yet.
    let decode = state.operation.trim().eq_ignore_ascii_case("decode");
    let content = fill_template(
        TEXT_TOOL,
        &[
            ("action", tool.action().to_string()),
            ("encode_checked", checked(!decode)),
            ("decode_checked", checked(decode)),
            ("input", escape_html(&state.input)),
            ("output", escape_html(&state.output)),
            ("error", escape_html(&state.error)),
        ],
    );
    layout(tool.title(), content)
}

fn layout(title: &str, content: String) -> String {
    fill_template(
        LAYOUT,
        &[("title", escape_html(title)), ("content", content)],
    )
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `<option>` list for the format selects, marking `selected` as chosen.
///
/// A `selected` value that names no known format (including empty) leaves
/// every option unmarked, so the browser shows the first one.
fn format_options(selected: &str) -> String {
    let selected = selected.parse::<Format>().ok();
    Format::ALL
        .iter()
        .map(|&format| {
            let attr = if Some(format) == selected { " selected" } else { "" };
            format!(
                "        <option value=\"{}\"{attr}>{}</option>",
                format.as_str(),
                format.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn checked(on: bool) -> String {
    let attr = if on { " checked" } else { "" };
    attr.to_string()
}

/// Replaces each `{{name}}` in `template` with its value from `vars`.
///
/// Unknown placeholders are left as they are.
fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let name = &after[..end];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_fill_template_replaces_known_placeholders() {
        let out = fill_template("a={{a}}, b={{b}}", &[("a", "1".into()), ("b", "2".into())]);
        assert_eq!(out, "a=1, b=2");
    }

    #[test]
    fn test_fill_template_keeps_unknown_placeholders() {
        let out = fill_template("x {{missing}} y", &[]);
        assert_eq!(out, "x {{missing}} y");
    }

    #[test]
    fn test_fill_template_does_not_rescan_substituted_text() {
        // Arrange: the first value looks like the second placeholder
        let vars = [("input", "{{output}}".to_string()), ("output", "secret".to_string())];

        // Act
        let out = fill_template("[{{input}}] [{{output}}]", &vars);

        // Assert
        assert_eq!(out, "[{{output}}] [secret]");
    }

    #[test]
    fn test_fill_template_unterminated_placeholder_is_literal() {
        assert_eq!(fill_template("a {{b", &[("b", "x".into())]), "a {{b");
    }

    #[test]
    fn test_format_options_marks_selected_format() {
        let html = format_options("yaml");

        assert!(html.contains(r#"<option value="yaml" selected>YAML</option>"#));
        assert!(html.contains(r#"<option value="json">JSON</option>"#));
        assert!(html.contains(r#"<option value="toml">TOML</option>"#));
    }

    #[test]
    fn test_format_options_unknown_selection_marks_nothing() {
        assert!(!format_options("xml").contains("selected"));
        assert!(!format_options("").contains("selected"));
    }

    #[test]
    fn test_converter_page_escapes_session_values() {
        // Arrange
        let state = ConverterState {
            input: "<script>alert(1)</script>".to_string(),
            error: "bad & worse".to_string(),
            ..ConverterState::default()
        };

        // Act
        let html = render_converter(&state);

        // Assert
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("bad &amp; worse"));
    }

    #[test]
    fn test_converter_page_shows_output() {
        let state = ConverterState {
            output: "a: 1".to_string(),
            ..ConverterState::default()
        };

        assert!(render_converter(&state).contains("<textarea readonly>a: 1</textarea>"));
    }

    #[test]
    fn test_text_tool_page_defaults_to_encode() {
        let html = render_text_tool(TextTool::Base64, &TextToolState::default());

        assert!(html.contains(r#"value="encode" checked"#));
        assert!(!html.contains(r#"value="decode" checked"#));
        assert!(html.contains(r#"action="/api/base64""#));
    }

    #[test]
    fn test_text_tool_page_remembers_decode() {
        let state = TextToolState {
            operation: "decode".to_string(),
            ..TextToolState::default()
        };

        let html = render_text_tool(TextTool::UrlCodec, &state);

        assert!(html.contains(r#"value="decode" checked"#));
        assert!(html.contains(r#"action="/api/htmlencode""#));
    }

    #[test]
    fn test_root_page_links_to_every_tool() {
        let html = render_root();

        for path in ["/converter", "/base64", "/htmlencode"] {
            assert!(html.contains(&format!("href=\"{path}\"")), "missing link to {path}");
        }
    }
}
