//! Markdown rendering for endpoint sections
//!
//! Sections are rendered with line-break mode enabled: a single newline inside
//! a paragraph becomes `<br />`, which is how authors expect readme text to
//! look in the update modal.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Soft breaks become hard breaks
fn with_breaks<'a>(parser: Parser<'a>) -> impl Iterator<Item = Event<'a>> {
    parser.map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    })
}

/// Render a markdown block to HTML with line breaks enabled
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut html_output = String::new();
    html::push_html(&mut html_output, with_breaks(parser));
    html_output
}

/// Join section lines with CRLF and render them
pub fn render_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let joined = lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\r\n");
    render_markdown(&joined)
}

/// Render a single line of inline markdown without a paragraph wrapper
pub fn render_inline(line: &str) -> String {
    let parser = Parser::new_ext(line.trim(), options()).filter(|event| {
        !matches!(
            event,
            Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)
        )
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output.trim_end().to_string()
}

/// Escape HTML special characters
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_newline_becomes_break() {
        let html = render_markdown("first line\nsecond line");
        assert!(html.contains("first line<br />"));
        assert!(html.contains("second line"));
        assert!(html.starts_with("<p>"));
    }

    #[test]
    fn test_render_lines_with_crlf() {
        let html = render_lines(&["# Title", "", "Body **bold**", "next"]);
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<br />"));
        assert!(!html.contains('\r'));
    }

    #[test]
    fn test_render_list() {
        let html = render_lines(&["* one", "* two"]);
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render_markdown("<div class=\"x\">\n</div>\n\nafter");
        assert!(html.contains("<div class=\"x\">"));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_render_inline_has_no_paragraph() {
        assert_eq!(render_inline("  Update *now*  "), "Update <em>now</em>");
        assert_eq!(render_inline(""), "");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
