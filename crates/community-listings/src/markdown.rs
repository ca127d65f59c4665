//! Markdown rendering for listing bodies.

use pulldown_cmark::{html, Event, Options, Parser};

/// Render a CommonMark body to HTML.
///
/// Raw HTML blocks and inline HTML are emitted as escaped text, so the output
/// only contains markup produced by the renderer itself.
///
/// # Examples
///
/// ```
/// use community_listings::markdown::render;
///
/// assert_eq!(render("hey hey my my"), "<p>hey hey my my</p>\n");
/// assert!(render("<script>x</script>").contains("&lt;script&gt;"));
/// ```
pub fn render(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
