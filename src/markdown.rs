use comrak::{ComrakOptions, markdown_to_html};
use once_cell::sync::Lazy;

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    options
});

/// Render an assistant reply to HTML. Raw HTML in the reply is dropped.
pub fn render_reply(md: &str) -> String {
    markdown_to_html(md, &MARKDOWN_OPTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_lists_and_emphasis() {
        let html = render_reply("**Titles**\n\n- one\n- two");
        assert!(html.contains("<strong>Titles</strong>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn raw_html_is_not_passed_through() {
        let html = render_reply("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }
}
