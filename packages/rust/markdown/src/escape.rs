//! Opt-in HTML escaping for text pulled from module sources.

/// Escape `&`, `<` and `>` so the text renders literally in HTML-aware
/// Markdown viewers. Quotes are left alone.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html("Usage: gps <command> [a & b]"),
            "Usage: gps &lt;command&gt; [a &amp; b]"
        );
    }

    #[test]
    fn ampersand_is_escaped_once() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(escape_html("say \"hi\" it's fine"), "say \"hi\" it's fine");
    }
}
