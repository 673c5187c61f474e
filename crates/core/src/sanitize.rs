//! Free-text sanitization for outbound payloads.
//!
//! Every user-entered string that ends up in a request body is HTML-escaped
//! before transmission, so a product name like `<b>Box</b>` can never be
//! replayed as markup by a careless consumer.

/// HTML-escape a free-text field.
///
/// Escapes `&`, `<`, `>`, `"` and `'`. Leading/trailing whitespace is
/// trimmed; interior whitespace is preserved.
pub fn escape_html(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_html("Beng Beng 20g"), "Beng Beng 20g");
    }

    #[test]
    fn markup_is_escaped() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"
        );
    }

    #[test]
    fn ampersand_first_so_no_double_escape() {
        assert_eq!(escape_html("A & B"), "A &amp; B");
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(escape_html("  Box of 12  "), "Box of 12");
    }
}
