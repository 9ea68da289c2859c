use crate::Encoder;

/// HTML entity escaping for element content and quoted attributes.
///
/// Quotes become numeric entities so the output is safe in both single- and
/// double-quoted attribute positions.
pub struct HtmlEncoder;

impl Encoder for HtmlEncoder {
    fn encode(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for c in input.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&#34;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(c),
            }
        }
        out
    }
}

/// XML escaping. Differs from HTML only in using the predefined named
/// entities for quotes.
pub struct XmlEncoder;

impl Encoder for XmlEncoder {
    fn encode(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for c in input.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&apos;"),
                _ => out.push(c),
            }
        }
        out
    }
}

/// JavaScript string escaping.
///
/// Quotes become hex escapes (valid in both quote styles), `/` and `-` are
/// escaped to keep `</script>` and `--` sequences inert, and control
/// characters use their short forms. Angle brackets are left alone; stacking
/// [`HtmlEncoder`] on top covers markup contexts.
pub struct JavascriptEncoder;

impl Encoder for JavascriptEncoder {
    fn encode(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for c in input.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\x27"),
                '"' => out.push_str("\\x22"),
                '/' => out.push_str("\\/"),
                '-' => out.push_str("\\-"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }
        out
    }
}

/// JavaScript-then-HTML composition for text that lands in script blocks
/// embedded in markup. Equivalent to attaching both encoders in that order.
pub struct WebEncoder;

impl Encoder for WebEncoder {
    fn encode(&self, input: &str) -> String {
        HtmlEncoder.encode(&JavascriptEncoder.encode(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escapes_markup_and_quotes() {
        assert_eq!(
            HtmlEncoder.encode("\"><script>alert('XSS')</script>"),
            "&#34;&gt;&lt;script&gt;alert(&#39;XSS&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn xml_uses_named_quote_entities() {
        assert_eq!(XmlEncoder.encode("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }

    #[test]
    fn javascript_escapes_quotes_slashes_and_dashes() {
        assert_eq!(
            JavascriptEncoder.encode("'; alert(1); //"),
            "\\x27; alert(1); \\/\\/"
        );
        assert_eq!(JavascriptEncoder.encode("--></SCRIPT>"), "\\-\\-><\\/SCRIPT>");
    }

    #[test]
    fn web_equals_javascript_then_html() {
        let input = "';alert(1)//--></SCRIPT>";
        assert_eq!(
            WebEncoder.encode(input),
            HtmlEncoder.encode(&JavascriptEncoder.encode(input))
        );
    }

    #[test]
    fn double_encoding_is_not_idempotent() {
        let once = HtmlEncoder.encode("<b>");
        let twice = HtmlEncoder.encode(&once);
        assert_eq!(once, "&lt;b&gt;");
        assert_eq!(twice, "&amp;lt;b&amp;gt;");
    }
}
