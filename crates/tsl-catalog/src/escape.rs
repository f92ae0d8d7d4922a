//! Entity decoding and escaping for resource text.

/// Decode the body of an entity reference (the part between `&` and `;`).
///
/// Supports the five predefined entities plus decimal (`#65`) and
/// hexadecimal (`#x41`) character references.
#[must_use]
pub fn decode_entity(body: &str) -> Option<char> {
    match body {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let reference = body.strip_prefix('#')?;
            let code = match reference.strip_prefix(['x', 'X']) {
                Some(hex) => parse_unsigned(hex, 16)?,
                None => parse_unsigned(reference, 10)?,
            };
            char::from_u32(code)
        }
    }
}

/// Parse the `value` attribute of a `<byte>` element (`x1b` or `27`).
#[must_use]
pub fn decode_byte_value(value: &str) -> Option<char> {
    let code = match value.strip_prefix(['x', 'X']) {
        Some(hex) => parse_unsigned(hex, 16)?,
        None => parse_unsigned(value, 10)?,
    };
    char::from_u32(code)
}

/// Parse a non-empty run of digits in `radix`. Unlike `str::parse`, a sign
/// is rejected.
#[must_use]
pub fn parse_unsigned(digits: &str, radix: u32) -> Option<u32> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

/// Characters that cannot appear raw in text and are written as `<byte>`.
#[must_use]
pub fn needs_byte_element(ch: char) -> bool {
    ch.is_control() && ch != '\n' && ch != '\t'
}

/// Append `text` with markup-significant characters escaped.
///
/// Control characters are emitted as `<byte value="xNN"/>` elements.
pub fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            c if needs_byte_element(c) => {
                out.push_str(&format!("<byte value=\"x{:x}\"/>", u32::from(c)));
            }
            c => out.push(c),
        }
    }
}

/// Append an attribute value; control characters become character references.
pub fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c if c.is_control() => out.push_str(&format!("&#x{:x};", u32::from(c))),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_entities() {
        assert_eq!(decode_entity("lt"), Some('<'));
        assert_eq!(decode_entity("apos"), Some('\''));
        assert_eq!(decode_entity("nbsp"), None);
    }

    #[test]
    fn character_references() {
        assert_eq!(decode_entity("#65"), Some('A'));
        assert_eq!(decode_entity("#x41"), Some('A'));
        assert_eq!(decode_entity("#X1F600"), Some('\u{1F600}'));
        assert_eq!(decode_entity("#xD800"), None);
        assert_eq!(decode_entity("#"), None);
        assert_eq!(decode_entity("#xZZ"), None);
        assert_eq!(decode_entity("#+65"), None);
        assert_eq!(decode_entity("#x+41"), None);
        assert_eq!(decode_entity("#-65"), None);
    }

    #[test]
    fn byte_values() {
        assert_eq!(decode_byte_value("x1b"), Some('\u{1b}'));
        assert_eq!(decode_byte_value("27"), Some('\u{1b}'));
        assert_eq!(decode_byte_value("nope"), None);
        assert_eq!(decode_byte_value("+27"), None);
        assert_eq!(decode_byte_value("x+1b"), None);
        assert_eq!(decode_byte_value(""), None);
    }

    #[test]
    fn unsigned_digits_only() {
        assert_eq!(parse_unsigned("271", 10), Some(271));
        assert_eq!(parse_unsigned("1F", 16), Some(31));
        assert_eq!(parse_unsigned("+3", 10), None);
        assert_eq!(parse_unsigned(" 3", 10), None);
        assert_eq!(parse_unsigned("", 10), None);
        assert_eq!(parse_unsigned("99999999999", 10), None);
    }

    #[test]
    fn escapes_markup_in_text() {
        let mut out = String::new();
        escape_text("<b>Tom & 'Jerry'</b>", &mut out);
        assert_eq!(out, "&lt;b&gt;Tom &amp; &apos;Jerry&apos;&lt;/b&gt;");
    }

    #[test]
    fn control_characters_use_byte_elements() {
        let mut out = String::new();
        escape_text("a\u{1b}b\nc\td", &mut out);
        assert_eq!(out, "a<byte value=\"x1b\"/>b\nc\td");
    }

    #[test]
    fn attribute_escaping() {
        let mut out = String::new();
        escape_attr("gui/\"odd\"\n.py", &mut out);
        assert_eq!(out, "gui/&quot;odd&quot;&#xa;.py");
    }
}
