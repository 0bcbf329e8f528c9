//! URI escaping for link attributes and resource file names.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in file names: everything outside the unreserved set.
const FILE_NAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Characters escaped in link attributes: file-name set minus the reserved
/// characters and `%`, so existing escapes and URI structure survive.
const LINK_ATTRIBUTE: &AsciiSet = &FILE_NAME
    .remove(b'%')
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// Unreserved and reserved punctuation allowed unescaped in a URI reference.
const URI_PUNCTUATION: &[u8] = b"-._~:/?#[]@!$&'()*+,;=";

/// Escape a link attribute value into a URI reference.
///
/// Reserved characters and `%` are left alone; everything else outside the
/// unreserved set is UTF-8 percent-encoded.
#[must_use]
pub fn escape_link_attribute(value: &str) -> String {
    utf8_percent_encode(value, LINK_ATTRIBUTE).to_string()
}

/// Escape a file name into a single URI path segment.
#[must_use]
pub fn escape_file_name(value: &str) -> String {
    utf8_percent_encode(value, FILE_NAME).to_string()
}

/// Whether `value` is a syntactically valid URI reference.
///
/// Checks the character repertoire and that every `%` starts a two-digit
/// hex escape.
#[must_use]
pub fn is_uri_reference(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            let valid_escape = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid_escape {
                return false;
            }
            i += 3;
            continue;
        }
        if !(b.is_ascii_alphanumeric() || URI_PUNCTUATION.contains(&b)) {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_escape_link_attribute_keeps_uri_structure() {
        assert_eq!(
            escape_link_attribute("http://example.com/a/b?x=1&y=2#frag"),
            "http://example.com/a/b?x=1&y=2#frag"
        );
        assert_eq!(escape_link_attribute("foo%20bar"), "foo%20bar");
    }

    #[test]
    fn test_escape_link_attribute_escapes_others() {
        assert_eq!(escape_link_attribute("foo bar.png"), "foo%20bar.png");
        assert_eq!(escape_link_attribute("\u{e1}"), "%C3%A1");
        assert_eq!(escape_link_attribute("a\"b<c>"), "a%22b%3Cc%3E");
    }

    #[test]
    fn test_escape_file_name() {
        assert_eq!(escape_file_name("foo/bar.png"), "foo%2Fbar.png");
        assert_eq!(escape_file_name("a b~c_d-e.f"), "a%20b~c_d-e.f");
        assert_eq!(escape_file_name("100%"), "100%25");
    }

    #[test]
    fn test_is_uri_reference() {
        assert!(is_uri_reference("http://example.com/a%20b.png"));
        assert!(is_uri_reference("#anchor"));
        assert!(is_uri_reference(""));
        assert!(!is_uri_reference("a b.png"));
        assert!(!is_uri_reference("50%.png"));
        assert!(!is_uri_reference("%zz"));
        assert!(!is_uri_reference("caf\u{e9}.png"));
    }
}
