//! Borrowed view of one inbound command line.
//!
//! A command line is a case-sensitive keyword followed by an optional
//! argument string. The keyword ends at the first run of whitespace; the
//! argument string is everything after that run, trimmed. Parsing never
//! allocates and never fails: interpreting the arguments is up to the
//! handler for the keyword.

/// Keyword for claiming a display name.
pub const LOGIN: &str = "LOGIN";
/// Keyword for broadcasting to every other session.
pub const MSG: &str = "MSG";
/// Keyword for a direct message to one session.
pub const DM: &str = "DM";
/// Keyword for listing registered names.
pub const WHO: &str = "WHO";
/// Keyword for the liveness check.
pub const PING: &str = "PING";

/// A parsed inbound line, borrowing from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandRef<'a> {
    raw: &'a str,
    keyword: &'a str,
    rest: &'a str,
}

impl<'a> CommandRef<'a> {
    /// Parse one line. Returns `None` if the line is empty after trimming.
    pub fn parse(line: &'a str) -> Option<Self> {
        let raw = line.trim();
        if raw.is_empty() {
            return None;
        }

        let (keyword, rest) = match raw.find(char::is_whitespace) {
            Some(idx) => (&raw[..idx], raw[idx..].trim_start()),
            None => (raw, ""),
        };

        Some(Self { raw, keyword, rest })
    }

    /// The trimmed line as received.
    #[inline]
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The command keyword, exactly as sent.
    #[inline]
    pub fn keyword(&self) -> &'a str {
        self.keyword
    }

    /// Everything after the keyword, trimmed. Empty if there were no arguments.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.rest
    }

    /// Whether any argument text follows the keyword.
    #[inline]
    pub fn has_args(&self) -> bool {
        !self.rest.is_empty()
    }

    /// The `n`th whitespace-separated argument token.
    pub fn arg(&self, n: usize) -> Option<&'a str> {
        self.rest.split_whitespace().nth(n)
    }

    /// Split the arguments into a leading target token and the trimmed remainder.
    ///
    /// Returns `None` when there is no target. The remainder is empty when
    /// only a target was given.
    pub fn split_target(&self) -> Option<(&'a str, &'a str)> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find(char::is_whitespace) {
            Some(idx) => Some((&self.rest[..idx], self.rest[idx..].trim())),
            None => Some((self.rest, "")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(CommandRef::parse(""), None);
        assert_eq!(CommandRef::parse("   \t "), None);
    }

    #[test]
    fn test_parse_keyword_only() {
        let cmd = CommandRef::parse("  WHO  ").unwrap();
        assert_eq!(cmd.keyword(), "WHO");
        assert_eq!(cmd.text(), "");
        assert!(!cmd.has_args());
        assert_eq!(cmd.raw(), "WHO");
    }

    #[test]
    fn test_login_takes_first_token() {
        let cmd = CommandRef::parse("LOGIN   alice  extra words").unwrap();
        assert_eq!(cmd.keyword(), LOGIN);
        assert_eq!(cmd.arg(0), Some("alice"));
        assert_eq!(cmd.arg(1), Some("extra"));
        assert_eq!(cmd.arg(3), None);
    }

    #[test]
    fn test_msg_text_is_trimmed_remainder() {
        let cmd = CommandRef::parse("MSG    hello   world  ").unwrap();
        assert_eq!(cmd.keyword(), MSG);
        assert_eq!(cmd.text(), "hello   world");
    }

    #[test]
    fn test_keyword_is_case_sensitive_and_whole() {
        assert_eq!(CommandRef::parse("msg hi").unwrap().keyword(), "msg");
        assert_eq!(CommandRef::parse("MSGhi").unwrap().keyword(), "MSGhi");
    }

    #[test]
    fn test_split_target() {
        let cmd = CommandRef::parse("DM bob  hi there ").unwrap();
        assert_eq!(cmd.split_target(), Some(("bob", "hi there")));

        let cmd = CommandRef::parse("DM bob").unwrap();
        assert_eq!(cmd.split_target(), Some(("bob", "")));

        let cmd = CommandRef::parse("DM").unwrap();
        assert_eq!(cmd.split_target(), None);
    }

    #[test]
    fn test_tab_separates_keyword() {
        let cmd = CommandRef::parse("DM\tbob\thi").unwrap();
        assert_eq!(cmd.keyword(), DM);
        assert_eq!(cmd.split_target(), Some(("bob", "hi")));
    }
}
