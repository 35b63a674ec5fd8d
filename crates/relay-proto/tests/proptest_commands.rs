//! Property tests for command extraction.

use proptest::prelude::*;
use relay_proto::{CommandRef, Reply};

fn token_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,16}"
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,.!?]{0,64}"
}

fn padding_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,4}"
}

proptest! {
    /// Surrounding whitespace never changes the keyword or the text.
    #[test]
    fn padding_is_ignored(
        keyword in token_strategy(),
        text in text_strategy(),
        lead in padding_strategy(),
        trail in padding_strategy(),
    ) {
        let line = format!("{lead}{keyword} {text}{trail}");
        let cmd = CommandRef::parse(&line).expect("keyword is non-empty");
        prop_assert_eq!(cmd.keyword(), keyword.as_str());
        prop_assert_eq!(cmd.text(), text.trim());
    }

    /// A DM target is always the first token and the remainder is trimmed.
    #[test]
    fn dm_target_and_text(
        target in token_strategy(),
        text in text_strategy(),
        gap in "[ \t]{1,4}",
    ) {
        let line = format!("DM {target}{gap}{text}");
        let cmd = CommandRef::parse(&line).expect("non-empty");
        let (got_target, got_text) = cmd.split_target().expect("target present");
        prop_assert_eq!(got_target, target.as_str());
        prop_assert_eq!(got_text, text.trim());
    }

    /// Rendered broadcasts parse back into the same sender and text.
    #[test]
    fn rendered_msg_reparses(from in token_strategy(), text in "[A-Za-z0-9][A-Za-z0-9 ]{0,30}[A-Za-z0-9]") {
        let rendered = Reply::Msg { from: from.clone(), text: text.clone() }.to_string();
        let cmd = CommandRef::parse(&rendered).expect("non-empty");
        prop_assert_eq!(cmd.keyword(), "MSG");
        prop_assert_eq!(cmd.split_target(), Some((from.as_str(), text.as_str())));
    }
}
