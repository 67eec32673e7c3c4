//! Player-name normalization for cross-source matching.
//!
//! Case-fold, strip diacritics and punctuation, collapse whitespace, then map
//! a formal first name onto the short form reports use.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static NICKNAMES: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("mitchell", "mitch"),
        ("alexander", "alex"),
        ("alexandre", "alex"),
        ("nicholas", "nick"),
        ("nicolas", "nick"),
        ("christopher", "chris"),
        ("matthew", "matt"),
        ("michael", "mike"),
        ("joshua", "josh"),
        ("zachary", "zach"),
        ("jacob", "jake"),
        ("samuel", "sam"),
        ("anthony", "tony"),
        ("joseph", "joe"),
        ("benjamin", "ben"),
        ("maxime", "max"),
        ("maximilian", "max"),
        ("patrick", "pat"),
        ("cameron", "cam"),
        ("evgeni", "evgeny"),
    ]
    .into_iter()
    .collect()
});

/// Canonical comparison form of a player name.
pub fn normalize_name(name: &str) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c == '-' { ' ' } else { c })
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut tokens: Vec<&str> = folded.split_whitespace().collect();
    if let Some(first) = tokens.first_mut() {
        if let Some(short) = NICKNAMES.get(*first) {
            *first = short;
        }
    }
    tokens.join(" ")
}

pub fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}
