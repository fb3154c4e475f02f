use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

pub(super) const DESCRIPTION_LIMIT: usize = 200;

static RE_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static RE_ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static RE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Removes bold, italic and inline-code markup, keeping the inner text.
pub(super) fn strip_markup(line: &str) -> String {
    let s = RE_BOLD.replace_all(line, "$1");
    let s = RE_ITALIC.replace_all(&s, "$1");
    RE_CODE.replace_all(&s, "$1").into_owned()
}

/// `hello-world` -> `Hello World`, `my_post` -> `My_Post`
///
/// A letter is upper-cased when it follows a non-letter and lower-cased otherwise.
pub(super) fn humanize(filename: &str) -> String {
    let mut out = String::with_capacity(filename.len());
    let mut after_letter = false;
    for c in filename.chars().map(|c| if c == '-' { ' ' } else { c }) {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

pub(super) fn truncate(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((end, _)) => Cow::Owned(format!("{}...", &text[..end])),
        None => Cow::Borrowed(text),
    }
}
