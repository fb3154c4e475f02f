use std::sync::LazyLock;

use chrono::NaiveDate;
use log::debug;
use regex::Regex;

use super::{
    frontmatter::{self, Frontmatter},
    utils::{humanize, strip_markup, truncate},
};
use crate::{context::Context, metadata::Post};

const DATE_FORMAT: &str = "%Y-%m-%d";

static RE_FILENAME_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").unwrap());
static RE_POSTED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*(?:Posted|Last Updated|Date):\s*(\d{4}-\d{2}-\d{2})\*").unwrap()
});
// unanchored: may also hit version strings and the like
static RE_ANY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").unwrap());

/// Builds a post from its source text. `modified` is the file's modification
/// date and is used whenever no explicit date can be found or parsed.
pub(crate) fn extract(
    filename: &str,
    content: &str,
    modified: NaiveDate,
    ctx: &Context,
) -> Post {
    let (fm, _) = frontmatter::split(content);

    let title = fm
        .get("title")
        .map(str::to_string)
        .or_else(|| title_from_content(content))
        .unwrap_or_else(|| humanize(filename));

    let date = match date_candidate(&fm, filename, content) {
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap_or_else(|e| {
            debug!("{filename}: unparsable date {s:?} ({e}), using modification time");
            modified
        }),
        None => modified,
    };

    let description = fm
        .get("description")
        .map(str::to_string)
        .or_else(|| description_from_text(content))
        .unwrap_or_else(|| format!("Read more about {title}"));
    let description = truncate(&description).into_owned();

    Post {
        title,
        date,
        description,
        filename: filename.to_string(),
        link: ctx.post_link(filename),
    }
}

fn title_from_content(content: &str) -> Option<String> {
    let heading = content.lines().find_map(|line| line.strip_prefix("# "))?;
    Some(heading.trim().to_string()).filter(|t| !t.is_empty())
}

fn date_candidate<'a>(
    fm: &'a Frontmatter,
    filename: &'a str,
    content: &'a str,
) -> Option<&'a str> {
    fm.get("date")
        .or_else(|| first_capture(&RE_FILENAME_DATE, filename))
        .or_else(|| first_capture(&RE_POSTED_DATE, content))
        .or_else(|| first_capture(&RE_ANY_DATE, content))
}

fn first_capture<'a>(re: &Regex, haystack: &'a str) -> Option<&'a str> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// First prose line of the whole text. Frontmatter lines other than the
/// delimiters are not skipped.
fn description_from_text(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find(|line| {
            !line.is_empty()
                && !line.starts_with('#')
                && !line.starts_with("---")
                && !line.starts_with('>')
        })
        .map(strip_markup)
        .filter(|d| !d.is_empty())
}
