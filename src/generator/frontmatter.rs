use std::collections::HashMap;

const DELIMITER: &str = "---";

/// Flat `key: value` block at the top of a post.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct Frontmatter {
    fields: HashMap<String, String>,
}

impl Frontmatter {
    /// Value for `key`, treating empty values as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Splits `content` into its frontmatter and the body that follows it.
/// Content without a complete block is returned whole as the body.
pub(super) fn split(content: &str) -> (Frontmatter, &str) {
    if !content.starts_with(DELIMITER) {
        return (Frontmatter::default(), content);
    }
    let mut parts = content.splitn(3, DELIMITER);
    let (Some(_), Some(header), Some(body)) = (parts.next(), parts.next(), parts.next()) else {
        return (Frontmatter::default(), content);
    };

    let mut fields = HashMap::new();
    for line in header.trim().lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        fields.insert(key.trim().to_lowercase(), value.to_string());
    }

    (Frontmatter { fields }, body)
}
