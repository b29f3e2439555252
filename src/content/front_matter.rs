use chrono::{NaiveDate, NaiveDateTime};

use crate::text_utils::parse_date_time;

const YAML_FENCE: &str = "---";
const TOML_FENCE: &str = "+++";

/// Metadata found in the header block of a document.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Format {
    Yaml,
    Toml,
}

/// Splits the optional front matter block from the document body.
///
/// Supports YAML blocks fenced by `---` and TOML blocks fenced by `+++`. A document
/// without a block, or with a block that cannot be parsed, comes back untouched with
/// an empty [`FrontMatter`].
pub fn extract(raw: &str) -> (FrontMatter, &str) {
    match try_extract(raw) {
        Some((front_matter, body)) => (front_matter, body),
        None => (FrontMatter::default(), raw),
    }
}

fn try_extract(raw: &str) -> Option<(FrontMatter, &str)> {
    let (format, block, body) = split_block(raw)?;
    let front_matter = match format {
        Format::Yaml => parse_yaml(block),
        Format::Toml => parse_toml(block),
    }?;
    Some((front_matter, body))
}

/// Returns the block format, the block text and the remaining body.
fn split_block(raw: &str) -> Option<(Format, &str, &str)> {
    let doc = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let (first_line, mut rest) = next_line(doc)?;
    let format = match first_line.trim_end() {
        YAML_FENCE => Format::Yaml,
        TOML_FENCE => Format::Toml,
        _ => return None,
    };
    let fence = match format {
        Format::Yaml => YAML_FENCE,
        Format::Toml => TOML_FENCE,
    };

    let block_start = rest;
    let mut block_len = 0;
    while let Some((line, after)) = next_line(rest) {
        if line.trim_end() == fence {
            return Some((format, &block_start[..block_len], after));
        }
        block_len += rest.len() - after.len();
        rest = after;
    }

    // Missing closing fence
    None
}

/// Yields the next line without its terminator, and what follows it.
fn next_line(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() {
        return None;
    }
    match text.find('\n') {
        Some(pos) => Some((text[..pos].trim_end_matches('\r'), &text[pos + 1..])),
        None => Some((text, "")),
    }
}

fn parse_yaml(block: &str) -> Option<FrontMatter> {
    let value: serde_yaml::Value = serde_yaml::from_str(block).ok()?;
    let mapping = match value {
        serde_yaml::Value::Null => return Some(FrontMatter::default()),
        serde_yaml::Value::Mapping(mapping) => mapping,
        _ => return None,
    };

    let mut front_matter = FrontMatter::default();
    for (key, value) in mapping.iter() {
        let Some(key) = key.as_str() else { continue };
        if key.eq_ignore_ascii_case("title") {
            front_matter.title = Some(yaml_scalar(value)?);
        } else if key.eq_ignore_ascii_case("date") {
            let date = parse_date_time(&yaml_scalar(value)?).ok()?;
            front_matter.date = non_zero(date);
        }
    }
    Some(front_matter)
}

fn yaml_scalar(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some(String::new()),
        _ => None,
    }
}

fn parse_toml(block: &str) -> Option<FrontMatter> {
    let table: toml::Table = toml::from_str(block).ok()?;

    let mut front_matter = FrontMatter::default();
    for (key, value) in table.iter() {
        if key.eq_ignore_ascii_case("title") {
            front_matter.title = Some(value.as_str()?.to_string());
        } else if key.eq_ignore_ascii_case("date") {
            let date_str = match value {
                toml::Value::Datetime(dt) => dt.to_string(),
                toml::Value::String(s) => s.clone(),
                _ => return None,
            };
            let date = parse_date_time(&date_str).ok()?;
            front_matter.date = non_zero(date);
        }
    }
    Some(front_matter)
}

/// `0001-01-01 00:00:00` is treated as "no date".
fn non_zero(date: NaiveDateTime) -> Option<NaiveDateTime> {
    let zero = NaiveDate::from_ymd_opt(1, 1, 1)?.and_hms_opt(0, 0, 0)?;
    if date == zero {
        None
    } else {
        Some(date)
    }
}
