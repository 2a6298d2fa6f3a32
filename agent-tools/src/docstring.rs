//! Parser for summary + "Args" style documentation.
//!
//! Recognises Google-style sections (`Args:`, `Returns:`, ...) and rustdoc
//! headings (`# Arguments`, `# Errors`, ...). Entries inside an args section
//! take any of these forms:
//!
//! ```text
//! name: description
//! name (type): description
//! name (type, optional): description
//! * `name` - description
//! - name: description
//! ```
//!
//! Lines indented deeper than an entry continue its description. Anything the
//! parser does not understand is skipped; parsing never fails.

use std::collections::HashMap;

/// A documented parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocParam {
    name: String,
    type_name: Option<String>,
    description: String,
}

impl DocParam {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type written next to the name, if any.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Returns the description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Result of parsing a documentation string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedDocstring {
    summary: Option<String>,
    params: Vec<DocParam>,
}

impl ParsedDocstring {
    /// Returns the first line of the documentation.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Returns documented parameters in the order they appear.
    #[must_use]
    pub fn params(&self) -> &[DocParam] {
        &self.params
    }

    /// Returns the documented parameter called `name`.
    ///
    /// When a name is documented twice, the first entry wins.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&DocParam> {
        self.params.iter().find(|param| param.name == name)
    }

    /// Maps parameter names to their non-empty descriptions.
    #[must_use]
    pub fn descriptions(&self) -> HashMap<&str, &str> {
        let mut descriptions = HashMap::new();
        for param in &self.params {
            if !param.description.is_empty() {
                descriptions
                    .entry(param.name.as_str())
                    .or_insert(param.description.as_str());
            }
        }
        descriptions
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Description,
    Args,
    Other,
}

const ARG_SECTIONS: &[&str] = &["args", "arguments", "parameters", "params"];

const OTHER_SECTIONS: &[&str] = &[
    "attributes",
    "example",
    "examples",
    "except",
    "exceptions",
    "note",
    "notes",
    "raises",
    "references",
    "return",
    "returns",
    "see also",
    "todo",
    "warning",
    "warnings",
    "yield",
    "yields",
];

/// Parses documentation text. Empty input yields an empty result.
#[must_use]
pub fn parse(text: &str) -> ParsedDocstring {
    let lines = clean_lines(text);
    let mut parsed = ParsedDocstring::default();

    let mut rest = lines.as_slice();
    if let Some((first, tail)) = lines.split_first() {
        if section_header(first).is_none() {
            parsed.summary = Some(first.trim().to_owned());
            rest = tail;
        }
    }

    let mut section = Section::Description;
    let mut current: Option<(DocParam, usize)> = None;

    for line in rest {
        if let Some(next) = section_header(line) {
            flush(&mut current, &mut parsed.params);
            section = next;
            continue;
        }
        if section != Section::Args || line.trim().is_empty() {
            continue;
        }

        let indent = indentation(line);
        if let Some((param, entry_indent)) = current.as_mut() {
            if indent > *entry_indent {
                append_continuation(param, line.trim());
                continue;
            }
        }

        flush(&mut current, &mut parsed.params);
        current = parse_entry(line.trim()).map(|param| (param, indent));
    }
    flush(&mut current, &mut parsed.params);

    parsed
}

fn flush(current: &mut Option<(DocParam, usize)>, params: &mut Vec<DocParam>) {
    if let Some((param, _)) = current.take() {
        params.push(param);
    }
}

fn append_continuation(param: &mut DocParam, text: &str) {
    if param.description.is_empty() {
        text.clone_into(&mut param.description);
    } else {
        param.description.push('\n');
        param.description.push_str(text);
    }
}

/// Trims the first line, removes the common indentation of the others, and
/// drops leading and trailing blank lines.
fn clean_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().collect();
    let Some(first) = lines.first_mut() else {
        return lines;
    };
    *first = first.trim();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| indentation(line))
        .min()
        .unwrap_or(0);

    for line in lines.iter_mut().skip(1) {
        *line = if line.trim().is_empty() {
            ""
        } else {
            line.get(margin..).unwrap_or_else(|| line.trim_start()).trim_end()
        };
    }

    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn section_header(line: &str) -> Option<Section> {
    let trimmed = line.trim();

    if let Some(heading) = trimmed.strip_prefix('#') {
        let title = heading.trim_start_matches('#').trim().to_ascii_lowercase();
        if title.is_empty() {
            return None;
        }
        return Some(classify(&title));
    }

    // google-style headers sit at the base indentation
    if indentation(line) > 0 {
        return None;
    }
    let title = trimmed.strip_suffix(':')?.trim().to_ascii_lowercase();
    if ARG_SECTIONS.contains(&title.as_str()) || OTHER_SECTIONS.contains(&title.as_str()) {
        Some(classify(&title))
    } else {
        None
    }
}

fn classify(title: &str) -> Section {
    if ARG_SECTIONS.contains(&title) {
        Section::Args
    } else {
        Section::Other
    }
}

fn parse_entry(line: &str) -> Option<DocParam> {
    let line = strip_bullet(line);

    if let Some(quoted) = line.strip_prefix('`') {
        let (name, rest) = quoted.split_once('`')?;
        let (type_name, rest) = split_type(rest.trim_start());
        let description = rest
            .trim_start()
            .trim_start_matches(['-', ':', '\u{2013}', '\u{2014}'])
            .trim();
        return build_entry(name, type_name, description);
    }

    let (head, description) = line.split_once(':')?;
    let head = head.trim();
    let (name, type_name) = match head.split_once('(') {
        Some((name, rest)) => {
            let inner = rest.strip_suffix(')')?;
            (name.trim(), Some(inner))
        }
        None => (head, None),
    };
    build_entry(name, type_name, description.trim())
}

fn strip_bullet(line: &str) -> &str {
    for bullet in ["* ", "- ", "+ "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest.trim_start();
        }
    }
    line
}

fn split_type(rest: &str) -> (Option<&str>, &str) {
    if let Some(inner) = rest.strip_prefix('(') {
        if let Some((type_name, tail)) = inner.split_once(')') {
            return (Some(type_name), tail);
        }
    }
    (None, rest)
}

fn build_entry(name: &str, type_name: Option<&str>, description: &str) -> Option<DocParam> {
    let name = name.trim().trim_start_matches('*');
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    let type_name = type_name
        .map(|raw| {
            let raw = raw.trim();
            raw.strip_suffix("optional")
                .map_or(raw, |rest| rest.trim_end().trim_end_matches(','))
                .trim()
        })
        .filter(|raw| !raw.is_empty())
        .map(str::to_owned);

    Some(DocParam {
        name: name.to_owned(),
        type_name,
        description: description.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLE: &str = "Multiply two numbers together

    Args:
        a (float): first number
        b (float): second number
    ";

    #[test]
    fn parses_google_style_args() {
        let parsed = parse(GOOGLE);

        assert_eq!(parsed.summary(), Some("Multiply two numbers together"));
        assert_eq!(parsed.params().len(), 2);
        assert_eq!(parsed.params()[0].name(), "a");
        assert_eq!(parsed.params()[0].type_name(), Some("float"));
        assert_eq!(parsed.params()[0].description(), "first number");
        assert_eq!(parsed.params()[1].description(), "second number");
    }

    #[test]
    fn untyped_entries_and_missing_params() {
        let parsed = parse(
            "Add two numbers together

            Args:
                a: first number
            ",
        );

        assert_eq!(parsed.summary(), Some("Add two numbers together"));
        assert_eq!(parsed.params().len(), 1);
        assert_eq!(parsed.params()[0].type_name(), None);
        assert!(parsed.param("b").is_none());
    }

    #[test]
    fn empty_input_yields_empty_result() {
        assert_eq!(parse(""), ParsedDocstring::default());
        assert_eq!(parse("   \n  \n"), ParsedDocstring::default());
    }

    #[test]
    fn parses_rustdoc_arguments_heading() {
        // shape produced by `///` comments
        let doc = " Look up a city.\n\n # Arguments\n\n * `name` - city name\n * `limit` (usize) - maximum results\n\n # Errors\n\n * `oops` - not an argument";
        let parsed = parse(doc);

        assert_eq!(parsed.summary(), Some("Look up a city."));
        let names: Vec<_> = parsed.params().iter().map(DocParam::name).collect();
        assert_eq!(names, ["name", "limit"]);
        assert_eq!(parsed.params()[0].description(), "city name");
        assert_eq!(parsed.params()[1].type_name(), Some("usize"));
        assert_eq!(parsed.params()[1].description(), "maximum results");
    }

    #[test]
    fn continuation_lines_extend_description() {
        let parsed = parse(
            "Search.

            Args:
                query (str, optional): the text
                    to search for
                limit: cap
            Returns:
                results: ignored
            ",
        );

        assert_eq!(parsed.params().len(), 2);
        assert_eq!(parsed.params()[0].type_name(), Some("str"));
        assert_eq!(parsed.params()[0].description(), "the text\nto search for");
        assert_eq!(parsed.params()[1].description(), "cap");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let parsed = parse(
            "Summary

            Args:
                this line has no separator
                bad name: spaces are not allowed
                (float): missing name
                ok: fine
            ",
        );

        let names: Vec<_> = parsed.params().iter().map(DocParam::name).collect();
        assert_eq!(names, ["ok"]);
    }

    #[test]
    fn header_first_line_is_not_a_summary() {
        let parsed = parse("Args:\n    x: value");
        assert_eq!(parsed.summary(), None);
        assert_eq!(parsed.params()[0].name(), "x");
    }

    #[test]
    fn descriptions_skip_empty_entries() {
        let parsed = parse("S\n\nArgs:\n    a:\n    b: bee\n    b: again");
        let descriptions = parsed.descriptions();

        assert!(!descriptions.contains_key("a"));
        assert_eq!(descriptions.get("b"), Some(&"bee"));
    }
}
