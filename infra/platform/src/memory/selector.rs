//! Minimal selector matching for the headless document.
//!
//! Supports comma-separated lists of compound selectors built from a tag name,
//! `#id`, `.class` and `[attr]` / `[attr="value"]` parts. Combinators are not supported.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<(String, Option<String>)>,
}

/// What a selector needs to know about an element.
pub(crate) trait Subject {
    fn tag(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl Compound {
    pub(crate) fn matches(&self, subject: &impl Subject) -> bool {
        if self.tag.as_deref().is_some_and(|tag| !tag.eq_ignore_ascii_case(subject.tag())) {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| subject.attribute("id") != Some(id)) {
            return false;
        }
        if !self.classes.iter().all(|class| subject.has_class(class)) {
            return false;
        }
        self.attributes.iter().all(|(name, expected)| match (subject.attribute(name), expected) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        })
    }
}

/// Parses a selector list. Returns `None` for anything outside the supported grammar.
pub(crate) fn parse(selector: &str) -> Option<Vec<Compound>> {
    selector.split(',').map(|part| parse_compound(part.trim())).collect()
}

fn parse_compound(input: &str) -> Option<Compound> {
    if input.is_empty() {
        return None;
    }

    let mut compound = Compound::default();
    let mut rest = input;

    if rest.starts_with(is_ident_char) {
        let (tag, tail) = take_ident(rest);
        compound.tag = Some(tag.to_owned());
        rest = tail;
    }

    while let Some(marker) = rest.chars().next() {
        rest = &rest[marker.len_utf8()..];
        match marker {
            '#' => {
                let (id, tail) = take_ident(rest);
                if id.is_empty() {
                    return None;
                }
                compound.id = Some(id.to_owned());
                rest = tail;
            },
            '.' => {
                let (class, tail) = take_ident(rest);
                if class.is_empty() {
                    return None;
                }
                compound.classes.push(class.to_owned());
                rest = tail;
            },
            '[' => {
                let end = rest.find(']')?;
                compound.attributes.push(parse_attribute(&rest[..end])?);
                rest = &rest[end + 1..];
            },
            _ => return None,
        }
    }

    Some(compound)
}

fn parse_attribute(body: &str) -> Option<(String, Option<String>)> {
    let Some((name, value)) = body.split_once('=') else {
        let name = body.trim();
        return (!name.is_empty() && name.chars().all(is_ident_char))
            .then(|| (name.to_owned(), None));
    };

    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return None;
    }

    let value = value.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)))
        .unwrap_or(value);

    Some((name.to_owned(), Some(unquoted.to_owned())))
}

fn take_ident(input: &str) -> (&str, &str) {
    let end = input.find(|c: char| !is_ident_char(c)).unwrap_or(input.len());
    input.split_at(end)
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selector_lists() {
        let list = parse(".reveal-fade, .reveal-left").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].classes, vec!["reveal-left".to_owned()]);
    }

    #[test]
    fn parses_tag_with_quoted_attribute() {
        let list = parse(r#"img[loading="lazy"]"#).unwrap();
        assert_eq!(list[0].tag.as_deref(), Some("img"));
        assert_eq!(list[0].attributes, vec![("loading".to_owned(), Some("lazy".to_owned()))]);
    }

    #[test]
    fn rejects_unsupported_grammar() {
        assert!(parse("#").is_none());
        assert!(parse("").is_none());
        assert!(parse("nav > a").is_none());
        assert!(parse("https://example.com").is_none());
    }
}
