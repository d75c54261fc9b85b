//! BibTeX citation grammar
//!
//! Accepts the usual BibTeX surface syntax: `@type{key, field = value, ...}`
//! or `@type(key, ...)`, with braced, quoted, numeric or macro values joined
//! by `#`. `@comment`, `@preamble` and `@string` blocks are parsed and
//! skipped. Text between entries is ignored, as BibTeX itself does,
//! including a bare `@` such as the one in an email address.

use crate::types::Verdict;
use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{map, opt},
    error::{Error as NomError, ErrorKind},
    multi::{many0, separated_list0},
    sequence::{delimited, preceded, separated_pair, terminated},
    IResult,
};
use thiserror::Error;

/// One parsed bibliography entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    /// Lowercased entry type (`article`, `misc`, ...)
    pub entry_type: String,
    pub key: String,
    /// Lowercased field names with their raw values, in source order
    pub fields: Vec<(String, String)>,
}

impl BibEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BibtexError {
    #[error("malformed entry starting on line {line}")]
    Malformed { line: usize },
}

/// Parse every entry in `text`
pub fn parse_bibtex(text: &str) -> Result<Vec<BibEntry>, BibtexError> {
    let mut entries = Vec::new();
    let mut rest = text;

    while let Some(at) = rest.find('@') {
        let candidate = &rest[at..];
        // An `@` not followed by `type{` or `type(` is plain text
        if header(candidate).is_err() {
            rest = &candidate[1..];
            continue;
        }
        match entry(candidate) {
            Ok((remaining, parsed)) => {
                entries.extend(parsed);
                rest = remaining;
            }
            Err(_) => {
                let offset = text.len() - candidate.len();
                let line = text[..offset].matches('\n').count() + 1;
                return Err(BibtexError::Malformed { line });
            }
        }
    }

    Ok(entries)
}

/// At least one well-formed entry and no malformed ones
pub fn validate_citation(value: &str) -> Verdict {
    const FAILURE: &str = "Citation must be in valid BibTeX format.";

    match parse_bibtex(value) {
        Ok(entries) if !entries.is_empty() => Verdict::pass("Citation is valid."),
        Ok(_) => Verdict::fail(FAILURE),
        Err(e) => Verdict::fail(format!("{} Error: {}", FAILURE, e)),
    }
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// `@type{` or `@type(`, yielding the type and the opening delimiter
fn header(input: &str) -> IResult<&str, (&str, char)> {
    let (input, _) = char('@')(input)?;
    let (input, kind) = ws(take_while1(|c: char| c.is_ascii_alphabetic()))(input)?;
    let (input, open) = alt((char('{'), char('(')))(input)?;
    Ok((input, (kind, open)))
}

fn entry(input: &str) -> IResult<&str, Option<BibEntry>> {
    let (input, (kind, open)) = header(input)?;
    let close = if open == '{' { '}' } else { ')' };
    let kind = kind.to_ascii_lowercase();

    match kind.as_str() {
        "comment" => {
            let (input, _) = if open == '{' {
                balanced(input)?
            } else {
                take_till(|c: char| c == ')')(input)?
            };
            let (input, _) = char(close)(input)?;
            Ok((input, None))
        }
        "preamble" => {
            let (input, _) = ws(value)(input)?;
            let (input, _) = char(close)(input)?;
            Ok((input, None))
        }
        "string" => {
            let (input, _) = ws(field)(input)?;
            let (input, _) = char(close)(input)?;
            Ok((input, None))
        }
        _ => {
            let (input, key) = ws(citation_key)(input)?;
            let (input, fields) = opt(preceded(char(','), field_list))(input)?;
            let (input, _) = multispace0(input)?;
            let (input, _) = char(close)(input)?;
            Ok((
                input,
                Some(BibEntry {
                    entry_type: kind,
                    key: key.to_string(),
                    fields: fields.unwrap_or_default(),
                }),
            ))
        }
    }
}

fn citation_key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| {
        !c.is_whitespace() && !matches!(c, ',' | '{' | '}' | '(' | ')' | '=' | '"' | '#')
    })(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.' | '+' | '/'))(
        input,
    )
}

fn field_list(input: &str) -> IResult<&str, Vec<(String, String)>> {
    terminated(separated_list0(char(','), field), opt(ws(char(','))))(input)
}

fn field(input: &str) -> IResult<&str, (String, String)> {
    map(
        separated_pair(ws(identifier), char('='), ws(value)),
        |(name, value)| (name.to_ascii_lowercase(), value),
    )(input)
}

/// Pieces joined with `#`
fn value(input: &str) -> IResult<&str, String> {
    let (input, first) = piece(input)?;
    let (input, rest) = many0(preceded(ws(char('#')), piece))(input)?;

    let mut joined = first.to_string();
    for part in rest {
        joined.push_str(part);
    }
    Ok((input, joined))
}

fn piece(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('{'), balanced, char('}')),
        delimited(char('"'), quoted, char('"')),
        digit1,
        identifier,
    ))(input)
}

/// Text up to (not including) the `}` closing the current brace level
fn balanced(input: &str) -> IResult<&str, &str> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => return Ok((&input[i..], &input[..i])),
            '}' => depth -= 1,
            _ => {}
        }
    }
    Err(nom::Err::Error(NomError::new(input, ErrorKind::TakeUntil)))
}

/// Text up to a `"` that is not nested inside braces
fn quoted(input: &str) -> IResult<&str, &str> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => break,
            '}' => depth -= 1,
            '"' if depth == 0 => return Ok((&input[i..], &input[..i])),
            _ => {}
        }
    }
    Err(nom::Err::Error(NomError::new(input, ErrorKind::TakeUntil)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_entry() {
        let entries = parse_bibtex("@article{key, author = {Author}, title = {Title}}").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, "article");
        assert_eq!(entries[0].key, "key");
        assert_eq!(entries[0].field("author"), Some("Author"));
        assert_eq!(entries[0].field("title"), Some("Title"));
    }

    #[test]
    fn test_value_forms() {
        let text = r#"
            @string{hf = "Hugging Face"}
            @Misc(squad2018,
                title = "The {SQuAD} Dataset",
                publisher = hf # " Hub",
                year = 2018,
                month = jun,
                note = {Nested {braces} are fine},
            )
        "#;
        let entries = parse_bibtex(text).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.entry_type, "misc");
        assert_eq!(entry.field("title"), Some("The {SQuAD} Dataset"));
        assert_eq!(entry.field("publisher"), Some("hf Hub"));
        assert_eq!(entry.field("year"), Some("2018"));
        assert_eq!(entry.field("note"), Some("Nested {braces} are fine"));
    }

    #[test]
    fn test_key_only_entry() {
        let entries = parse_bibtex("@misc{onlykey}").unwrap();
        assert_eq!(entries[0].key, "onlykey");
        assert!(entries[0].fields.is_empty());
    }

    #[test]
    fn test_comment_and_junk_skipped() {
        let text = "Some preface.\n@comment{ignore {me}}\n@book{b1, title={T}}\ntrailing";
        let entries = parse_bibtex(text).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "b1");
    }

    #[test]
    fn test_stray_at_sign_in_text_ignored() {
        let text = "@misc{k, title={T}}\nContact: ada@example.org";
        let entries = parse_bibtex(text).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "k");
        assert_eq!(validate_citation(text), Verdict::pass("Citation is valid."));

        let leading = "Mail ada@example.org or @ us.\n@book{b1, title={T}}";
        assert_eq!(parse_bibtex(leading).unwrap()[0].key, "b1");

        // Only an address, no entry at all
        assert_eq!(parse_bibtex("ada@example.org").unwrap(), vec![]);
        assert_eq!(
            validate_citation("ada@example.org"),
            Verdict::fail("Citation must be in valid BibTeX format.")
        );
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            validate_citation("@article{key, author = {Author}, title = {Title}}"),
            Verdict::pass("Citation is valid.")
        );
        assert_eq!(
            validate_citation(""),
            Verdict::fail("Citation must be in valid BibTeX format.")
        );
        assert_eq!(
            validate_citation("invalid_bibtex"),
            Verdict::fail("Citation must be in valid BibTeX format.")
        );
    }

    #[test]
    fn test_malformed_entry_reports_line() {
        let verdict = validate_citation("@article{k1, title={A}}\n@article{k2, title={unclosed}");
        assert!(!verdict.ok);
        assert_eq!(
            verdict.message,
            "Citation must be in valid BibTeX format. Error: malformed entry starting on line 2"
        );

        assert!(!validate_citation("@article{key author={A}}").ok);
        assert!(!validate_citation("@article{, title={A}}").ok);
    }
}
