//! Typed argument parsing for a single command line.
//!
//! Each declared parameter is resolved on its own by searching the line for
//! `"<variant> "`, so arguments may appear in any order. The search is textual, which has
//! two known consequences that callers rely on staying as they are:
//!
//! - a value that itself contains another parameter's `"<variant> "` can be picked up as
//!   that parameter;
//! - repeating the same variant (`-f a -f b`) is not reported; the first occurrence wins.
//!   Only two *different* variants of one parameter are rejected as ambiguous.

use crate::error::ParseError;
use crate::parameter::{ParameterDescriptor, Value};
use chrono::NaiveDateTime;

const QUOTE: char = '"';

/// Fully populated name → value mapping for one invocation.
///
/// Holds exactly one entry per declared parameter, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArguments {
    entries: Vec<(String, Value)>,
}

impl ParsedArguments {
    /// Value stored for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// `name` as text, if it is a string parameter.
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// `name` as a flag, if it is a bool parameter.
    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// `name` as an integer, if it is an integer parameter.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// `name` as a decimal, if it is a decimal parameter.
    pub fn decimal(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// `name` as a date-time, if it is a date-time parameter.
    pub fn date_time(&self, name: &str) -> Option<NaiveDateTime> {
        match self.get(name)? {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of entries, one per declared parameter.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no parameters were declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse `input` against already validated `parameters`.
///
/// Either every parameter gets a slot (parsed, default or zero value) or an error is
/// returned; a partially filled result is never produced.
pub fn parse_arguments(
    input: &str,
    parameters: &[ParameterDescriptor],
) -> Result<ParsedArguments, ParseError> {
    // trailing space so the last unquoted value has a terminator
    let line = format!("{input} ");
    let mut entries = Vec::with_capacity(parameters.len());

    for p in parameters {
        let value = match extract_value(&line, p)? {
            Some(text) => p.kind().parse(text).ok_or_else(|| ParseError::Conversion {
                name: p.name().to_string(),
                value: text.to_string(),
                expected: p.kind().to_string(),
            })?,
            None => p.initial_value(),
        };
        tracing::trace!(parameter = p.name(), %value, "resolved parameter");
        entries.push((p.name().to_string(), value));
    }

    Ok(ParsedArguments { entries })
}

/// Raw text supplied for `p`, or `None` when no variant of it appears on the line.
fn extract_value<'a>(line: &'a str, p: &ParameterDescriptor) -> Result<Option<&'a str>, ParseError> {
    let matches: Vec<(String, usize)> = p
        .effective_variants()
        .into_iter()
        .filter_map(|v| {
            let needle = format!("{v} ");
            line.find(&needle).map(|idx| (v, idx))
        })
        .collect();

    let (variant, idx) = match matches.as_slice() {
        [] => return Ok(None),
        [single] => single,
        _ => return Err(ParseError::Ambiguous(p.name().to_string())),
    };

    let start = idx + variant.len() + 1;
    let rest = line
        .get(start..)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ParseError::Unterminated(p.name().to_string()))?;

    let value = match rest.strip_prefix(QUOTE) {
        Some(quoted) => quoted.find(QUOTE).map(|end| &quoted[..end]),
        None => rest.find(' ').map(|end| &rest[..end]),
    };
    value
        .map(Some)
        .ok_or_else(|| ParseError::Unterminated(p.name().to_string()))
}
