//! Parameter declarations and their registration-time validation.
//!
//! A [`ParameterDescriptor`] is plain data: a name, the textual variants that introduce it on
//! a command line (e.g. `-f` / `--file`), the [`ValueKind`] it converts to and an optional
//! default. Nothing is checked when a descriptor is built; [`validate_parameters`] runs all
//! checks at once when an action is registered.

use crate::error::ConfigurationError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

static SHORT_VARIANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\p{L}$").expect("short variant pattern"));

/// `--` plus at least two characters.
const MIN_LONG_VARIANT_LEN: usize = 4;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Target type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueKind {
    #[default]
    String,
    Bool,
    Integer,
    Decimal,
    DateTime,
}

impl ValueKind {
    /// The value used when a parameter is omitted and declares no default.
    pub fn zero(self) -> Value {
        match self {
            ValueKind::String => Value::String(String::new()),
            ValueKind::Bool => Value::Bool(false),
            ValueKind::Integer => Value::Integer(0),
            ValueKind::Decimal => Value::Decimal(0.0),
            // NaiveDateTime defaults to the Unix epoch
            ValueKind::DateTime => Value::DateTime(NaiveDateTime::default()),
        }
    }

    /// Convert command-line text into a value of this kind.
    ///
    /// Returns `None` when the text is not a valid representation.
    pub fn parse(self, text: &str) -> Option<Value> {
        match self {
            ValueKind::String => Some(Value::String(text.to_string())),
            ValueKind::Bool => {
                let t = text.trim();
                if t.eq_ignore_ascii_case("true") {
                    Some(Value::Bool(true))
                } else if t.eq_ignore_ascii_case("false") {
                    Some(Value::Bool(false))
                } else {
                    None
                }
            }
            ValueKind::Integer => text.trim().parse().ok().map(Value::Integer),
            ValueKind::Decimal => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite())
                .map(Value::Decimal),
            ValueKind::DateTime => parse_date_time(text.trim()).map(Value::DateTime),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Decimal => "decimal",
            ValueKind::DateTime => "date-time",
        };
        f.write_str(name)
    }
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// A dynamically typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Integer(i64),
    Decimal(f64),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::DateTime(_) => ValueKind::DateTime,
        }
    }

    /// Convert this value to `kind`, the way a declared default is adapted to its parameter.
    ///
    /// Text is parsed, integers widen to decimals and anything renders to a string.
    pub fn coerce(self, kind: ValueKind) -> Option<Value> {
        if self.kind() == kind {
            return Some(self);
        }
        match (self, kind) {
            (Value::Integer(i), ValueKind::Decimal) => Some(Value::Decimal(i as f64)),
            (Value::String(s), kind) => kind.parse(&s),
            (other, ValueKind::String) => Some(Value::String(other.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Decimal(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

/// Declares one named argument of an action.
///
/// ```
/// use console_actions::{ParameterDescriptor, ValueKind};
///
/// let records = ParameterDescriptor::new("recordsToRead")
///     .variants(["-r", "--read"])
///     .value_type(ValueKind::Integer)
///     .default_value(1000);
/// assert_eq!(records.effective_variants(), vec!["-r", "--read"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    name: String,
    variants: Vec<String>,
    kind: ValueKind,
    default: Option<Value>,
}

impl ParameterDescriptor {
    /// A string parameter with the default variants `-<first letter>` and `--<name>`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
            kind: ValueKind::String,
            default: None,
        }
    }

    /// Replace the default variants with an explicit list.
    pub fn variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = variants.into_iter().map(Into::into).collect();
        self
    }

    /// Type the supplied text converts to.
    pub fn value_type(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Value used when the parameter is omitted.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Key in [`ParsedArguments`](crate::ParsedArguments).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared value type.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Declared default, as given.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Variants in declaration order with duplicates removed, falling back to
    /// `-<first letter>` and `--<name>` when none were declared.
    pub fn effective_variants(&self) -> Vec<String> {
        if self.variants.is_empty() {
            return match self.name.chars().next() {
                Some(first) => vec![format!("-{first}"), format!("--{}", self.name)],
                None => Vec::new(),
            };
        }
        let mut seen = HashSet::new();
        self.variants
            .iter()
            .filter(|v| seen.insert(v.as_str()))
            .cloned()
            .collect()
    }

    /// Value of the result slot before the input line is consulted.
    pub fn initial_value(&self) -> Value {
        self.default
            .clone()
            .and_then(|d| d.coerce(self.kind))
            .unwrap_or_else(|| self.kind.zero())
    }

    /// Check name syntax, variant syntax and that the default fits the declared type.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_name(&self.name)?;
        for variant in self.effective_variants() {
            validate_variant(&variant)?;
        }
        if let Some(default) = &self.default {
            if default.clone().coerce(self.kind).is_none() {
                return Err(ConfigurationError::DefaultTypeMismatch {
                    name: self.name.clone(),
                    expected: self.kind.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), ConfigurationError> {
    if name.trim().is_empty() {
        return Err(ConfigurationError::EmptyName);
    }
    if name.chars().any(|c| !c.is_alphanumeric()) {
        return Err(ConfigurationError::InvalidNameCharacters(name.to_string()));
    }
    if !name.chars().next().is_some_and(char::is_alphabetic) {
        return Err(ConfigurationError::NameMustStartWithLetter(name.to_string()));
    }
    Ok(())
}

fn validate_variant(variant: &str) -> Result<(), ConfigurationError> {
    if !variant.starts_with('-') {
        return Err(ConfigurationError::VariantMissingDash(variant.to_string()));
    }
    if variant.starts_with("--") {
        if variant.chars().count() < MIN_LONG_VARIANT_LEN {
            return Err(ConfigurationError::InvalidLongVariant(variant.to_string()));
        }
    } else if !SHORT_VARIANT.is_match(variant) {
        return Err(ConfigurationError::InvalidShortVariant(variant.to_string()));
    }
    Ok(())
}

/// Validate the full parameter set of one action.
///
/// Every descriptor must be valid on its own, names must be pairwise distinct and no
/// variant may be claimed by two parameters.
pub fn validate_parameters(parameters: &[ParameterDescriptor]) -> Result<(), ConfigurationError> {
    let mut names = HashSet::new();
    let mut owners: HashMap<String, &str> = HashMap::new();

    for p in parameters {
        p.validate()?;
        if !names.insert(p.name()) {
            return Err(ConfigurationError::DuplicateParameterName(p.name.clone()));
        }
        for variant in p.effective_variants() {
            if let Some(first) = owners.get(&variant) {
                return Err(ConfigurationError::DuplicateVariant {
                    variant,
                    first: first.to_string(),
                    second: p.name.clone(),
                });
            }
            owners.insert(variant, p.name());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_variants_from_name() {
        let p = ParameterDescriptor::new("file");
        assert_eq!(p.effective_variants(), vec!["-f", "--file"]);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_valid_names_accepted() {
        for name in ["file", "keepOpen", "recordsToRead", "a1b2", "Größe"] {
            let p = ParameterDescriptor::new(name).variants(["-x", "--xx"]);
            assert!(p.validate().is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_invalid_names_rejected() {
        let cases = [
            ("", ConfigurationError::EmptyName),
            ("   ", ConfigurationError::EmptyName),
            ("file-name", ConfigurationError::InvalidNameCharacters("file-name".into())),
            ("my file", ConfigurationError::InvalidNameCharacters("my file".into())),
            ("1recordsToRead", ConfigurationError::NameMustStartWithLetter("1recordsToRead".into())),
        ];
        for (name, expected) in cases {
            let p = ParameterDescriptor::new(name).variants(["-x", "--xx"]);
            assert_eq!(p.validate(), Err(expected), "name {name:?}");
        }
    }

    #[test]
    fn test_long_variant_allows_any_characters() {
        for v in ["--dry-run", "--max_mem", "--v2"] {
            assert!(validate_variant(v).is_ok(), "{v} should be accepted");
        }
        let p = ParameterDescriptor::new("dryRun").variants(["-d", "--dry-run"]);
        assert!(validate_parameters(&[p]).is_ok());
    }

    #[test]
    fn test_variant_syntax() {
        let ok = ["-f", "--file", "--ab", "--file2"];
        for v in ok {
            assert!(validate_variant(v).is_ok(), "{v} should be accepted");
        }

        assert_eq!(
            validate_variant("f"),
            Err(ConfigurationError::VariantMissingDash("f".into()))
        );
        assert_eq!(
            validate_variant("-fi"),
            Err(ConfigurationError::InvalidShortVariant("-fi".into()))
        );
        assert_eq!(
            validate_variant("-"),
            Err(ConfigurationError::InvalidShortVariant("-".into()))
        );
        assert_eq!(
            validate_variant("-1"),
            Err(ConfigurationError::InvalidShortVariant("-1".into()))
        );
        assert_eq!(
            validate_variant("--f"),
            Err(ConfigurationError::InvalidLongVariant("--f".into()))
        );
        assert_eq!(
            validate_variant("--"),
            Err(ConfigurationError::InvalidLongVariant("--".into()))
        );
    }

    #[test]
    fn test_single_letter_name_needs_explicit_variants() {
        // the default long variant would be "--x"
        let p = ParameterDescriptor::new("x");
        assert_eq!(
            p.validate(),
            Err(ConfigurationError::InvalidLongVariant("--x".into()))
        );
        assert!(ParameterDescriptor::new("x").variants(["-x"]).validate().is_ok());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let params = vec![
            ParameterDescriptor::new("file"),
            ParameterDescriptor::new("file")
                .variants(["-g", "--goal"])
                .value_type(ValueKind::Bool)
                .default_value(true),
        ];
        assert_eq!(
            validate_parameters(&params),
            Err(ConfigurationError::DuplicateParameterName("file".into()))
        );
    }

    #[test]
    fn test_overlapping_default_variants_rejected() {
        let params = vec![
            ParameterDescriptor::new("recordsToRead"),
            ParameterDescriptor::new("recordsToWrite"),
        ];
        assert_eq!(
            validate_parameters(&params),
            Err(ConfigurationError::DuplicateVariant {
                variant: "-r".into(),
                first: "recordsToRead".into(),
                second: "recordsToWrite".into(),
            })
        );

        let fixed = vec![
            ParameterDescriptor::new("recordsToRead").variants(["-r", "--read"]),
            ParameterDescriptor::new("recordsToWrite").variants(["-w", "--write"]),
        ];
        assert!(validate_parameters(&fixed).is_ok());
    }

    #[test]
    fn test_repeated_variant_within_one_parameter_is_collapsed() {
        let p = ParameterDescriptor::new("file").variants(["-f", "--file", "-f"]);
        assert_eq!(p.effective_variants(), vec!["-f", "--file"]);
        assert!(validate_parameters(&[p]).is_ok());
    }

    #[test]
    fn test_default_must_fit_type() {
        let p = ParameterDescriptor::new("count")
            .value_type(ValueKind::Integer)
            .default_value(true);
        assert_eq!(
            p.validate(),
            Err(ConfigurationError::DefaultTypeMismatch {
                name: "count".into(),
                expected: "integer".into(),
            })
        );

        let p = ParameterDescriptor::new("maxMemory")
            .value_type(ValueKind::Decimal)
            .default_value(2);
        assert!(p.validate().is_ok());
        assert_eq!(p.initial_value(), Value::Decimal(2.0));

        let p = ParameterDescriptor::new("limit")
            .value_type(ValueKind::Integer)
            .default_value("42");
        assert_eq!(p.initial_value(), Value::Integer(42));
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(ParameterDescriptor::new("a").initial_value(), Value::String(String::new()));
        assert_eq!(ValueKind::Bool.zero(), Value::Bool(false));
        assert_eq!(ValueKind::Integer.zero(), Value::Integer(0));
        assert_eq!(ValueKind::Decimal.zero(), Value::Decimal(0.0));
        assert_eq!(ValueKind::DateTime.zero().to_string(), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_text_conversion() {
        assert_eq!(ValueKind::Bool.parse("TRUE"), Some(Value::Bool(true)));
        assert_eq!(ValueKind::Bool.parse("False"), Some(Value::Bool(false)));
        assert_eq!(ValueKind::Bool.parse("yes"), None);
        assert_eq!(ValueKind::Integer.parse("-17"), Some(Value::Integer(-17)));
        assert_eq!(ValueKind::Integer.parse("1.5"), None);
        assert_eq!(ValueKind::Decimal.parse("1.5"), Some(Value::Decimal(1.5)));
        assert_eq!(ValueKind::Decimal.parse("abc"), None);
        assert_eq!(ValueKind::Decimal.parse("NaN"), None);

        let expected = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 30, 0))
            .unwrap();
        for text in [
            "2024-03-09 14:30:00",
            "2024-03-09T14:30:00",
            "2024-03-09 14:30",
            "03/09/2024 14:30:00",
            "2024-03-09T14:30:00+02:00",
        ] {
            assert_eq!(
                ValueKind::DateTime.parse(text),
                Some(Value::DateTime(expected)),
                "{text}"
            );
        }
        let midnight = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        assert_eq!(ValueKind::DateTime.parse("09.03.2024"), Some(Value::DateTime(midnight)));
        assert_eq!(ValueKind::DateTime.parse("not a date"), None);
    }
}
