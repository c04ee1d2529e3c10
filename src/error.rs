use thiserror::Error;

/// A malformed parameter or action declaration.
///
/// Raised only while building an [`ActionRegistry`](crate::ActionRegistry); the offending
/// action is dropped and the rest of the registry is built normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("must provide parameter name")]
    EmptyName,

    #[error("parameter name must only contain letters and digits: '{0}'")]
    InvalidNameCharacters(String),

    #[error("parameter name must start with letter: '{0}'")]
    NameMustStartWithLetter(String),

    #[error("parameter variant must start with -: '{0}'")]
    VariantMissingDash(String),

    #[error("parameter variant starting with - must be a single letter: '{0}'")]
    InvalidShortVariant(String),

    #[error("parameter variant starting with -- must be more than one letter: '{0}'")]
    InvalidLongVariant(String),

    #[error("duplicate parameter name '{0}'")]
    DuplicateParameterName(String),

    #[error("variant '{variant}' is declared by both '{first}' and '{second}'")]
    DuplicateVariant {
        variant: String,
        first: String,
        second: String,
    },

    #[error("action must declare at least one trigger")]
    NoTriggers,

    #[error("invalid trigger '{0}': triggers must be non-empty and contain no whitespace")]
    InvalidTrigger(String),

    #[error("default value of '{name}' cannot be converted to {expected}")]
    DefaultTypeMismatch { name: String, expected: String },
}

/// Malformed or ambiguous argument text, reported while parsing one command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("ambiguous: multiple variants of {0} supplied")]
    Ambiguous(String),

    #[error("unterminated value for {0}")]
    Unterminated(String),

    #[error("cannot convert value for {name}: '{value}' is not a valid {expected}")]
    Conversion {
        name: String,
        value: String,
        expected: String,
    },
}

/// Anything that can go wrong while running one resolved command.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages_name_the_parameter() {
        assert_eq!(
            ParseError::Ambiguous("file".into()).to_string(),
            "ambiguous: multiple variants of file supplied"
        );
        assert_eq!(
            ParseError::Unterminated("file".into()).to_string(),
            "unterminated value for file"
        );
    }

    #[test]
    fn test_invocation_error_is_transparent() {
        let err: InvocationError = ParseError::Unterminated("x".into()).into();
        assert_eq!(err.to_string(), "unterminated value for x");

        let err: InvocationError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.to_string(), "disk full");
    }
}
