//! Validation module
//!
//! Identifier checks applied when a query is bound to a table.

use std::fmt;

/// Validation errors for database identifiers
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name is empty
    Empty,
    /// Name is too long (MySQL limit is 64 characters)
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },
    /// Name contains control characters
    InvalidCharacters(String),
    /// Alias is not a bare identifier (contains a dot or whitespace)
    NotBareIdentifier(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => {
                write!(f, "Name cannot be empty")
            }
            ValidationError::TooLong {
                name,
                length,
                max_length,
            } => {
                write!(
                    f,
                    "Name '{}' is too long: {} characters (max {})",
                    name, length, max_length
                )
            }
            ValidationError::InvalidCharacters(name) => {
                write!(f, "Invalid characters in name '{}': control characters are not allowed", name.escape_debug())
            }
            ValidationError::NotBareIdentifier(name) => {
                write!(f, "Alias '{}' must be a bare identifier without dots or whitespace", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Identifier length limit
const MAX_LENGTH: usize = 64;

fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    let length = name.chars().count();
    if length > MAX_LENGTH {
        return Err(ValidationError::TooLong {
            name: name.to_string(),
            length,
            max_length: MAX_LENGTH,
        });
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidCharacters(name.to_string()));
    }

    Ok(())
}

/// A validated table name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedTableName(String);

impl ValidatedTableName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated table alias (bare identifier, no qualifier)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedAlias(String);

impl ValidatedAlias {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        validate_identifier(name)?;
        if name.contains('.') || name.chars().any(char::is_whitespace) {
            return Err(ValidationError::NotBareIdentifier(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(ValidatedTableName::new("dual").unwrap().as_str(), "dual");
        assert_eq!(ValidatedTableName::new("order items").unwrap().as_str(), "order items");
        assert_eq!(ValidatedAlias::new("a").unwrap().as_str(), "a");
    }

    #[test]
    fn test_empty_names() {
        assert_eq!(ValidatedTableName::new(""), Err(ValidationError::Empty));
        assert_eq!(ValidatedAlias::new("  "), Err(ValidationError::Empty));
    }

    #[test]
    fn test_too_long() {
        let name = "t".repeat(65);
        assert!(matches!(
            ValidatedTableName::new(&name),
            Err(ValidationError::TooLong { length: 65, max_length: 64, .. })
        ));
    }

    #[test]
    fn test_alias_must_be_bare() {
        assert!(matches!(
            ValidatedAlias::new("a.b"),
            Err(ValidationError::NotBareIdentifier(_))
        ));
        assert!(matches!(
            ValidatedAlias::new("a b"),
            Err(ValidationError::NotBareIdentifier(_))
        ));
    }

    #[test]
    fn test_control_characters() {
        assert!(matches!(
            ValidatedTableName::new("du\nal"),
            Err(ValidationError::InvalidCharacters(_))
        ));
    }
}
