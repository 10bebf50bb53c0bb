use thiserror::Error;

pub const MIN_IDENTIFIER_LEN: usize = 3;

/// Why an identifier was refused before any lookup took place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Please enter a Unit Holder ID")]
    Empty,
    #[error("Unit Holder ID seems too short (currently {0} characters)")]
    TooShort(usize),
}

/// Trim and check a user-supplied identifier.
pub fn validate_identifier(input: &str) -> Result<String, IdentifierError> {
    let clean = input.trim();
    if clean.is_empty() {
        return Err(IdentifierError::Empty);
    }
    let len = clean.chars().count();
    if len < MIN_IDENTIFIER_LEN {
        return Err(IdentifierError::TooShort(len));
    }
    Ok(clean.to_string())
}
