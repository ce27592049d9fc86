/// Invariant violations found while validating a [`FieldRegistry`](super::FieldRegistry).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("Duplicate attribute name: {0}")]
    DuplicateName(String),
    #[error("Duplicate code {code} in attribute {name}")]
    DuplicateCode { name: String, code: i64 },
    #[error("Attribute {name} has an empty or inverted range [{min}, {max}]")]
    InvalidRange { name: String, min: f64, max: f64 },
    #[error("Default {default} of {name} lies outside [{min}, {max}]")]
    DefaultOutOfRange {
        name: String,
        default: f64,
        min: f64,
        max: f64,
    },
    #[error("Default code {default} of {name} is not one of its choices")]
    UnknownDefault { name: String, default: i64 },
    #[error("Attribute {name} is shown when {controller}, which is not a flag attribute")]
    InvalidController { name: String, controller: String },
}

/// Errors raised while filling a [`SpecimenRecord`](super::SpecimenRecord) from user input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),
    #[error("Attribute {name} expects a {expected} value")]
    KindMismatch { name: String, expected: &'static str },
    #[error("Code {code} is not a valid choice for {name}")]
    UnknownCode { name: String, code: i64 },
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}
