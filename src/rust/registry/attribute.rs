use serde::Serialize;

use super::error::RecordError;
use super::specimen::FieldValue;

/// One (display label, integer code) pair of a discrete attribute.
///
/// The label is what the form shows; the code is what the classifier receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: &'static str,
    pub code: i64,
}

impl Choice {
    pub const fn new(label: &'static str, code: i64) -> Self {
        Self { label, code }
    }
}

/// The valid values of an attribute together with its default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Domain {
    Continuous { min: f64, max: f64, default: f64 },
    Discrete { choices: &'static [Choice], default: i64 },
    Flag { default: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Continuous,
    Discrete,
    Flag,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Continuous => "numeric",
            Self::Discrete => "choice code",
            Self::Flag => "boolean",
        }
    }
}

/// Declares a single form attribute: its payload key, display label and domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDefinition {
    /// Payload key, unique within a registry
    pub name: &'static str,
    /// Text shown next to the input
    pub label: &'static str,
    #[serde(flatten)]
    pub domain: Domain,
    /// Name of the flag attribute that must be set for this one to be shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shown_when: Option<&'static str>,
}

impl AttributeDefinition {
    pub fn continuous(name: &'static str, label: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self {
            name,
            label,
            domain: Domain::Continuous { min, max, default },
            shown_when: None,
        }
    }

    pub fn discrete(name: &'static str, label: &'static str, choices: &'static [Choice], default: i64) -> Self {
        Self {
            name,
            label,
            domain: Domain::Discrete { choices, default },
            shown_when: None,
        }
    }

    pub fn flag(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            domain: Domain::Flag { default: false },
            shown_when: None,
        }
    }

    /// Only show this attribute while the named flag is checked.
    pub fn shown_when(mut self, flag: &'static str) -> Self {
        self.shown_when = Some(flag);
        self
    }

    pub fn kind(&self) -> AttributeKind {
        match self.domain {
            Domain::Continuous { .. } => AttributeKind::Continuous,
            Domain::Discrete { .. } => AttributeKind::Discrete,
            Domain::Flag { .. } => AttributeKind::Flag,
        }
    }

    pub fn default_value(&self) -> FieldValue {
        match self.domain {
            Domain::Continuous { default, .. } => FieldValue::Number(default),
            Domain::Discrete { default, .. } => FieldValue::Code(default),
            Domain::Flag { default } => FieldValue::Flag(default),
        }
    }

    /// Clamps `value` into `[min, max]`. Non-continuous attributes return it unchanged.
    pub fn clamp(&self, value: f64) -> f64 {
        match self.domain {
            Domain::Continuous { min, max, .. } => value.clamp(min, max),
            _ => value,
        }
    }

    pub fn choices(&self) -> &'static [Choice] {
        match self.domain {
            Domain::Discrete { choices, .. } => choices,
            _ => &[],
        }
    }

    pub fn label_for(&self, code: i64) -> Option<&'static str> {
        self.choices().iter().find(|c| c.code == code).map(|c| c.label)
    }

    /// Looks a choice up by its display label, ignoring ASCII case.
    pub fn code_for(&self, label: &str) -> Option<i64> {
        let label = label.trim();
        self.choices()
            .iter()
            .find(|c| c.label.eq_ignore_ascii_case(label))
            .map(|c| c.code)
    }

    /// Normalises a value for this attribute.
    ///
    /// Continuous values are clamped into range, discrete codes must be one of
    /// the declared choices, and the value kind must match the attribute kind.
    pub fn accept(&self, value: FieldValue) -> Result<FieldValue, RecordError> {
        match (self.kind(), value) {
            (AttributeKind::Continuous, FieldValue::Number(v)) => {
                if v.is_nan() {
                    return Err(RecordError::InvalidValue {
                        name: self.name.to_string(),
                        value: v.to_string(),
                    });
                }
                Ok(FieldValue::Number(self.clamp(v)))
            }
            (AttributeKind::Continuous, FieldValue::Code(code)) => {
                Ok(FieldValue::Number(self.clamp(code as f64)))
            }
            (AttributeKind::Discrete, FieldValue::Code(code)) => {
                if self.label_for(code).is_some() {
                    Ok(value)
                } else {
                    Err(RecordError::UnknownCode {
                        name: self.name.to_string(),
                        code,
                    })
                }
            }
            (AttributeKind::Flag, FieldValue::Flag(_)) => Ok(value),
            (kind, _) => Err(RecordError::KindMismatch {
                name: self.name.to_string(),
                expected: kind.as_str(),
            }),
        }
    }
}
