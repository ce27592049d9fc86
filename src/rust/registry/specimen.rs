use std::collections::HashMap;

use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

use super::attribute::{AttributeDefinition, AttributeKind};
use super::error::RecordError;
use super::{visible_for, FieldRegistry};

/// The current value of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Continuous measurement
    Number(f64),
    /// Integer code of a discrete choice, never its label
    Code(i64),
    /// Checkbox state
    Flag(bool),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_code(&self) -> Option<i64> {
        match self {
            Self::Code(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

/// One value per registry attribute, filled fresh for every submission.
///
/// Values are stored in registry order and always satisfy their attribute's
/// domain: continuous values are clamped on the way in and discrete codes are
/// checked against the declared choices.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecimenRecord<'r> {
    registry: &'r FieldRegistry,
    values: Vec<FieldValue>,
}

impl<'r> SpecimenRecord<'r> {
    /// Creates a record holding every attribute's default.
    pub fn new(registry: &'r FieldRegistry) -> Self {
        Self {
            registry,
            values: registry.iter().map(|a| a.default_value()).collect(),
        }
    }

    pub fn registry(&self) -> &'r FieldRegistry {
        self.registry
    }

    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), RecordError> {
        let index = self
            .registry
            .position(name)
            .ok_or_else(|| RecordError::UnknownAttribute(name.to_string()))?;
        self.values[index] = self.registry.attributes()[index].accept(value)?;
        Ok(())
    }

    /// Fluent variant of [`set`](Self::set).
    ///
    /// # Example
    /// ```
    /// use mushroom_form::{FieldRegistry, FieldValue, SpecimenRecord};
    ///
    /// let record = SpecimenRecord::new(FieldRegistry::global())
    ///     .with("cap_diameter", FieldValue::Number(500.0))?
    ///     .with("has_ring", FieldValue::Flag(true))?;
    /// assert_eq!(record.get("cap_diameter"), Some(FieldValue::Number(62.34)));
    /// # Ok::<(), mushroom_form::RecordError>(())
    /// ```
    pub fn with(mut self, name: &str, value: FieldValue) -> Result<Self, RecordError> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.registry.position(name).map(|i| self.values[i])
    }

    /// State of a flag attribute; anything that is not a checked flag reads as false.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(FieldValue::Flag(true)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'r AttributeDefinition, FieldValue)> + '_ {
        self.registry
            .attributes()
            .iter()
            .zip(self.values.iter().copied())
    }

    /// Applies the visibility rule to an attribute gated by a flag.
    pub fn is_visible(&self, attr: &AttributeDefinition) -> bool {
        attr.shown_when
            .map(|flag| visible_for(self.flag(flag)))
            .unwrap_or(true)
    }

    /// Reads an url-encoded form submission.
    ///
    /// Unchecked checkboxes are absent from a submission and read as false.
    /// Missing or empty non-flag fields keep their default. Unknown keys are
    /// ignored. Discrete fields accept either the code or the display label.
    /// Attributes hidden by their controlling flag keep their default whatever
    /// the submission holds for them.
    pub fn from_form(registry: &'r FieldRegistry, fields: &HashMap<String, String>) -> Result<Self, RecordError> {
        let mut record = Self::new(registry);
        for attr in flags_first(registry) {
            if !record.is_visible(attr) {
                continue;
            }
            if let Some(value) = form_value(attr, fields.get(attr.name))? {
                record.set(attr.name, value)?;
            }
        }
        Ok(record)
    }

    /// Like [`from_form`](Self::from_form), but a field that cannot be read
    /// keeps its default instead of failing the whole submission. Used to
    /// re-render a rejected form with what the user entered.
    pub fn from_form_lossy(registry: &'r FieldRegistry, fields: &HashMap<String, String>) -> Self {
        let mut record = Self::new(registry);
        for attr in flags_first(registry) {
            if !record.is_visible(attr) {
                continue;
            }
            let value = form_value(attr, fields.get(attr.name)).and_then(|value| match value {
                Some(value) => record.set(attr.name, value),
                None => Ok(()),
            });
            if let Err(e) = value {
                debug!("Keeping default for {}: {}", attr.name, e);
            }
        }
        record
    }

    /// Reads a JSON object of attribute values. Absent or `null` entries keep
    /// their default; unknown keys are rejected. Values for attributes hidden
    /// by their controlling flag are ignored.
    pub fn from_json(registry: &'r FieldRegistry, object: &Map<String, Value>) -> Result<Self, RecordError> {
        if let Some(name) = object.keys().find(|name| registry.get(name).is_none()) {
            return Err(RecordError::UnknownAttribute(name.clone()));
        }

        let mut record = Self::new(registry);
        for attr in flags_first(registry) {
            let value = match object.get(attr.name) {
                None | Some(Value::Null) => continue,
                Some(value) => value,
            };
            if !record.is_visible(attr) {
                continue;
            }
            record.set(attr.name, json_value(attr, value)?)?;
        }
        Ok(record)
    }
}

/// Registry attributes with the flags moved to the front, so that every
/// controlling flag is read before the attributes it hides.
fn flags_first(registry: &FieldRegistry) -> impl Iterator<Item = &AttributeDefinition> {
    let (flags, others): (Vec<_>, Vec<_>) = registry.iter().partition(|a| a.kind() == AttributeKind::Flag);
    flags.into_iter().chain(others)
}

fn form_value(attr: &AttributeDefinition, raw: Option<&String>) -> Result<Option<FieldValue>, RecordError> {
    let value = match (attr.kind(), raw.map(|s| s.trim())) {
        (AttributeKind::Flag, None) => FieldValue::Flag(false),
        (AttributeKind::Flag, Some(raw)) => FieldValue::Flag(parse_checkbox(raw).ok_or_else(|| invalid(attr, raw))?),
        (_, None) | (_, Some("")) => return Ok(None),
        (AttributeKind::Continuous, Some(raw)) => {
            FieldValue::Number(raw.parse::<f64>().map_err(|_| invalid(attr, raw))?)
        }
        (AttributeKind::Discrete, Some(raw)) => {
            let code = raw
                .parse::<i64>()
                .ok()
                .or_else(|| attr.code_for(raw))
                .ok_or_else(|| invalid(attr, raw))?;
            FieldValue::Code(code)
        }
    };
    Ok(Some(value))
}

fn json_value(attr: &AttributeDefinition, value: &Value) -> Result<FieldValue, RecordError> {
    let field = match (attr.kind(), value) {
        (AttributeKind::Continuous, Value::Number(n)) => {
            FieldValue::Number(n.as_f64().ok_or_else(|| invalid(attr, &n.to_string()))?)
        }
        (AttributeKind::Discrete, Value::Number(n)) => {
            FieldValue::Code(n.as_i64().ok_or_else(|| invalid(attr, &n.to_string()))?)
        }
        (AttributeKind::Discrete, Value::String(label)) => {
            FieldValue::Code(attr.code_for(label).ok_or_else(|| invalid(attr, label))?)
        }
        (AttributeKind::Flag, Value::Bool(b)) => FieldValue::Flag(*b),
        (AttributeKind::Flag, Value::Number(n)) => match n.as_i64() {
            Some(0) => FieldValue::Flag(false),
            Some(1) => FieldValue::Flag(true),
            _ => return Err(invalid(attr, &n.to_string())),
        },
        (kind, _) => {
            return Err(RecordError::KindMismatch {
                name: attr.name.to_string(),
                expected: kind.as_str(),
            })
        }
    };
    Ok(field)
}

fn parse_checkbox(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn invalid(attr: &AttributeDefinition, raw: &str) -> RecordError {
    RecordError::InvalidValue {
        name: attr.name.to_string(),
        value: raw.to_string(),
    }
}
