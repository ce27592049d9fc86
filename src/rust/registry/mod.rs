use std::collections::HashSet;

use lazy_static::lazy_static;
use serde::Serialize;

mod attribute;
mod error;
pub mod mushroom;
mod specimen;

pub use attribute::{AttributeDefinition, AttributeKind, Choice, Domain};
pub use error::{RecordError, RegistryError};
pub use specimen::{FieldValue, SpecimenRecord};

lazy_static! {
    static ref MUSHROOM_REGISTRY: FieldRegistry = FieldRegistry::mushroom();
}

/// Whether a field gated by a flag is shown for the flag's current value.
///
/// `ring_type` is visible exactly when `has_ring` is checked; the rule keeps no
/// memory of earlier states.
pub fn visible_for(has_ring: bool) -> bool {
    has_ring
}

/// The fixed, ordered set of attributes the form exposes.
///
/// Attribute order is the payload order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRegistry {
    attributes: Vec<AttributeDefinition>,
}

impl FieldRegistry {
    /// Builds a registry from arbitrary definitions, checking every invariant.
    pub fn new(attributes: Vec<AttributeDefinition>) -> Result<Self, RegistryError> {
        let registry = Self { attributes };
        registry.validate()?;
        Ok(registry)
    }

    /// The nineteen mushroom specimen attributes.
    pub fn mushroom() -> Self {
        Self {
            attributes: mushroom::definitions(),
        }
    }

    /// Process-wide mushroom registry, built on first use.
    pub fn global() -> &'static FieldRegistry {
        &MUSHROOM_REGISTRY
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.attributes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes.iter().map(|a| a.name)
    }

    pub fn get(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    pub(crate) fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    /// Checks that names and codes are unique and every default lies in its domain.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut names = HashSet::new();
        for attr in &self.attributes {
            if !names.insert(attr.name) {
                return Err(RegistryError::DuplicateName(attr.name.to_string()));
            }

            match attr.domain {
                Domain::Continuous { min, max, default } => {
                    if min.is_nan() || max.is_nan() || min > max {
                        return Err(RegistryError::InvalidRange {
                            name: attr.name.to_string(),
                            min,
                            max,
                        });
                    }
                    if !(min..=max).contains(&default) {
                        return Err(RegistryError::DefaultOutOfRange {
                            name: attr.name.to_string(),
                            default,
                            min,
                            max,
                        });
                    }
                }
                Domain::Discrete { choices, default } => {
                    let mut codes = HashSet::new();
                    for choice in choices {
                        if !codes.insert(choice.code) {
                            return Err(RegistryError::DuplicateCode {
                                name: attr.name.to_string(),
                                code: choice.code,
                            });
                        }
                    }
                    if !codes.contains(&default) {
                        return Err(RegistryError::UnknownDefault {
                            name: attr.name.to_string(),
                            default,
                        });
                    }
                }
                Domain::Flag { .. } => {}
            }
        }

        for attr in &self.attributes {
            if let Some(controller) = attr.shown_when {
                let is_flag = self
                    .get(controller)
                    .map(|c| c.kind() == AttributeKind::Flag)
                    .unwrap_or(false);
                if !is_flag {
                    return Err(RegistryError::InvalidController {
                        name: attr.name.to_string(),
                        controller: controller.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
