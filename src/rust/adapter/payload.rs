use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::registry::mushroom::{HAS_RING, RING_TYPE};
use crate::registry::{FieldValue, SpecimenRecord};

/// `ring_type` code sent when the specimen has no ring.
pub const RING_TYPE_NONE: i64 = 4;

/// A single payload value as the classifier expects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayloadValue {
    Float(f64),
    /// Choice codes and 0/1 flags
    Int(i64),
}

impl Serialize for PayloadValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
        }
    }
}

/// The request body of one classification call, keyed by attribute name in
/// registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    entries: Vec<(&'static str, PayloadValue)>,
}

impl Payload {
    pub fn get(&self, name: &str) -> Option<PayloadValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, PayloadValue)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Maps a specimen onto the classifier's request schema.
///
/// Discrete attributes emit their code, flags emit 0/1 and continuous values
/// are clamped into their declared range. When `has_ring` is unchecked the
/// hidden `ring_type` field is ignored and [`RING_TYPE_NONE`] is sent instead.
pub fn build_payload(record: &SpecimenRecord<'_>) -> Payload {
    let has_ring = record.flag(HAS_RING);
    let entries = record
        .iter()
        .map(|(attr, value)| {
            let value = match value {
                _ if attr.name == RING_TYPE && !has_ring => PayloadValue::Int(RING_TYPE_NONE),
                FieldValue::Number(v) => PayloadValue::Float(attr.clamp(v)),
                FieldValue::Code(code) => PayloadValue::Int(code),
                FieldValue::Flag(flag) => PayloadValue::Int(i64::from(flag)),
            };
            (attr.name, value)
        })
        .collect();
    Payload { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldRegistry;

    #[test]
    fn test_default_payload_serialises_in_registry_order() {
        let record = SpecimenRecord::new(FieldRegistry::global());
        let json = serde_json::to_string(&build_payload(&record)).unwrap();
        assert_eq!(
            json,
            "{\"cap_diameter\":10.0,\"stem_height\":5.0,\"stem_width\":10.0,\"gill_spacing\":0,\
             \"does_bruise_bleed\":0,\"has_ring\":0,\"cap_shape\":0,\"cap_surface\":7,\
             \"stem_surface\":7,\"cap_color\":2,\"gill_color\":2,\"stem_color\":2,\
             \"veil_color\":2,\"spore_print_color\":2,\"gill_attachment\":1,\"stem_root\":1,\
             \"ring_type\":4,\"habitat\":0,\"season\":3}"
        );
    }

    #[test]
    fn test_flags_emit_integers() {
        let record = SpecimenRecord::new(FieldRegistry::global())
            .with("does_bruise_bleed", FieldValue::Flag(true))
            .unwrap();
        let payload = build_payload(&record);
        assert_eq!(payload.get("does_bruise_bleed"), Some(PayloadValue::Int(1)));
        assert_eq!(payload.get(HAS_RING), Some(PayloadValue::Int(0)));
    }
}
