//! Optional typed attributes attached to nodes.
//!
//! Every type lists the features it may carry. A node's [`FeatureValueBuffer`]
//! holds one slot per listed feature, each of which may be empty. Readers
//! resolve the slot of their feature per type once, from the [`TypeConfig`].

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::{TypeConfig, TypeId, TypeInfo};
use crate::error::{DbError, Result};

/// Features known to the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// `name` tag
    Name,
    /// `ele` tag, elevation above sea level in meters
    Ele,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFeatureValue {
    name: String,
}

impl NameFeatureValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EleFeatureValue {
    ele: u32,
}

impl EleFeatureValue {
    pub fn new(ele: u32) -> Self {
        Self { ele }
    }

    /// Elevation in meters
    pub fn ele(&self) -> u32 {
        self.ele
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureValue {
    Name(NameFeatureValue),
    Ele(EleFeatureValue),
}

impl FeatureValue {
    pub fn feature(&self) -> Feature {
        match self {
            FeatureValue::Name(_) => Feature::Name,
            FeatureValue::Ele(_) => Feature::Ele,
        }
    }
}

/// Feature values of one node, aligned to its type's feature list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureValueBuffer {
    type_id: TypeId,
    values: Vec<Option<FeatureValue>>,
}

impl FeatureValueBuffer {
    /// Empty buffer for a type
    pub fn new(type_info: &TypeInfo) -> Self {
        Self {
            type_id: type_info.id,
            values: vec![None; type_info.features.len()],
        }
    }

    /// Store a value, failing if the type does not carry the feature
    pub fn set(&mut self, type_info: &TypeInfo, value: FeatureValue) -> Result<()> {
        if type_info.id != self.type_id {
            return Err(DbError::InvalidData(format!(
                "buffer of type {:?} used with type '{}'",
                self.type_id, type_info.name
            )));
        }
        let index = type_info.feature_index(value.feature()).ok_or_else(|| {
            DbError::InvalidData(format!(
                "type '{}' has no feature {:?}",
                type_info.name,
                value.feature()
            ))
        })?;
        let slots = self.values.len();
        let slot = self.values.get_mut(index).ok_or_else(|| {
            DbError::InvalidData(format!(
                "type '{}' has {} features, buffer has {} slots",
                type_info.name,
                type_info.features.len(),
                slots
            ))
        })?;
        *slot = Some(value);
        Ok(())
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Number of slots, set or not
    pub fn slot_count(&self) -> usize {
        self.values.len()
    }

    pub fn value_at(&self, index: usize) -> Option<&FeatureValue> {
        self.values.get(index).and_then(Option::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// A concrete feature value type that a reader can extract
pub trait FeatureValueKind {
    const FEATURE: Feature;

    fn from_value(value: &FeatureValue) -> Option<&Self>;
}

impl FeatureValueKind for NameFeatureValue {
    const FEATURE: Feature = Feature::Name;

    fn from_value(value: &FeatureValue) -> Option<&Self> {
        match value {
            FeatureValue::Name(v) => Some(v),
            _ => None,
        }
    }
}

impl FeatureValueKind for EleFeatureValue {
    const FEATURE: Feature = Feature::Ele;

    fn from_value(value: &FeatureValue) -> Option<&Self> {
        match value {
            FeatureValue::Ele(v) => Some(v),
            _ => None,
        }
    }
}

/// Reads one feature from buffers of any type in a [`TypeConfig`]
#[derive(Debug, Clone)]
pub struct FeatureValueReader<V> {
    /// Slot per type id, `None` if the type lacks the feature
    slots: Vec<Option<usize>>,
    _value: PhantomData<fn() -> V>,
}

pub type NameFeatureValueReader = FeatureValueReader<NameFeatureValue>;
pub type EleFeatureValueReader = FeatureValueReader<EleFeatureValue>;

impl<V: FeatureValueKind> FeatureValueReader<V> {
    pub fn new(type_config: &TypeConfig) -> Self {
        Self {
            slots: type_config
                .types()
                .iter()
                .map(|t| t.feature_index(V::FEATURE))
                .collect(),
            _value: PhantomData,
        }
    }

    /// The value, if the buffer's type carries the feature and it was set
    pub fn get_value<'b>(&self, buffer: &'b FeatureValueBuffer) -> Option<&'b V> {
        let slot = (*self.slots.get(buffer.type_id().0 as usize)?)?;
        buffer.value_at(slot).and_then(V::from_value)
    }
}
