//! Feature types and the type configuration of a database.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::Feature;
use crate::error::{DbError, Result};

/// Numeric id of a type, the index into [`TypeConfig::types`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u16);

/// A tag that must be present for an object to belong to a type.
///
/// Without a `value` any value of `key` matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCondition {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TagCondition {
    pub fn new(key: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            key: key.into(),
            value: value.map(str::to_string),
        }
    }

    fn matches<'a, F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        match (lookup(&self.key), &self.value) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// Type definition as written by the importer, before ids are assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    /// All conditions must hold
    pub conditions: Vec<TagCondition>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A resolved type with its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub id: TypeId,
    pub name: String,
    pub conditions: Vec<TagCondition>,
    pub features: Vec<Feature>,
}

impl TypeInfo {
    /// Check the tags of an object (given as a lookup function) against this type
    pub fn matches<'a, F>(&self, lookup: F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        !self.conditions.is_empty() && self.conditions.iter().all(|c| c.matches(&lookup))
    }

    /// Slot of a feature in buffers of this type
    pub fn feature_index(&self, feature: Feature) -> Option<usize> {
        self.features.iter().position(|f| *f == feature)
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.feature_index(feature).is_some()
    }
}

/// All types known to a database
#[derive(Debug, Clone)]
pub struct TypeConfig {
    types: Vec<TypeInfo>,
    by_name: HashMap<String, TypeId>,
}

impl TypeConfig {
    /// Build a configuration, assigning ids in definition order
    pub fn new(definitions: Vec<TypeDefinition>) -> Result<Self> {
        if definitions.len() > u16::MAX as usize {
            return Err(DbError::InvalidData(format!(
                "too many types: {}",
                definitions.len()
            )));
        }

        let mut types = Vec::with_capacity(definitions.len());
        let mut by_name = HashMap::with_capacity(definitions.len());

        for (index, def) in definitions.into_iter().enumerate() {
            if def.name.is_empty() {
                return Err(DbError::InvalidData("type without a name".to_string()));
            }
            for (i, feature) in def.features.iter().enumerate() {
                if def.features[..i].contains(feature) {
                    return Err(DbError::InvalidData(format!(
                        "type '{}' lists feature {:?} twice",
                        def.name, feature
                    )));
                }
            }

            let id = TypeId(index as u16);
            if by_name.insert(def.name.clone(), id).is_some() {
                return Err(DbError::InvalidData(format!(
                    "duplicate type '{}'",
                    def.name
                )));
            }
            types.push(TypeInfo {
                id,
                name: def.name,
                conditions: def.conditions,
                features: def.features,
            });
        }

        Ok(Self { types, by_name })
    }

    /// Look up a type by its symbolic name (e.g. `natural_peak`)
    pub fn type_info(&self, name: &str) -> Option<&TypeInfo> {
        self.by_name.get(name).map(|id| &self.types[id.0 as usize])
    }

    /// Like [`TypeConfig::type_info`], failing with [`DbError::UnknownType`]
    pub fn require_type(&self, name: &str) -> Result<&TypeInfo> {
        self.type_info(name)
            .ok_or_else(|| DbError::UnknownType(name.to_string()))
    }

    pub fn type_by_id(&self, id: TypeId) -> Option<&TypeInfo> {
        self.types.get(id.0 as usize)
    }

    pub fn types(&self) -> &[TypeInfo] {
        &self.types
    }

    /// First type whose conditions match the given tags
    pub fn classify<'a, F>(&self, lookup: F) -> Option<&TypeInfo>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        self.types.iter().find(|t| t.matches(&lookup))
    }

    /// Definitions in id order, the form stored on disk
    pub fn definitions(&self) -> Vec<TypeDefinition> {
        self.types
            .iter()
            .map(|t| TypeDefinition {
                name: t.name.clone(),
                conditions: t.conditions.clone(),
                features: t.features.clone(),
            })
            .collect()
    }
}

/// A set of types used to filter queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInfoSet {
    ids: Vec<TypeId>,
}

impl TypeInfoSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_info: &TypeInfo) {
        if let Err(pos) = self.ids.binary_search(&type_info.id) {
            self.ids.insert(pos, type_info.id);
        }
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

impl<'a> FromIterator<&'a TypeInfo> for TypeInfoSet {
    fn from_iter<I: IntoIterator<Item = &'a TypeInfo>>(iter: I) -> Self {
        let mut set = TypeInfoSet::new();
        for type_info in iter {
            set.insert(type_info);
        }
        set
    }
}
