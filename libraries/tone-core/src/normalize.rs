//! Normalizer
//!
//! Flattens nested entity objects into a two-level table
//! (`kind -> id -> record`) and a result holding the top-level ID(s).
//!
//! Every relation field declared in the [`SchemaRegistry`] is replaced by
//! the ID (or ordered ID list) of the entity it held, and the nested entity
//! is stored in the table under its own kind. Fields the registry does not
//! declare are copied through untouched.
//!
//! Records that share an ID are merged field by field; the value visited
//! last wins. Nested entities are visited in relation declaration order
//! before their parent is stored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{Result, ToneError};
use crate::ids::EntityId;
use crate::schema::{Cardinality, EntityKind, Relation, Schema, SchemaRegistry};

/// A flattened entity record
pub type Record = Map<String, Value>;

/// Flat entity tables keyed by kind, then by ID
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entities(BTreeMap<EntityKind, BTreeMap<EntityId, Record>>);

impl Entities {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `id` of `kind`
    pub fn get(&self, kind: EntityKind, id: &str) -> Option<&Record> {
        self.0.get(&kind).and_then(|table| table.get(id))
    }

    /// All records of `kind`, ordered by ID
    pub fn records(&self, kind: EntityKind) -> impl Iterator<Item = (&EntityId, &Record)> {
        self.0.get(&kind).into_iter().flat_map(|table| table.iter())
    }

    /// Number of records of `kind`
    pub fn len(&self, kind: EntityKind) -> usize {
        self.0.get(&kind).map_or(0, BTreeMap::len)
    }

    /// Whether no records of any kind are stored
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }

    /// Kinds that have at least one record
    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.0
            .iter()
            .filter(|(_, table)| !table.is_empty())
            .map(|(kind, _)| *kind)
    }

    /// Merge a single record, field by field
    ///
    /// Fields present in `record` overwrite the stored ones; fields only in
    /// the stored record are kept.
    pub fn merge_record(&mut self, kind: EntityKind, id: EntityId, record: Record) {
        let table = self.0.entry(kind).or_default();

        match table.get_mut(&id) {
            Some(existing) => {
                for (field, value) in record {
                    if let Some(previous) = existing.get(&field) {
                        if *previous != value {
                            tracing::warn!(
                                kind = %kind,
                                id = %id,
                                field = %field,
                                "Merging {} with unequal `{}` values, using the later value",
                                kind,
                                field
                            );
                        }
                    }
                    existing.insert(field, value);
                }
            }
            None => {
                table.insert(id, record);
            }
        }
    }

    /// Merge every record of `other` into this table
    pub fn merge(&mut self, other: Entities) {
        for (kind, table) in other.0 {
            for (id, record) in table {
                self.merge_record(kind, id, record);
            }
        }
    }
}

/// Top-level ID(s) of a normalized value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    /// Result of normalizing a single entity
    One(EntityId),

    /// Result of normalizing a collection, in input order
    Many(Vec<EntityId>),
}

impl NormalizedResult {
    /// The single ID, if this is a single-entity result
    pub fn as_one(&self) -> Option<&EntityId> {
        match self {
            NormalizedResult::One(id) => Some(id),
            NormalizedResult::Many(_) => None,
        }
    }

    /// Every ID in the result, in order
    pub fn ids(&self) -> &[EntityId] {
        match self {
            NormalizedResult::One(id) => std::slice::from_ref(id),
            NormalizedResult::Many(ids) => ids,
        }
    }
}

/// Output of a normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalized {
    /// Flat entity tables
    pub entities: Entities,

    /// ID(s) standing in for the input value
    pub result: NormalizedResult,
}

/// Schema-driven normalizer
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    registry: SchemaRegistry,
}

impl Normalizer {
    /// Create a normalizer over `registry`
    pub fn new(registry: SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Normalize a raw JSON value against `schema`
    pub fn normalize(&self, value: &Value, schema: &Schema) -> Result<Normalized> {
        let mut entities = Entities::new();

        let result = match schema {
            Schema::Entity(kind) => {
                NormalizedResult::One(self.visit_entity(value, *kind, &mut entities)?)
            }
            Schema::ArrayOf(inner) => {
                NormalizedResult::Many(self.visit_collection(value, inner, &mut entities)?)
            }
        };

        Ok(Normalized { entities, result })
    }

    /// Serialize `value` and normalize it as a single entity of `kind`
    pub fn normalize_entity<T: Serialize>(&self, value: &T, kind: EntityKind) -> Result<Normalized> {
        let raw = serde_json::to_value(value)?;
        self.normalize(&raw, &self.registry.schema_for(kind)?)
    }

    /// Serialize `values` and normalize them as a collection of `kind`
    pub fn normalize_collection<T: Serialize>(
        &self,
        values: &[T],
        kind: EntityKind,
    ) -> Result<Normalized> {
        let raw = serde_json::to_value(values)?;
        let schema = self.registry.array_of(self.registry.schema_for(kind)?);
        self.normalize(&raw, &schema)
    }

    fn visit_collection(
        &self,
        value: &Value,
        inner: &Schema,
        entities: &mut Entities,
    ) -> Result<Vec<EntityId>> {
        let Schema::Entity(kind) = inner else {
            return Err(ToneError::shape_mismatch(
                inner.element_kind(),
                "nested collections cannot be normalized",
            ));
        };

        let items = value.as_array().ok_or_else(|| {
            ToneError::shape_mismatch(
                *kind,
                format!("expected an array, found {}", describe(value)),
            )
        })?;

        items
            .iter()
            .map(|item| self.visit_entity(item, *kind, entities))
            .collect()
    }

    fn visit_entity(
        &self,
        value: &Value,
        kind: EntityKind,
        entities: &mut Entities,
    ) -> Result<EntityId> {
        let definition = self.registry.definition(kind)?;

        let object = value.as_object().ok_or_else(|| {
            ToneError::shape_mismatch(kind, format!("expected an object, found {}", describe(value)))
        })?;

        let id = object
            .get(definition.id_attribute)
            .and_then(EntityId::from_value)
            .ok_or(ToneError::MissingIdentity {
                kind,
                attribute: definition.id_attribute,
            })?;

        let mut record = object.clone();

        for relation in &definition.relations {
            let Some(field) = object.get(relation.field) else {
                continue;
            };

            let flattened = match relation.cardinality {
                Cardinality::One => self.visit_reference(field, relation, entities, true)?,
                Cardinality::Many => {
                    let items = field.as_array().ok_or_else(|| {
                        ToneError::shape_mismatch(
                            kind,
                            format!(
                                "field `{}` expected an array of {}, found {}",
                                relation.field,
                                relation.target,
                                describe(field)
                            ),
                        )
                    })?;

                    let refs = items
                        .iter()
                        .map(|item| self.visit_reference(item, relation, entities, false))
                        .collect::<Result<Vec<_>>>()?;
                    Value::Array(refs)
                }
            };

            record.insert(relation.field.to_string(), flattened);
        }

        entities.merge_record(kind, id.clone(), record);
        Ok(id)
    }

    /// Flatten one relation target into a reference value
    ///
    /// Strings and numbers are taken as already-normalized IDs.
    fn visit_reference(
        &self,
        value: &Value,
        relation: &Relation,
        entities: &mut Entities,
        allow_null: bool,
    ) -> Result<Value> {
        match value {
            Value::Object(_) => self
                .visit_entity(value, relation.target, entities)
                .map(Value::from),
            Value::String(_) | Value::Number(_) => Ok(EntityId::from_value(value)
                .map(Value::from)
                .unwrap_or(Value::Null)),
            Value::Null if allow_null => Ok(Value::Null),
            other => Err(ToneError::shape_mismatch(
                relation.target,
                format!(
                    "field `{}` expected a reference, found {}",
                    relation.field,
                    describe(other)
                ),
            )),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
