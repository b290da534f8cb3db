//! Entity schema registry
//!
//! Declares which entity kinds exist, how each one is identified, and which
//! of its fields hold nested references to other kinds.
//!
//! References point at a kind tag rather than at another schema object, so
//! the graph is finite even when it is cyclic:
//!
//! ```text
//! players ──nowPlaying (one)──► tracks
//!    │
//!    └──────tracks (many)─────► tracks
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, ToneError};

/// Default identity attribute
pub const DEFAULT_ID_ATTRIBUTE: &str = "id";

/// Player field holding the current track
pub const NOW_PLAYING: &str = "nowPlaying";

/// Player field holding the ordered track list
pub const TRACKS: &str = "tracks";

/// Entity kind
///
/// Doubles as the key of the top-level entities table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A playable track
    #[serde(rename = "tracks")]
    Track,

    /// A player instance owning a track list
    #[serde(rename = "players")]
    Player,
}

impl EntityKind {
    /// Key used in the entities table
    pub fn key(self) -> &'static str {
        match self {
            EntityKind::Track => "tracks",
            EntityKind::Player => "players",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How many targets a relation field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    /// A single nested entity
    One,

    /// An ordered collection of nested entities
    Many,
}

/// A nested-reference field on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Field name on the raw object
    pub field: &'static str,

    /// Kind the field refers to
    pub target: EntityKind,

    /// Single or ordered collection
    pub cardinality: Cardinality,
}

impl Relation {
    /// Field holding a single nested entity
    pub const fn one(field: &'static str, target: EntityKind) -> Self {
        Self {
            field,
            target,
            cardinality: Cardinality::One,
        }
    }

    /// Field holding an ordered collection of nested entities
    pub const fn many(field: &'static str, target: EntityKind) -> Self {
        Self {
            field,
            target,
            cardinality: Cardinality::Many,
        }
    }
}

/// Declaration of one entity kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDefinition {
    /// The kind being declared
    pub kind: EntityKind,

    /// Attribute holding the entity's identity
    pub id_attribute: &'static str,

    /// Nested-reference fields, in visiting order
    pub relations: Vec<Relation>,
}

impl EntityDefinition {
    /// Declaration with the default `id` attribute and no relations
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            id_attribute: DEFAULT_ID_ATTRIBUTE,
            relations: Vec::new(),
        }
    }

    /// Relation declared for `field`, if any
    pub fn relation(&self, field: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.field == field)
    }
}

/// Shape of a value handed to the normalizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// A single entity object
    Entity(EntityKind),

    /// An array whose elements follow the inner schema
    ArrayOf(Box<Schema>),
}

impl Schema {
    /// Schema for a single entity of `kind`
    pub fn entity(kind: EntityKind) -> Self {
        Schema::Entity(kind)
    }

    /// Schema for an array of `schema` values
    pub fn array_of(schema: Schema) -> Self {
        Schema::ArrayOf(Box::new(schema))
    }

    /// Entity kind at the bottom of this schema
    pub fn element_kind(&self) -> EntityKind {
        match self {
            Schema::Entity(kind) => *kind,
            Schema::ArrayOf(inner) => inner.element_kind(),
        }
    }
}

/// Registry of entity declarations
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    definitions: BTreeMap<EntityKind, EntityDefinition>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            definitions: BTreeMap::new(),
        }
    }

    /// Registry with the player/track declarations
    pub fn standard() -> Self {
        let track = EntityDefinition::new(EntityKind::Track);
        let player = EntityDefinition {
            relations: vec![
                Relation::one(NOW_PLAYING, EntityKind::Track),
                Relation::many(TRACKS, EntityKind::Track),
            ],
            ..EntityDefinition::new(EntityKind::Player)
        };

        Self {
            definitions: BTreeMap::from([
                (EntityKind::Track, track),
                (EntityKind::Player, player),
            ]),
        }
    }

    /// Declare `kind`, or change the identity attribute of an existing
    /// declaration while keeping its relations
    pub fn define(&mut self, kind: EntityKind, id_attribute: &'static str) -> &mut Self {
        self.definitions
            .entry(kind)
            .and_modify(|def| def.id_attribute = id_attribute)
            .or_insert_with(|| EntityDefinition {
                id_attribute,
                ..EntityDefinition::new(kind)
            });
        self
    }

    /// Add a relation to an existing declaration
    ///
    /// A relation on a field that already has one replaces it. The target
    /// kind does not need to be declared yet, which is what allows cycles.
    pub fn relate(&mut self, kind: EntityKind, relation: Relation) -> Result<&mut Self> {
        let definition = self
            .definitions
            .get_mut(&kind)
            .ok_or(ToneError::UnknownEntity(kind))?;

        match definition
            .relations
            .iter_mut()
            .find(|r| r.field == relation.field)
        {
            Some(existing) => *existing = relation,
            None => definition.relations.push(relation),
        }

        Ok(self)
    }

    /// Declaration for `kind`
    pub fn definition(&self, kind: EntityKind) -> Result<&EntityDefinition> {
        self.definitions
            .get(&kind)
            .ok_or(ToneError::UnknownEntity(kind))
    }

    /// Object schema for `kind`
    pub fn schema_for(&self, kind: EntityKind) -> Result<Schema> {
        self.definition(kind).map(|def| Schema::Entity(def.kind))
    }

    /// Collection schema wrapping `schema`
    pub fn array_of(&self, schema: Schema) -> Schema {
        Schema::array_of(schema)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
