//! Tone Player Core
//!
//! Entity records, schema registry and normalizer for Tone Player.
//!
//! This crate provides the data side of the player state pipeline. Nested
//! player/track object graphs come in from the UI or the audio engine, and
//! leave as flat, deduplicated entity tables that a store can apply as
//! partial updates keyed by ID.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Identity**: `EntityId` (assigned upstream, never minted here)
//! - **Records**: `Track`, `Player`, `PlayerUpdate`
//! - **Schema**: `EntityKind`, `Schema`, `SchemaRegistry` (a static graph of
//!   kind-to-kind references, so the Player/Track cycle never recurses at
//!   declaration time)
//! - **Normalizer**: recursive descent over a `Schema` producing `Normalized`
//! - **Error Handling**: unified `ToneError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tone_core::{EntityKind, Normalizer, Schema};
//!
//! let normalizer = Normalizer::default();
//! let player = json!({
//!     "id": "p1",
//!     "nowPlaying": { "id": "t1", "title": "Intro" },
//!     "tracks": [{ "id": "t1", "title": "Intro" }, { "id": "t2" }]
//! });
//!
//! let normalized = normalizer
//!     .normalize(&player, &Schema::entity(EntityKind::Player))
//!     .unwrap();
//!
//! assert_eq!(normalized.entities.len(EntityKind::Track), 2);
//! let record = normalized.entities.get(EntityKind::Player, "p1").unwrap();
//! assert_eq!(record["nowPlaying"], json!("t1"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod ids;
pub mod normalize;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ToneError};
pub use ids::EntityId;
pub use normalize::{Entities, Normalized, NormalizedResult, Normalizer, Record};
pub use schema::{Cardinality, EntityDefinition, EntityKind, Relation, Schema, SchemaRegistry};
pub use types::{Player, PlayerConfig, PlayerUpdate, Sound, Track, TrackEntry};
