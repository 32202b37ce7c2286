//! Strongly typed ActivityStreams objects, built by composing one entity per type layer.
//!
//! A parsed document becomes a [`TypeGraph`]: `{"type":"Create"}` carries an Object, an Activity
//! and a Create entity, each read from the same JSON object. Models from [`vocab`] give typed
//! [`View`]s over those entities.

mod macros;

mod error;
pub use error::{Field, FieldErr, GraphError};

mod config;
pub use config::{Config, ReaderConfig};

mod context;
pub use context::{ContextEntry, ContextScope, ContextShape, ACTIVITYSTREAMS, SECURITY_V1};
#[cfg(feature = "toot")]
pub use context::TOOT;

mod field;
pub use field::{EntityReader, InsertLd, LdField, LdProperty};

mod lang;
pub use lang::LanguageText;

mod list;
pub use list::ListOrOne;

mod node;
pub use node::{Identified, LinkRef, Linkable};

mod model;
pub use model::{Entity, EntityKind, Model, ModelDecl, View};

mod graph;
pub use graph::TypeGraph;

mod reader;
pub use reader::{GraphReader, ReadCx, BASE_TYPE_NAME};

mod registry;
pub use registry::{NameTree, RegistryEntry, TypeRegistry, TypeRegistryBuilder};

pub mod vocab;

mod target;
pub use target::{Addressed, PUBLIC};

#[cfg(feature = "shortcuts")]
mod shortcuts;
#[cfg(feature = "shortcuts")]
pub use shortcuts::Shortcuts;
