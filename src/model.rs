use std::ops::Deref;

use serde_json::{Map, Value};

use crate::{ContextEntry, ContextScope, EntityReader, Field, GraphError, TypeGraph};

/// Tag of one entity slot: a graph holds at most one entity of each kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKind(&'static str);

impl EntityKind {
	pub const fn new(name: &'static str) -> Self {
		EntityKind(name)
	}

	pub fn name(&self) -> &'static str {
		self.0
	}
}

impl std::fmt::Display for EntityKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.0)
	}
}

/// One layer of fields of a composite object, owned by exactly one [`TypeGraph`]
pub trait Entity: std::any::Any + std::fmt::Debug + Send + Sync {
	/// put every field this entity carries into the object being serialized
	fn write(&self, out: &mut Map<String, Value>);

	fn validate(&self) -> Field<()> { Ok(()) }
}

/// Schema declaration of a type layer. Implementors are zero-sized markers, their entity holds
/// the data and [`View`] exposes it
pub trait Model: Sized + 'static {
	type Entity: Entity;

	const KIND: EntityKind;
	/// name this layer contributes to the `type` property, if any
	const TYPE_NAME: Option<&'static str> = None;
	/// names removed from the visible type set while this layer is present
	const SUPPLANTS: &'static [&'static str] = &[];

	fn base() -> Option<ModelDecl> { None }

	/// context terms which must be in scope for this layer to attach
	fn defining_context() -> Vec<ContextEntry> { Vec::new() }

	/// shape-based attach decision, `None` leaves it to type names and context
	fn infer(_obj: &Map<String, Value>, _scope: &ContextScope) -> Option<bool> { None }

	fn read(r: &mut EntityReader<'_, '_>) -> Result<Self::Entity, GraphError>;

	/// empty entity, for layers which can exist without any field set
	fn create() -> Field<Self::Entity>;
}

/// Type-erased [`Model`]: everything the registry and graphs need, as plain data and function
/// pointers
#[derive(Clone, Copy)]
pub struct ModelDecl {
	pub kind: EntityKind,
	pub type_name: Option<&'static str>,
	pub supplants: &'static [&'static str],
	pub base: fn() -> Option<ModelDecl>,
	pub context: fn() -> Vec<ContextEntry>,
	pub infer: fn(&Map<String, Value>, &ContextScope) -> Option<bool>,
	pub read: fn(&mut EntityReader<'_, '_>) -> Result<Box<dyn Entity>, GraphError>,
	pub create: fn() -> Field<Box<dyn Entity>>,
}

impl ModelDecl {
	pub fn of<M: Model>() -> Self {
		ModelDecl {
			kind: M::KIND,
			type_name: M::TYPE_NAME,
			supplants: M::SUPPLANTS,
			base: M::base,
			context: M::defining_context,
			infer: M::infer,
			read: read_boxed::<M>,
			create: create_boxed::<M>,
		}
	}

	pub fn base_kind(&self) -> Option<EntityKind> {
		(self.base)().map(|b| b.kind)
	}
}

impl std::fmt::Debug for ModelDecl {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ModelDecl")
			.field("kind", &self.kind)
			.field("type_name", &self.type_name)
			.field("supplants", &self.supplants)
			.field("base", &self.base_kind())
			.finish()
	}
}

fn read_boxed<M: Model>(r: &mut EntityReader<'_, '_>) -> Result<Box<dyn Entity>, GraphError> {
	let entity = M::read(r)?;
	entity.validate()
		.map_err(|source| GraphError::InvalidEntity { kind: M::KIND, source })?;
	Ok(Box::new(entity))
}

fn create_boxed<M: Model>() -> Field<Box<dyn Entity>> {
	Ok(Box::new(M::create()?))
}

/// Typed accessor over one entity of a graph. Borrows, never owns: it can't outlive the graph
pub struct View<'g, M: Model> {
	graph: &'g TypeGraph,
	entity: &'g M::Entity,
}

impl<M: Model> Clone for View<'_, M> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<M: Model> Copy for View<'_, M> {}

impl<M: Model> std::fmt::Debug for View<'_, M> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("View")
			.field("kind", &M::KIND)
			.field("id", &self.graph.id())
			.field("entity", self.entity)
			.finish()
	}
}

impl<M: Model> Deref for View<'_, M> {
	type Target = M::Entity;

	fn deref(&self) -> &Self::Target {
		self.entity
	}
}

impl<'g, M: Model> View<'g, M> {
	pub(crate) fn new(graph: &'g TypeGraph, entity: &'g M::Entity) -> Self {
		View { graph, entity }
	}

	pub fn graph(&self) -> &'g TypeGraph {
		self.graph
	}

	pub fn entity(&self) -> &'g M::Entity {
		self.entity
	}

	pub fn id(&self) -> Option<&'g str> {
		self.graph.id()
	}

	/// hop to another layer of the same object
	pub fn project<N: Model>(&self) -> Result<View<'g, N>, GraphError> {
		self.graph.project::<N>()
	}
}
