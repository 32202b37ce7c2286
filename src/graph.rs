use std::{any::Any, sync::Arc};

use serde_json::{Map, Value};

use crate::{ContextScope, Entity, EntityKind, GraphError, Model, ModelDecl, TypeRegistry, View};

#[derive(Debug)]
struct Slot {
	decl: ModelDecl,
	entity: Box<dyn Entity>,
}

/// One ActivityStreams object, as the composition of every entity layer it carries.
///
/// A graph holds at most one entity per [`EntityKind`], and an entity is only ever added after
/// its base. The `type` it advertises is derived from its entities: each contributes its type
/// name and hides the names it supplants.
#[derive(Debug, Default)]
pub struct TypeGraph {
	id: Option<String>,
	scope: Arc<ContextScope>,
	declares_context: bool,
	declares_type: bool,
	slots: Vec<Slot>,
	visible: Vec<String>,
	extra_types: Vec<String>,
	unknown: Map<String, Value>,
}

impl TypeGraph {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn with_scope(scope: Arc<ContextScope>, declares_context: bool) -> Self {
		TypeGraph { scope, declares_context, ..Default::default() }
	}

	pub fn parse(text: &str, registry: &TypeRegistry) -> Result<Self, GraphError> {
		registry.reader().read_str(text)
	}

	pub fn from_value(value: Value, registry: &TypeRegistry) -> Result<Self, GraphError> {
		registry.reader().read(value)
	}

	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	pub fn set_id(&mut self, id: Option<&str>) {
		self.id = id.map(|x| x.to_string());
	}

	/// context in scope for this object, including what enclosing objects declared
	pub fn scope(&self) -> &Arc<ContextScope> {
		&self.scope
	}

	/// context declared by this object itself, if it carries an `@context`
	pub fn context(&self) -> Option<&ContextScope> {
		if self.declares_context {
			Some(&self.scope)
		} else {
			None
		}
	}

	pub fn set_context(&mut self, scope: ContextScope) {
		self.scope = Arc::new(scope);
		self.declares_context = true;
	}

	/// attach the default activitypub context, for publishing
	pub fn ld_context(mut self) -> Self {
		self.set_context(ContextScope::activitypub());
		self
	}

	pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
		self.slots.iter().map(|s| s.decl.kind)
	}

	pub fn contains(&self, kind: EntityKind) -> bool {
		self.slots.iter().any(|s| s.decl.kind == kind)
	}

	pub fn is<M: Model>(&self) -> bool {
		self.contains(M::KIND)
	}

	/// declared type names which are not supplanted by another entity, in insertion order
	pub fn visible_type_names(&self) -> &[String] {
		&self.visible
	}

	/// type names found while parsing which no attached entity accounts for
	pub fn unmapped_type_names(&self) -> &[String] {
		&self.extra_types
	}

	/// everything the `type` property would list
	pub fn type_names(&self) -> impl Iterator<Item = &str> {
		self.visible.iter().chain(self.extra_types.iter()).map(String::as_str)
	}

	/// true if any entity declares this type name, even a supplanted one
	pub fn has_type(&self, name: &str) -> bool {
		self.slots.iter().any(|s| s.decl.type_name == Some(name))
			|| self.extra_types.iter().any(|x| x == name)
	}

	/// properties no entity claimed, kept verbatim
	pub fn unknown(&self) -> &Map<String, Value> {
		&self.unknown
	}

	pub fn unknown_mut(&mut self) -> &mut Map<String, Value> {
		&mut self.unknown
	}

	pub fn add<M: Model>(&mut self, entity: M::Entity) -> Result<&mut Self, GraphError> {
		entity.validate()
			.map_err(|source| GraphError::InvalidEntity { kind: M::KIND, source })?;
		self.insert(&ModelDecl::of::<M>(), Box::new(entity))?;
		Ok(self)
	}

	/// add an empty `M` entity, and any of its bases which are missing
	pub fn extend<M: Model>(&mut self) -> Result<&mut Self, GraphError> {
		let mut chain = Vec::new();
		let mut next = Some(ModelDecl::of::<M>());
		while let Some(decl) = next {
			if self.contains(decl.kind) {
				break;
			}
			if chain.iter().any(|x: &ModelDecl| x.kind == decl.kind) {
				return Err(GraphError::MissingDependency { kind: M::KIND, missing: decl.kind });
			}
			next = (decl.base)();
			chain.push(decl);
		}

		// build every layer before touching the graph, so a failure leaves it as it was
		let mut created = Vec::with_capacity(chain.len());
		for decl in chain {
			let entity = (decl.create)()
				.map_err(|source| if decl.kind == M::KIND {
					GraphError::InvalidEntity { kind: M::KIND, source }
				} else {
					GraphError::MissingDependency { kind: M::KIND, missing: decl.kind }
				})?;
			created.push((decl, entity));
		}

		for (decl, entity) in created.into_iter().rev() {
			self.insert(&decl, entity)?;
		}
		Ok(self)
	}

	pub fn project<M: Model>(&self) -> Result<View<'_, M>, GraphError> {
		let entity = self.slots.iter()
			.find(|s| s.decl.kind == M::KIND)
			.and_then(|s| {
				let any: &dyn Any = &*s.entity;
				any.downcast_ref::<M::Entity>()
			})
			.ok_or(GraphError::NotPresent(M::KIND))?;
		Ok(View::new(self, entity))
	}

	pub fn project_mut<M: Model>(&mut self) -> Result<&mut M::Entity, GraphError> {
		self.slots.iter_mut()
			.find(|s| s.decl.kind == M::KIND)
			.and_then(|s| {
				let any: &mut dyn Any = &mut *s.entity;
				any.downcast_mut::<M::Entity>()
			})
			.ok_or(GraphError::NotPresent(M::KIND))
	}

	pub(crate) fn insert(&mut self, decl: &ModelDecl, entity: Box<dyn Entity>) -> Result<(), GraphError> {
		if self.contains(decl.kind) {
			return Err(GraphError::DuplicateEntity(decl.kind));
		}
		if let Some(base) = decl.base_kind() {
			if !self.contains(base) {
				return Err(GraphError::MissingDependency { kind: decl.kind, missing: base });
			}
		}
		self.slots.push(Slot { decl: *decl, entity });
		self.refresh_types();
		Ok(())
	}

	/// remember the `type` names read off the wire which no entity accounts for
	pub(crate) fn set_declared_types(&mut self, names: Vec<String>, declared: bool) {
		self.declares_type = declared;
		self.extra_types = names;
		self.refresh_types();
	}

	fn refresh_types(&mut self) {
		let slots = &self.slots;
		let supplanted = |name: &str| slots.iter().any(|s| s.decl.supplants.contains(&name));
		self.visible = slots.iter()
			.filter_map(|s| s.decl.type_name)
			.filter(|name| !supplanted(name))
			.map(|x| x.to_string())
			.collect();
		self.extra_types.retain(|x| !slots.iter().any(|s| s.decl.type_name == Some(x.as_str())));
	}

	pub fn to_value(&self) -> Value {
		let mut out = Map::new();
		if self.declares_context {
			out.insert("@context".to_string(), self.scope.to_value());
		}
		if let Some(id) = &self.id {
			out.insert("id".to_string(), Value::String(id.clone()));
		}

		let mut types: Vec<Value> = self.type_names().map(|x| Value::String(x.to_string())).collect();
		let implicit = !self.declares_type && matches!(self.visible.as_slice(), [only] if only == "Object") && self.extra_types.is_empty();
		if let Some(raw) = self.unknown.get("type") {
			// a `type` which couldn't be fully understood goes back as it came
			out.insert("type".to_string(), raw.clone());
		} else {
			match types.len() {
				0 => {},
				1 if implicit => {},
				1 => { out.insert("type".to_string(), types.remove(0)); },
				_ => { out.insert("type".to_string(), Value::Array(types)); },
			}
		}

		for slot in &self.slots {
			slot.entity.write(&mut out);
		}
		for (k, v) in &self.unknown {
			if !out.contains_key(k) {
				out.insert(k.clone(), v.clone());
			}
		}
		Value::Object(out)
	}
}

impl serde::Serialize for TypeGraph {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_value().serialize(serializer)
	}
}
