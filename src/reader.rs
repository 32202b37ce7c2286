use std::{collections::HashSet, sync::Arc};

use serde_json::{Map, Value};

use crate::{
	error::json_kind, ContextEntry, ContextScope, EntityKind, EntityReader, GraphError, ReaderConfig, RegistryEntry, TypeGraph, TypeRegistry,
};

/// every object is an Object, whether it says so or not
pub const BASE_TYPE_NAME: &str = "Object";

/// Turns raw JSON objects into [`TypeGraph`]s, choosing which entities each one needs
#[derive(Debug, Clone)]
pub struct GraphReader<'r> {
	registry: &'r TypeRegistry,
	config: ReaderConfig,
}

/// Position of the reader inside a document: which context is in scope and how deep we are
#[derive(Debug, Clone)]
pub struct ReadCx<'c> {
	reader: &'c GraphReader<'c>,
	scope: Arc<ContextScope>,
	depth: usize,
}

impl ReadCx<'_> {
	pub fn scope(&self) -> &Arc<ContextScope> {
		&self.scope
	}

	pub fn depth(&self) -> usize {
		self.depth
	}

	/// parse a nested object, one level below this one
	pub fn read_graph(&self, value: Value) -> Result<TypeGraph, GraphError> {
		self.reader.read_in(value, Some(&self.scope), self.depth + 1)
	}
}

impl<'r> GraphReader<'r> {
	pub fn new(registry: &'r TypeRegistry) -> Self {
		GraphReader { registry, config: ReaderConfig::default() }
	}

	pub fn with_config(mut self, config: ReaderConfig) -> Self {
		self.config = config;
		self
	}

	pub fn registry(&self) -> &'r TypeRegistry {
		self.registry
	}

	pub fn config(&self) -> &ReaderConfig {
		&self.config
	}

	/// context for reading standalone field values, as if they sat at document root
	pub fn cx(&self) -> ReadCx<'_> {
		ReadCx { reader: self, scope: Arc::default(), depth: 0 }
	}

	pub fn read(&self, value: Value) -> Result<TypeGraph, GraphError> {
		self.read_in(value, None, 0)
	}

	pub fn read_str(&self, text: &str) -> Result<TypeGraph, GraphError> {
		self.read(serde_json::from_str(text)?)
	}

	pub fn read_in(&self, value: Value, parent: Option<&Arc<ContextScope>>, depth: usize) -> Result<TypeGraph, GraphError> {
		match value {
			Value::Object(obj) => self.read_object(obj, parent, depth),
			x => Err(GraphError::Malformed { expected: "object", found: json_kind(&x) }),
		}
	}

	fn read_object(&self, obj: Map<String, Value>, parent: Option<&Arc<ContextScope>>, depth: usize) -> Result<TypeGraph, GraphError> {
		if depth > self.config.max_depth {
			return Err(GraphError::DepthExceeded(self.config.max_depth));
		}

		let mut claimed = HashSet::new();

		let local = match obj.get("@context") {
			None => None,
			Some(ctx) => match ContextEntry::parse(ctx) {
				Ok(parsed) => {
					claimed.insert("@context".to_string());
					Some(parsed)
				},
				Err(e) => {
					tracing::warn!("keeping unusable @context verbatim: {e}");
					None
				},
			},
		};
		let declares_context = local.is_some();
		let scope = match (local, parent) {
			(Some((entries, shape)), Some(parent)) => parent.child_shaped(entries, shape),
			(Some((entries, shape)), None) => Arc::new(ContextScope::new(entries).with_shape(shape)),
			(None, Some(parent)) => parent.clone(),
			(None, None) => Arc::default(),
		};

		let declared = read_types(obj.get("type"));
		let declares_type = declared.is_some();
		let mut names = match declared {
			Some((names, true)) => {
				claimed.insert("type".to_string());
				names
			},
			// still usable for picking entities, but only the raw value can be written back
			Some((names, false)) => names,
			None => Vec::new(),
		};
		if !names.iter().any(|x| x == BASE_TYPE_NAME) {
			names.push(BASE_TYPE_NAME.to_string());
		}

		let id = match obj.get("id") {
			Some(Value::String(id)) => {
				claimed.insert("id".to_string());
				Some(id.clone())
			},
			_ => None,
		};

		let selected = self.select(&obj, &names, &scope);
		let cx = ReadCx { reader: self, scope: scope.clone(), depth };
		let mut graph = TypeGraph::with_scope(scope, declares_context);
		graph.set_id(id.as_deref());

		for entry in selected {
			let entity = {
				let mut r = EntityReader::new(&obj, &mut claimed, &cx, entry.kind());
				(entry.decl().read)(&mut r)?
			};
			graph.insert(entry.decl(), entity)?;
		}

		graph.set_declared_types(names, declares_type);

		for (key, value) in obj {
			if claimed.contains(&key) {
				continue;
			}
			if self.config.preserve_unknown {
				graph.unknown_mut().insert(key, value);
			} else {
				tracing::debug!("dropping unknown property '{key}'");
			}
		}

		Ok(graph)
	}

	/// every entity kind the object needs, bases before derived
	fn select(&self, obj: &Map<String, Value>, names: &[String], scope: &ContextScope) -> Vec<&'r RegistryEntry> {
		let mut seen: HashSet<EntityKind> = HashSet::new();
		let mut out = Vec::new();
		for entry in self.registry.entries() {
			if !self.should_attach(entry, obj, names, scope) {
				continue;
			}
			tracing::debug!("attaching {} to object", entry.kind());
			for kind in entry.chain() {
				if !seen.insert(*kind) {
					continue;
				}
				if let Some(x) = self.registry.entry(*kind) {
					out.push(x);
				}
			}
		}
		// a chain is always longer than its base's chain
		out.sort_by_key(|e| (e.chain().len(), e.order()));
		out
	}

	fn should_attach(&self, entry: &RegistryEntry, obj: &Map<String, Value>, names: &[String], scope: &ContextScope) -> bool {
		if let Some(verdict) = (entry.decl().infer)(obj, scope) {
			return verdict;
		}
		if !scope.is_superset_of(entry.context()) {
			return false;
		}
		match entry.type_name() {
			Some(name) => {
				names.iter().any(|x| x == name)
					|| self.registry
						.derived_names(name)
						.is_some_and(|derived| names.iter().any(|x| derived.contains(x)))
			},
			// unnamed extensions are gated by context alone
			None => !entry.context().is_empty(),
		}
	}
}

/// type names of an object, and whether they account for the whole `type` value
fn read_types(value: Option<&Value>) -> Option<(Vec<String>, bool)> {
	match value? {
		Value::String(t) => Some((vec![t.clone()], true)),
		Value::Array(arr) => {
			let names: Vec<String> = arr.iter()
				.filter_map(|x| x.as_str().map(|t| t.to_string()))
				.collect();
			let whole = names.len() == arr.len();
			if !whole {
				tracing::warn!("keeping type with non-string entries verbatim: {}", serde_json::Value::Array(arr.clone()));
			}
			Some((names, whole))
		},
		x => {
			tracing::warn!("keeping malformed type verbatim: {x}");
			None
		},
	}
}
