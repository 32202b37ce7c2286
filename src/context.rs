use std::sync::Arc;

use serde_json::{Map, Value};

use crate::GraphError;

pub const ACTIVITYSTREAMS: &str = "https://www.w3.org/ns/activitystreams";
pub const SECURITY_V1: &str = "https://w3id.org/security/v1";
#[cfg(feature = "toot")]
pub const TOOT: &str = "http://joinmastodon.org/ns#";

/// How a `@context` value was written on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContextShape {
	/// a lone string or term map
	Bare,
	#[default]
	Array,
	Null,
}

impl ContextShape {
	fn of(entries: &[ContextEntry]) -> Self {
		if entries.len() == 1 { ContextShape::Bare } else { ContextShape::Array }
	}
}

/// One item of a `@context` value: either a reference to an external context or inline term
/// definitions
#[derive(Debug, Clone, PartialEq)]
pub enum ContextEntry {
	Link(String),
	Terms(Map<String, Value>),
}

impl ContextEntry {
	pub fn link(iri: &str) -> Self {
		ContextEntry::Link(iri.to_string())
	}

	pub fn term(name: &str, iri: &str) -> Self {
		let mut map = Map::new();
		map.insert(name.to_string(), Value::String(iri.to_string()));
		ContextEntry::Terms(map)
	}

	/// parse a raw `@context` value, returning its entries and the shape it was written in
	pub fn parse(value: &Value) -> Result<(Vec<ContextEntry>, ContextShape), GraphError> {
		match value {
			Value::Null => Ok((Vec::new(), ContextShape::Null)),
			Value::String(iri) => Ok((vec![ContextEntry::Link(iri.clone())], ContextShape::Bare)),
			Value::Object(terms) => Ok((vec![ContextEntry::Terms(terms.clone())], ContextShape::Bare)),
			Value::Array(arr) => {
				let mut out = Vec::with_capacity(arr.len());
				for item in arr {
					match item {
						Value::String(iri) => out.push(ContextEntry::Link(iri.clone())),
						Value::Object(terms) => out.push(ContextEntry::Terms(terms.clone())),
						// context resets are not modeled, scopes only ever grow
						Value::Null => tracing::debug!("ignoring null entry in @context"),
						x => return Err(GraphError::Malformed { expected: "context entry", found: crate::error::json_kind(x) }),
					}
				}
				Ok((out, ContextShape::Array))
			},
			x => Err(GraphError::Malformed { expected: "context", found: crate::error::json_kind(x) }),
		}
	}

	pub fn to_value(&self) -> Value {
		match self {
			ContextEntry::Link(iri) => Value::String(iri.clone()),
			ContextEntry::Terms(terms) => Value::Object(terms.clone()),
		}
	}
}

/// Lexical JSON-LD context of one object: its own entries plus whatever the enclosing objects
/// brought in scope
#[derive(Debug, Clone, Default)]
pub struct ContextScope {
	parent: Option<Arc<ContextScope>>,
	entries: Vec<ContextEntry>,
	shape: ContextShape,
}

impl PartialEq for ContextScope {
	fn eq(&self, other: &Self) -> bool {
		self.entries == other.entries && self.parent == other.parent
	}
}

impl ContextScope {
	pub fn new(entries: Vec<ContextEntry>) -> Self {
		let shape = ContextShape::of(&entries);
		ContextScope { parent: None, entries, shape }
	}

	pub fn activitystreams() -> Self {
		ContextScope::new(vec![ContextEntry::link(ACTIVITYSTREAMS)])
	}

	/// context used when publishing objects: activitystreams, security keys and every enabled
	/// extension term
	pub fn activitypub() -> Self {
		#[allow(unused_mut)]
		let mut terms = Map::new();
		#[cfg(feature = "activitypub-miscellaneous-terms")]
		{
			terms.insert("sensitive".to_string(), Value::String("as:sensitive".into()));
			terms.insert("quoteUrl".to_string(), Value::String("as:quoteUrl".into()));
			terms.insert("Hashtag".to_string(), Value::String("as:Hashtag".into()));
			terms.insert("manuallyApprovesFollowers".to_string(), Value::String("as:manuallyApprovesFollowers".into()));
			terms.insert("movedTo".to_string(), Value::String("as:movedTo".into()));
		}
		#[cfg(feature = "toot")]
		{
			terms.insert("toot".to_string(), Value::String(TOOT.into()));
			terms.insert("Emoji".to_string(), Value::String("toot:Emoji".into()));
			terms.insert("discoverable".to_string(), Value::String("toot:discoverable".into()));
			terms.insert("indexable".to_string(), Value::String("toot:indexable".into()));
			terms.insert("blurhash".to_string(), Value::String("toot:blurhash".into()));
			terms.insert("featured".to_string(), Value::String("toot:featured".into()));
			terms.insert("featuredTags".to_string(), Value::String("toot:featuredTags".into()));
			terms.insert("focalPoint".to_string(), Value::String("toot:focalPoint".into()));
		}
		let mut entries = vec![
			ContextEntry::link(ACTIVITYSTREAMS),
			ContextEntry::link(SECURITY_V1),
		];
		if !terms.is_empty() {
			entries.push(ContextEntry::Terms(terms));
		}
		ContextScope::new(entries)
	}

	/// nested scope inheriting everything `self` has in scope
	pub fn child(self: &Arc<Self>, entries: Vec<ContextEntry>) -> Arc<Self> {
		let shape = ContextShape::of(&entries);
		self.child_shaped(entries, shape)
	}

	/// like [`ContextScope::child`], rendered back in the given shape
	pub fn child_shaped(self: &Arc<Self>, entries: Vec<ContextEntry>, shape: ContextShape) -> Arc<Self> {
		Arc::new(ContextScope { parent: Some(self.clone()), entries, shape }.fixed_shape())
	}

	pub fn with_shape(mut self, shape: ContextShape) -> Self {
		self.shape = shape;
		self.fixed_shape()
	}

	// a shape the entries can't be written in falls back to an array
	fn fixed_shape(mut self) -> Self {
		match (self.shape, self.entries.len()) {
			(ContextShape::Bare, 1) | (ContextShape::Null, 0) | (ContextShape::Array, _) => {},
			_ => self.shape = ContextShape::Array,
		}
		self
	}

	pub fn shape(&self) -> ContextShape {
		self.shape
	}

	pub fn parent(&self) -> Option<&Arc<ContextScope>> {
		self.parent.as_ref()
	}

	/// entries declared by this scope only
	pub fn entries(&self) -> &[ContextEntry] {
		&self.entries
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// this scope followed by each enclosing one, innermost first
	pub fn ancestors(&self) -> impl Iterator<Item = &ContextScope> {
		std::iter::successors(Some(self), |s| s.parent.as_deref())
	}

	/// definition of a term, nearest scope wins and later entries override earlier ones
	pub fn term(&self, name: &str) -> Option<&Value> {
		for scope in self.ancestors() {
			for entry in scope.entries.iter().rev() {
				if let ContextEntry::Terms(terms) = entry {
					if let Some(def) = terms.get(name) {
						return Some(def);
					}
				}
			}
		}
		None
	}

	pub fn contains(&self, entry: &ContextEntry) -> bool {
		match entry {
			ContextEntry::Link(iri) => self.ancestors()
				.any(|s| s.entries.iter().any(|e| matches!(e, ContextEntry::Link(x) if x == iri))),
			ContextEntry::Terms(terms) => terms
				.iter()
				.all(|(name, def)| self.term(name) == Some(def)),
		}
	}

	pub fn is_superset_of(&self, required: &[ContextEntry]) -> bool {
		required.iter().all(|e| self.contains(e))
	}

	/// render the entries declared by this scope, in the same shape they were read
	pub fn to_value(&self) -> Value {
		match (self.shape, self.entries.as_slice()) {
			(ContextShape::Null, []) => Value::Null,
			(ContextShape::Bare, [one]) => one.to_value(),
			(_, many) => Value::Array(many.iter().map(ContextEntry::to_value).collect()),
		}
	}
}

#[cfg(test)]
mod test {
	use std::sync::Arc;

	use super::{ContextEntry, ContextScope, ContextShape, ACTIVITYSTREAMS};

	#[test]
	fn requirements_are_satisfied_by_enclosing_scopes() {
		let root = Arc::new(ContextScope::activitystreams());
		let child = root.child(vec![ContextEntry::term("sensitive", "as:sensitive")]);

		assert!(child.is_superset_of(&[ContextEntry::link(ACTIVITYSTREAMS)]));
		assert!(child.is_superset_of(&[ContextEntry::term("sensitive", "as:sensitive")]));
		assert!(!root.is_superset_of(&[ContextEntry::term("sensitive", "as:sensitive")]));
		assert!(child.is_superset_of(&[]));
	}

	#[test]
	fn nearest_term_definition_shadows_outer_ones() {
		let root = Arc::new(ContextScope::new(vec![ContextEntry::term("x", "https://a.example/#x")]));
		let child = root.child(vec![ContextEntry::term("x", "https://b.example/#x")]);

		assert_eq!(child.term("x").and_then(|x| x.as_str()), Some("https://b.example/#x"));
		assert!(!child.contains(&ContextEntry::term("x", "https://a.example/#x")));
		assert!(root.contains(&ContextEntry::term("x", "https://a.example/#x")));
	}

	#[test]
	fn context_shapes_are_rendered_back_as_read() {
		for raw in [
			serde_json::json!(ACTIVITYSTREAMS),
			serde_json::json!([ACTIVITYSTREAMS]),
			serde_json::json!({ "toot": "http://joinmastodon.org/ns#" }),
			serde_json::json!([{ "toot": "http://joinmastodon.org/ns#" }]),
			serde_json::json!([ACTIVITYSTREAMS, { "sensitive": "as:sensitive" }]),
			serde_json::json!([]),
			serde_json::json!(null),
		] {
			let (entries, shape) = ContextEntry::parse(&raw).unwrap();
			let scope = ContextScope::new(entries.clone()).with_shape(shape);
			assert_eq!(scope.to_value(), raw);

			let nested = Arc::new(ContextScope::activitystreams()).child_shaped(entries, shape);
			assert_eq!(nested.to_value(), raw);
		}
	}

	#[test]
	fn impossible_shapes_fall_back_to_arrays() {
		let scope = ContextScope::new(vec![ContextEntry::link(ACTIVITYSTREAMS), ContextEntry::link("https://x.example")])
			.with_shape(ContextShape::Bare);
		assert_eq!(scope.shape(), ContextShape::Array);
		assert_eq!(ContextScope::default().with_shape(ContextShape::Bare).to_value(), serde_json::json!([]));
	}

	#[test]
	fn scope_equality_is_structural_and_walks_parents() {
		let a = Arc::new(ContextScope::activitystreams()).child(vec![ContextEntry::link("https://x.example")]);
		let b = Arc::new(ContextScope::activitystreams()).child(vec![ContextEntry::link("https://x.example")]);
		let c = Arc::new(ContextScope::default()).child(vec![ContextEntry::link("https://x.example")]);
		assert_eq!(a, b);
		assert_ne!(a, c);
	}

	#[test]
	fn invalid_context_entries_are_rejected() {
		assert!(ContextEntry::parse(&serde_json::json!([1])).is_err());
		assert!(ContextEntry::parse(&serde_json::json!(true)).is_err());
	}
}
