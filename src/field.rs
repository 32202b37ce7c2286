use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::{error::json_kind, ContextScope, EntityKind, FieldErr, GraphError, LanguageText, ListOrOne, ReadCx, TypeGraph};

/// Conversion between a typed field and its JSON-LD representation. Reading gets the current
/// [`ReadCx`] so nested objects resolve against their enclosing context
pub trait LdField: Sized {
	fn read(value: Value, cx: &ReadCx<'_>) -> Result<Self, GraphError>;
	/// `None` means the property is omitted
	fn write(&self) -> Option<Value>;
}

macro_rules! scalar {
	($t:ty, $expected:literal, |$v:ident| $read:expr, |$x:ident| $write:expr) => {
		impl LdField for $t {
			fn read($v: Value, _cx: &ReadCx<'_>) -> Result<Self, GraphError> {
				let found = json_kind(&$v);
				($read).ok_or(GraphError::Malformed { expected: $expected, found })
			}

			fn write(&self) -> Option<Value> {
				let $x = self;
				Some($write)
			}
		}
	};
}

scalar!(String, "string", |v| match v { Value::String(s) => Some(s), _ => None }, |x| Value::String(x.clone()));
scalar!(bool, "bool", |v| v.as_bool(), |x| Value::Bool(*x));
scalar!(u64, "unsigned integer", |v| v.as_u64(), |x| Value::from(*x));
scalar!(i64, "integer", |v| v.as_i64(), |x| Value::from(*x));
scalar!(f64, "number", |v| v.as_f64(), |x| Value::from(*x));
scalar!(
	chrono::DateTime<chrono::Utc>, "rfc3339 datetime",
	|v| v.as_str()
		.and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
		.map(|t| t.with_timezone(&chrono::Utc)),
	|x| Value::String(x.to_rfc3339())
);

impl LdField for Value {
	fn read(value: Value, _cx: &ReadCx<'_>) -> Result<Self, GraphError> {
		Ok(value)
	}

	fn write(&self) -> Option<Value> {
		Some(self.clone())
	}
}

impl<T: LdField> LdField for Option<T> {
	fn read(value: Value, cx: &ReadCx<'_>) -> Result<Self, GraphError> {
		match value {
			Value::Null => Ok(None),
			x => Ok(Some(T::read(x, cx)?)),
		}
	}

	fn write(&self) -> Option<Value> {
		self.as_ref()?.write()
	}
}

impl LdField for TypeGraph {
	fn read(value: Value, cx: &ReadCx<'_>) -> Result<Self, GraphError> {
		cx.read_graph(value)
	}

	fn write(&self) -> Option<Value> {
		Some(self.to_value())
	}
}

/// Access to the raw properties of the object being parsed, for one entity. Every property
/// successfully read is claimed, whatever is left unclaimed is preserved by the graph
pub struct EntityReader<'r, 'c> {
	obj: &'r Map<String, Value>,
	claimed: &'r mut HashSet<String>,
	cx: &'r ReadCx<'c>,
	kind: EntityKind,
}

impl<'r, 'c> EntityReader<'r, 'c> {
	pub(crate) fn new(obj: &'r Map<String, Value>, claimed: &'r mut HashSet<String>, cx: &'r ReadCx<'c>, kind: EntityKind) -> Self {
		EntityReader { obj, claimed, cx, kind }
	}

	pub fn kind(&self) -> EntityKind {
		self.kind
	}

	pub fn scope(&self) -> &ContextScope {
		self.cx.scope()
	}

	/// true if the property is there and not null
	pub fn contains(&self, key: &str) -> bool {
		self.obj.get(key).is_some_and(|x| !x.is_null())
	}

	/// peek at a property without claiming it
	pub fn raw(&self, key: &str) -> Option<&Value> {
		self.obj.get(key)
	}

	pub fn opt<T: LdField>(&mut self, key: &str) -> Result<Option<T>, GraphError> {
		let Some(value) = self.obj.get(key) else { return Ok(None) };
		if value.is_null() {
			return Ok(None);
		}
		match T::read(value.clone(), self.cx) {
			Ok(x) => {
				self.claimed.insert(key.to_string());
				Ok(Some(x))
			},
			Err(e) if e.is_malformed() => {
				tracing::warn!("ignoring malformed '{key}' for {}: {e}", self.kind);
				Ok(None)
			},
			Err(e) => Err(e),
		}
	}

	pub fn list<T: LdField>(&mut self, key: &str) -> Result<ListOrOne<T>, GraphError> {
		Ok(self.opt(key)?.unwrap_or_default())
	}

	pub fn req<T: LdField>(&mut self, key: &'static str) -> Result<T, GraphError> {
		match self.obj.get(key) {
			None | Some(Value::Null) => Err(GraphError::InvalidEntity { kind: self.kind, source: FieldErr(key) }),
			Some(value) => {
				let x = T::read(value.clone(), self.cx)
					.map_err(|e| if e.is_malformed() {
						GraphError::InvalidEntity { kind: self.kind, source: FieldErr(key) }
					} else {
						e
					})?;
				self.claimed.insert(key.to_string());
				Ok(x)
			},
		}
	}

	/// read `<key>` and `<key>Map` into one value
	pub fn lang(&mut self, key: &str) -> LanguageText {
		let map_key = format!("{key}Map");
		let mut text = LanguageText::default();
		if let Some(value) = self.obj.get(key).filter(|x| !x.is_null()) {
			match LanguageText::parse_default(value) {
				Some(default) => {
					text.set_default(Some(&default));
					self.claimed.insert(key.to_string());
				},
				None => tracing::warn!("ignoring non-string '{key}' for {}", self.kind),
			}
		}
		if let Some(value) = self.obj.get(&map_key).filter(|x| !x.is_null()) {
			match LanguageText::parse_map(value) {
				Some(tags) => {
					text = text.with_map(tags);
					self.claimed.insert(map_key);
				},
				None => tracing::warn!("ignoring malformed '{map_key}' for {}", self.kind),
			}
		}
		text
	}
}

/// A whole property of an entity as declared with `entity!`, which may span more than one key
/// on the wire
pub trait LdProperty: Default {
	fn read_prop(r: &mut EntityReader<'_, '_>, key: &str) -> Result<Self, GraphError>;
	fn write_prop(&self, out: &mut Map<String, Value>, key: &str);
	fn is_set(&self) -> bool;
}

impl<T: LdField> LdProperty for Option<T> {
	fn read_prop(r: &mut EntityReader<'_, '_>, key: &str) -> Result<Self, GraphError> {
		r.opt(key)
	}

	fn write_prop(&self, out: &mut Map<String, Value>, key: &str) {
		out.insert_ld(key, self);
	}

	fn is_set(&self) -> bool {
		self.is_some()
	}
}

impl<T: LdField> LdProperty for ListOrOne<T> {
	fn read_prop(r: &mut EntityReader<'_, '_>, key: &str) -> Result<Self, GraphError> {
		r.list(key)
	}

	fn write_prop(&self, out: &mut Map<String, Value>, key: &str) {
		out.insert_ld(key, self);
	}

	fn is_set(&self) -> bool {
		!self.is_empty()
	}
}

impl LdProperty for LanguageText {
	fn read_prop(r: &mut EntityReader<'_, '_>, key: &str) -> Result<Self, GraphError> {
		Ok(r.lang(key))
	}

	fn write_prop(&self, out: &mut Map<String, Value>, key: &str) {
		out.insert_lang(key, self);
	}

	fn is_set(&self) -> bool {
		!self.is_empty()
	}
}

pub trait InsertLd {
	fn insert_ld<T: LdField>(&mut self, key: &str, value: &T);
	fn insert_lang(&mut self, key: &str, text: &LanguageText);
}

impl InsertLd for Map<String, Value> {
	fn insert_ld<T: LdField>(&mut self, key: &str, value: &T) {
		if let Some(v) = value.write() {
			self.insert(key.to_string(), v);
		}
	}

	fn insert_lang(&mut self, key: &str, text: &LanguageText) {
		text.write_props(self, key);
	}
}
