use serde_json::{Map, Value};

use crate::{EntityKind, FieldErr, GraphError, LanguageText, LdField, ListOrOne, ReadCx, TypeGraph};

pub(crate) const LINK_KIND: EntityKind = EntityKind::new("as:Link");

/// Anything which can name a remote resource
pub trait Identified {
	fn ld_id(&self) -> Option<&str>;
}

impl Identified for String {
	fn ld_id(&self) -> Option<&str> {
		Some(self)
	}
}

impl Identified for TypeGraph {
	fn ld_id(&self) -> Option<&str> {
		self.id()
	}
}

impl Identified for LinkRef {
	fn ld_id(&self) -> Option<&str> {
		Some(&self.href)
	}
}

impl<T: Identified> Identified for Linkable<T> {
	fn ld_id(&self) -> Option<&str> {
		match self {
			Linkable::Link(l) => l.ld_id(),
			Linkable::Object(x) => x.ld_id(),
		}
	}
}

/// ActivityPub resource reference: either a link to something or the thing itself, embedded
#[derive(Debug, Clone, PartialEq)]
pub enum Linkable<T> {
	Link(LinkRef),
	Object(T),
}

impl<T> Linkable<T> {
	pub fn link(href: &str) -> Self {
		Linkable::Link(LinkRef::new(href))
	}

	pub fn object(value: T) -> Self {
		Linkable::Object(value)
	}

	/// true only if this is a reference
	pub fn is_link(&self) -> bool {
		matches!(self, Linkable::Link(_))
	}

	/// true only if the resource is embedded
	pub fn is_object(&self) -> bool {
		matches!(self, Linkable::Object(_))
	}

	/// return reference to embedded object, if present
	pub fn get(&self) -> Option<&T> {
		match self {
			Linkable::Object(x) => Some(x),
			Linkable::Link(_) => None,
		}
	}

	pub fn get_mut(&mut self) -> Option<&mut T> {
		match self {
			Linkable::Object(x) => Some(x),
			Linkable::Link(_) => None,
		}
	}

	pub fn extract(self) -> Option<T> {
		match self {
			Linkable::Object(x) => Some(x),
			Linkable::Link(_) => None,
		}
	}

	pub fn link_ref(&self) -> Option<&LinkRef> {
		match self {
			Linkable::Link(l) => Some(l),
			Linkable::Object(_) => None,
		}
	}
}

fn is_link_type(value: Option<&Value>) -> bool {
	match value {
		Some(Value::String(t)) => t == "Link",
		Some(Value::Array(arr)) => matches!(arr.as_slice(), [Value::String(t)] if t == "Link"),
		_ => false,
	}
}

impl<T: LdField> LdField for Linkable<T> {
	fn read(value: Value, cx: &ReadCx<'_>) -> Result<Self, GraphError> {
		match value {
			Value::String(href) => Ok(Linkable::Link(LinkRef::new(&href))),
			x @ (Value::Number(_) | Value::Bool(_)) => Ok(Linkable::Link(LinkRef::from_scalar(x))),
			Value::Object(map) if is_link_type(map.get("type")) => Ok(Linkable::Link(LinkRef::from_map(map, cx)?)),
			obj @ Value::Object(_) => Ok(Linkable::Object(T::read(obj, cx)?)),
			x => Err(GraphError::Malformed { expected: "link or object", found: crate::error::json_kind(&x) }),
		}
	}

	fn write(&self) -> Option<Value> {
		match self {
			Linkable::Link(l) => Some(l.to_value()),
			Linkable::Object(x) => x.write(),
		}
	}
}

/// Target of a link, with the optional details a `Link` object may carry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkRef {
	pub href: String,
	pub rel: ListOrOne<String>,
	pub media_type: Option<String>,
	pub name: LanguageText,
	pub hreflang: Option<String>,
	pub height: Option<u64>,
	pub width: Option<u64>,
	/// any other property found on the link object, kept verbatim
	pub extra: Map<String, Value>,
	// number or boolean this link was read from, written back while href still matches it
	scalar: Option<Value>,
}

impl LinkRef {
	pub fn new(href: &str) -> Self {
		LinkRef { href: href.to_string(), ..Default::default() }
	}

	fn from_scalar(value: Value) -> Self {
		LinkRef { href: value.to_string(), scalar: Some(value), ..Default::default() }
	}

	/// true when nothing but the href is set, so it can travel as a bare string
	pub fn is_bare(&self) -> bool {
		self.rel.is_empty()
			&& self.media_type.is_none()
			&& self.name.is_empty()
			&& self.hreflang.is_none()
			&& self.height.is_none()
			&& self.width.is_none()
			&& self.extra.is_empty()
	}

	fn from_map(mut map: Map<String, Value>, cx: &ReadCx<'_>) -> Result<Self, GraphError> {
		map.remove("type");
		let href = match map.remove("href") {
			Some(Value::String(href)) => href,
			_ => return Err(GraphError::InvalidEntity { kind: LINK_KIND, source: FieldErr("href") }),
		};
		let rel = take(&mut map, "rel", cx)?.unwrap_or_default();
		let media_type = take(&mut map, "mediaType", cx)?;
		let hreflang = take(&mut map, "hreflang", cx)?;
		let height = take(&mut map, "height", cx)?;
		let width = take(&mut map, "width", cx)?;

		let mut name = LanguageText::default();
		if let Some(default) = map.get("name").and_then(LanguageText::parse_default) {
			map.remove("name");
			name.set_default(Some(&default));
		}
		if let Some(tags) = map.get("nameMap").and_then(LanguageText::parse_map) {
			map.remove("nameMap");
			name = name.with_map(tags);
		}

		Ok(LinkRef { href, rel, media_type, name, hreflang, height, width, extra: map, scalar: None })
	}

	pub fn to_value(&self) -> Value {
		if self.is_bare() {
			return match &self.scalar {
				Some(x) if x.to_string() == self.href => x.clone(),
				_ => Value::String(self.href.clone()),
			};
		}
		let mut out = Map::new();
		out.insert("type".to_string(), Value::String("Link".to_string()));
		out.insert("href".to_string(), Value::String(self.href.clone()));
		use crate::InsertLd;
		out.insert_ld("rel", &self.rel);
		out.insert_ld("mediaType", &self.media_type);
		self.name.write_props(&mut out, "name");
		out.insert_ld("hreflang", &self.hreflang);
		out.insert_ld("height", &self.height);
		out.insert_ld("width", &self.width);
		for (k, v) in &self.extra {
			if !out.contains_key(k) {
				out.insert(k.clone(), v.clone());
			}
		}
		Value::Object(out)
	}
}

/// read a known property off a link object, leaving it in place if its shape is unexpected
fn take<T: LdField>(map: &mut Map<String, Value>, key: &str, cx: &ReadCx<'_>) -> Result<Option<T>, GraphError> {
	let Some(value) = map.get(key) else { return Ok(None) };
	match T::read(value.clone(), cx) {
		Ok(x) => {
			map.remove(key);
			Ok(Some(x))
		},
		Err(e) if e.is_malformed() => {
			tracing::warn!("keeping malformed '{key}' on link verbatim: {e}");
			Ok(None)
		},
		Err(e) => Err(e),
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{GraphError, LdField, Linkable, TypeGraph, TypeRegistry};

	#[test]
	fn bare_string_reads_as_link_and_writes_back_bare() {
		let reader = TypeRegistry::global().reader();
		let node = Linkable::<TypeGraph>::read(json!("https://example.com"), &reader.cx()).unwrap();
		let link = node.link_ref().unwrap();
		assert_eq!(link.href, "https://example.com");
		assert!(link.is_bare());
		assert_eq!(node.write(), Some(json!("https://example.com")));
	}

	#[test]
	fn link_object_with_only_href_collapses_to_string() {
		let reader = TypeRegistry::global().reader();
		let node = Linkable::<TypeGraph>::read(json!({ "type": "Link", "href": "https://example.com" }), &reader.cx()).unwrap();
		assert_eq!(node.write(), Some(json!("https://example.com")));
	}

	#[test]
	fn link_object_with_details_stays_an_object() {
		let reader = TypeRegistry::global().reader();
		let raw = json!({
			"type": "Link",
			"href": "https://example.com/a.png",
			"mediaType": "image/png",
			"rel": ["preview", "icon"],
			"width": 64,
			"foo": "bar",
		});
		let node = Linkable::<TypeGraph>::read(raw.clone(), &reader.cx()).unwrap();
		let link = node.link_ref().unwrap();
		assert_eq!(link.width, Some(64));
		assert_eq!(link.rel.len(), 2);
		assert_eq!(node.write(), Some(raw));
	}

	#[test]
	fn other_objects_are_embedded() {
		let reader = TypeRegistry::global().reader();
		let node = Linkable::<TypeGraph>::read(json!({ "id": "https://example.com/n", "type": "Note" }), &reader.cx()).unwrap();
		assert!(node.is_object());
		assert_eq!(node.get().and_then(|g| g.id()), Some("https://example.com/n"));
	}

	#[test]
	fn link_without_href_is_invalid() {
		let reader = TypeRegistry::global().reader();
		let err = Linkable::<TypeGraph>::read(json!({ "type": "Link", "rel": "x" }), &reader.cx()).unwrap_err();
		assert!(matches!(err, GraphError::InvalidEntity { .. }));
	}

	#[test]
	fn numbers_and_booleans_are_written_back_as_read() {
		let reader = TypeRegistry::global().reader();
		let node = Linkable::<TypeGraph>::read(json!(12), &reader.cx()).unwrap();
		assert_eq!(node.link_ref().unwrap().href, "12");
		assert_eq!(node.write(), Some(json!(12)));

		let node = Linkable::<TypeGraph>::read(json!(true), &reader.cx()).unwrap();
		assert_eq!(node.write(), Some(json!(true)));

		let mut node = Linkable::<TypeGraph>::read(json!(7), &reader.cx()).unwrap();
		if let Linkable::Link(link) = &mut node {
			link.href = "https://example.com/7".to_string();
		}
		assert_eq!(node.write(), Some(json!("https://example.com/7")));
	}

	#[test]
	fn null_is_not_a_resource() {
		let reader = TypeRegistry::global().reader();
		assert!(Linkable::<String>::read(json!(null), &reader.cx()).unwrap_err().is_malformed());
	}
}
