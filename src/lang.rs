use serde_json::{Map, Value};

/// Natural language text: an optional untagged value plus per-language variants.
///
/// On the wire the two halves live in sibling properties, `<prop>` and `<prop>Map`. Tags keep
/// the order they were read or set in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageText {
	default: Option<String>,
	// only ever holds strings
	map: Map<String, Value>,
}

impl LanguageText {
	pub fn new(text: &str) -> Self {
		LanguageText { default: Some(text.to_string()), map: Map::new() }
	}

	/// flattened map key for a language and optional region, `("en", Some("us"))` -> `"en-us"`
	pub fn key(language: &str, region: Option<&str>) -> String {
		match region {
			Some(region) => format!("{language}-{region}"),
			None => language.to_string(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.default.is_none() && self.map.is_empty()
	}

	pub fn default_value(&self) -> Option<&str> {
		self.default.as_deref()
	}

	pub fn set_default(&mut self, text: Option<&str>) {
		self.default = text.map(|x| x.to_string());
	}

	pub fn get(&self, tag: &str) -> Option<&str> {
		self.map.get(tag).and_then(Value::as_str)
	}

	pub fn get_region(&self, language: &str, region: &str) -> Option<&str> {
		self.get(&Self::key(language, Some(region)))
	}

	pub fn set(&mut self, tag: &str, text: &str) {
		self.map.insert(tag.to_string(), Value::String(text.to_string()));
	}

	pub fn remove(&mut self, tag: &str) -> Option<String> {
		match self.map.remove(tag)? {
			Value::String(text) => Some(text),
			_ => None,
		}
	}

	pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
		self.map.iter().filter_map(|(k, v)| Some((k.as_str(), v.as_str()?)))
	}

	/// closest match for a tag: exact, then primary language subtag, then untagged, then anything
	pub fn best(&self, tag: &str) -> Option<&str> {
		if let Some(x) = self.get(tag) {
			return Some(x);
		}
		if let Some((primary, _)) = tag.split_once('-') {
			if let Some(x) = self.get(primary) {
				return Some(x);
			}
		}
		self.default_value()
			.or_else(|| self.map.values().find_map(Value::as_str))
	}

	pub(crate) fn parse_default(value: &Value) -> Option<String> {
		value.as_str().map(|x| x.to_string())
	}

	/// the map as read, or nothing if any tag holds something other than a string
	pub(crate) fn parse_map(value: &Value) -> Option<Map<String, Value>> {
		let obj = value.as_object()?;
		if !obj.values().all(Value::is_string) {
			return None;
		}
		Some(obj.clone())
	}

	/// merge the two sibling properties, values with the wrong shape are ignored
	pub fn from_props(default: Option<&Value>, map: Option<&Value>) -> Self {
		LanguageText {
			default: default.and_then(Self::parse_default),
			map: map.and_then(Self::parse_map).unwrap_or_default(),
		}
	}

	pub(crate) fn with_map(mut self, map: Map<String, Value>) -> Self {
		self.map = map;
		self
	}

	/// split back into `<key>` and `<key>Map`, skipping whichever half is empty
	pub fn write_props(&self, out: &mut Map<String, Value>, key: &str) {
		if let Some(default) = &self.default {
			out.insert(key.to_string(), Value::String(default.clone()));
		}
		if !self.map.is_empty() {
			out.insert(format!("{key}Map"), Value::Object(self.map.clone()));
		}
	}
}

#[cfg(test)]
mod test {
	use super::LanguageText;

	#[test]
	fn summary_and_summary_map_are_merged_and_split_back() {
		let doc = serde_json::json!({
			"summary": "hi",
			"summaryMap": { "en": "hi", "fr": "salut" },
		});
		let text = LanguageText::from_props(doc.get("summary"), doc.get("summaryMap"));
		assert_eq!(text.default_value(), Some("hi"));
		assert_eq!(text.get("fr"), Some("salut"));

		let mut out = serde_json::Map::new();
		text.write_props(&mut out, "summary");
		assert_eq!(
			serde_json::to_string(&serde_json::Value::Object(out)).unwrap(),
			r#"{"summary":"hi","summaryMap":{"en":"hi","fr":"salut"}}"#,
		);
	}

	#[test]
	fn language_tags_keep_their_wire_order() {
		let raw = r#"{"summaryMap":{"fr":"salut","en":"hi","de":"hallo"}}"#;
		let doc: serde_json::Value = serde_json::from_str(raw).unwrap();
		let mut text = LanguageText::from_props(None, doc.get("summaryMap"));
		assert_eq!(text.languages().map(|(k, _)| k).collect::<Vec<_>>(), ["fr", "en", "de"]);

		let mut out = serde_json::Map::new();
		text.write_props(&mut out, "summary");
		assert_eq!(serde_json::to_string(&serde_json::Value::Object(out)).unwrap(), raw);

		text.set("it", "ciao");
		assert_eq!(text.languages().last(), Some(("it", "ciao")));
	}

	#[test]
	fn maps_with_non_string_values_are_rejected() {
		let doc = serde_json::json!({ "nameMap": { "en": "hi", "fr": 3 } });
		assert!(LanguageText::parse_map(&doc["nameMap"]).is_none());
	}

	#[test]
	fn empty_map_is_not_emitted() {
		let mut out = serde_json::Map::new();
		LanguageText::new("plain").write_props(&mut out, "name");
		assert_eq!(serde_json::Value::Object(out), serde_json::json!({ "name": "plain" }));
	}

	#[test]
	fn region_subtags_flatten_into_one_key() {
		let mut text = LanguageText::default();
		text.set(&LanguageText::key("en", Some("us")), "color");
		assert_eq!(text.get("en-us"), Some("color"));
		assert_eq!(text.get_region("en", "us"), Some("color"));
		assert_eq!(text.best("en-us"), Some("color"));
	}

	#[test]
	fn best_falls_back_to_primary_language_then_default() {
		let mut text = LanguageText::new("fallback");
		text.set("pt", "olá");
		assert_eq!(text.best("pt-br"), Some("olá"));
		assert_eq!(text.best("de"), Some("fallback"));
		text.set_default(None);
		assert_eq!(text.best("de"), Some("olá"));
	}
}
