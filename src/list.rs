use serde_json::Value;

use crate::{GraphError, Identified, LdField, Linkable, ReadCx};

/// Ordered values of a property which may appear either bare or as an array
#[derive(Debug, Clone, PartialEq)]
pub struct ListOrOne<T>(Vec<T>);

impl<T> Default for ListOrOne<T> {
	fn default() -> Self {
		ListOrOne(Vec::new())
	}
}

impl<T> ListOrOne<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn one(value: T) -> Self {
		ListOrOne(vec![value])
	}

	pub fn push(&mut self, value: T) {
		self.0.push(value);
	}

	pub fn into_vec(self) -> Vec<T> {
		self.0
	}
}

impl<T> std::ops::Deref for ListOrOne<T> {
	type Target = [T];

	fn deref(&self) -> &[T] {
		&self.0
	}
}

impl<T> std::ops::DerefMut for ListOrOne<T> {
	fn deref_mut(&mut self) -> &mut [T] {
		&mut self.0
	}
}

impl<T> From<Vec<T>> for ListOrOne<T> {
	fn from(value: Vec<T>) -> Self {
		ListOrOne(value)
	}
}

impl<T> FromIterator<T> for ListOrOne<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		ListOrOne(iter.into_iter().collect())
	}
}

impl<T> IntoIterator for ListOrOne<T> {
	type Item = T;
	type IntoIter = std::vec::IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a, T> IntoIterator for &'a ListOrOne<T> {
	type Item = &'a T;
	type IntoIter = std::slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl<T: Identified> ListOrOne<T> {
	/// id of the first item
	pub fn id(&self) -> Option<&str> {
		self.0.first()?.ld_id()
	}

	pub fn ids(&self) -> Vec<&str> {
		self.0.iter().filter_map(Identified::ld_id).collect()
	}
}

impl<T> ListOrOne<Linkable<T>> {
	/// embedded objects, skipping bare links
	pub fn objects(&self) -> impl Iterator<Item = &T> {
		self.0.iter().filter_map(Linkable::get)
	}

	pub fn links(&self) -> impl Iterator<Item = &crate::LinkRef> {
		self.0.iter().filter_map(Linkable::link_ref)
	}
}

impl<T: LdField> LdField for ListOrOne<T> {
	fn read(value: Value, cx: &ReadCx<'_>) -> Result<Self, GraphError> {
		match value {
			Value::Null => Ok(ListOrOne::new()),
			// AP disallows arrays of arrays, so elements are read as plain values
			Value::Array(arr) => arr.into_iter()
				.map(|x| T::read(x, cx))
				.collect::<Result<Vec<T>, GraphError>>()
				.map(ListOrOne),
			x => Ok(ListOrOne::one(T::read(x, cx)?)),
		}
	}

	fn write(&self) -> Option<Value> {
		match self.0.as_slice() {
			[] => None,
			[one] => one.write(),
			many => Some(Value::Array(many.iter().filter_map(LdField::write).collect())),
		}
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{LdField, ListOrOne, TypeRegistry};

	#[test]
	fn single_element_is_written_bare() {
		let list = ListOrOne::one("https://example.com/a".to_string());
		assert_eq!(list.write(), Some(json!("https://example.com/a")));
	}

	#[test]
	fn bare_value_and_one_element_array_read_the_same() {
		let reader = TypeRegistry::global().reader();
		let cx = reader.cx();
		let bare = ListOrOne::<String>::read(json!("a"), &cx).unwrap();
		let arr = ListOrOne::<String>::read(json!(["a"]), &cx).unwrap();
		assert_eq!(bare.len(), 1);
		assert_eq!(bare, arr);
	}

	#[test]
	fn empty_list_is_omitted_and_many_stay_an_array() {
		assert_eq!(ListOrOne::<String>::new().write(), None);
		let many : ListOrOne<String> = vec!["a".to_string(), "b".to_string()].into();
		assert_eq!(many.write(), Some(json!(["a", "b"])));
	}

	#[test]
	fn mismatched_element_fails_the_whole_list() {
		let reader = TypeRegistry::global().reader();
		let err = ListOrOne::<String>::read(json!(["a", 3]), &reader.cx()).unwrap_err();
		assert!(err.is_malformed());
	}
}
