use crate::{vocab::{Object, ObjectEntity}, Identified, TypeGraph};

pub const PUBLIC : &str = "https://www.w3.org/ns/activitystreams#Public";

pub trait Addressed {
	/// every recipient: to, bto, cc and bcc
	fn addressed(&self) -> Vec<String>;
	/// primary recipients only: to and bto
	fn mentioning(&self) -> Vec<String>;

	fn is_public(&self) -> bool {
		self.addressed().iter().any(|x| x == PUBLIC)
	}
}

fn ids<T: Identified>(list: &[T]) -> impl Iterator<Item = String> + '_ {
	list.iter().filter_map(Identified::ld_id).map(|x| x.to_string())
}

impl Addressed for ObjectEntity {
	fn addressed(&self) -> Vec<String> {
		ids(&self.to)
			.chain(ids(&self.bto))
			.chain(ids(&self.cc))
			.chain(ids(&self.bcc))
			.collect()
	}

	fn mentioning(&self) -> Vec<String> {
		ids(&self.to)
			.chain(ids(&self.bto))
			.collect()
	}
}

impl Addressed for TypeGraph {
	fn addressed(&self) -> Vec<String> {
		self.project::<Object>()
			.map(|x| x.addressed())
			.unwrap_or_default()
	}

	fn mentioning(&self) -> Vec<String> {
		self.project::<Object>()
			.map(|x| x.mentioning())
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod test {
	use super::Addressed;
	use crate::{TypeGraph, TypeRegistry};

	fn note() -> TypeGraph {
		TypeGraph::from_value(serde_json::json!({
			"id": "http://localhost:8080/obj/1",
			"type": "Note",
			"content": "hello world!",
			"published": "2024-06-04T17:09:20+00:00",
			"to": ["http://localhost:8080/usr/root/followers"],
			"bto": ["https://localhost:8080/usr/secret"],
			"cc": [crate::target::PUBLIC],
			"bcc": [],
		}), TypeRegistry::global()).unwrap()
	}

	#[test]
	fn addressed_trait_finds_all_targets() {
		assert_eq!(
			note().addressed(),
			vec![
				"http://localhost:8080/usr/root/followers".to_string(),
				"https://localhost:8080/usr/secret".to_string(),
				crate::target::PUBLIC.to_string(),
			]
		);
		assert!(note().is_public());
	}

	#[test]
	fn primary_targets_only_finds_to_and_bto() {
		assert_eq!(
			note().mentioning(),
			vec![
				"http://localhost:8080/usr/root/followers".to_string(),
				"https://localhost:8080/usr/secret".to_string(),
			]
		);
	}
}
