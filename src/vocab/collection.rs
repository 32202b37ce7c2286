use crate::{
	macros::entity,
	EntityKind, EntityReader, Field, GraphError, ListOrOne, Model, ModelDecl,
};

use super::{Node, Object};

entity! {
	pub struct CollectionEntity {
		total_items: Option<u64> = "totalItems",
		current: Option<Node> = "current",
		first: Option<Node> = "first",
		last: Option<Node> = "last",
		items: ListOrOne<Node> = "items",
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Collection;

impl Model for Collection {
	type Entity = CollectionEntity;

	const KIND: EntityKind = EntityKind::new("as:Collection");
	const TYPE_NAME: Option<&'static str> = Some("Collection");
	const SUPPLANTS: &'static [&'static str] = &["Object"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<CollectionEntity, GraphError> {
		CollectionEntity::read_fields(r)
	}

	fn create() -> Field<CollectionEntity> {
		CollectionEntity::empty()
	}
}

entity! {
	pub struct OrderedCollectionEntity {
		ordered_items: ListOrOne<Node> = "orderedItems",
	}
}

#[derive(Debug, Clone, Copy)]
pub struct OrderedCollection;

impl Model for OrderedCollection {
	type Entity = OrderedCollectionEntity;

	const KIND: EntityKind = EntityKind::new("as:OrderedCollection");
	const TYPE_NAME: Option<&'static str> = Some("OrderedCollection");
	const SUPPLANTS: &'static [&'static str] = &["Collection"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Collection>())
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<OrderedCollectionEntity, GraphError> {
		OrderedCollectionEntity::read_fields(r)
	}

	fn create() -> Field<OrderedCollectionEntity> {
		OrderedCollectionEntity::empty()
	}
}

entity! {
	pub struct CollectionPageEntity {
		part_of: Option<Node> = "partOf",
		next: Option<Node> = "next",
		prev: Option<Node> = "prev",
	}
}

#[derive(Debug, Clone, Copy)]
pub struct CollectionPage;

impl Model for CollectionPage {
	type Entity = CollectionPageEntity;

	const KIND: EntityKind = EntityKind::new("as:CollectionPage");
	const TYPE_NAME: Option<&'static str> = Some("CollectionPage");
	const SUPPLANTS: &'static [&'static str] = &["Collection"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Collection>())
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<CollectionPageEntity, GraphError> {
		CollectionPageEntity::read_fields(r)
	}

	fn create() -> Field<CollectionPageEntity> {
		CollectionPageEntity::empty()
	}
}

entity! {
	pub struct OrderedCollectionPageEntity {
		start_index: Option<u64> = "startIndex",
	}
}

/// Page of an ordered collection. It is both a page and an ordered collection, so it hides both
#[derive(Debug, Clone, Copy)]
pub struct OrderedCollectionPage;

impl Model for OrderedCollectionPage {
	type Entity = OrderedCollectionPageEntity;

	const KIND: EntityKind = EntityKind::new("as:OrderedCollectionPage");
	const TYPE_NAME: Option<&'static str> = Some("OrderedCollectionPage");
	const SUPPLANTS: &'static [&'static str] = &["OrderedCollection", "CollectionPage"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<CollectionPage>())
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<OrderedCollectionPageEntity, GraphError> {
		OrderedCollectionPageEntity::read_fields(r)
	}

	fn create() -> Field<OrderedCollectionPageEntity> {
		OrderedCollectionPageEntity::empty()
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{vocab::{Collection, CollectionPage, OrderedCollection, OrderedCollectionPage}, TypeGraph, TypeRegistry};

	#[test]
	fn outbox_pages_round_trip() {
		let doc = json!({
			"id": "https://example.com/users/a/outbox?page=1",
			"type": "OrderedCollectionPage",
			"partOf": "https://example.com/users/a/outbox",
			"next": "https://example.com/users/a/outbox?page=2",
			"totalItems": 3,
			"orderedItems": [
				"https://example.com/activities/1",
				{ "id": "https://example.com/activities/2", "type": "Like", "object": "https://remote.example/n" },
			],
		});
		let graph = TypeGraph::from_value(doc.clone(), TypeRegistry::global()).unwrap();
		assert_eq!(graph.project::<Collection>().unwrap().total_items, Some(3));
		assert_eq!(graph.project::<OrderedCollection>().unwrap().ordered_items.len(), 2);
		assert!(graph.project::<CollectionPage>().unwrap().prev.is_none());
		assert!(graph.is::<OrderedCollectionPage>());
		assert_eq!(graph.to_value(), doc);
	}

	#[test]
	fn building_a_page_fills_in_its_chain() {
		let mut graph = TypeGraph::new();
		graph.extend::<OrderedCollectionPage>().unwrap();
		assert!(graph.is::<Collection>());
		assert!(graph.is::<CollectionPage>());
		// ordered collection is not a base of the page, only a supplanted name
		assert!(!graph.is::<OrderedCollection>());
		assert_eq!(graph.visible_type_names(), ["OrderedCollectionPage"]);
	}
}
