use chrono::{DateTime, Utc};

use crate::{
	macros::{entity, thin_models},
	EntityKind, EntityReader, Field, GraphError, LanguageText, ListOrOne, Model, ModelDecl,
};

use super::Node;

entity! {
	/// Fields every ActivityStreams object may carry
	pub struct ObjectEntity {
		attachment: ListOrOne<Node> = "attachment",
		attributed_to: ListOrOne<Node> = "attributedTo",
		audience: ListOrOne<Node> = "audience",
		content: LanguageText = "content",
		context: Option<Node> = "context",
		name: LanguageText = "name",
		end_time: Option<DateTime<Utc>> = "endTime",
		generator: ListOrOne<Node> = "generator",
		icon: ListOrOne<Node> = "icon",
		image: ListOrOne<Node> = "image",
		in_reply_to: ListOrOne<Node> = "inReplyTo",
		location: ListOrOne<Node> = "location",
		preview: ListOrOne<Node> = "preview",
		published: Option<DateTime<Utc>> = "published",
		replies: Option<Node> = "replies",
		likes: Option<Node> = "likes",
		shares: Option<Node> = "shares",
		start_time: Option<DateTime<Utc>> = "startTime",
		summary: LanguageText = "summary",
		tag: ListOrOne<Node> = "tag",
		updated: Option<DateTime<Utc>> = "updated",
		url: ListOrOne<Node> = "url",
		to: ListOrOne<Node> = "to",
		bto: ListOrOne<Node> = "bto",
		cc: ListOrOne<Node> = "cc",
		bcc: ListOrOne<Node> = "bcc",
		media_type: Option<String> = "mediaType",
		// xsd:duration, kept as written
		duration: Option<String> = "duration",
	}
}

/// The root of the vocabulary: every parsed document carries this layer
#[derive(Debug, Clone, Copy)]
pub struct Object;

impl Model for Object {
	type Entity = ObjectEntity;

	const KIND: EntityKind = EntityKind::new("as:Object");
	const TYPE_NAME: Option<&'static str> = Some("Object");

	fn read(r: &mut EntityReader<'_, '_>) -> Result<ObjectEntity, GraphError> {
		ObjectEntity::read_fields(r)
	}

	fn create() -> Field<ObjectEntity> {
		ObjectEntity::empty()
	}
}

thin_models! {
	Article: Object = "Article" supplants ["Object"];
	Event: Object = "Event" supplants ["Object"];
	Note: Object = "Note" supplants ["Object"];

	Document: Object = "Document" supplants ["Object"];
	Audio: Document = "Audio" supplants ["Document"];
	Image: Document = "Image" supplants ["Document"];
	Page: Document = "Page" supplants ["Document"];
	Video: Document = "Video" supplants ["Document"];
}

entity! {
	pub struct PlaceEntity {
		accuracy: Option<f64> = "accuracy",
		altitude: Option<f64> = "altitude",
		latitude: Option<f64> = "latitude",
		longitude: Option<f64> = "longitude",
		radius: Option<f64> = "radius",
		units: Option<String> = "units",
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Place;

impl Model for Place {
	type Entity = PlaceEntity;

	const KIND: EntityKind = EntityKind::new("as:Place");
	const TYPE_NAME: Option<&'static str> = Some("Place");
	const SUPPLANTS: &'static [&'static str] = &["Object"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<PlaceEntity, GraphError> {
		PlaceEntity::read_fields(r)
	}

	fn create() -> Field<PlaceEntity> {
		PlaceEntity::empty()
	}
}

entity! {
	pub struct ProfileEntity {
		describes: Option<Node> = "describes",
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Profile;

impl Model for Profile {
	type Entity = ProfileEntity;

	const KIND: EntityKind = EntityKind::new("as:Profile");
	const TYPE_NAME: Option<&'static str> = Some("Profile");
	const SUPPLANTS: &'static [&'static str] = &["Object"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<ProfileEntity, GraphError> {
		ProfileEntity::read_fields(r)
	}

	fn create() -> Field<ProfileEntity> {
		ProfileEntity::empty()
	}
}

entity! {
	pub struct RelationshipEntity {
		subject: Option<Node> = "subject",
		object: ListOrOne<Node> = "object",
		relationship: ListOrOne<Node> = "relationship",
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Relationship;

impl Model for Relationship {
	type Entity = RelationshipEntity;

	const KIND: EntityKind = EntityKind::new("as:Relationship");
	const TYPE_NAME: Option<&'static str> = Some("Relationship");
	const SUPPLANTS: &'static [&'static str] = &["Object"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<RelationshipEntity, GraphError> {
		RelationshipEntity::read_fields(r)
	}

	fn create() -> Field<RelationshipEntity> {
		RelationshipEntity::empty()
	}
}

entity! {
	pub struct TombstoneEntity {
		former_type: Option<String> = "formerType",
		deleted: Option<DateTime<Utc>> = "deleted",
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Tombstone;

impl Model for Tombstone {
	type Entity = TombstoneEntity;

	const KIND: EntityKind = EntityKind::new("as:Tombstone");
	const TYPE_NAME: Option<&'static str> = Some("Tombstone");
	const SUPPLANTS: &'static [&'static str] = &["Object"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<TombstoneEntity, GraphError> {
		TombstoneEntity::read_fields(r)
	}

	fn create() -> Field<TombstoneEntity> {
		TombstoneEntity::empty()
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{vocab::{Document, Image, Object, Place, Tombstone}, TypeGraph, TypeRegistry};

	#[test]
	fn documents_stack_their_layers() {
		let doc = json!({
			"type": "Image",
			"url": "https://cdn.example.com/cat.png",
			"mediaType": "image/png",
			"name": "a cat",
		});
		let graph = TypeGraph::from_value(doc.clone(), TypeRegistry::global()).unwrap();
		assert!(graph.is::<Document>());
		assert!(graph.is::<Image>());
		assert_eq!(graph.visible_type_names(), ["Image"]);
		let object = graph.project::<Object>().unwrap();
		assert_eq!(object.media_type.as_deref(), Some("image/png"));
		assert_eq!(object.name.default_value(), Some("a cat"));
		assert_eq!(graph.to_value(), doc);
	}

	#[test]
	fn places_have_coordinates() {
		let graph = TypeGraph::from_value(
			json!({ "type": "Place", "name": "Fresno Area", "latitude": 36.75, "longitude": 119.7667, "units": "miles" }),
			TypeRegistry::global(),
		).unwrap();
		let place = graph.project::<Place>().unwrap();
		assert_eq!(place.latitude, Some(36.75));
		assert_eq!(place.units.as_deref(), Some("miles"));
	}

	#[test]
	fn tombstones_remember_what_they_were() {
		let graph = TypeGraph::from_value(
			json!({ "type": "Tombstone", "formerType": "Note", "deleted": "2016-03-17T00:00:00+00:00" }),
			TypeRegistry::global(),
		).unwrap();
		let tombstone = graph.project::<Tombstone>().unwrap();
		assert_eq!(tombstone.former_type.as_deref(), Some("Note"));
		assert!(tombstone.deleted.is_some());
		assert_eq!(graph.visible_type_names(), ["Tombstone"]);
	}
}
