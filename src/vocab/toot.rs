//! Mastodon extensions, from the `toot:` namespace

use serde_json::Value;

use crate::{
	macros::entity,
	ContextEntry, EntityKind, EntityReader, Field, GraphError, ListOrOne, Model, ModelDecl, TOOT,
};

use super::{Node, Object};

entity! {
	pub struct TootEntity {
		discoverable: Option<bool> = "discoverable",
		indexable: Option<bool> = "indexable",
		featured: Option<Node> = "featured",
		featured_tags: Option<Node> = "featuredTags",
		blurhash: Option<String> = "blurhash",
		focal_point: ListOrOne<f64> = "focalPoint",
		voters_count: Option<u64> = "votersCount",
		// opaque, it's an object with its own schema
		attribution_domains: Option<Value> = "attributionDomains",
	}
}

/// Mastodon specific terms, attached whenever the `toot` prefix is in scope
#[derive(Debug, Clone, Copy)]
pub struct TootTerms;

impl Model for TootTerms {
	type Entity = TootEntity;

	const KIND: EntityKind = EntityKind::new("toot:terms");

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn defining_context() -> Vec<ContextEntry> {
		vec![ContextEntry::term("toot", TOOT)]
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<TootEntity, GraphError> {
		TootEntity::read_fields(r)
	}

	fn create() -> Field<TootEntity> {
		TootEntity::empty()
	}
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmojiEntity;

impl crate::Entity for EmojiEntity {
	fn write(&self, _out: &mut serde_json::Map<String, Value>) {}
}

/// Custom emoji, usually found in `tag` with its image as `icon`
#[derive(Debug, Clone, Copy)]
pub struct Emoji;

impl Model for Emoji {
	type Entity = EmojiEntity;

	const KIND: EntityKind = EntityKind::new("toot:Emoji");
	const TYPE_NAME: Option<&'static str> = Some("Emoji");
	const SUPPLANTS: &'static [&'static str] = &["Object"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn defining_context() -> Vec<ContextEntry> {
		vec![ContextEntry::term("Emoji", "toot:Emoji")]
	}

	fn read(_r: &mut EntityReader<'_, '_>) -> Result<EmojiEntity, GraphError> {
		Ok(EmojiEntity)
	}

	fn create() -> Field<EmojiEntity> {
		Ok(EmojiEntity)
	}
}
