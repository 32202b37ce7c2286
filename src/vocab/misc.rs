//! Terms outside the activitystreams vocabulary which most fediverse software understands.
//! They only attach when the document's context defines them.

use crate::{
	macros::entity,
	ContextEntry, EntityKind, EntityReader, Field, GraphError, Model, ModelDecl,
};

use super::{Link, Object};

entity! {
	pub struct SensitiveEntity {
		sensitive: Option<bool> = "sensitive",
	}
}

/// content warning flag, as in `"sensitive": true`
#[derive(Debug, Clone, Copy)]
pub struct Sensitive;

impl Model for Sensitive {
	type Entity = SensitiveEntity;

	const KIND: EntityKind = EntityKind::new("as:sensitive");

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn defining_context() -> Vec<ContextEntry> {
		vec![ContextEntry::term("sensitive", "as:sensitive")]
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<SensitiveEntity, GraphError> {
		SensitiveEntity::read_fields(r)
	}

	fn create() -> Field<SensitiveEntity> {
		SensitiveEntity::empty()
	}
}

entity! {
	pub struct QuoteUrlEntity {
		quote_url: Option<String> = "quoteUrl",
	}
}

#[derive(Debug, Clone, Copy)]
pub struct QuoteUrl;

impl Model for QuoteUrl {
	type Entity = QuoteUrlEntity;

	const KIND: EntityKind = EntityKind::new("as:quoteUrl");

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn defining_context() -> Vec<ContextEntry> {
		vec![ContextEntry::term("quoteUrl", "as:quoteUrl")]
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<QuoteUrlEntity, GraphError> {
		QuoteUrlEntity::read_fields(r)
	}

	fn create() -> Field<QuoteUrlEntity> {
		QuoteUrlEntity::empty()
	}
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HashtagEntity;

impl crate::Entity for HashtagEntity {
	fn write(&self, _out: &mut serde_json::Map<String, serde_json::Value>) {}
}

/// `#tag` links found in `tag`
#[derive(Debug, Clone, Copy)]
pub struct Hashtag;

impl Model for Hashtag {
	type Entity = HashtagEntity;

	const KIND: EntityKind = EntityKind::new("as:Hashtag");
	const TYPE_NAME: Option<&'static str> = Some("Hashtag");
	const SUPPLANTS: &'static [&'static str] = &["Link"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Link>())
	}

	fn defining_context() -> Vec<ContextEntry> {
		vec![ContextEntry::term("Hashtag", "as:Hashtag")]
	}

	fn read(_r: &mut EntityReader<'_, '_>) -> Result<HashtagEntity, GraphError> {
		Ok(HashtagEntity)
	}

	fn create() -> Field<HashtagEntity> {
		Ok(HashtagEntity)
	}
}
