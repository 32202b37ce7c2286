use crate::{
	macros::{entity, thin_models},
	node::LINK_KIND,
	EntityKind, EntityReader, Field, GraphError, ListOrOne, Model,
};

entity! {
	/// Fields of a top level `Link`; `name`, `mediaType` and `preview` come with the Object layer
	pub struct LinkEntity {
		href: Option<String> = "href",
		rel: ListOrOne<String> = "rel",
		hreflang: Option<String> = "hreflang",
		height: Option<u64> = "height",
		width: Option<u64> = "width",
	}
	required [href]
}

#[derive(Debug, Clone, Copy)]
pub struct Link;

impl Model for Link {
	type Entity = LinkEntity;

	const KIND: EntityKind = LINK_KIND;
	const TYPE_NAME: Option<&'static str> = Some("Link");
	const SUPPLANTS: &'static [&'static str] = &["Object"];

	fn read(r: &mut EntityReader<'_, '_>) -> Result<LinkEntity, GraphError> {
		LinkEntity::read_fields(r)
	}

	fn create() -> Field<LinkEntity> {
		LinkEntity::empty()
	}
}

thin_models! {
	Mention: Link = "Mention" supplants ["Link"];
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{vocab::Link, GraphError, TypeGraph, TypeRegistry};

	#[test]
	fn top_level_links_keep_their_details() {
		let doc = json!({ "type": "Link", "href": "https://example.com/a", "rel": ["canonical", "me"], "hreflang": "en" });
		let graph = TypeGraph::from_value(doc.clone(), TypeRegistry::global()).unwrap();
		let link = graph.project::<Link>().unwrap();
		assert_eq!(link.rel.len(), 2);
		assert_eq!(graph.visible_type_names(), ["Link"]);
		assert_eq!(graph.to_value(), doc);
	}

	#[test]
	fn href_is_required() {
		let err = TypeGraph::from_value(json!({ "type": "Link", "href": 12 }), TypeRegistry::global()).unwrap_err();
		assert!(matches!(err, GraphError::InvalidEntity { source, .. } if source.0 == "href"));
	}
}
