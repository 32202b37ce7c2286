use serde_json::{Map, Value};

use crate::{
	macros::{entity, thin_models},
	ContextScope, EntityKind, EntityReader, Field, GraphError, Model, ModelDecl,
};

use super::{Node, Object};

entity! {
	/// Fields of anything which can send and receive activities
	pub struct ActorEntity {
		preferred_username: Option<String> = "preferredUsername",
		inbox: Option<Node> = "inbox",
		outbox: Option<Node> = "outbox",
		following: Option<Node> = "following",
		followers: Option<Node> = "followers",
		liked: Option<Node> = "liked",
		streams: Option<Node> = "streams",
		endpoints: Option<Value> = "endpoints",
		public_key: Option<Value> = "publicKey",
		#[cfg(feature = "activitypub-miscellaneous-terms")]
		manually_approves_followers: Option<bool> = "manuallyApprovesFollowers",
		#[cfg(feature = "activitypub-miscellaneous-terms")]
		moved_to: Option<Node> = "movedTo",
	}
	required [inbox, outbox]
}

/// Actor layer. It has no type name of its own: any object with both an inbox and an outbox
/// gets it, whatever its declared type
#[derive(Debug, Clone, Copy)]
pub struct Actor;

impl Model for Actor {
	type Entity = ActorEntity;

	const KIND: EntityKind = EntityKind::new("as:Actor");

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn infer(obj: &Map<String, Value>, _scope: &ContextScope) -> Option<bool> {
		let present = |key: &str| obj.get(key).is_some_and(|x| !x.is_null());
		Some(present("inbox") && present("outbox"))
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<ActorEntity, GraphError> {
		ActorEntity::read_fields(r)
	}

	fn create() -> Field<ActorEntity> {
		ActorEntity::empty()
	}
}

thin_models! {
	Application: Object = "Application" supplants ["Object"];
	Group: Object = "Group" supplants ["Object"];
	Organization: Object = "Organization" supplants ["Object"];
	Person: Object = "Person" supplants ["Object"];
	Service: Object = "Service" supplants ["Object"];
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use crate::{vocab::{Actor, Group, Object}, GraphError, Identified, TypeGraph, TypeRegistry};

	#[test]
	fn actors_round_trip() {
		let doc = json!({
			"id": "https://example.com/groups/g",
			"type": "Group",
			"preferredUsername": "g",
			"inbox": "https://example.com/groups/g/inbox",
			"outbox": "https://example.com/groups/g/outbox",
			"followers": "https://example.com/groups/g/followers",
			"publicKey": {
				"id": "https://example.com/groups/g#main-key",
				"owner": "https://example.com/groups/g",
				"publicKeyPem": "-----BEGIN PUBLIC KEY-----",
			},
		});
		let graph = TypeGraph::from_value(doc.clone(), TypeRegistry::global()).unwrap();
		assert!(graph.is::<Group>());
		let actor = graph.project::<Actor>().unwrap();
		assert_eq!(actor.preferred_username.as_deref(), Some("g"));
		assert_eq!(actor.followers.as_ref().and_then(Identified::ld_id), Some("https://example.com/groups/g/followers"));
		assert_eq!(graph.to_value(), doc);
	}

	#[test]
	fn building_an_actor_needs_its_boxes() {
		let mut graph = TypeGraph::new();
		assert!(matches!(graph.extend::<Actor>(), Err(GraphError::InvalidEntity { .. })));
		assert!(!graph.is::<Object>());
	}
}
