use crate::{
	macros::{entity, thin_models},
	EntityKind, EntityReader, Field, GraphError, ListOrOne, Model, ModelDecl,
};

use super::{Node, Object};

entity! {
	pub struct ActivityEntity {
		actor: ListOrOne<Node> = "actor",
		object: ListOrOne<Node> = "object",
		target: ListOrOne<Node> = "target",
		result: ListOrOne<Node> = "result",
		origin: ListOrOne<Node> = "origin",
		instrument: ListOrOne<Node> = "instrument",
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Activity;

impl Model for Activity {
	type Entity = ActivityEntity;

	const KIND: EntityKind = EntityKind::new("as:Activity");
	const TYPE_NAME: Option<&'static str> = Some("Activity");
	const SUPPLANTS: &'static [&'static str] = &["Object"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<Object>())
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<ActivityEntity, GraphError> {
		ActivityEntity::read_fields(r)
	}

	fn create() -> Field<ActivityEntity> {
		ActivityEntity::empty()
	}
}

// activity subtypes never hide "Activity"
thin_models! {
	Accept: Activity = "Accept";
	Add: Activity = "Add";
	Announce: Activity = "Announce";
	Block: Activity = "Block";
	Create: Activity = "Create";
	Delete: Activity = "Delete";
	Dislike: Activity = "Dislike";
	Flag: Activity = "Flag";
	Follow: Activity = "Follow";
	Ignore: Activity = "Ignore";
	Invite: Activity = "Invite";
	Join: Activity = "Join";
	Leave: Activity = "Leave";
	Like: Activity = "Like";
	Listen: Activity = "Listen";
	Move: Activity = "Move";
	Offer: Activity = "Offer";
	Read: Activity = "Read";
	Reject: Activity = "Reject";
	Remove: Activity = "Remove";
	TentativeAccept: Activity = "TentativeAccept";
	TentativeReject: Activity = "TentativeReject";
	Undo: Activity = "Undo";
	Update: Activity = "Update";
	View: Activity = "View";

	/// activity without an `object`
	IntransitiveActivity: Activity = "IntransitiveActivity" supplants ["Activity"];
	Arrive: IntransitiveActivity = "Arrive";
	Travel: IntransitiveActivity = "Travel";
}

entity! {
	pub struct QuestionEntity {
		one_of: ListOrOne<Node> = "oneOf",
		any_of: ListOrOne<Node> = "anyOf",
		closed: Option<serde_json::Value> = "closed",
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Question;

impl Model for Question {
	type Entity = QuestionEntity;

	const KIND: EntityKind = EntityKind::new("as:Question");
	const TYPE_NAME: Option<&'static str> = Some("Question");
	const SUPPLANTS: &'static [&'static str] = &["IntransitiveActivity"];

	fn base() -> Option<ModelDecl> {
		Some(ModelDecl::of::<IntransitiveActivity>())
	}

	fn read(r: &mut EntityReader<'_, '_>) -> Result<QuestionEntity, GraphError> {
		QuestionEntity::read_fields(r)
	}

	fn create() -> Field<QuestionEntity> {
		QuestionEntity::empty()
	}
}
