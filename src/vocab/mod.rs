//! Built-in ActivityStreams vocabulary, plus the common fediverse extensions enabled by cargo
//! features

mod activity;
mod actor;
mod collection;
mod link;
mod object;

#[cfg(feature = "activitypub-miscellaneous-terms")]
mod misc;
#[cfg(feature = "toot")]
mod toot;

pub use activity::*;
pub use actor::*;
pub use collection::*;
pub use link::*;
pub use object::*;

#[cfg(feature = "activitypub-miscellaneous-terms")]
pub use misc::*;
#[cfg(feature = "toot")]
pub use toot::*;

use crate::{GraphError, Linkable, ModelDecl, TypeGraph, TypeRegistry};

/// A property value which may be a reference or an embedded object of any type
pub type Node = Linkable<TypeGraph>;

/// every built-in model, bases first
pub fn declarations() -> Vec<ModelDecl> {
	#[allow(unused_mut)]
	let mut out = vec![
		ModelDecl::of::<Object>(),
		ModelDecl::of::<Link>(),
		ModelDecl::of::<Mention>(),

		ModelDecl::of::<Article>(),
		ModelDecl::of::<Event>(),
		ModelDecl::of::<Note>(),
		ModelDecl::of::<Place>(),
		ModelDecl::of::<Profile>(),
		ModelDecl::of::<Relationship>(),
		ModelDecl::of::<Tombstone>(),
		ModelDecl::of::<Document>(),
		ModelDecl::of::<Audio>(),
		ModelDecl::of::<Image>(),
		ModelDecl::of::<Page>(),
		ModelDecl::of::<Video>(),

		ModelDecl::of::<Actor>(),
		ModelDecl::of::<Application>(),
		ModelDecl::of::<Group>(),
		ModelDecl::of::<Organization>(),
		ModelDecl::of::<Person>(),
		ModelDecl::of::<Service>(),

		ModelDecl::of::<Collection>(),
		ModelDecl::of::<OrderedCollection>(),
		ModelDecl::of::<CollectionPage>(),
		ModelDecl::of::<OrderedCollectionPage>(),

		ModelDecl::of::<Activity>(),
		ModelDecl::of::<Accept>(),
		ModelDecl::of::<Add>(),
		ModelDecl::of::<Announce>(),
		ModelDecl::of::<Block>(),
		ModelDecl::of::<Create>(),
		ModelDecl::of::<Delete>(),
		ModelDecl::of::<Dislike>(),
		ModelDecl::of::<Flag>(),
		ModelDecl::of::<Follow>(),
		ModelDecl::of::<Ignore>(),
		ModelDecl::of::<Invite>(),
		ModelDecl::of::<Join>(),
		ModelDecl::of::<Leave>(),
		ModelDecl::of::<Like>(),
		ModelDecl::of::<Listen>(),
		ModelDecl::of::<Move>(),
		ModelDecl::of::<Offer>(),
		ModelDecl::of::<Read>(),
		ModelDecl::of::<Reject>(),
		ModelDecl::of::<Remove>(),
		ModelDecl::of::<TentativeAccept>(),
		ModelDecl::of::<TentativeReject>(),
		ModelDecl::of::<Undo>(),
		ModelDecl::of::<Update>(),
		ModelDecl::of::<View>(),
		ModelDecl::of::<IntransitiveActivity>(),
		ModelDecl::of::<Arrive>(),
		ModelDecl::of::<Travel>(),
		ModelDecl::of::<Question>(),
	];

	#[cfg(feature = "activitypub-miscellaneous-terms")]
	out.extend([
		ModelDecl::of::<Sensitive>(),
		ModelDecl::of::<QuoteUrl>(),
		ModelDecl::of::<Hashtag>(),
	]);

	#[cfg(feature = "toot")]
	out.extend([
		ModelDecl::of::<TootTerms>(),
		ModelDecl::of::<Emoji>(),
	]);

	out
}

/// registry holding [`declarations`], what [`TypeRegistry::global`] serves
pub fn activitystreams() -> Result<TypeRegistry, GraphError> {
	let mut builder = TypeRegistry::builder();
	for decl in declarations() {
		builder.register_decl(decl)?;
	}
	builder.build()
}

#[cfg(test)]
mod test {
	#[test]
	fn builtin_vocabulary_is_consistent() {
		let registry = super::activitystreams().unwrap();
		assert_eq!(registry.entries().len(), super::declarations().len());
		assert!(registry.lookup("OrderedCollectionPage").is_some());
		assert!(registry.derived_names("Activity").unwrap().contains("Question"));
		assert!(registry.derived_names("Document").unwrap().contains("Video"));
		assert!(registry.derived_names("Create").is_none());
	}
}
