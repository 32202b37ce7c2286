use crate::{vocab::{Collection, Node, Object}, Field, FieldErr, Linkable, TypeGraph};

fn total_items(node: Option<&Node>, field: &'static str) -> Field<i32> {
	let collection = node
		.and_then(Linkable::get)
		.ok_or(FieldErr(field))?;
	let total = collection.project::<Collection>()
		.map_err(|_| FieldErr(field))?
		.total_items
		.ok_or(FieldErr("totalItems"))?;
	Ok(total.min(i32::MAX as u64) as i32)
}

fn media_url(node: Option<&Node>, field: &'static str) -> Field<String> {
	match node.ok_or(FieldErr(field))? {
		Linkable::Link(link) => Ok(link.href.clone()),
		Linkable::Object(x) => x.project::<Object>()
			.map_err(|_| FieldErr(field))?
			.url
			.id()
			.map(|x| x.to_string())
			.ok_or(FieldErr("url")),
	}
}

/// Quick access to values nested a few objects deep
pub trait Shortcuts {
	fn likes_count(&self) -> Field<i32>;
	fn shares_count(&self) -> Field<i32>;
	fn replies_count(&self) -> Field<i32>;
	fn image_url(&self) -> Field<String>;
	fn icon_url(&self) -> Field<String>;
}

impl Shortcuts for TypeGraph {
	fn likes_count(&self) -> Field<i32> {
		let object = self.project::<Object>().map_err(|_| FieldErr("likes"))?;
		total_items(object.entity().likes.as_ref(), "likes")
	}

	fn shares_count(&self) -> Field<i32> {
		let object = self.project::<Object>().map_err(|_| FieldErr("shares"))?;
		total_items(object.entity().shares.as_ref(), "shares")
	}

	fn replies_count(&self) -> Field<i32> {
		let object = self.project::<Object>().map_err(|_| FieldErr("replies"))?;
		total_items(object.entity().replies.as_ref(), "replies")
	}

	fn image_url(&self) -> Field<String> {
		let object = self.project::<Object>().map_err(|_| FieldErr("image"))?;
		media_url(object.entity().image.first(), "image")
	}

	fn icon_url(&self) -> Field<String> {
		let object = self.project::<Object>().map_err(|_| FieldErr("icon"))?;
		media_url(object.entity().icon.first(), "icon")
	}
}

// a bare link carries none of these
impl<T: Shortcuts> Shortcuts for Linkable<T> {
	fn likes_count(&self) -> Field<i32> {
		self.get().ok_or(FieldErr("likes"))?.likes_count()
	}

	fn shares_count(&self) -> Field<i32> {
		self.get().ok_or(FieldErr("shares"))?.shares_count()
	}

	fn replies_count(&self) -> Field<i32> {
		self.get().ok_or(FieldErr("replies"))?.replies_count()
	}

	fn image_url(&self) -> Field<String> {
		self.get().ok_or(FieldErr("image"))?.image_url()
	}

	fn icon_url(&self) -> Field<String> {
		self.get().ok_or(FieldErr("icon"))?.icon_url()
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use super::Shortcuts;
	use crate::{FieldErr, TypeGraph, TypeRegistry};

	#[test]
	fn counters_come_from_embedded_collections() {
		let graph = TypeGraph::from_value(json!({
			"type": "Note",
			"likes": { "type": "Collection", "totalItems": 12 },
			"shares": "https://example.com/notes/1/shares",
			"replies": { "type": "OrderedCollection", "totalItems": 3, "orderedItems": [] },
		}), TypeRegistry::global()).unwrap();
		assert_eq!(graph.likes_count(), Ok(12));
		assert_eq!(graph.replies_count(), Ok(3));
		assert_eq!(graph.shares_count(), Err(FieldErr("shares")));
	}

	#[test]
	fn media_urls_follow_links_and_documents() {
		let graph = TypeGraph::from_value(json!({
			"type": "Person",
			"icon": { "type": "Image", "url": "https://example.com/avatar.png" },
			"image": "https://example.com/banner.png",
		}), TypeRegistry::global()).unwrap();
		assert_eq!(graph.icon_url().as_deref(), Ok("https://example.com/avatar.png"));
		assert_eq!(graph.image_url().as_deref(), Ok("https://example.com/banner.png"));
	}
}
