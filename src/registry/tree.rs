use std::collections::{HashMap, HashSet};

/// Transitive "is derived from" relation between type names, kept closed in both directions so
/// that lookups never need to walk it
#[derive(Debug, Clone, Default)]
pub struct NameTree {
	ancestors: HashMap<String, HashSet<String>>,
	descendants: HashMap<String, HashSet<String>>,
}

impl NameTree {
	/// record that `descendant` is a more specific `ancestor`, along with everything this implies
	pub fn link(&mut self, ancestor: &str, descendant: &str) {
		if ancestor == descendant {
			return;
		}
		if self.is_ancestor(descendant, ancestor) {
			tracing::warn!("ignoring cyclic type name relation '{ancestor}' > '{descendant}'");
			return;
		}

		let mut ups: HashSet<String> = self.ancestors.get(ancestor).cloned().unwrap_or_default();
		ups.insert(ancestor.to_string());
		let mut downs: HashSet<String> = self.descendants.get(descendant).cloned().unwrap_or_default();
		downs.insert(descendant.to_string());

		for up in &ups {
			self.descendants.entry(up.clone()).or_default().extend(downs.iter().cloned());
		}
		for down in &downs {
			self.ancestors.entry(down.clone()).or_default().extend(ups.iter().cloned());
		}
	}

	pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
		self.descendants.get(ancestor).is_some_and(|x| x.contains(descendant))
	}

	/// every name which derives from `name`, directly or not
	pub fn descendants(&self, name: &str) -> Option<&HashSet<String>> {
		self.descendants.get(name)
	}

	pub fn ancestors(&self, name: &str) -> Option<&HashSet<String>> {
		self.ancestors.get(name)
	}
}
