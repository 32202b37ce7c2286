mod tree;

pub use tree::NameTree;

use std::{
	collections::{HashMap, HashSet},
	sync::OnceLock,
};

use crate::{ContextEntry, EntityKind, GraphError, GraphReader, Model, ModelDecl};

/// A registered model, with everything needed to decide whether it attaches to an object
#[derive(Debug, Clone)]
pub struct RegistryEntry {
	decl: ModelDecl,
	chain: Vec<EntityKind>,
	context: Vec<ContextEntry>,
	order: usize,
}

impl RegistryEntry {
	pub fn decl(&self) -> &ModelDecl {
		&self.decl
	}

	pub fn kind(&self) -> EntityKind {
		self.decl.kind
	}

	pub fn type_name(&self) -> Option<&'static str> {
		self.decl.type_name
	}

	/// this model and all its bases, root first
	pub fn chain(&self) -> &[EntityKind] {
		&self.chain
	}

	pub fn context(&self) -> &[ContextEntry] {
		&self.context
	}

	/// position in registration order
	pub fn order(&self) -> usize {
		self.order
	}
}

/// Set of known models. Built once, then shared read-only by every reader
#[derive(Debug)]
pub struct TypeRegistry {
	entries: Vec<RegistryEntry>,
	by_kind: HashMap<EntityKind, usize>,
	by_name: HashMap<&'static str, usize>,
	names: NameTree,
}

static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();

impl TypeRegistry {
	pub fn builder() -> TypeRegistryBuilder {
		TypeRegistryBuilder::default()
	}

	/// registry with the whole built-in vocabulary, built on first use
	pub fn global() -> &'static TypeRegistry {
		GLOBAL.get_or_init(|| match crate::vocab::activitystreams() {
			Ok(registry) => registry,
			Err(e) => panic!("built-in vocabulary is inconsistent: {e}"),
		})
	}

	pub fn reader(&self) -> GraphReader<'_> {
		GraphReader::new(self)
	}

	/// every model, in registration order
	pub fn entries(&self) -> &[RegistryEntry] {
		&self.entries
	}

	pub fn entry(&self, kind: EntityKind) -> Option<&RegistryEntry> {
		self.entries.get(*self.by_kind.get(&kind)?)
	}

	pub fn lookup(&self, type_name: &str) -> Option<&RegistryEntry> {
		self.entries.get(*self.by_name.get(type_name)?)
	}

	pub fn contains<M: Model>(&self) -> bool {
		self.by_kind.contains_key(&M::KIND)
	}

	/// every type name which is a more specific version of `type_name`
	pub fn derived_names(&self, type_name: &str) -> Option<&HashSet<String>> {
		self.names.descendants(type_name)
	}

	pub fn names(&self) -> &NameTree {
		&self.names
	}
}

#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
	decls: Vec<ModelDecl>,
	by_kind: HashMap<EntityKind, usize>,
	by_name: HashMap<&'static str, usize>,
	names: NameTree,
}

impl TypeRegistryBuilder {
	pub fn register<M: Model>(&mut self) -> Result<&mut Self, GraphError> {
		self.register_decl(ModelDecl::of::<M>())
	}

	pub fn register_decl(&mut self, decl: ModelDecl) -> Result<&mut Self, GraphError> {
		if self.by_kind.contains_key(&decl.kind) {
			return Err(GraphError::DuplicateEntity(decl.kind));
		}
		if let Some(name) = decl.type_name {
			if let Some(owner) = self.by_name.get(name) {
				return Err(GraphError::DuplicateTypeName { name: name.to_string(), owner: self.decls[*owner].kind });
			}
			for supplanted in decl.supplants {
				self.names.link(supplanted, name);
			}
			self.by_name.insert(name, self.decls.len());
		}
		self.by_kind.insert(decl.kind, self.decls.len());
		self.decls.push(decl);
		Ok(self)
	}

	pub fn build(self) -> Result<TypeRegistry, GraphError> {
		let TypeRegistryBuilder { decls, by_kind, by_name, mut names } = self;
		let mut entries = Vec::with_capacity(decls.len());

		for (order, decl) in decls.iter().enumerate() {
			let mut chain = vec![decl.kind];
			let mut current = *decl;
			while let Some(base) = current.base_kind() {
				let Some(idx) = by_kind.get(&base) else {
					return Err(GraphError::MissingDependency { kind: decl.kind, missing: base });
				};
				if chain.contains(&base) {
					return Err(GraphError::MissingDependency { kind: decl.kind, missing: base });
				}
				chain.push(base);
				current = decls[*idx];
			}
			chain.reverse();

			// a subtype is a more specific version of every named layer below it
			if let Some(name) = decl.type_name {
				for kind in &chain {
					if let Some(ancestor) = by_kind.get(kind).and_then(|i| decls[*i].type_name) {
						names.link(ancestor, name);
					}
				}
			}

			tracing::debug!("registered {} with chain {:?}", decl.kind, chain);
			entries.push(RegistryEntry { decl: *decl, context: (decl.context)(), chain, order });
		}

		Ok(TypeRegistry { entries, by_kind, by_name, names })
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashSet;

	use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
	use serde_json::json;

	use crate::{macros::thin_models, vocab::{self, Activity, Note, Object}, EntityKind, GraphError, Model, TypeGraph, TypeRegistry};

	thin_models! {
		Vehicle: Object = "Vehicle" supplants ["Object"];
		Car: Vehicle = "Car";
		Truck: Vehicle = "Truck" supplants ["Vehicle"];
	}

	struct Impostor;

	impl Model for Impostor {
		type Entity = VehicleEntity;
		const KIND: EntityKind = EntityKind::new("test:Impostor");
		const TYPE_NAME: Option<&'static str> = Some("Note");

		fn base() -> Option<crate::ModelDecl> {
			Some(crate::ModelDecl::of::<Object>())
		}

		fn read(_r: &mut crate::EntityReader<'_, '_>) -> Result<VehicleEntity, GraphError> {
			Ok(VehicleEntity)
		}

		fn create() -> crate::Field<VehicleEntity> {
			Ok(VehicleEntity)
		}
	}

	fn garage(shuffle: Option<u64>) -> TypeRegistry {
		let mut decls = vec![
			crate::ModelDecl::of::<Truck>(),
			crate::ModelDecl::of::<Car>(),
			crate::ModelDecl::of::<Vehicle>(),
			crate::ModelDecl::of::<Object>(),
		];
		if let Some(seed) = shuffle {
			decls.shuffle(&mut StdRng::seed_from_u64(seed));
		}
		let mut builder = TypeRegistry::builder();
		for decl in decls {
			builder.register_decl(decl).unwrap();
		}
		builder.build().unwrap()
	}

	#[test]
	fn type_names_are_unique() {
		let mut builder = TypeRegistry::builder();
		builder.register::<Object>().unwrap();
		builder.register::<Note>().unwrap();
		let err = builder.register::<Impostor>().unwrap_err();
		assert!(matches!(err, GraphError::DuplicateTypeName { ref name, .. } if name == "Note"));
		assert!(matches!(builder.register::<Note>(), Err(GraphError::DuplicateEntity(_))));
	}

	#[test]
	fn bases_must_be_registered() {
		let mut builder = TypeRegistry::builder();
		builder.register::<Note>().unwrap();
		assert!(matches!(builder.build(), Err(GraphError::MissingDependency { .. })));
	}

	#[test]
	fn derived_names_promote_base_layers() {
		let registry = garage(None);
		let car = TypeGraph::from_value(json!({ "type": "Car" }), &registry).unwrap();
		assert!(car.is::<Vehicle>());
		assert_eq!(car.visible_type_names(), ["Vehicle", "Car"]);

		let truck = TypeGraph::from_value(json!({ "type": "Truck" }), &registry).unwrap();
		assert!(truck.is::<Vehicle>());
		assert!(!truck.is::<Car>());
		assert_eq!(truck.visible_type_names(), ["Truck"]);

		let derived = registry.derived_names("Vehicle").unwrap();
		assert_eq!(derived, &HashSet::from(["Car".to_string(), "Truck".to_string()]));
		assert!(registry.derived_names("Object").unwrap().contains("Truck"));
	}

	#[test]
	fn registration_order_does_not_change_name_relations() {
		let reference = TypeRegistry::global();
		for seed in 0..32 {
			let mut decls = vocab::declarations();
			decls.shuffle(&mut StdRng::seed_from_u64(seed));
			let mut builder = TypeRegistry::builder();
			for decl in decls {
				builder.register_decl(decl).unwrap();
			}
			let registry = builder.build().unwrap();

			for entry in reference.entries() {
				let Some(name) = entry.type_name() else { continue };
				assert_eq!(registry.derived_names(name), reference.derived_names(name), "seed {seed}, name {name}");
			}

			let create = TypeGraph::from_value(json!({ "type": "Create" }), &registry).unwrap();
			assert!(create.is::<Activity>(), "seed {seed}");

			let garage = garage(Some(seed));
			assert_eq!(garage.derived_names("Vehicle").map(|x| x.len()), Some(2), "seed {seed}");
		}
	}
}
