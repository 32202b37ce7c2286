/// Declare an entity struct whose fields map one to one to JSON-LD properties.
///
/// Field types must implement [`LdProperty`](crate::LdProperty): `Option<T>` for single values,
/// `ListOrOne<T>` for repeated ones and `LanguageText` for natural language. Fields listed as
/// `required` make the entity invalid while unset.
macro_rules! entity {
	(
		$(#[$meta:meta])*
		pub struct $name:ident {
			$(
				$(#[cfg($cfg:meta)])?
				$field:ident : $t:ty = $key:literal
			),* $(,)?
		}
		$(required [$($req:ident),* $(,)?])?
	) => {
		$(#[$meta])*
		#[derive(Debug, Default)]
		pub struct $name {
			$(
				$(#[cfg($cfg)])?
				pub $field: $t,
			)*
		}

		impl $name {
			pub fn read_fields(r: &mut $crate::EntityReader<'_, '_>) -> Result<Self, $crate::GraphError> {
				Ok($name {
					$(
						$(#[cfg($cfg)])?
						$field: <$t as $crate::LdProperty>::read_prop(r, $key)?,
					)*
				})
			}

			/// entity with every field unset, if that makes a valid one
			pub fn empty() -> $crate::Field<Self> {
				let out = Self::default();
				$crate::Entity::validate(&out)?;
				Ok(out)
			}
		}

		impl $crate::Entity for $name {
			fn write(&self, out: &mut serde_json::Map<String, serde_json::Value>) {
				$(
					$(#[cfg($cfg)])?
					$crate::LdProperty::write_prop(&self.$field, out, $key);
				)*
			}

			fn validate(&self) -> $crate::Field<()> {
				$($(
					if !$crate::LdProperty::is_set(&self.$req) {
						return Err($crate::FieldErr(stringify!($req)));
					}
				)*)?
				Ok(())
			}
		}
	};
}

pub(crate) use entity;

/// Declare models which only contribute a type name, with no field of their own
macro_rules! thin_models {
	(
		$(
			$(#[$meta:meta])*
			$name:ident : $base:ty = $tname:literal $(supplants [$($sup:literal),* $(,)?])? ;
		)*
	) => {
		paste::paste! {
			$(
				$(#[$meta])*
				#[derive(Debug, Clone, Copy)]
				pub struct $name;

				#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
				pub struct [<$name Entity>];

				impl $crate::Entity for [<$name Entity>] {
					fn write(&self, _out: &mut serde_json::Map<String, serde_json::Value>) {}
				}

				impl $crate::Model for $name {
					type Entity = [<$name Entity>];

					const KIND: $crate::EntityKind = $crate::EntityKind::new(concat!("as:", $tname));
					const TYPE_NAME: Option<&'static str> = Some($tname);
					const SUPPLANTS: &'static [&'static str] = &[$($($sup),*)?];

					fn base() -> Option<$crate::ModelDecl> {
						Some($crate::ModelDecl::of::<$base>())
					}

					fn read(_r: &mut $crate::EntityReader<'_, '_>) -> Result<Self::Entity, $crate::GraphError> {
						Ok([<$name Entity>])
					}

					fn create() -> $crate::Field<Self::Entity> {
						Ok([<$name Entity>])
					}
				}
			)*
		}
	};
}

pub(crate) use thin_models;
