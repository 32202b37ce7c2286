use crate::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing field '{0}'")]
pub struct FieldErr(pub &'static str);

pub type Field<T> = Result<T, FieldErr>;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	/// a graph can hold at most one entity per kind, and a registry one declaration per kind
	#[error("entity '{0}' is already present")]
	DuplicateEntity(EntityKind),

	#[error("type name '{name}' is already claimed by '{owner}'")]
	DuplicateTypeName { name: String, owner: EntityKind },

	#[error("entity '{kind}' depends on '{missing}', which is not available")]
	MissingDependency { kind: EntityKind, missing: EntityKind },

	#[error("invalid entity '{kind}': {source}")]
	InvalidEntity {
		kind: EntityKind,
		#[source]
		source: FieldErr,
	},

	/// expected outcome when asking "is this document also an X?"
	#[error("entity '{0}' is not present in this graph")]
	NotPresent(EntityKind),

	#[error("document nesting exceeds maximum depth of {0}")]
	DepthExceeded(usize),

	#[error("malformed value: expected {expected}, found {found}")]
	Malformed { expected: &'static str, found: &'static str },

	#[error("invalid json: {0}")]
	Json(#[from] serde_json::Error),
}

impl GraphError {
	/// malformed values on optional fields are tolerated, everything else aborts the document
	pub fn is_malformed(&self) -> bool {
		matches!(self, GraphError::Malformed { .. })
	}
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "bool",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}
