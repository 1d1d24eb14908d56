//! Feed annotation for heterogeneous "post" listings.
//!
//! Answers appear in the same client feed as other post types, so each
//! listed answer is annotated with a `type` discriminator, a normalized
//! display `date`, and — when the parent question's entity is known — a
//! synthetic `"<entityType>s"` key holding the parent entity id, letting
//! the client render all post types uniformly.

use serde_json::Value;

use crate::types::DbId;

/// The parent-entity reference of a question, as needed by feed annotation.
#[derive(Debug, Clone)]
pub struct ParentEntity {
    pub entity_type: String,
    pub entity_id: DbId,
}

/// Annotate a serialized answer for the unified post feed.
///
/// No-op on non-object values.
pub fn annotate_answer(mut answer: Value, parent: Option<&ParentEntity>) -> Value {
    let Some(obj) = answer.as_object_mut() else {
        return answer;
    };

    obj.insert("type".to_string(), Value::String("answer".to_string()));

    let date = obj.get("created_at").cloned().unwrap_or(Value::Null);
    obj.insert("date".to_string(), date);

    if let Some(parent) = parent {
        obj.insert(
            format!("{}s", parent.entity_type),
            Value::Array(vec![Value::from(parent.entity_id)]),
        );
    }

    answer
}
