#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid category: '{0}'")]
    InvalidCategory(String),

    #[error("Unknown clothing item: {0}")]
    UnknownItem(String),

    #[error("Malformed drop payload: {0}")]
    MalformedPayload(String),

    #[error("Item {item_id} belongs to variant '{item_variant}', avatar is '{avatar_variant}'")]
    VariantMismatch {
        item_id: String,
        item_variant: String,
        avatar_variant: String,
    },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
