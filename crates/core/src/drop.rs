//! Decoding of drag-and-drop payloads.
//!
//! A drop arrives as whatever bytes the client attached to the drag
//! gesture, normally the JSON-encoded catalog item. Nothing in it is trusted:
//! only the `id` is used to look the item up, and any other identifying
//! fields must agree with the catalog record.

use serde_json::{Map, Value};

use crate::catalog::{Category, ClothingItem};
use crate::error::CoreError;
use crate::types::ItemId;

/// Largest drop payload accepted, in bytes.
pub const MAX_DROP_PAYLOAD_BYTES: usize = 16 * 1024;

/// The validated shape of a drop payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPayload {
    pub item_id: ItemId,
    pub category: Option<Category>,
    pub owner_variant: Option<String>,
    pub image_ref: Option<String>,
}

impl DropPayload {
    /// Decode raw payload bytes.
    ///
    /// Fails with [`CoreError::MalformedPayload`] for anything that is not a
    /// JSON object with a non-empty string `id`, and with
    /// [`CoreError::InvalidCategory`] when a `category` is present but not
    /// recognized.
    pub fn decode(raw: &[u8]) -> Result<Self, CoreError> {
        if raw.len() > MAX_DROP_PAYLOAD_BYTES {
            return Err(CoreError::MalformedPayload(format!(
                "payload exceeds {MAX_DROP_PAYLOAD_BYTES} bytes"
            )));
        }
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Err(CoreError::MalformedPayload("payload is empty".to_string()));
        }

        let value: Value = serde_json::from_slice(raw)
            .map_err(|e| CoreError::MalformedPayload(format!("not valid JSON: {e}")))?;
        let Value::Object(fields) = value else {
            return Err(CoreError::MalformedPayload(
                "expected a JSON object".to_string(),
            ));
        };

        let item_id = match fields.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
            Some(Value::String(_)) | None => {
                return Err(CoreError::MalformedPayload("missing item id".to_string()))
            }
            Some(_) => {
                return Err(CoreError::MalformedPayload(
                    "item id must be a string".to_string(),
                ))
            }
        };

        let category = optional_str(&fields, &["category"])?
            .map(Category::from_str)
            .transpose()?;

        Ok(Self {
            item_id,
            category,
            owner_variant: optional_str(&fields, &["owner_variant", "gender"])?.map(String::from),
            image_ref: optional_str(&fields, &["image_ref", "image"])?.map(String::from),
        })
    }

    /// Check that the fields the payload claims match the catalog record.
    pub fn verify_against(&self, item: &ClothingItem) -> Result<(), CoreError> {
        if self.category.is_some_and(|c| c != item.category) {
            return Err(self.mismatch("category"));
        }
        if self
            .owner_variant
            .as_deref()
            .is_some_and(|v| v != item.owner_variant)
        {
            return Err(self.mismatch("variant"));
        }
        if self
            .image_ref
            .as_deref()
            .is_some_and(|r| r != item.image_ref)
        {
            return Err(self.mismatch("image"));
        }
        Ok(())
    }

    fn mismatch(&self, field: &str) -> CoreError {
        CoreError::MalformedPayload(format!(
            "{field} does not match catalog item '{}'",
            self.item_id
        ))
    }
}

/// First present key among `keys`, which must hold a string if present.
fn optional_str<'a>(
    fields: &'a Map<String, Value>,
    keys: &[&str],
) -> Result<Option<&'a str>, CoreError> {
    for key in keys {
        match fields.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) => return Ok(Some(s.as_str())),
            Some(_) => {
                return Err(CoreError::MalformedPayload(format!(
                    "'{key}' must be a string"
                )))
            }
        }
    }
    Ok(None)
}
