//! Clothing catalog: item records, categories, and body variants.
//!
//! The catalog is loaded once at startup and shared read-only for the
//! lifetime of the process. Items are never created or destroyed at runtime.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::ItemId;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The closed set of clothing categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Category {
    Hairstyle,
    Top,
    Bottom,
    Dress,
    Shoes,
    Accessory,
}

impl Category {
    /// All categories in clothing-panel tab order.
    pub const ALL: [Category; 6] = [
        Self::Hairstyle,
        Self::Top,
        Self::Bottom,
        Self::Dress,
        Self::Shoes,
        Self::Accessory,
    ];

    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hairstyle => "hairstyle",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Dress => "dress",
            Self::Shoes => "shoes",
            Self::Accessory => "accessory",
        }
    }

    /// Parse from a wire-format string.
    ///
    /// The plural tab names (`"tops"`, `"dresses"`, ...) are accepted as
    /// aliases since drag payloads from older clients still carry them.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "hairstyle" | "hairstyles" => Ok(Self::Hairstyle),
            "top" | "tops" => Ok(Self::Top),
            "bottom" | "bottoms" => Ok(Self::Bottom),
            "dress" | "dresses" => Ok(Self::Dress),
            "shoes" => Ok(Self::Shoes),
            "accessory" | "accessories" => Ok(Self::Accessory),
            _ => Err(CoreError::InvalidCategory(s.to_string())),
        }
    }

    /// Human-readable tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hairstyle => "Hair",
            Self::Top => "Tops",
            Self::Bottom => "Bottoms",
            Self::Dress => "Dresses",
            Self::Shoes => "Shoes",
            Self::Accessory => "Accessories",
        }
    }
}

impl TryFrom<String> for Category {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ClothingItem
// ---------------------------------------------------------------------------

/// A wearable item from the catalog.
///
/// Field aliases accept the camelCase names used by the web client's item
/// records (`image`, `gender`, `zIndex`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    /// Opaque asset reference; never interpreted.
    #[serde(alias = "image")]
    pub image_ref: String,
    /// Body variant this item is drawn for.
    #[serde(alias = "gender")]
    pub owner_variant: String,
    /// Higher values draw on top.
    #[serde(alias = "zIndex", default)]
    pub stack_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

// ---------------------------------------------------------------------------
// BodyVariant
// ---------------------------------------------------------------------------

/// A selectable avatar body archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyVariant {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    /// Asset drawn as the body layer, between hair and garments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_image_ref: Option<String>,
}

impl BodyVariant {
    fn implicit(name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
            base_image_ref: None,
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    variants: Vec<BodyVariant>,
    items: Vec<ClothingItem>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Read-only, validated collection of clothing items and body variants.
#[derive(Debug, Clone)]
pub struct Catalog {
    variants: Vec<BodyVariant>,
    items: Vec<ClothingItem>,
    by_id: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog from already-decoded parts.
    ///
    /// When `variants` is empty they are inferred from the items' owner
    /// variants in first-seen order. Otherwise every item must reference a
    /// declared variant.
    pub fn new(variants: Vec<BodyVariant>, items: Vec<ClothingItem>) -> Result<Self, CoreError> {
        let variants = if variants.is_empty() {
            let mut seen = HashSet::new();
            items
                .iter()
                .filter(|item| seen.insert(item.owner_variant.as_str()))
                .map(|item| BodyVariant::implicit(&item.owner_variant))
                .collect()
        } else {
            variants
                .into_iter()
                .map(|mut v| {
                    if v.display_name.is_empty() {
                        v.display_name = v.name.clone();
                    }
                    v
                })
                .collect::<Vec<_>>()
        };

        let mut variant_names = HashSet::new();
        for variant in &variants {
            if variant.name.trim().is_empty() {
                return Err(CoreError::Validation(
                    "Variant name must not be empty".to_string(),
                ));
            }
            if !variant_names.insert(variant.name.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate variant '{}'",
                    variant.name
                )));
            }
        }

        let mut by_id = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "Item at position {index} has an empty id"
                )));
            }
            if !variant_names.contains(item.owner_variant.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Item '{}' references undeclared variant '{}'",
                    item.id, item.owner_variant
                )));
            }
            if by_id.insert(item.id.clone(), index).is_some() {
                return Err(CoreError::Validation(format!(
                    "Duplicate item id '{}'",
                    item.id
                )));
            }
        }

        Ok(Self {
            variants,
            items,
            by_id,
        })
    }

    /// Parse a catalog from JSON.
    ///
    /// Accepts either `{ "variants": [...], "items": [...] }` or a bare
    /// array of items.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Catalog is not valid JSON: {e}")))?;

        let file = if value.is_array() {
            let items = serde_json::from_value(value)
                .map_err(|e| CoreError::Validation(format!("Invalid catalog item: {e}")))?;
            CatalogFile {
                variants: Vec::new(),
                items,
            }
        } else {
            serde_json::from_value(value)
                .map_err(|e| CoreError::Validation(format!("Invalid catalog: {e}")))?
        };

        Self::new(file.variants, file.items)
    }

    /// Read and parse a catalog file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Internal(format!("Failed to read catalog {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ClothingItem> {
        self.by_id.get(id).map(|&index| &self.items[index])
    }

    /// Look up an item by id, failing with [`CoreError::UnknownItem`].
    pub fn get(&self, id: &str) -> Result<&ClothingItem, CoreError> {
        self.find(id)
            .ok_or_else(|| CoreError::UnknownItem(id.to_string()))
    }

    /// Items matching an optional category and an optional owner variant,
    /// in catalog order.
    pub fn items_for<'a>(
        &'a self,
        category: Option<Category>,
        variant: Option<&'a str>,
    ) -> impl Iterator<Item = &'a ClothingItem> + 'a {
        self.items.iter().filter(move |item| {
            category.map_or(true, |c| item.category == c)
                && variant.map_or(true, |v| item.owner_variant == v)
        })
    }

    pub fn variants(&self) -> &[BodyVariant] {
        &self.variants
    }

    pub fn variant(&self, name: &str) -> Option<&BodyVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Look up a variant by name, failing with [`CoreError::NotFound`].
    pub fn require_variant(&self, name: &str) -> Result<&BodyVariant, CoreError> {
        self.variant(name).ok_or_else(|| CoreError::NotFound {
            entity: "BodyVariant",
            id: name.to_string(),
        })
    }

    /// The first declared variant, used when a session does not pick one.
    pub fn default_variant(&self) -> Option<&BodyVariant> {
        self.variants.first()
    }
}
