//! Avatar slot state and the clothing placement rules.
//!
//! [`AvatarState`] holds what one styling session is wearing. All mutation
//! goes through [`AvatarState::apply`], [`AvatarState::reset`], and
//! [`AvatarState::set_variant`], which keep the slot invariants:
//!
//! - a dress and a top/bottom are never worn together,
//! - every item sits in the slot matching its category,
//! - accessories only accumulate, in insertion order.

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, ClothingItem};
use crate::error::CoreError;
use crate::render::Layers;

/// What one avatar is currently wearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarState {
    body_variant: String,
    hairstyle: Option<ClothingItem>,
    top: Option<ClothingItem>,
    bottom: Option<ClothingItem>,
    dress: Option<ClothingItem>,
    shoes: Option<ClothingItem>,
    accessories: Vec<ClothingItem>,
}

impl AvatarState {
    /// An empty avatar of the given body variant.
    pub fn new(body_variant: impl Into<String>) -> Self {
        Self {
            body_variant: body_variant.into(),
            hairstyle: None,
            top: None,
            bottom: None,
            dress: None,
            shoes: None,
            accessories: Vec::new(),
        }
    }

    pub fn body_variant(&self) -> &str {
        &self.body_variant
    }

    pub fn hairstyle(&self) -> Option<&ClothingItem> {
        self.hairstyle.as_ref()
    }

    pub fn top(&self) -> Option<&ClothingItem> {
        self.top.as_ref()
    }

    pub fn bottom(&self) -> Option<&ClothingItem> {
        self.bottom.as_ref()
    }

    pub fn dress(&self) -> Option<&ClothingItem> {
        self.dress.as_ref()
    }

    pub fn shoes(&self) -> Option<&ClothingItem> {
        self.shoes.as_ref()
    }

    pub fn accessories(&self) -> &[ClothingItem] {
        &self.accessories
    }

    /// Every worn item: single slots first, then accessories in order.
    pub fn worn(&self) -> impl Iterator<Item = &ClothingItem> {
        [
            &self.hairstyle,
            &self.top,
            &self.bottom,
            &self.dress,
            &self.shoes,
        ]
        .into_iter()
        .flatten()
        .chain(&self.accessories)
    }

    /// `true` when no slot is occupied and no accessory is worn.
    pub fn is_empty(&self) -> bool {
        self.hairstyle.is_none()
            && self.top.is_none()
            && self.bottom.is_none()
            && self.dress.is_none()
            && self.shoes.is_none()
            && self.accessories.is_empty()
    }

    /// Number of worn items, accessories included.
    pub fn item_count(&self) -> usize {
        [
            &self.hairstyle,
            &self.top,
            &self.bottom,
            &self.dress,
            &self.shoes,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count()
            + self.accessories.len()
    }

    /// Put an item on the avatar.
    ///
    /// Returns `true` if the state changed. Re-applying a worn single-slot
    /// item is a no-op; re-applying an accessory adds a second copy.
    pub fn apply(&mut self, item: &ClothingItem) -> bool {
        let before = self.clone();

        match item.category {
            Category::Accessory => self.accessories.push(item.clone()),
            Category::Dress => {
                self.dress = Some(item.clone());
                self.top = None;
                self.bottom = None;
            }
            Category::Top => {
                self.top = Some(item.clone());
                self.dress = None;
            }
            Category::Bottom => {
                self.bottom = Some(item.clone());
                self.dress = None;
            }
            Category::Hairstyle => self.hairstyle = Some(item.clone()),
            Category::Shoes => self.shoes = Some(item.clone()),
        }

        *self != before
    }

    /// Remove everything the avatar is wearing. The body variant is kept.
    pub fn reset(&mut self) {
        self.hairstyle = None;
        self.top = None;
        self.bottom = None;
        self.dress = None;
        self.shoes = None;
        self.accessories.clear();
    }

    /// Switch the body variant without touching worn items.
    ///
    /// Items drawn for another variant stay in their slots but are skipped
    /// by [`render_layers`](Self::render_layers) until the avatar switches
    /// back.
    pub fn set_variant(&mut self, variant: impl Into<String>) {
        self.body_variant = variant.into();
    }

    /// Check the slot invariants on a state that did not come from
    /// [`apply`](Self::apply), e.g. one restored from a saved record.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.dress.is_some() && (self.top.is_some() || self.bottom.is_some()) {
            return Err(CoreError::Validation(
                "A dress cannot be worn together with a top or bottom".to_string(),
            ));
        }

        let slots = [
            ("hairstyle", &self.hairstyle, Category::Hairstyle),
            ("top", &self.top, Category::Top),
            ("bottom", &self.bottom, Category::Bottom),
            ("dress", &self.dress, Category::Dress),
            ("shoes", &self.shoes, Category::Shoes),
        ];
        for (slot, item, expected) in slots {
            if let Some(item) = item {
                if item.category != expected {
                    return Err(CoreError::Validation(format!(
                        "Item '{}' of category {} cannot occupy the {slot} slot",
                        item.id, item.category
                    )));
                }
            }
        }

        if let Some(item) = self
            .accessories
            .iter()
            .find(|item| item.category != Category::Accessory)
        {
            return Err(CoreError::Validation(format!(
                "Item '{}' of category {} cannot be worn as an accessory",
                item.id, item.category
            )));
        }

        Ok(())
    }

    /// `true` if the item is drawn for the current body variant.
    pub fn is_visible(&self, item: &ClothingItem) -> bool {
        item.owner_variant == self.body_variant
    }

    /// The visible layers in back-to-front draw order.
    ///
    /// `base_image_ref` is the body layer for the current variant; pass
    /// `None` to omit it. The returned iterator borrows the state and can be
    /// cloned or re-created any number of times.
    pub fn render_layers<'a>(&'a self, base_image_ref: Option<&'a str>) -> Layers<'a> {
        Layers::new(self, base_image_ref)
    }
}
