//! The avatar compositing engine.
//!
//! [`DressUpEngine`] resolves apply, drop, reset, and variant intents against
//! the catalog and turns them into [`AvatarState`] transitions. Every
//! operation either succeeds completely or leaves the state untouched.

use std::sync::Arc;

use crate::avatar::AvatarState;
use crate::catalog::{Catalog, ClothingItem};
use crate::drop::DropPayload;
use crate::error::CoreError;
use crate::render::Layers;

/// A successful apply or drop.
#[derive(Debug, Clone, Copy)]
pub struct Applied<'a> {
    /// The catalog record that was put on.
    pub item: &'a ClothingItem,
    /// `false` when a single-slot item was already worn.
    pub changed: bool,
}

/// Stateless rule engine over a shared, read-only catalog.
#[derive(Debug, Clone)]
pub struct DressUpEngine {
    catalog: Arc<Catalog>,
}

impl DressUpEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// An empty avatar for `variant`, or for the catalog's default variant.
    pub fn new_state(&self, variant: Option<&str>) -> Result<AvatarState, CoreError> {
        let variant = match variant {
            Some(name) => self.catalog.require_variant(name)?,
            None => self.catalog.default_variant().ok_or_else(|| {
                CoreError::Validation("Catalog declares no body variants".to_string())
            })?,
        };
        Ok(AvatarState::new(variant.name.clone()))
    }

    /// Accept a previously saved state after checking its invariants, that
    /// its body variant still exists, and that every worn item is exactly
    /// the catalog record of the same id.
    pub fn restore(&self, state: AvatarState) -> Result<AvatarState, CoreError> {
        state.validate()?;
        self.catalog.require_variant(state.body_variant())?;
        for worn in state.worn() {
            let item = self.catalog.get(&worn.id)?;
            if worn != item {
                return Err(CoreError::Validation(format!(
                    "Saved item '{}' does not match the catalog",
                    worn.id
                )));
            }
        }
        Ok(state)
    }

    /// Put the catalog item `item_id` on the avatar.
    pub fn apply_item(
        &self,
        state: &mut AvatarState,
        item_id: &str,
    ) -> Result<Applied<'_>, CoreError> {
        let item = self.catalog.get(item_id)?;
        let changed = self.apply(state, item)?;
        Ok(Applied { item, changed })
    }

    /// Put `item` on the avatar, enforcing that it is drawn for the
    /// avatar's current body variant. Returns whether the state changed.
    pub fn apply(&self, state: &mut AvatarState, item: &ClothingItem) -> Result<bool, CoreError> {
        if !state.is_visible(item) {
            return Err(CoreError::VariantMismatch {
                item_id: item.id.clone(),
                item_variant: item.owner_variant.clone(),
                avatar_variant: state.body_variant().to_string(),
            });
        }
        Ok(state.apply(item))
    }

    /// Decode an untrusted drag payload and apply the catalog item it names.
    ///
    /// The payload is only used to identify the item; the catalog record is
    /// what gets worn.
    pub fn resolve_drop(
        &self,
        state: &mut AvatarState,
        raw: &[u8],
    ) -> Result<Applied<'_>, CoreError> {
        let payload = DropPayload::decode(raw)?;
        let item = self.catalog.get(&payload.item_id)?;
        payload.verify_against(item)?;
        let changed = self.apply(state, item)?;
        Ok(Applied { item, changed })
    }

    pub fn reset(&self, state: &mut AvatarState) {
        state.reset();
    }

    /// Switch body variant. Worn items of other variants are kept but
    /// hidden from rendering.
    pub fn select_variant(&self, state: &mut AvatarState, variant: &str) -> Result<(), CoreError> {
        let variant = self.catalog.require_variant(variant)?;
        state.set_variant(variant.name.clone());
        Ok(())
    }

    /// Visible layers of `state` in draw order, body layer included when the
    /// variant declares a base image.
    pub fn render_layers<'a>(&'a self, state: &'a AvatarState) -> Layers<'a> {
        let base = self
            .catalog
            .variant(state.body_variant())
            .and_then(|v| v.base_image_ref.as_deref());
        state.render_layers(base)
    }
}
