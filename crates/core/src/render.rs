//! Back-to-front layer ordering for a composited avatar.
//!
//! Layers are produced lazily by [`Layers`], an iterator that walks the
//! avatar's slots in draw order: hairstyle, body, dress or top and bottom,
//! shoes, then accessories in the order they were put on.

use serde::Serialize;

use crate::avatar::AvatarState;
use crate::catalog::ClothingItem;

/// CSS z-index the web canvas gives the body image.
pub const BODY_CSS_Z_INDEX: i32 = 2;

/// Conceptual depth of a layer. Declaration order is draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRank {
    Hairstyle,
    Body,
    Garment,
    Shoes,
    Accessory,
}

/// Which part of the avatar a layer comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSlot {
    Hairstyle,
    Body,
    Dress,
    Top,
    Bottom,
    Shoes,
    Accessory,
}

impl LayerSlot {
    pub fn rank(&self) -> LayerRank {
        match self {
            Self::Hairstyle => LayerRank::Hairstyle,
            Self::Body => LayerRank::Body,
            Self::Dress | Self::Top | Self::Bottom => LayerRank::Garment,
            Self::Shoes => LayerRank::Shoes,
            Self::Accessory => LayerRank::Accessory,
        }
    }
}

/// Total ordering key for layers: rank first, then position within the rank.
///
/// Position is the accessory insertion index, or 0/1 for top/bottom. Every
/// other rank holds at most one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ZKey {
    pub rank: LayerRank,
    pub position: u32,
}

/// One image to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer<'a> {
    pub slot: LayerSlot,
    /// `None` for the body layer.
    pub item_id: Option<&'a str>,
    pub image_ref: &'a str,
    pub z_key: ZKey,
    /// Item stack order (plus accessory index), as the web canvas uses it.
    pub css_z_index: i32,
}

impl<'a> Layer<'a> {
    fn item(slot: LayerSlot, position: u32, item: &'a ClothingItem) -> Self {
        let css_offset = match slot {
            LayerSlot::Accessory => position as i32,
            _ => 0,
        };
        Self {
            slot,
            item_id: Some(item.id.as_str()),
            image_ref: &item.image_ref,
            z_key: ZKey {
                rank: slot.rank(),
                position,
            },
            css_z_index: item.stack_order.saturating_add(css_offset),
        }
    }

    fn body(image_ref: &'a str) -> Self {
        Self {
            slot: LayerSlot::Body,
            item_id: None,
            image_ref,
            z_key: ZKey {
                rank: LayerRank::Body,
                position: 0,
            },
            css_z_index: BODY_CSS_Z_INDEX,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Hairstyle,
    Body,
    Dress,
    Top,
    Bottom,
    Shoes,
    Accessory(usize),
    Done,
}

/// Lazy, finite iterator over an avatar's visible layers.
///
/// Items whose owner variant differs from the avatar's current body
/// variant are skipped.
#[derive(Debug, Clone)]
pub struct Layers<'a> {
    state: &'a AvatarState,
    base_image_ref: Option<&'a str>,
    stage: Stage,
}

impl<'a> Layers<'a> {
    pub(crate) fn new(state: &'a AvatarState, base_image_ref: Option<&'a str>) -> Self {
        Self {
            state,
            base_image_ref,
            stage: Stage::Hairstyle,
        }
    }

    fn visible(&self, item: Option<&'a ClothingItem>) -> Option<&'a ClothingItem> {
        item.filter(|item| self.state.is_visible(item))
    }
}

impl<'a> Iterator for Layers<'a> {
    type Item = Layer<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (next_stage, layer) = match self.stage {
                Stage::Hairstyle => (
                    Stage::Body,
                    self.visible(self.state.hairstyle())
                        .map(|item| Layer::item(LayerSlot::Hairstyle, 0, item)),
                ),
                Stage::Body => (Stage::Dress, self.base_image_ref.map(Layer::body)),
                Stage::Dress => (
                    Stage::Top,
                    self.visible(self.state.dress())
                        .map(|item| Layer::item(LayerSlot::Dress, 0, item)),
                ),
                Stage::Top => (
                    Stage::Bottom,
                    self.visible(self.state.top())
                        .map(|item| Layer::item(LayerSlot::Top, 0, item)),
                ),
                Stage::Bottom => (
                    Stage::Shoes,
                    self.visible(self.state.bottom())
                        .map(|item| Layer::item(LayerSlot::Bottom, 1, item)),
                ),
                Stage::Shoes => (
                    Stage::Accessory(0),
                    self.visible(self.state.shoes())
                        .map(|item| Layer::item(LayerSlot::Shoes, 0, item)),
                ),
                Stage::Accessory(index) => match self.state.accessories().get(index) {
                    Some(item) => (
                        Stage::Accessory(index + 1),
                        self.visible(Some(item))
                            .map(|item| Layer::item(LayerSlot::Accessory, index as u32, item)),
                    ),
                    None => (Stage::Done, None),
                },
                Stage::Done => return None,
            };

            self.stage = next_stage;
            if layer.is_some() {
                return layer;
            }
        }
    }
}
