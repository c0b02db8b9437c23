//! Dress-up avatar compositing engine.
//!
//! Pure domain logic with no I/O beyond reading the catalog file: the
//! clothing catalog, avatar slot state, placement rules, drag-payload
//! decoding, and layer ordering.

pub mod avatar;
pub mod catalog;
pub mod drop;
pub mod engine;
pub mod error;
pub mod render;
pub mod settings;
pub mod types;

pub use avatar::AvatarState;
pub use catalog::{BodyVariant, Catalog, Category, ClothingItem};
pub use engine::{Applied, DressUpEngine};
pub use error::CoreError;
pub use render::{Layer, LayerRank, LayerSlot, Layers, ZKey};
pub use settings::{DressUpSettings, UpdateSettings};
