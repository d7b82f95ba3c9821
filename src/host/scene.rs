use crate::{
    animation::snapshot::TransformSnapshot,
    foundation::core::{Canvas, Crop, Vec2f},
    foundation::ids::ItemId,
};

/// One unit step in the z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStep {
    /// Towards the top of the scene.
    Up,
    /// Towards the bottom of the scene.
    Down,
}

/// Scene graph and object model of the host application.
///
/// Items are referenced by [`ItemId`]s that may go stale at any time: every getter returns
/// `None`/`false` for a dead item and every setter ignores it.
///
/// Write contract: setters called between [`SceneHost::defer_update_begin`] and
/// [`SceneHost::defer_update_end`] for the same item become visible together when the scope
/// ends.
pub trait SceneHost {
    /// Items of `scene`, bottom to top. Empty when `scene` is not a scene.
    fn items(&self, scene: &str) -> Vec<ItemId>;

    /// Name of the source an item shows.
    fn item_source_name(&self, item: ItemId) -> Option<String>;

    /// First item of `scene` showing the source named `source`.
    fn find_item(&self, scene: &str, source: &str) -> Option<ItemId> {
        self.items(scene)
            .into_iter()
            .find(|&item| self.item_source_name(item).as_deref() == Some(source))
    }

    /// Whether `item` still exists.
    fn item_alive(&self, item: ItemId) -> bool;

    /// Size of the output canvas.
    fn canvas(&self) -> Canvas;

    /// Current transform of `item`.
    fn transform(&self, item: ItemId) -> Option<TransformSnapshot>;

    /// Open a deferred-update scope for `item`.
    fn defer_update_begin(&mut self, item: ItemId);

    /// Close the deferred-update scope of `item`, publishing its pending writes.
    fn defer_update_end(&mut self, item: ItemId);

    /// Set the item position.
    fn set_position(&mut self, item: ItemId, position: Vec2f);

    /// Set the item rotation in degrees.
    fn set_rotation(&mut self, item: ItemId, rotation: f32);

    /// Set the item scale.
    fn set_scale(&mut self, item: ItemId, scale: Vec2f);

    /// Set the item bounding box size.
    fn set_bounds(&mut self, item: ItemId, bounds: Vec2f);

    /// Set the item crop.
    fn set_crop(&mut self, item: ItemId, crop: Crop);

    /// Whether the item is visible.
    fn visible(&self, item: ItemId) -> bool;

    /// Show or hide the item.
    fn set_visible(&mut self, item: ItemId, visible: bool);

    /// Move the item to z-position `position` (0 is the bottom).
    fn set_order_position(&mut self, item: ItemId, position: i32);

    /// Move the item one step up or down.
    fn move_order(&mut self, item: ItemId, step: OrderStep);

    /// Numeric setting `key` of the source named `source`.
    fn setting_value(&self, source: &str, key: &str) -> Option<f64>;

    /// Update numeric setting `key` of the source named `source`.
    fn set_setting_value(&mut self, source: &str, key: &str, value: f64);

    /// Write every field of `snapshot` to `item`.
    fn write_transform(&mut self, item: ItemId, snapshot: &TransformSnapshot) {
        self.set_position(item, snapshot.position);
        self.set_rotation(item, snapshot.rotation);
        self.set_scale(item, snapshot.scale);
        self.set_bounds(item, snapshot.bounds);
        self.set_crop(item, snapshot.crop);
    }
}
