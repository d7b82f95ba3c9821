use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    animation::snapshot::TransformSnapshot,
    foundation::core::{Canvas, Crop, Vec2f},
    foundation::error::{MoveError, MoveResult},
    foundation::ids::ItemId,
    host::scene::{OrderStep, SceneHost},
};

/// JSON-facing description of a [`MemoryHost`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryHostDef {
    /// Output canvas.
    #[serde(default = "default_canvas")]
    pub canvas: Canvas,
    /// Scenes with their items, bottom to top.
    #[serde(default)]
    pub scenes: Vec<SceneDef>,
    /// Numeric settings per source name.
    #[serde(default)]
    pub settings: BTreeMap<String, BTreeMap<String, f64>>,
}

/// One scene of a [`MemoryHostDef`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDef {
    /// Scene (source) name.
    pub name: String,
    /// Items, bottom to top.
    #[serde(default)]
    pub items: Vec<ItemDef>,
}

/// One item of a [`SceneDef`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    /// Name of the source the item shows.
    pub source: String,
    /// Initial transform.
    #[serde(default = "TransformSnapshot::identity")]
    pub transform: TransformSnapshot,
    /// Initial visibility.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_canvas() -> Canvas {
    Canvas {
        width: 1920,
        height: 1080,
    }
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone)]
struct MemoryItem {
    scene: String,
    source: String,
    transform: TransformSnapshot,
    visible: bool,
    /// Writes collected inside an open deferred-update scope.
    pending: Option<TransformSnapshot>,
    commits: u64,
}

/// In-memory scene graph for tests, the simulator and debugging.
#[derive(Debug, Default)]
pub struct MemoryHost {
    canvas: Canvas,
    scenes: BTreeMap<String, Vec<ItemId>>,
    items: BTreeMap<ItemId, MemoryItem>,
    settings: BTreeMap<String, BTreeMap<String, f64>>,
    next_item: u64,
}

impl MemoryHost {
    /// Empty host with the given canvas.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }

    /// Build a host from its JSON-facing description.
    pub fn from_def(def: &MemoryHostDef) -> MoveResult<Self> {
        let mut host = Self::new(def.canvas);
        for scene in &def.scenes {
            if host.scenes.contains_key(&scene.name) {
                return Err(MoveError::validation(format!(
                    "duplicate scene '{}'",
                    scene.name
                )));
            }
            host.add_scene(&scene.name);
            for item in &scene.items {
                let id = host.add_item(&scene.name, &item.source, item.transform);
                host.set_visible(id, item.visible);
            }
        }
        host.settings = def.settings.clone();
        Ok(host)
    }

    /// Add an empty scene. Adding an existing scene is a no-op.
    pub fn add_scene(&mut self, name: &str) {
        self.scenes.entry(name.to_owned()).or_default();
    }

    /// Add an item on top of `scene`, creating the scene if needed.
    pub fn add_item(&mut self, scene: &str, source: &str, transform: TransformSnapshot) -> ItemId {
        let id = ItemId(self.next_item);
        self.next_item += 1;
        self.scenes.entry(scene.to_owned()).or_default().push(id);
        self.items.insert(
            id,
            MemoryItem {
                scene: scene.to_owned(),
                source: source.to_owned(),
                transform,
                visible: true,
                pending: None,
                commits: 0,
            },
        );
        id
    }

    /// Remove an item. Returns whether it existed.
    pub fn remove_item(&mut self, item: ItemId) -> bool {
        let Some(removed) = self.items.remove(&item) else {
            return false;
        };
        if let Some(order) = self.scenes.get_mut(&removed.scene) {
            order.retain(|i| *i != item);
        }
        true
    }

    /// Rename a source everywhere it is referenced: items, scenes and settings.
    pub fn rename_source(&mut self, old: &str, new: &str) {
        for item in self.items.values_mut() {
            if item.source == old {
                item.source = new.to_owned();
            }
            if item.scene == old {
                item.scene = new.to_owned();
            }
        }
        if let Some(order) = self.scenes.remove(old) {
            self.scenes.insert(new.to_owned(), order);
        }
        if let Some(values) = self.settings.remove(old) {
            self.settings.insert(new.to_owned(), values);
        }
    }

    /// Seed a numeric setting.
    pub fn set_setting(&mut self, source: &str, key: &str, value: f64) {
        self.settings
            .entry(source.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
    }

    /// Number of times the transform of `item` was published.
    pub fn commits(&self, item: ItemId) -> u64 {
        self.items.get(&item).map_or(0, |i| i.commits)
    }

    /// Z-position of `item` within its scene (0 is the bottom).
    pub fn order_index(&self, item: ItemId) -> Option<usize> {
        let scene = &self.items.get(&item)?.scene;
        self.scenes.get(scene)?.iter().position(|i| *i == item)
    }

    /// Scene names in sorted order.
    pub fn scene_names(&self) -> Vec<String> {
        self.scenes.keys().cloned().collect()
    }

    fn write(&mut self, item: ItemId, f: impl FnOnce(&mut TransformSnapshot)) {
        let Some(entry) = self.items.get_mut(&item) else {
            return;
        };
        match entry.pending.as_mut() {
            Some(pending) => f(pending),
            None => {
                f(&mut entry.transform);
                entry.commits += 1;
            }
        }
    }

    fn reorder(&mut self, item: ItemId, target: impl FnOnce(usize, usize) -> usize) {
        let Some(scene) = self.items.get(&item).map(|i| i.scene.clone()) else {
            return;
        };
        let Some(order) = self.scenes.get_mut(&scene) else {
            return;
        };
        let Some(current) = order.iter().position(|i| *i == item) else {
            return;
        };
        let to = target(current, order.len() - 1);
        if to != current {
            order.remove(current);
            order.insert(to, item);
        }
    }
}

impl SceneHost for MemoryHost {
    fn items(&self, scene: &str) -> Vec<ItemId> {
        self.scenes.get(scene).cloned().unwrap_or_default()
    }

    fn item_source_name(&self, item: ItemId) -> Option<String> {
        self.items.get(&item).map(|i| i.source.clone())
    }

    fn item_alive(&self, item: ItemId) -> bool {
        self.items.contains_key(&item)
    }

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn transform(&self, item: ItemId) -> Option<TransformSnapshot> {
        self.items.get(&item).map(|i| i.transform)
    }

    fn defer_update_begin(&mut self, item: ItemId) {
        if let Some(entry) = self.items.get_mut(&item) {
            if entry.pending.is_none() {
                entry.pending = Some(entry.transform);
            }
        }
    }

    fn defer_update_end(&mut self, item: ItemId) {
        if let Some(entry) = self.items.get_mut(&item) {
            if let Some(pending) = entry.pending.take() {
                entry.transform = pending;
                entry.commits += 1;
            }
        }
    }

    fn set_position(&mut self, item: ItemId, position: Vec2f) {
        self.write(item, |t| t.position = position);
    }

    fn set_rotation(&mut self, item: ItemId, rotation: f32) {
        self.write(item, |t| t.rotation = rotation);
    }

    fn set_scale(&mut self, item: ItemId, scale: Vec2f) {
        self.write(item, |t| t.scale = scale);
    }

    fn set_bounds(&mut self, item: ItemId, bounds: Vec2f) {
        self.write(item, |t| t.bounds = bounds);
    }

    fn set_crop(&mut self, item: ItemId, crop: Crop) {
        self.write(item, |t| t.crop = crop);
    }

    fn visible(&self, item: ItemId) -> bool {
        self.items.get(&item).is_some_and(|i| i.visible)
    }

    fn set_visible(&mut self, item: ItemId, visible: bool) {
        if let Some(entry) = self.items.get_mut(&item) {
            entry.visible = visible;
        }
    }

    fn set_order_position(&mut self, item: ItemId, position: i32) {
        self.reorder(item, |_, top| position.clamp(0, top as i32) as usize);
    }

    fn move_order(&mut self, item: ItemId, step: OrderStep) {
        self.reorder(item, |current, top| match step {
            OrderStep::Up => (current + 1).min(top),
            OrderStep::Down => current.saturating_sub(1),
        });
    }

    fn setting_value(&self, source: &str, key: &str) -> Option<f64> {
        self.settings.get(source)?.get(key).copied()
    }

    fn set_setting_value(&mut self, source: &str, key: &str, value: f64) {
        if let Some(values) = self.settings.get_mut(source) {
            if let Some(v) = values.get_mut(key) {
                *v = value;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
