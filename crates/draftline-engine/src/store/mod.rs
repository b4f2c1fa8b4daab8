// Imports
use draftline_compose::shapes::{Shape, Shapeable};
use draftline_compose::transform::Transformable;
use p2d::bounding_volume::{Aabb, BoundingVolume};
use serde::{Deserialize, Serialize};
use slotmap::{HopSlotMap, SecondaryMap};

slotmap::new_key_type! {
    /// A key of an element in the store.
    pub struct ElementKey;
}

/// Holds state whether an element is locked.
///
/// Locked elements are excluded from drag offset application while staying part of the active
/// target set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename = "lock_component")]
pub struct LockComponent {
    #[serde(rename = "locked")]
    /// Whether the element is locked.
    pub locked: bool,
}

impl Default for LockComponent {
    fn default() -> Self {
        Self { locked: false }
    }
}

/// The element store.
///
/// Implements a lightweight Entity - Component - System pattern. The entities are the
/// [ElementKey]s. The `shape_components` are the primary map holding the geometry, every element
/// must have one. The `lock_components` hold state whether the elements are locked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename = "element_store")]
pub struct ElementStore {
    #[serde(rename = "shape_components")]
    shape_components: HopSlotMap<ElementKey, Shape>,
    #[serde(rename = "lock_components")]
    lock_components: SecondaryMap<ElementKey, LockComponent>,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self {
            shape_components: HopSlotMap::with_key(),
            lock_components: SecondaryMap::new(),
        }
    }
}

impl ElementStore {
    /// Insert a new element with the given shape, unlocked.
    ///
    /// Returns the key for it.
    pub fn insert_shape(&mut self, shape: Shape) -> ElementKey {
        let key = self.shape_components.insert(shape);
        self.lock_components.insert(key, LockComponent::default());
        key
    }

    /// Remove an element.
    pub fn remove(&mut self, key: ElementKey) -> Option<Shape> {
        self.lock_components.remove(key);
        self.shape_components.remove(key)
    }

    /// Whether the store holds an element for the key.
    pub fn contains(&self, key: ElementKey) -> bool {
        self.shape_components.contains_key(key)
    }

    /// Gets a immutable reference to the shape of an element.
    pub fn shape_ref(&self, key: ElementKey) -> Option<&Shape> {
        self.shape_components.get(key)
    }

    /// Replace the shape of an element wholesale.
    ///
    /// Returns false when the key is not present.
    pub fn set_shape(&mut self, key: ElementKey, shape: Shape) -> bool {
        match self.shape_components.get_mut(key) {
            Some(slot) => {
                *slot = shape;
                true
            }
            None => false,
        }
    }

    /// Translate the elements for the given keys by the offset.
    pub fn translate_elements(&mut self, keys: &[ElementKey], offset: na::Vector2<f64>) {
        for &key in keys {
            if let Some(shape) = self.shape_components.get_mut(key) {
                shape.translate(offset);
            }
        }
    }

    /// The absolute position of an element, i.e. the upper-left corner of its bounds.
    pub fn element_pos(&self, key: ElementKey) -> Option<na::Vector2<f64>> {
        self.shape_components.get(key).map(|shape| shape.pos())
    }

    /// Set the absolute position of an element.
    pub fn set_element_pos(&mut self, key: ElementKey, pos: na::Vector2<f64>) {
        if let Some(shape) = self.shape_components.get_mut(key) {
            shape.set_pos(pos);
        }
    }

    /// Whether the element for the key is locked. Unknown keys report unlocked.
    pub fn locked(&self, key: ElementKey) -> bool {
        self.lock_components
            .get(key)
            .map(|lock_comp| lock_comp.locked)
            .unwrap_or(false)
    }

    /// Set whether the element for the key is locked.
    pub fn set_locked(&mut self, key: ElementKey, locked: bool) {
        if let Some(lock_comp) = self.lock_components.get_mut(key) {
            lock_comp.locked = locked;
        }
    }

    /// All element keys.
    pub fn keys(&self) -> Vec<ElementKey> {
        self.shape_components.keys().collect()
    }

    /// The amount of stored elements.
    pub fn len(&self) -> usize {
        self.shape_components.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.shape_components.is_empty()
    }

    /// The keys of all elements whose bounds contain the given position.
    pub fn keys_at_pos(&self, pos: na::Vector2<f64>) -> Vec<ElementKey> {
        self.shape_components
            .iter()
            .filter_map(|(key, shape)| {
                shape
                    .bounds()
                    .contains_local_point(&pos.into())
                    .then_some(key)
            })
            .collect()
    }

    /// The merged bounds for the elements of the given keys.
    pub fn bounds_for_elements(&self, keys: &[ElementKey]) -> Option<Aabb> {
        keys.iter()
            .filter_map(|&key| self.shape_components.get(key).map(|shape| shape.bounds()))
            .reduce(|acc, bounds| acc.merged(&bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use draftline_compose::shapes::{Line, Rect};

    #[test]
    fn insert_translate_remove() {
        let mut store = ElementStore::default();
        let key = store.insert_shape(Shape::Line(Line::new(
            na::vector![0.0, 0.0],
            na::vector![5.0, 0.0],
        )));
        assert_eq!(store.len(), 1);

        store.translate_elements(&[key], na::vector![2.0, 3.0]);
        match store.shape_ref(key).unwrap() {
            Shape::Line(line) => {
                assert_relative_eq!(line.start, na::vector![2.0, 3.0]);
                assert_relative_eq!(line.end, na::vector![7.0, 3.0]);
            }
            _ => panic!("expected a line"),
        }

        assert!(store.remove(key).is_some());
        assert!(!store.contains(key));
    }

    #[test]
    fn element_pos_roundtrip() {
        let mut store = ElementStore::default();
        let key = store.insert_shape(Shape::Rect(Rect::from_corners(
            na::vector![2.0, 3.0],
            na::vector![6.0, 9.0],
        )));

        assert_relative_eq!(store.element_pos(key).unwrap(), na::vector![2.0, 3.0]);
        store.set_element_pos(key, na::vector![10.0, 10.0]);
        assert_relative_eq!(store.element_pos(key).unwrap(), na::vector![10.0, 10.0]);
    }

    #[test]
    fn lock_component_roundtrip() {
        let mut store = ElementStore::default();
        let key = store.insert_shape(Shape::Rect(Rect::from_corners(
            na::vector![0.0, 0.0],
            na::vector![4.0, 4.0],
        )));

        assert!(!store.locked(key));
        store.set_locked(key, true);
        assert!(store.locked(key));
    }

    #[test]
    fn keys_at_pos_hits_containing_bounds() {
        let mut store = ElementStore::default();
        let hit = store.insert_shape(Shape::Rect(Rect::from_corners(
            na::vector![0.0, 0.0],
            na::vector![10.0, 10.0],
        )));
        let _miss = store.insert_shape(Shape::Rect(Rect::from_corners(
            na::vector![20.0, 20.0],
            na::vector![30.0, 30.0],
        )));

        let keys = store.keys_at_pos(na::vector![5.0, 5.0]);
        assert_eq!(keys, vec![hit]);
    }
}
