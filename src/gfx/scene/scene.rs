use super::object::{ObjectKind, SceneObject};
use crate::gfx::geometry::GizmoKind;

/// Host-owned collection of scene objects, kept in insertion order
#[derive(Debug, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Adds an object, renaming it if the name is already taken.
    ///
    /// Returns the index of the new object.
    pub fn add_object(&mut self, mut object: SceneObject) -> usize {
        object.name = self.ensure_unique_name(&object.name);
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Removes an object by index, preserving the order of the rest
    pub fn remove_object(&mut self, index: usize) -> Option<SceneObject> {
        if index < self.objects.len() {
            Some(self.objects.remove(index))
        } else {
            None
        }
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn get_object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn get_object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    /// Finds an object by its exact name
    pub fn find_object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.name == name)
    }

    /// Objects of `kind` whose name ends with `suffix`, ignoring case
    pub fn objects_by_kind_and_suffix<'a>(
        &'a self,
        kind: ObjectKind,
        suffix: &'a str,
    ) -> impl Iterator<Item = &'a SceneObject> + 'a {
        find_by_kind_and_suffix(&self.objects, kind, suffix)
    }

    /// Empties marked as plane gizmos
    pub fn plane_items(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects_by_kind_and_suffix(ObjectKind::Empty, GizmoKind::Plane.style().suffix)
    }

    /// Empties marked as snap gizmos
    pub fn snap_items(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects_by_kind_and_suffix(ObjectKind::Empty, GizmoKind::Snap.style().suffix)
    }

    /// Duplicate names get a numeric `.001`, `.002`, ... extension.
    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{}.{:03}", desired_name, counter);
        }

        test_name
    }
}

/// Filters `objects` to those of exactly `kind` whose display name ends with
/// `suffix`, compared case-insensitively.
///
/// The result is lazy and keeps the collection's iteration order. No match is
/// simply an empty iterator.
pub fn find_by_kind_and_suffix<'a, I>(
    objects: I,
    kind: ObjectKind,
    suffix: &'a str,
) -> impl Iterator<Item = &'a SceneObject> + 'a
where
    I: IntoIterator<Item = &'a SceneObject>,
    I::IntoIter: 'a,
{
    let suffix = suffix.to_lowercase();
    objects
        .into_iter()
        .filter(move |obj| obj.kind == kind && obj.name.to_lowercase().ends_with(&suffix))
}
