use std::collections::BTreeMap;

use cgmath::Vector3;

use crate::{
    error::SceneError,
    gfx::{geometry::ObjectTemplate, picking::BoundingBox},
};

use super::object::{MeshHandle, ObjectId, ObjectUniform, SceneObject};

/// Registry of scene objects keyed by id.
///
/// Ids come from a counter owned by the scene and are never handed out twice,
/// even after removal. Iteration runs in ascending id order, which is also
/// creation order.
#[derive(Debug, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectId, SceneObject>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new object with an identity transform about `origin`.
    pub fn create(
        &mut self,
        mesh: MeshHandle,
        bounds: BoundingBox,
        origin: Vector3<f32>,
    ) -> Result<ObjectId, SceneError> {
        bounds.validate()?;

        let id = ObjectId(self.next_id);
        let object = SceneObject::new(id, mesh, bounds, origin)?;
        self.next_id += 1;

        self.objects.insert(id, object);
        log::debug!("Created scene object {id} with mesh {mesh:?}");
        Ok(id)
    }

    /// Registers an object built by one of the geometry factories. The
    /// template's mesh data must already have been uploaded as `mesh`.
    pub fn spawn(
        &mut self,
        template: &ObjectTemplate,
        mesh: MeshHandle,
    ) -> Result<ObjectId, SceneError> {
        self.create(mesh, template.bounds, template.origin)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Like [`Scene::get_mut`] but reports unknown ids as an error.
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject, SceneError> {
        self.objects
            .get_mut(&id)
            .ok_or(SceneError::UnknownObject(id))
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.objects.remove(&id);
        if removed.is_some() {
            log::debug!("Removed scene object {id}");
        }
        removed
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects, enabled or not.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// Calls `f` for every enabled object. The registry is borrowed for the
    /// whole traversal, so it cannot change underneath it.
    pub fn for_each_enabled<F>(&self, mut f: F)
    where
        F: FnMut(&SceneObject),
    {
        for object in self.objects.values().filter(|object| object.enabled) {
            f(object);
        }
    }

    /// Objects that take part in picking.
    pub fn pickable(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values().filter(|object| object.is_pickable())
    }

    /// Model matrices and mesh handles of enabled objects, for one frame.
    pub fn draw_list(&self) -> Vec<(MeshHandle, ObjectUniform)> {
        let mut list = Vec::with_capacity(self.objects.len());
        self.for_each_enabled(|object| list.push((object.mesh(), object.uniform())));
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Zero;

    fn cube_bounds() -> BoundingBox {
        BoundingBox::unit()
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        let mut scene = Scene::new();
        let a = scene.create(MeshHandle(0), cube_bounds(), Vector3::zero()).unwrap();
        let b = scene.create(MeshHandle(0), cube_bounds(), Vector3::zero()).unwrap();
        assert_ne!(a, b);

        scene.remove(b).unwrap();
        let c = scene.create(MeshHandle(0), cube_bounds(), Vector3::zero()).unwrap();
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert!(c > b);
    }

    #[test]
    fn get_and_remove() {
        let mut scene = Scene::new();
        let id = scene.create(MeshHandle(3), cube_bounds(), Vector3::zero()).unwrap();
        assert_eq!(scene.get(id).map(SceneObject::mesh), Some(MeshHandle(3)));
        assert!(scene.contains(id));

        assert!(scene.remove(id).is_some());
        assert!(scene.get(id).is_none());
        assert!(scene.remove(id).is_none());
        assert!(scene.is_empty());
        assert_eq!(scene.object_mut(id).unwrap_err(), SceneError::UnknownObject(id));
    }

    #[test]
    fn invalid_bounds_are_rejected_without_consuming_an_id() {
        let mut scene = Scene::new();
        let bad = BoundingBox {
            begin: Vector3::new(1.0, 0.0, 0.0),
            end: Vector3::new(0.0, 1.0, 1.0),
            enabled: true,
        };
        assert_eq!(
            scene.create(MeshHandle(0), bad, Vector3::zero()),
            Err(SceneError::InvalidBounds { axis: 'x' })
        );
        assert!(scene.is_empty());

        let id = scene.create(MeshHandle(0), cube_bounds(), Vector3::zero()).unwrap();
        assert_eq!(id.raw(), 0);
    }

    #[test]
    fn non_finite_pivot_is_rejected() {
        let mut scene = Scene::new();
        assert!(scene
            .create(MeshHandle(0), cube_bounds(), Vector3::new(f32::INFINITY, 0.0, 0.0))
            .is_err());
        assert!(scene.is_empty());
    }

    #[test]
    fn for_each_enabled_skips_disabled_objects() {
        let mut scene = Scene::new();
        let shown = scene.create(MeshHandle(0), cube_bounds(), Vector3::zero()).unwrap();
        let hidden = scene.create(MeshHandle(1), cube_bounds(), Vector3::zero()).unwrap();
        scene.get_mut(hidden).unwrap().enabled = false;

        let mut seen = Vec::new();
        scene.for_each_enabled(|object| seen.push(object.id()));
        assert_eq!(seen, vec![shown]);
        assert_eq!(scene.draw_list().len(), 1);
        assert_eq!(scene.iter().count(), 2);
    }

    #[test]
    fn pickable_respects_collision_switch() {
        let mut scene = Scene::new();
        let a = scene.create(MeshHandle(0), cube_bounds(), Vector3::zero()).unwrap();
        let b = scene.create(MeshHandle(0), cube_bounds(), Vector3::zero()).unwrap();
        scene.get_mut(a).unwrap().set_collision_enabled(false);

        let ids: Vec<_> = scene.pickable().map(SceneObject::id).collect();
        assert_eq!(ids, vec![b]);
    }

    #[test]
    fn spawn_uses_template_bounds_and_pivot() {
        let mut scene = Scene::new();
        let template = ObjectTemplate::cube();
        let id = scene.spawn(&template, MeshHandle(9)).unwrap();
        let object = scene.get(id).unwrap();
        assert_eq!(object.origin(), Vector3::new(0.5, 0.5, 0.5));
        assert_eq!(*object.bounds(), template.bounds);
    }
}
