//! # Viewport
//!
//! Wires the scene, the orbit camera, the projection and the picker together
//! the way a windowed application shell would. The host forwards winit window
//! events and reads back uniforms for drawing; clicks select objects.

use cgmath::Vector3;
use winit::event::WindowEvent;

use crate::{
    error::{CameraError, ClickError, PickingError, SceneError, ViewportError},
    gfx::{
        camera::{
            CameraController, CameraUniform, ControllerResponse, OrbitCamera, Projection,
            ViewParams,
        },
        geometry::{MeshData, ObjectTemplate},
        picking::{ObjectPicker, PickResult},
        scene::{MeshHandle, ObjectId, ObjectUniform, Scene, SceneObject},
    },
    options::ViewerOptions,
};

pub struct Viewport {
    pub scene: Scene,
    pub camera: OrbitCamera,
    pub projection: Projection,
    pub controller: CameraController,
    /// Slot `i` holds the mesh behind `MeshHandle(i)`; freed slots are `None`
    /// and their handles are not handed out again.
    meshes: Vec<Option<MeshData>>,
    size: (u32, u32),
    selection: Option<ObjectId>,
}

impl Viewport {
    /// Builds a viewport after validating `options`.
    pub fn new(options: ViewerOptions, width: u32, height: u32) -> Result<Self, ViewportError> {
        options.validate()?;
        let projection = Projection::new(&options.projection, width, height)?;
        let camera = OrbitCamera::new(&options.camera)?;
        log::info!("Viewport created at {width}x{height}");

        Ok(Self {
            scene: Scene::new(),
            camera,
            projection,
            controller: CameraController::new(),
            meshes: Vec::new(),
            size: (width, height),
            selection: None,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Currently selected object, if it is still in the scene.
    pub fn selection(&self) -> Option<ObjectId> {
        self.selection.filter(|id| self.scene.contains(*id))
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PickingError> {
        self.projection.resize(width, height)?;
        self.size = (width, height);
        log::debug!("Viewport resized to {width}x{height}");
        Ok(())
    }

    /// Registers the template's mesh and spawns an object using it.
    pub fn add_object(&mut self, template: &ObjectTemplate) -> Result<ObjectId, SceneError> {
        template.mesh.validate()?;
        let mesh = MeshHandle(self.meshes.len() as u64);
        let id = self.scene.spawn(template, mesh)?;
        self.meshes.push(Some(template.mesh.clone()));
        Ok(id)
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle.0 as usize)?.as_ref()
    }

    /// Removes an object. The camera is released if it orbited the object,
    /// the selection is cleared if it pointed at it, and the object's mesh is
    /// dropped once no remaining object uses it.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.scene.remove(id)?;
        let mesh = removed.mesh();
        if !self.scene.iter().any(|object| object.mesh() == mesh) {
            if let Some(slot) = self.meshes.get_mut(mesh.0 as usize) {
                *slot = None;
            }
        }
        if self.camera.target() == Some(id) {
            self.camera.unbind();
        }
        if self.selection == Some(id) {
            self.selection = None;
        }
        Some(removed)
    }

    /// Two cubes side by side: a large one at (-10, 0, -50) and a small one
    /// at (10, 0, -50) that the camera orbits.
    pub fn populate_demo_scene(&mut self) -> Result<(ObjectId, ObjectId), SceneError> {
        let cube = ObjectTemplate::cube();

        let large = self.add_object(&cube)?;
        let object = self.scene.object_mut(large)?;
        object.set_scale(Vector3::new(10.0, 10.0, 10.0))?;
        object.set_location(Vector3::new(-10.0, 0.0, -50.0))?;

        let small = self.add_object(&cube)?;
        self.scene
            .object_mut(small)?
            .set_location(Vector3::new(10.0, 0.0, -50.0))?;

        self.camera.bind(small);
        log::info!("Demo scene populated with {} objects", self.scene.len());
        Ok((large, small))
    }

    pub fn view_params(&self) -> Result<ViewParams, CameraError> {
        self.camera.view_params(&self.scene)
    }

    pub fn camera_uniform(&self) -> Result<CameraUniform, CameraError> {
        Ok(CameraUniform::new(&self.view_params()?, &self.projection))
    }

    /// Model uniforms of every enabled object, in id order.
    pub fn object_uniforms(&self) -> Vec<(MeshHandle, ObjectUniform)> {
        self.scene.draw_list()
    }

    /// Picks at `position` and makes the hit, or nothing, the selection.
    pub fn click(&mut self, position: (f32, f32)) -> Result<Option<PickResult>, ClickError> {
        let view = self.view_params()?;
        let hit = ObjectPicker::new(&self.projection).pick_object(
            position,
            self.size,
            &view,
            &self.projection,
            self.scene.iter(),
        )?;

        self.selection = hit.as_ref().map(|hit| hit.object);
        Ok(hit)
    }

    /// Feed a window event. Clicks are resolved to a selection here; failed
    /// picks are logged and leave the selection alone.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> ControllerResponse {
        if let WindowEvent::Resized(size) = event {
            if let Err(e) = self.resize(size.width, size.height) {
                log::warn!("Ignoring resize: {e}");
            }
            return ControllerResponse::Ignored;
        }

        let response = self.controller.process_window_event(event, &mut self.camera);
        if let ControllerResponse::Click { position } = response {
            match self.click(position) {
                Ok(Some(hit)) => log::info!("Selected object {}", hit.object),
                Ok(None) => log::debug!("Click at {position:?} selected nothing"),
                Err(e) => log::warn!("Click at {position:?} failed: {e}"),
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Zero;

    fn demo() -> (Viewport, ObjectId, ObjectId) {
        let mut viewport = Viewport::new(ViewerOptions::default(), 800, 600).unwrap();
        let (large, small) = viewport.populate_demo_scene().unwrap();
        (viewport, large, small)
    }

    #[test]
    fn demo_scene_binds_camera_to_small_cube() {
        let (viewport, large, small) = demo();
        assert_eq!(viewport.camera.target(), Some(small));
        assert_eq!(viewport.scene.len(), 2);
        assert_eq!(viewport.scene.get(large).unwrap().scale(), Vector3::new(10.0, 10.0, 10.0));
        assert_eq!(
            viewport.view_params().unwrap().target,
            cgmath::Point3::new(10.0, 0.0, -50.0)
        );
        assert_eq!(viewport.object_uniforms().len(), 2);
        assert!(viewport.mesh(MeshHandle(1)).is_some());
    }

    #[test]
    fn center_click_selects_orbited_cube() {
        let (mut viewport, _, small) = demo();
        let hit = viewport.click((400.0, 300.0)).unwrap().unwrap();
        assert_eq!(hit.object, small);
        assert!((hit.distance - 19.5).abs() < 0.05);
        assert_eq!(viewport.selection(), Some(small));
    }

    #[test]
    fn clicking_empty_space_clears_selection() {
        let (mut viewport, _, small) = demo();
        viewport.click((400.0, 300.0)).unwrap();
        assert_eq!(viewport.selection(), Some(small));

        assert!(viewport.click((5.0, 5.0)).unwrap().is_none());
        assert_eq!(viewport.selection(), None);
    }

    #[test]
    fn removing_target_unbinds_camera() {
        let (mut viewport, _, small) = demo();
        viewport.click((400.0, 300.0)).unwrap();

        assert!(viewport.remove_object(small).is_some());
        assert_eq!(viewport.camera.target(), None);
        assert_eq!(viewport.selection(), None);
        assert_eq!(viewport.view_params(), Err(CameraError::NoTarget));
        assert_eq!(
            viewport.click((400.0, 300.0)),
            Err(ClickError::Camera(CameraError::NoTarget))
        );
    }

    #[test]
    fn removing_other_object_keeps_camera() {
        let (mut viewport, large, small) = demo();
        viewport.remove_object(large);
        assert_eq!(viewport.camera.target(), Some(small));
        assert!(viewport.remove_object(large).is_none());
    }

    #[test]
    fn zero_sized_resize_is_rejected() {
        let (mut viewport, _, _) = demo();
        assert!(viewport.resize(0, 600).is_err());
        assert_eq!(viewport.size(), (800, 600));
        assert!(Viewport::new(ViewerOptions::default(), 0, 0).is_err());
    }

    #[test]
    fn invalid_options_are_rejected() {
        let mut options = ViewerOptions::default();
        options.camera.arm_min = 50.0;
        options.camera.arm_max = 10.0;
        assert!(matches!(
            Viewport::new(options, 800, 600),
            Err(ViewportError::Options(_))
        ));

        let mut options = ViewerOptions::default();
        options.camera.polar_min = 0.0;
        assert!(matches!(
            Viewport::new(options, 800, 600),
            Err(ViewportError::Options(_))
        ));

        assert!(matches!(
            Viewport::new(ViewerOptions::default(), 800, 0),
            Err(ViewportError::Picking(PickingError::InvalidViewport { .. }))
        ));
    }

    #[test]
    fn picking_follows_projection_changes() {
        let (mut viewport, large, small) = demo();
        viewport
            .camera
            .apply_preset(crate::gfx::camera::ViewPreset::Side(0));
        assert_eq!(viewport.click((400.0, 300.0)).unwrap().unwrap().object, small);

        // The small cube now sits in front of the near plane.
        viewport.projection.znear = 25.0;
        let hit = viewport.click((400.0, 300.0)).unwrap().unwrap();
        assert_eq!(hit.object, large);
        assert!(hit.distance >= 25.0);
    }

    #[test]
    fn removing_last_user_frees_mesh() {
        let (mut viewport, large, small) = demo();
        let mesh = viewport.scene.get(small).unwrap().mesh();
        let shared = viewport
            .scene
            .create(mesh, crate::gfx::picking::BoundingBox::unit(), Vector3::zero())
            .unwrap();

        viewport.remove_object(small);
        assert!(viewport.mesh(mesh).is_some());
        viewport.remove_object(shared);
        assert!(viewport.mesh(mesh).is_none());

        let large_mesh = viewport.scene.get(large).unwrap().mesh();
        let id = viewport.add_object(&ObjectTemplate::cube()).unwrap();
        assert_ne!(viewport.scene.get(id).unwrap().mesh(), mesh);
        assert_ne!(viewport.scene.get(id).unwrap().mesh(), large_mesh);
    }

    #[test]
    fn window_click_selects_and_resize_updates_size() {
        use winit::{
            dpi::{PhysicalPosition, PhysicalSize},
            event::{DeviceId, ElementState, MouseButton},
        };

        let (mut viewport, _, small) = demo();
        // SAFETY: dummy ids are only compared, never handed to the platform.
        let device_id = unsafe { DeviceId::dummy() };
        let button = |state| WindowEvent::MouseInput {
            device_id,
            state,
            button: MouseButton::Left,
        };

        viewport.handle_window_event(&WindowEvent::CursorMoved {
            device_id,
            position: PhysicalPosition::new(400.0, 300.0),
        });
        viewport.handle_window_event(&button(ElementState::Pressed));
        let response = viewport.handle_window_event(&button(ElementState::Released));
        assert_eq!(
            response,
            ControllerResponse::Click {
                position: (400.0, 300.0)
            }
        );
        assert_eq!(viewport.selection(), Some(small));

        viewport.handle_window_event(&WindowEvent::Resized(PhysicalSize::new(1024, 512)));
        assert_eq!(viewport.size(), (1024, 512));
        assert_eq!(viewport.projection.aspect, 2.0);
        viewport.handle_window_event(&WindowEvent::Resized(PhysicalSize::new(0, 512)));
        assert_eq!(viewport.size(), (1024, 512));
    }

    #[test]
    fn camera_uniform_needs_target() {
        let viewport = Viewport::new(ViewerOptions::default(), 800, 600).unwrap();
        assert_eq!(viewport.camera_uniform().err(), Some(CameraError::NoTarget));
    }
}
