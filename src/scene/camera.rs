use glam::{Mat4, Vec2, Vec3};

use crate::animation::Easing;
use crate::config::CameraPose;
use crate::scene::bounds::Ray;

/// Perspective camera used for pointer picking.
///
/// The host's orbit controller owns the real camera. This is a read-side
/// mirror rebuilt from the controller's current pose whenever picking needs
/// it.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view, radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Camera {
    #[must_use]
    pub fn new_perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
        }
    }

    /// A camera placed at `pose`.
    #[must_use]
    pub fn from_pose(pose: &CameraPose, aspect: f32) -> Self {
        let mut camera = Self::new_perspective(pose.fov_degrees, aspect, 0.1, 100.0);
        camera.position = pose.position;
        camera.target = pose.target;
        camera
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect.max(f32::EPSILON), self.near, self.far)
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Casts a ray through normalized device coordinates (`[-1, 1]²`, y up).
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection_matrix().inverse();
        // Depth range is [0, 1].
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }
}

/// A declarative camera move handed to the orbit controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMove {
    pub position: Vec3,
    pub target: Vec3,
    pub duration: f32,
    pub easing: Easing,
}

/// The host's camera/orbit controller.
pub trait CameraRig {
    /// Enables or disables user orbiting.
    fn set_orbit_enabled(&mut self, enabled: bool);

    /// Starts a tween of the camera towards the given pose.
    fn move_to(&mut self, camera_move: CameraMove);

    /// Current camera pose, used for picking.
    fn pose(&self) -> CameraPose;
}

/// A camera rig that applies moves instantly and keeps a log of them.
///
/// Useful for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRig {
    pub orbit_enabled: bool,
    pub pose: CameraPose,
    pub moves: Vec<CameraMove>,
}

impl RecordingRig {
    #[must_use]
    pub fn new(pose: CameraPose) -> Self {
        Self {
            orbit_enabled: true,
            pose,
            moves: Vec::new(),
        }
    }
}

impl CameraRig for RecordingRig {
    fn set_orbit_enabled(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
    }

    fn move_to(&mut self, camera_move: CameraMove) {
        self.pose.position = camera_move.position;
        self.pose.target = camera_move.target;
        self.moves.push(camera_move);
    }

    fn pose(&self) -> CameraPose {
        self.pose
    }
}
