//! Chase camera: view/projection matrices and screen-to-world picking rays.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use skyhook_config::CameraRigConfig;

/// A perspective camera positioned by the [`CameraRig`](crate::CameraRig).
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    /// World-space position.
    pub position: Vec3,
    /// Rotation as a unit quaternion. Identity looks down -Z.
    pub rotation: Quat,
    /// Radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    /// Also the grapple's reach.
    pub far: f32,
}

impl ChaseCamera {
    /// Builds the starting camera from the rig settings.
    pub fn from_config(config: &CameraRigConfig, aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::from_array(config.start_position),
            rotation: Quat::IDENTITY,
            fov_y: config.fov_y_degrees.to_radians(),
            aspect_ratio,
            near: config.near_clip,
            far: config.far_clip,
        }
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// Reverse-Z perspective: the near plane maps to depth 1.
    pub fn projection_matrix(&self) -> Mat4 {
        // Near plane maps to z=1, far plane to z=0.
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit look direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Forward projected onto the ground plane and normalized.
    ///
    /// Falls back to -Z when the camera looks straight up or down.
    pub fn horizontal_forward(&self) -> Vec3 {
        let f = self.forward();
        Vec3::new(f.x, 0.0, f.z).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Turns the camera to face `target`. A target at the camera position, or
    /// straight above or below it, leaves the rotation unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        let Some(right) = forward.cross(Vec3::Y).try_normalize() else {
            return;
        };
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
    }

    /// Adopts a new viewport size. Zero-sized viewports are ignored.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// World-space ray from the camera through a pixel of a `viewport`-sized
    /// window. Returns `(origin, unit direction)`.
    ///
    /// A degenerate viewport yields the centre ray.
    pub fn screen_ray(&self, pixel: Vec2, viewport: Vec2) -> (Vec3, Vec3) {
        let (ndc, aspect) = if viewport.x > 0.0 && viewport.y > 0.0 {
            (
                Vec2::new(
                    2.0 * pixel.x / viewport.x - 1.0,
                    1.0 - 2.0 * pixel.y / viewport.y,
                ),
                viewport.x / viewport.y,
            )
        } else {
            (Vec2::ZERO, self.aspect_ratio)
        };

        let tan_half = (self.fov_y * 0.5).tan();
        let dir = self.forward()
            + self.right() * (ndc.x * tan_half * aspect)
            + self.up() * (ndc.y * tan_half);
        (self.position, dir.try_normalize().unwrap_or(self.forward()))
    }
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self::from_config(&CameraRigConfig::default(), 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_matches_rig_settings() {
        let camera = ChaseCamera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 7.0, 14.0));
        assert!((camera.fov_y - 70f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 600.0);
    }

    #[test]
    fn test_identity_camera_looks_down_neg_z() {
        let camera = ChaseCamera::default();
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((camera.right() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_look_at_points_forward_at_target() {
        let mut camera = ChaseCamera::default();
        let target = Vec3::new(10.0, 2.0, -5.0);
        camera.look_at(target);
        let expected = (target - camera.position).normalize();
        assert!((camera.forward() - expected).length() < 1e-4);
        assert!(camera.up().y > 0.0, "camera should stay upright");
    }

    #[test]
    fn test_look_straight_down_keeps_rotation() {
        let mut camera = ChaseCamera::default();
        let before = camera.rotation;
        camera.look_at(camera.position - Vec3::Y * 5.0);
        assert_eq!(camera.rotation, before);
    }

    #[test]
    fn test_horizontal_forward_ignores_pitch() {
        let camera = ChaseCamera {
            rotation: Quat::from_rotation_y(FRAC_PI_2) * Quat::from_rotation_x(-0.6),
            ..ChaseCamera::default()
        };
        let h = camera.horizontal_forward();
        assert!(h.y.abs() < 1e-6);
        assert!((h - Vec3::NEG_X).length() < 1e-4, "h={h}");
    }

    #[test]
    fn test_horizontal_forward_fallback_when_vertical() {
        let camera = ChaseCamera {
            rotation: Quat::from_rotation_x(-FRAC_PI_2),
            ..ChaseCamera::default()
        };
        assert!((camera.horizontal_forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_screen_centre_ray_is_forward() {
        let camera = ChaseCamera::default();
        let (origin, dir) = camera.screen_ray(Vec2::new(640.0, 360.0), Vec2::new(1280.0, 720.0));
        assert_eq!(origin, camera.position);
        assert!((dir - camera.forward()).length() < 1e-5);
    }

    #[test]
    fn test_screen_edge_ray_spans_half_fov() {
        let camera = ChaseCamera::default();
        let (_, dir) = camera.screen_ray(Vec2::new(640.0, 0.0), Vec2::new(1280.0, 720.0));
        let angle = dir.angle_between(camera.forward());
        assert!((angle - camera.fov_y * 0.5).abs() < 1e-4, "angle={angle}");
        assert!(dir.y > 0.0, "top of screen points up");
    }

    #[test]
    fn test_aspect_ratio_ignores_zero_size() {
        let mut camera = ChaseCamera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
        camera.set_aspect_ratio(0.0, 0.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_inverse_is_camera_transform() {
        let camera = ChaseCamera {
            position: Vec3::new(10.0, 20.0, 30.0),
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            ..ChaseCamera::default()
        };
        let reconstructed = camera.view_matrix().inverse().col(3).truncate();
        assert!((reconstructed - camera.position).length() < 1e-4);
    }
}
