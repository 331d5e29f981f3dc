//! Player control: locomotion, grapple hook, chase camera, and the rig that drives it.

pub mod camera;
pub mod camera_rig;
pub mod grapple;
pub mod locomotion;

pub use camera::ChaseCamera;
pub use camera_rig::CameraRig;
pub use grapple::{ATTACH_SLACK, GrappleController, GrappleState, rope_force};
pub use locomotion::{LocomotionController, LocomotionReport};
