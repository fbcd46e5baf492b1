//! Math types for StackPlus
//!
//! This crate provides the plane and space vectors plus the 4x4 matrix
//! helpers shared by the geometry pipeline.
//!
//! ## Core Types
//!
//! - [`Vec2`] - Point on the stacking plane
//! - [`Vec3`] - Point of an extruded mesh
//! - [`Mat4`] - 4x4 column-major matrix for affine transforms

mod vec2;
mod vec3;
pub mod mat4;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use mat4::Mat4;
