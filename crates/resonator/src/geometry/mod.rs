mod axis;
mod vec2;
mod vec3;
mod vec4;

pub use axis::Axis;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
