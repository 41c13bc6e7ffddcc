pub mod bytes;
pub mod field;
pub mod float3;
pub mod vertex;

pub use field::Field;
pub use float3::Float3;
pub use vertex::{TRIANGLE, Vertex};
