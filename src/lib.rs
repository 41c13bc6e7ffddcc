//! A vertex record shared between host code and WGSL shaders, with the
//! checks that keep both sides reading the same bytes.

pub mod constants;
pub mod error;
pub mod layout;
pub mod shader;

pub use error::LayoutError;
pub use layout::{Field, Float3, TRIANGLE, Vertex};
pub use shader::reflect::{StructLayout, VertexLayoutReport, check_vertex_layout};
