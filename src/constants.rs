// Shader locations
pub const POSITION_LOCATION: u32 = 0;
pub const COLOR_LOCATION: u32 = 1;

// A vec3<f32> holds 12 bytes but strides and aligns like a vec4<f32>
pub const FLOAT3_SIZE: usize = 12;
pub const FLOAT3_STRIDE: usize = 16;
pub const FLOAT3_ALIGNMENT: usize = 16;

pub const VERTEX_STRIDE: usize = 2 * FLOAT3_STRIDE;

// Minimum vertex-buffer offset alignments seen across backends
pub const MIN_UPLOAD_ALIGNMENT: usize = 4;
pub const STRICT_UPLOAD_ALIGNMENT: usize = 16;

// Names of the generated WGSL structs
pub const VERTEX_STRUCT_NAME: &str = "Vertex";
pub const VERTEX_INPUT_STRUCT_NAME: &str = "VertexInput";
