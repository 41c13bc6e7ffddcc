//! WGSL declarations of the shared records, generated from the same field
//! tables the host uses to describe its vertex buffers.

use crate::constants::{VERTEX_INPUT_STRUCT_NAME, VERTEX_STRUCT_NAME};
use crate::error::LayoutError;
use crate::layout::{Field, Vertex};

pub mod reflect;

pub fn wgsl_type(format: wgpu::VertexFormat) -> Result<&'static str, LayoutError> {
    match format {
        wgpu::VertexFormat::Float32 => Ok("f32"),
        wgpu::VertexFormat::Float32x2 => Ok("vec2<f32>"),
        wgpu::VertexFormat::Float32x3 => Ok("vec3<f32>"),
        wgpu::VertexFormat::Float32x4 => Ok("vec4<f32>"),
        other => Err(LayoutError::UnsupportedFormat(other)),
    }
}

/// Host-shareable form, for `array<T>` in storage or uniform buffers.
pub fn struct_declaration(name: &str, fields: &[Field]) -> Result<String, LayoutError> {
    declare(name, fields, false)
}

/// Per-vertex input form, with an `@location` on every member.
pub fn vertex_input_declaration(name: &str, fields: &[Field]) -> Result<String, LayoutError> {
    declare(name, fields, true)
}

/// The declarations consumer shaders prepend to their own source.
pub fn prelude() -> Result<String, LayoutError> {
    let storage = struct_declaration(VERTEX_STRUCT_NAME, &Vertex::FIELDS)?;
    let input = vertex_input_declaration(VERTEX_INPUT_STRUCT_NAME, &Vertex::FIELDS)?;
    Ok(format!("{storage}\n{input}"))
}

fn declare(name: &str, fields: &[Field], locations: bool) -> Result<String, LayoutError> {
    let mut out = format!("struct {name} {{\n");
    for field in fields {
        let ty = wgsl_type(field.format)?;
        if locations {
            out.push_str(&format!("    @location({}) {}: {ty},\n", field.location, field.name));
        } else {
            out.push_str(&format!("    {}: {ty},\n", field.name));
        }
    }
    out.push_str("};\n");
    Ok(out)
}
