use std::mem::{align_of, offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::{Field, Float3};
use crate::constants::{COLOR_LOCATION, FLOAT3_ALIGNMENT, POSITION_LOCATION, VERTEX_STRIDE};

/// A vertex as both the host and the shader see it.
///
/// | offset | field    | bytes            |
/// |--------|----------|------------------|
/// | 0      | position | 12, padded to 16 |
/// | 16     | color    | 12, padded to 16 |
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Float3,
    pub color: Float3,
}

// Host and shader read the same bytes; a drift here must not build.
const _: () = {
    assert!(size_of::<Vertex>() == 2 * size_of::<Float3>());
    assert!(size_of::<Vertex>() == VERTEX_STRIDE);
    assert!(align_of::<Vertex>() == FLOAT3_ALIGNMENT);
    assert!(offset_of!(Vertex, position) == 0);
    assert!(offset_of!(Vertex, color) == size_of::<Float3>());
};

impl Vertex {
    pub const FIELDS: [Field; 2] = [
        Field {
            name: "position",
            location: POSITION_LOCATION,
            format: wgpu::VertexFormat::Float32x3,
            offset: offset_of!(Vertex, position) as wgpu::BufferAddress,
        },
        Field {
            name: "color",
            location: COLOR_LOCATION,
            format: wgpu::VertexFormat::Float32x3,
            offset: offset_of!(Vertex, color) as wgpu::BufferAddress,
        },
    ];

    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        [Self::FIELDS[0].attribute(), Self::FIELDS[1].attribute()];

    pub const fn new(position: Float3, color: Float3) -> Self {
        Self { position, color }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Red, green and blue corners of a unit triangle.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(Float3::new(0.0, 0.0, 0.0), Float3::new(1.0, 0.0, 0.0)),
    Vertex::new(Float3::new(1.0, 0.0, 0.0), Float3::new(0.0, 1.0, 0.0)),
    Vertex::new(Float3::new(0.0, 1.0, 0.0), Float3::new(0.0, 0.0, 1.0)),
];
