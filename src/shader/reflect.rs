//! Reads struct layouts back out of WGSL through naga, so the shader
//! compiler's own view of a record can be checked against the host's.

use std::mem::size_of;

use wgpu::naga::{self, Binding, Scalar, ScalarKind, TypeInner, VectorSize};

use crate::constants::{VERTEX_INPUT_STRUCT_NAME, VERTEX_STRUCT_NAME};
use crate::error::LayoutError;
use crate::layout::{Field, Vertex};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberLayout {
    pub name: String,
    pub offset: u32,
    pub size: u32,
    pub format: wgpu::VertexFormat,
    pub location: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructLayout {
    pub name: String,
    pub size: u32,
    pub members: Vec<MemberLayout>,
}

/// Everything [`check_vertex_layout`] learned from the shader side.
#[derive(Clone, Debug)]
pub struct VertexLayoutReport {
    pub storage: StructLayout,
    pub input: StructLayout,
    pub array_stride: u32,
}

pub fn reflect_struct(source: &str, name: &str) -> Result<StructLayout, LayoutError> {
    let module = parse(source)?;
    struct_layout(&module, name)
}

/// Stride naga assigns to `array<element>` somewhere in `source`.
pub fn array_stride(source: &str, element: &str) -> Result<u32, LayoutError> {
    let module = parse(source)?;
    stride_of(&module, element)
}

/// Compares a reflected struct with the host's field table, member by member
/// and in order, then the total size. Reports the first divergence.
pub fn verify(reflected: &StructLayout, fields: &[Field], host_size: u64) -> Result<(), LayoutError> {
    if reflected.members.len() != fields.len() {
        return Err(LayoutError::MemberCount {
            host: fields.len(),
            shader: reflected.members.len(),
        });
    }

    for (index, (member, field)) in reflected.members.iter().zip(fields).enumerate() {
        if member.name != field.name {
            return Err(LayoutError::MemberName {
                index,
                host: field.name.to_string(),
                shader: member.name.clone(),
            });
        }
        if u64::from(member.offset) != field.offset {
            return Err(LayoutError::OffsetMismatch {
                name: member.name.clone(),
                host: field.offset,
                shader: member.offset.into(),
            });
        }
        if member.format != field.format {
            return Err(LayoutError::FormatMismatch {
                name: member.name.clone(),
                host: field.format,
                shader: member.format,
            });
        }
        if let Some(location) = member.location {
            if location != field.location {
                return Err(LayoutError::LocationMismatch {
                    name: member.name.clone(),
                    host: field.location,
                    shader: location,
                });
            }
        }
    }

    if u64::from(reflected.size) != host_size {
        return Err(LayoutError::SizeMismatch {
            host: host_size,
            shader: reflected.size.into(),
        });
    }

    log::debug!(
        "`{}` agrees with the host: {} members, {} bytes",
        reflected.name,
        reflected.members.len(),
        reflected.size
    );
    Ok(())
}

/// Generates the WGSL prelude, compiles it with naga and checks both vertex
/// structs and the storage array stride against [`Vertex`].
pub fn check_vertex_layout() -> Result<VertexLayoutReport, LayoutError> {
    let host_size = size_of::<Vertex>() as u64;
    let source = format!(
        "{}\n@group(0) @binding(0) var<storage, read> vertices: array<{VERTEX_STRUCT_NAME}>;\n",
        super::prelude()?
    );
    let module = parse(&source)?;

    let storage = struct_layout(&module, VERTEX_STRUCT_NAME)?;
    verify(&storage, &Vertex::FIELDS, host_size)?;

    let input = struct_layout(&module, VERTEX_INPUT_STRUCT_NAME)?;
    verify(&input, &Vertex::FIELDS, host_size)?;

    let array_stride = stride_of(&module, VERTEX_STRUCT_NAME)?;
    if u64::from(array_stride) != host_size {
        return Err(LayoutError::StrideMismatch {
            host: host_size,
            shader: array_stride.into(),
        });
    }

    Ok(VertexLayoutReport {
        storage,
        input,
        array_stride,
    })
}

fn parse(source: &str) -> Result<naga::Module, LayoutError> {
    naga::front::wgsl::parse_str(source).map_err(|e| LayoutError::Parse(e.emit_to_string(source)))
}

fn struct_layout(module: &naga::Module, name: &str) -> Result<StructLayout, LayoutError> {
    let ty = module
        .types
        .iter()
        .map(|(_, ty)| ty)
        .find(|ty| ty.name.as_deref() == Some(name))
        .ok_or_else(|| LayoutError::MissingStruct(name.to_string()))?;

    let TypeInner::Struct { members, span } = &ty.inner else {
        return Err(LayoutError::NotAStruct(name.to_string()));
    };

    let members = members
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let member_name = member.name.clone().unwrap_or_else(|| format!("#{index}"));
            let inner = &module.types[member.ty].inner;
            let format = vertex_format(inner)
                .ok_or_else(|| LayoutError::UnsupportedType(member_name.clone()))?;
            let location = match member.binding {
                Some(Binding::Location { location, .. }) => Some(location),
                _ => None,
            };
            Ok(MemberLayout {
                name: member_name,
                offset: member.offset,
                size: inner.size(module.to_ctx()),
                format,
                location,
            })
        })
        .collect::<Result<Vec<_>, LayoutError>>()?;

    Ok(StructLayout {
        name: name.to_string(),
        size: *span,
        members,
    })
}

fn stride_of(module: &naga::Module, element: &str) -> Result<u32, LayoutError> {
    module
        .types
        .iter()
        .find_map(|(_, ty)| match ty.inner {
            TypeInner::Array { base, stride, .. }
                if module.types[base].name.as_deref() == Some(element) =>
            {
                Some(stride)
            }
            _ => None,
        })
        .ok_or_else(|| LayoutError::MissingStruct(format!("array<{element}>")))
}

fn vertex_format(inner: &TypeInner) -> Option<wgpu::VertexFormat> {
    const F32: Scalar = Scalar {
        kind: ScalarKind::Float,
        width: 4,
    };
    match *inner {
        TypeInner::Scalar(scalar) if scalar == F32 => Some(wgpu::VertexFormat::Float32),
        TypeInner::Vector { size, scalar } if scalar == F32 => Some(match size {
            VectorSize::Bi => wgpu::VertexFormat::Float32x2,
            VectorSize::Tri => wgpu::VertexFormat::Float32x3,
            VectorSize::Quad => wgpu::VertexFormat::Float32x4,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{TRIANGLE, bytes};

    #[test]
    fn vec3_members_are_padded_by_the_shader_compiler() {
        let layout = reflect_struct(
            "struct Vertex { position: vec3<f32>, color: vec3<f32>, };",
            "Vertex",
        )
        .unwrap();
        assert_eq!(layout.size, 32);
        assert_eq!(layout.members[0].offset, 0);
        assert_eq!(layout.members[0].size, 12);
        assert_eq!(layout.members[1].offset, 16);
        assert_eq!(layout.members[1].size, 12);
    }

    #[test]
    fn host_and_shader_agree() {
        let report = check_vertex_layout().unwrap();
        assert_eq!(report.storage.size, 32);
        assert_eq!(report.input.size, report.storage.size);
        assert_eq!(report.array_stride, 32);
        assert_eq!(report.input.members[0].location, Some(0));
        assert_eq!(report.input.members[1].location, Some(1));
        assert_eq!(report.storage.members[1].location, None);
    }

    #[test]
    fn shader_view_decodes_host_bytes() {
        let layout = check_vertex_layout().unwrap().storage;
        let raw = bytes::as_bytes(&TRIANGLE);
        let stride = layout.size as usize;

        let read = |base: usize, member: &MemberLayout| -> [f32; 3] {
            let at = base + member.offset as usize;
            std::array::from_fn(|i| {
                let word = at + 4 * i;
                f32::from_le_bytes(raw[word..word + 4].try_into().unwrap())
            })
        };

        for (i, vertex) in TRIANGLE.iter().enumerate() {
            let base = i * stride;
            let position = read(base, &layout.members[0]);
            let color = read(base, &layout.members[1]);
            assert_eq!(position.map(f32::to_bits), vertex.position.to_array().map(f32::to_bits));
            assert_eq!(color.map(f32::to_bits), vertex.color.to_array().map(f32::to_bits));
        }
    }

    #[test]
    fn tightly_packed_host_is_caught() {
        let packed = [
            Field {
                name: "position",
                location: 0,
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
            },
            Field {
                name: "color",
                location: 1,
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
            },
        ];
        let layout = check_vertex_layout().unwrap().storage;
        assert!(matches!(
            verify(&layout, &packed, 24),
            Err(LayoutError::OffsetMismatch { host: 12, shader: 16, .. })
        ));
    }

    #[test]
    fn reordered_members_are_caught() {
        let layout = reflect_struct(
            "struct Vertex { color: vec3<f32>, position: vec3<f32>, };",
            "Vertex",
        )
        .unwrap();
        assert!(matches!(
            verify(&layout, &Vertex::FIELDS, 32),
            Err(LayoutError::MemberName { index: 0, .. })
        ));
    }

    #[test]
    fn location_and_format_drift_are_caught() {
        let swapped = reflect_struct(
            "struct VertexInput { @location(1) position: vec3<f32>, @location(0) color: vec3<f32>, };",
            "VertexInput",
        )
        .unwrap();
        assert!(matches!(
            verify(&swapped, &Vertex::FIELDS, 32),
            Err(LayoutError::LocationMismatch { host: 0, shader: 1, .. })
        ));

        let widened = reflect_struct(
            "struct Vertex { position: vec4<f32>, color: vec4<f32>, };",
            "Vertex",
        )
        .unwrap();
        assert!(matches!(
            verify(&widened, &Vertex::FIELDS, 32),
            Err(LayoutError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn extra_member_is_caught() {
        let layout = reflect_struct(
            "struct Vertex { position: vec3<f32>, color: vec3<f32>, uv: vec2<f32>, };",
            "Vertex",
        )
        .unwrap();
        assert!(matches!(
            verify(&layout, &Vertex::FIELDS, 32),
            Err(LayoutError::MemberCount { host: 2, shader: 3 })
        ));
    }

    #[test]
    fn lookup_failures() {
        assert!(matches!(
            reflect_struct("struct Other { a: f32, };", "Vertex"),
            Err(LayoutError::MissingStruct(_))
        ));
        assert!(matches!(
            reflect_struct("alias Vertex = vec3<f32>;", "Vertex"),
            Err(LayoutError::MissingStruct(_) | LayoutError::NotAStruct(_))
        ));
        assert!(matches!(
            reflect_struct("struct Vertex { id: u32, };", "Vertex"),
            Err(LayoutError::UnsupportedType(_))
        ));
        assert!(matches!(
            reflect_struct("struct Vertex {", "Vertex"),
            Err(LayoutError::Parse(_))
        ));
    }

    #[test]
    fn storage_array_stride() {
        let source = "struct Vertex { position: vec3<f32>, color: vec3<f32>, };\n\
                      @group(0) @binding(0) var<storage, read> vertices: array<Vertex>;";
        assert_eq!(array_stride(source, "Vertex").unwrap(), 32);
    }
}
