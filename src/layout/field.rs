/// One member of a shared record: where it lives in host memory and how the
/// shader reads it. Tables of these drive both the `wgpu` attributes and the
/// generated WGSL, so the two can't drift apart.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub location: u32,
    pub format: wgpu::VertexFormat,
    pub offset: wgpu::BufferAddress,
}

impl Field {
    pub const fn attribute(&self) -> wgpu::VertexAttribute {
        wgpu::VertexAttribute {
            format: self.format,
            offset: self.offset,
            shader_location: self.location,
        }
    }

    /// Bytes of data the member holds, excluding any trailing padding.
    pub const fn size(&self) -> u64 {
        self.format.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_mirrors_field() {
        let field = Field {
            name: "color",
            location: 3,
            format: wgpu::VertexFormat::Float32x3,
            offset: 16,
        };
        let attr = field.attribute();
        assert_eq!(attr.shader_location, 3);
        assert_eq!(attr.offset, 16);
        assert_eq!(attr.format, wgpu::VertexFormat::Float32x3);
        assert_eq!(field.size(), 12);
    }
}
