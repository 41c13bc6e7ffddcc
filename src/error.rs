use thiserror::Error;

/// Ways the host and shader views of a record can fail to agree, plus the
/// byte-level failures of reinterpreting an upload buffer.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to parse WGSL:\n{0}")]
    Parse(String),
    #[error("struct `{0}` is not declared in the shader source")]
    MissingStruct(String),
    #[error("`{0}` is declared in the shader source but is not a struct")]
    NotAStruct(String),
    #[error("member count mismatch: host has {host}, shader has {shader}")]
    MemberCount { host: usize, shader: usize },
    #[error("member {index} is `{host}` on the host but `{shader}` in the shader")]
    MemberName {
        index: usize,
        host: String,
        shader: String,
    },
    #[error("member `{name}` offset mismatch: host {host}, shader {shader}")]
    OffsetMismatch { name: String, host: u64, shader: u64 },
    #[error("member `{name}` format mismatch: host {host:?}, shader {shader:?}")]
    FormatMismatch {
        name: String,
        host: wgpu::VertexFormat,
        shader: wgpu::VertexFormat,
    },
    #[error("member `{name}` location mismatch: host {host}, shader {shader}")]
    LocationMismatch { name: String, host: u32, shader: u32 },
    #[error("struct size mismatch: host {host}, shader {shader}")]
    SizeMismatch { host: u64, shader: u64 },
    #[error("array stride mismatch: host {host}, shader {shader}")]
    StrideMismatch { host: u64, shader: u64 },
    #[error("member `{0}` has a type with no vertex format")]
    UnsupportedType(String),
    #[error("vertex format {0:?} has no WGSL counterpart here")]
    UnsupportedFormat(wgpu::VertexFormat),
    #[error("bytes cannot be viewed as vertices: {0:?}")]
    Cast(bytemuck::PodCastError),
    #[error("buffer of {len} bytes is not a whole number of {stride}-byte vertices")]
    TruncatedBuffer { len: usize, stride: usize },
}
