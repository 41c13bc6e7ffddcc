use std::mem::size_of;

use super::Vertex;
use crate::error::LayoutError;

pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Views `bytes` as vertices without copying. The slice must be aligned for
/// [`Vertex`] and hold a whole number of them.
pub fn from_bytes(bytes: &[u8]) -> Result<&[Vertex], LayoutError> {
    check_len(bytes)?;
    // An empty Vec<u8> points at a dangling, byte-aligned address
    if bytes.is_empty() {
        return Ok(&[]);
    }
    bytemuck::try_cast_slice(bytes).map_err(LayoutError::Cast)
}

/// Copies vertices out of `bytes`, whatever its alignment.
pub fn read_vertices(bytes: &[u8]) -> Result<Vec<Vertex>, LayoutError> {
    check_len(bytes)?;
    let vertices: Vec<Vertex> = bytes
        .chunks_exact(size_of::<Vertex>())
        .map(bytemuck::pod_read_unaligned)
        .collect();
    log::trace!("decoded {} vertices from {} bytes", vertices.len(), bytes.len());
    Ok(vertices)
}

/// Whether the host allocation can be handed to a device that requires
/// `min_alignment` for vertex-buffer data.
pub fn is_upload_aligned(vertices: &[Vertex], min_alignment: usize) -> bool {
    min_alignment.is_power_of_two() && (vertices.as_ptr() as usize) % min_alignment == 0
}

fn check_len(bytes: &[u8]) -> Result<(), LayoutError> {
    let stride = size_of::<Vertex>();
    if bytes.len() % stride != 0 {
        return Err(LayoutError::TruncatedBuffer {
            len: bytes.len(),
            stride,
        });
    }
    Ok(())
}
