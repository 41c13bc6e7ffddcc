use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Three `f32` components laid out the way a shader sees a `vec3<f32>`:
/// 12 bytes of data in a 16-byte, 16-aligned slot.
///
/// The fourth lane is explicit so the type stays plain-old-data. It is always
/// zero when built through this API and is ignored by equality and serde.
#[repr(C, align(16))]
#[derive(Copy, Clone, Default, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    _pad: f32,
}

impl Float3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, _pad: 0.0 }
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl PartialEq for Float3 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl fmt::Debug for Float3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Float3")
            .field(&self.x)
            .field(&self.y)
            .field(&self.z)
            .finish()
    }
}

impl From<[f32; 3]> for Float3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Float3> for [f32; 3] {
    fn from(v: Float3) -> Self {
        v.to_array()
    }
}

impl From<Vec3> for Float3 {
    fn from(v: Vec3) -> Self {
        v.to_array().into()
    }
}

impl From<Float3> for Vec3 {
    fn from(v: Float3) -> Self {
        Vec3::from_array(v.to_array())
    }
}
