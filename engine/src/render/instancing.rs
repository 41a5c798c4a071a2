//! Block Instance Records
//!
//! GPU-compatible per-instance data for drawing placed blocks with a single
//! instanced draw call per template.

/// Flag bit set on instances whose block can be destroyed.
pub const INSTANCE_FLAG_DESTRUCTIBLE: u32 = 1;

/// Instance data for one placed block.
///
/// Layout (32 bytes total):
/// - position:  vec3<f32> (12 bytes) - World position of the block
/// - template:  u32 (4 bytes) - Render template id
/// - grid:      vec2<i32> (8 bytes) - Cell as (row, col)
/// - flags:     u32 (4 bytes) - `INSTANCE_FLAG_*` bits
/// - _pad0:     u32 (4 bytes) - Padding to 16-byte multiple
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlockInstance {
    pub position: [f32; 3],
    pub template: u32,
    pub grid: [i32; 2],
    pub flags: u32,
    pub _pad0: u32,
}

static_assertions::assert_eq_size!(BlockInstance, [u8; 32]);

impl BlockInstance {
    pub fn is_destructible(&self) -> bool {
        self.flags & INSTANCE_FLAG_DESTRUCTIBLE != 0
    }
}

/// View a slice of instances as raw bytes for buffer upload.
pub fn instance_bytes(instances: &[BlockInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
