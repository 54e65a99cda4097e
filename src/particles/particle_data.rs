use glam::Vec3;

/// Fixed-size firework pool in Structure of Arrays (SOA) layout.
///
/// Per-particle state lives in parallel arrays indexed `0..count`. The two
/// render buffers are interleaved (`x,y,z` / `r,g,b`) so a renderer can
/// upload them as-is.
#[derive(Debug, Clone)]
pub struct FireworkData {
    /// Number of particles; never changes after construction
    count: usize,

    /// Trajectory start point
    pub origin: Vec<Vec3>,
    /// Velocity at age 0
    pub velocity: Vec<Vec3>,
    /// Saturated color before fading
    pub base_color: Vec<Vec3>,

    /// Seconds since ignition, negative while delayed
    pub age: Vec<f32>,
    /// Seconds after ignition at which the particle is recycled
    pub lifetime: Vec<f32>,

    /// Interleaved positions, 3 * count
    positions: Vec<f32>,
    /// Interleaved colors, 3 * count
    colors: Vec<f32>,

    /// Render buffers changed since the last upload
    dirty: bool,
}

impl FireworkData {
    /// Allocate a zeroed pool of `count` particles
    pub fn new(count: usize) -> Self {
        Self {
            count,
            origin: vec![Vec3::ZERO; count],
            velocity: vec![Vec3::ZERO; count],
            base_color: vec![Vec3::ZERO; count],
            age: vec![0.0; count],
            lifetime: vec![0.0; count],
            positions: vec![0.0; count * 3],
            colors: vec![0.0; count * 3],
            dirty: true,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    pub fn color(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[index * 3..index * 3 + 3])
    }

    pub fn set_position(&mut self, index: usize, position: Vec3) {
        position.write_to_slice(&mut self.positions[index * 3..index * 3 + 3]);
    }

    pub fn set_color(&mut self, index: usize, color: Vec3) {
        color.write_to_slice(&mut self.colors[index * 3..index * 3 + 3]);
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

/// Single interleaved vertex for renderers that want one stream
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FireworkVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Convert pool render buffers to one vertex per particle
pub fn prepare_render_data(particles: &FireworkData, gpu_buffer: &mut Vec<FireworkVertex>) {
    gpu_buffer.clear();
    gpu_buffer.reserve(particles.count());

    for (position, color) in particles
        .positions()
        .chunks_exact(3)
        .zip(particles.colors().chunks_exact(3))
    {
        gpu_buffer.push(FireworkVertex {
            position: [position[0], position[1], position[2]],
            color: [color[0], color[1], color[2]],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_sized_to_pool() {
        let data = FireworkData::new(7);
        assert_eq!(data.count(), 7);
        assert_eq!(data.positions().len(), 21);
        assert_eq!(data.colors().len(), 21);
        assert_eq!(data.age.len(), 7);
    }

    #[test]
    fn test_interleaved_accessors() {
        let mut data = FireworkData::new(3);
        data.set_position(1, Vec3::new(1.0, 2.0, 3.0));
        data.set_color(2, Vec3::new(0.5, 0.25, 0.125));

        assert_eq!(&data.positions()[3..6], &[1.0, 2.0, 3.0]);
        assert_eq!(data.position(1), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(data.color(2), Vec3::new(0.5, 0.25, 0.125));
        assert_eq!(data.position(0), Vec3::ZERO);
    }

    #[test]
    fn test_prepare_render_data() {
        let mut data = FireworkData::new(2);
        data.set_position(0, Vec3::new(1.0, 2.0, 3.0));
        data.set_color(1, Vec3::new(1.0, 0.0, 0.0));

        let mut vertices = vec![FireworkVertex { position: [9.0; 3], color: [9.0; 3] }; 5];
        prepare_render_data(&data, &mut vertices);

        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(vertices[0].color, [0.0, 0.0, 0.0]);
        assert_eq!(vertices[1].color, [1.0, 0.0, 0.0]);
        assert_eq!(bytemuck::cast_slice::<FireworkVertex, u8>(&vertices).len(), 2 * 24);
    }
}
