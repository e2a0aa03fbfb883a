//! CPU-side mesh building for the floorplan scene.
//!
//! Everything here is static geometry generated once at startup: the floor
//! plane, wall boxes, the route tube swept along the sampled spline, and the
//! destination beacon.

use glam::Vec3;
use voxelnav_map::{Floorplan, Wall};

/// Vertex format shared by the scene and route pipelines.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Outward normal.
    pub normal: [f32; 3],
    /// Base color (rgba).
    pub color: [f32; 4],
    /// Emissive color; rgb scaled by the pulse uniform, alpha unused.
    pub emissive: [f32; 4],
}

/// Vertex and index data ready for upload.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    /// Vertex data.
    pub vertices: Vec<SceneVertex>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Number of indices.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3, color: [f32; 4], emissive: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for corner in corners {
            self.vertices.push(SceneVertex {
                position: corner.to_array(),
                normal: normal.to_array(),
                color,
                emissive,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Floor color (near-black slate).
pub const FLOOR_COLOR: [f32; 4] = [0.066, 0.094, 0.153, 1.0];
/// Wall base color.
pub const WALL_COLOR: [f32; 4] = [0.118, 0.161, 0.231, 0.9];
/// Wall emissive color (indigo glow while navigating).
pub const WALL_EMISSIVE: [f32; 4] = [0.192, 0.180, 0.506, 0.0];
/// Route and marker color (blue).
pub const ROUTE_COLOR: [f32; 4] = [0.231, 0.510, 0.965, 1.0];
/// Grid line color.
pub const GRID_COLOR: [f32; 4] = [0.176, 0.216, 0.282, 1.0];

const NO_EMISSIVE: [f32; 4] = [0.0; 4];

/// Build the static scene mesh: floor plane plus every wall box.
pub fn build_scene_mesh(plan: &Floorplan) -> MeshBuffers {
    let mut mesh = MeshBuffers::default();
    let half = plan.extent / 2.0;
    mesh.push_quad(
        [
            Vec3::new(-half, -0.05, -half),
            Vec3::new(-half, -0.05, half),
            Vec3::new(half, -0.05, half),
            Vec3::new(half, -0.05, -half),
        ],
        Vec3::Y,
        FLOOR_COLOR,
        NO_EMISSIVE,
    );
    for wall in &plan.walls {
        push_wall(&mut mesh, wall);
    }
    mesh
}

fn push_wall(mesh: &mut MeshBuffers, wall: &Wall) {
    let h = wall.size * 0.5;
    let c = wall.center;
    // Eight box corners.
    let p = |sx: f32, sy: f32, sz: f32| c + Vec3::new(sx * h.x, sy * h.y, sz * h.z);
    let faces: [([Vec3; 4], Vec3); 6] = [
        // +Z
        ([p(-1.0, -1.0, 1.0), p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, -1.0, 1.0)], Vec3::Z),
        // -Z
        ([p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(-1.0, 1.0, -1.0), p(-1.0, -1.0, -1.0)], -Vec3::Z),
        // +X
        ([p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0), p(1.0, -1.0, -1.0)], Vec3::X),
        // -X
        ([p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(-1.0, 1.0, 1.0), p(-1.0, -1.0, 1.0)], -Vec3::X),
        // +Y
        ([p(-1.0, 1.0, 1.0), p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0)], Vec3::Y),
        // -Y
        ([p(-1.0, -1.0, -1.0), p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, -1.0, -1.0)], -Vec3::Y),
    ];
    for (corners, normal) in faces {
        mesh.push_quad(corners, normal, WALL_COLOR, WALL_EMISSIVE);
    }
}

/// Sweep the sampled route into a tube mesh.
///
/// Matches the original scene's tube: 64 segments, radius 0.1, 8 radial
/// segments, open ends, floated just above the floor.
pub fn build_route_mesh(plan: &Floorplan) -> MeshBuffers {
    build_tube(&plan.route.sample(64), 0.1, 8)
}

fn build_tube(path: &[Vec3], radius: f32, radial_segments: usize) -> MeshBuffers {
    let mut mesh = MeshBuffers::default();
    if path.len() < 2 {
        return mesh;
    }

    let lift = Vec3::new(0.0, 0.02, 0.0);
    for (i, point) in path.iter().enumerate() {
        let tangent = ring_tangent(path, i);
        // Stable frame for a mostly-planar path.
        let side = if tangent.cross(Vec3::Y).length_squared() > 1e-6 {
            tangent.cross(Vec3::Y).normalize()
        } else {
            Vec3::X
        };
        let up = side.cross(tangent).normalize();

        for s in 0..radial_segments {
            let angle = s as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let offset = side * angle.cos() * radius + up * angle.sin() * radius;
            mesh.vertices.push(SceneVertex {
                position: (*point + offset + lift).to_array(),
                normal: offset.normalize().to_array(),
                color: ROUTE_COLOR,
                emissive: ROUTE_COLOR,
            });
        }
    }

    let ring = radial_segments as u32;
    for i in 0..(path.len() as u32 - 1) {
        for s in 0..ring {
            let a = i * ring + s;
            let b = i * ring + (s + 1) % ring;
            let c = (i + 1) * ring + s;
            let d = (i + 1) * ring + (s + 1) % ring;
            mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    mesh
}

fn ring_tangent(path: &[Vec3], i: usize) -> Vec3 {
    let prev = path[i.saturating_sub(1)];
    let next = path[(i + 1).min(path.len() - 1)];
    (next - prev).normalize_or_zero()
}

/// Build the destination beacon: a truncated cone, base radius 0.5 tapering
/// to 0.1 over 2 units of height, 16 radial segments.
pub fn build_marker_mesh(position: Vec3) -> MeshBuffers {
    let mut mesh = MeshBuffers::default();
    let segments = 16usize;
    let (r_bottom, r_top, height) = (0.5f32, 0.1f32, 2.0f32);

    for s in 0..segments {
        let angle = s as f32 / segments as f32 * std::f32::consts::TAU;
        let dir = Vec3::new(angle.cos(), 0.0, angle.sin());
        // Slope normal for the cone side.
        let slope = (r_bottom - r_top) / height;
        let normal = (dir + Vec3::Y * slope).normalize();
        for (radius, y) in [(r_bottom, 0.0), (r_top, height)] {
            mesh.vertices.push(SceneVertex {
                position: (position + dir * radius + Vec3::Y * y).to_array(),
                normal: normal.to_array(),
                color: ROUTE_COLOR,
                emissive: ROUTE_COLOR,
            });
        }
    }

    let n = segments as u32;
    for s in 0..n {
        let a = s * 2;
        let b = s * 2 + 1;
        let c = ((s + 1) % n) * 2;
        let d = ((s + 1) % n) * 2 + 1;
        mesh.indices.extend_from_slice(&[a, b, c, c, b, d]);
    }
    mesh
}

/// Grid line endpoints covering the floor, as a line list.
pub fn build_grid_lines(extent: f32, divisions: u32) -> Vec<[f32; 3]> {
    let half = extent / 2.0;
    let step = extent / divisions as f32;
    let mut lines = Vec::with_capacity(((divisions + 1) * 4) as usize);
    for i in 0..=divisions {
        let offset = -half + i as f32 * step;
        lines.push([offset, 0.0, -half]);
        lines.push([offset, 0.0, half]);
        lines.push([-half, 0.0, offset]);
        lines.push([half, 0.0, offset]);
    }
    lines
}

/// GPU-resident mesh.
pub struct GpuMesh {
    /// Vertex buffer.
    pub vertex_buffer: wgpu::Buffer,
    /// Index buffer.
    pub index_buffer: wgpu::Buffer,
    /// Number of indices to draw.
    pub index_count: u32,
}

impl GpuMesh {
    /// Upload mesh buffers to the GPU.
    pub fn upload(device: &wgpu::Device, mesh: &MeshBuffers, label: &str) -> Self {
        use wgpu::util::DeviceExt;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
        }
    }
}

/// GPU-resident line list for the grid overlay.
pub struct GpuLines {
    /// Vertex buffer of line endpoints.
    pub vertex_buffer: wgpu::Buffer,
    /// Number of vertices to draw.
    pub vertex_count: u32,
}

impl GpuLines {
    /// Upload line endpoints to the GPU.
    pub fn upload(device: &wgpu::Device, lines: &[[f32; 3]], label: &str) -> Self {
        use wgpu::util::DeviceExt;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(lines),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            vertex_count: lines.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_mesh_contains_floor_and_all_walls() {
        let plan = Floorplan::sample();
        let mesh = build_scene_mesh(&plan);
        // One floor quad plus six quads per wall.
        let expected_quads = 1 + plan.walls.len() * 6;
        assert_eq!(mesh.vertices.len(), expected_quads * 4);
        assert_eq!(mesh.indices.len(), expected_quads * 6);
    }

    #[test]
    fn route_tube_has_a_ring_per_sample() {
        let plan = Floorplan::sample();
        let mesh = build_route_mesh(&plan);
        assert_eq!(mesh.vertices.len(), 65 * 8);
        assert_eq!(mesh.indices.len(), 64 * 8 * 6);
    }

    #[test]
    fn marker_sits_on_its_base_position() {
        let mesh = build_marker_mesh(Vec3::new(7.0, 0.0, -7.0));
        assert!(!mesh.vertices.is_empty());
        let min_y = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::INFINITY, f32::min);
        let max_y = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::NEG_INFINITY, f32::max);
        assert!((min_y - 0.0).abs() < 1e-4);
        assert!((max_y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn grid_spans_the_extent() {
        let lines = build_grid_lines(20.0, 20);
        assert_eq!(lines.len(), 21 * 4);
        assert!(lines.iter().all(|p| p[0].abs() <= 10.0 && p[2].abs() <= 10.0));
    }
}
