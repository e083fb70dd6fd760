//! Wave surface grid mesh with randomized per-cell triangulation.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;

use crate::error::WaveError;

/// Vertex data for the surface mesh (position + normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Height of the plane the initial jitter is centered on
const BASE_PLANE_OFFSET: f32 = -10.0;

/// Diagonal chosen to split a lattice cell into two triangles
///
/// ```text
/// a b
/// c d
/// ```
///
/// Both variants emit their triangles with the same winding so that
/// accumulated vertex normals point up on a flat grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellSplit {
    /// Triangles {a, b, c} and {b, c, d}
    DiagonalBC,
    /// Triangles {a, b, d} and {a, c, d}
    DiagonalAD,
}

/// Number of vertices in a `width_cells x height_cells` grid
///
/// Rejects empty grids, and grids whose vertices cannot all be addressed by a
/// `u32` index buffer.
pub fn grid_vertex_count(width_cells: usize, height_cells: usize) -> Result<usize, WaveError> {
    if width_cells == 0 || height_cells == 0 {
        return Err(WaveError::dimension(format!(
            "grid must be at least 1x1 cells, got {}x{}",
            width_cells, height_cells
        )));
    }

    let too_large = || {
        WaveError::dimension(format!(
            "grid of {}x{} cells exceeds {} vertices",
            width_cells,
            height_cells,
            u32::MAX
        ))
    };
    let count = width_cells
        .checked_add(1)
        .zip(height_cells.checked_add(1))
        .and_then(|(columns, rows)| columns.checked_mul(rows))
        .ok_or_else(too_large)?;
    // Index buffer holds 6 indices per cell
    let index_count = width_cells
        .checked_mul(height_cells)
        .and_then(|cells| cells.checked_mul(6));

    if count > u32::MAX as usize || index_count.is_none() {
        return Err(too_large());
    }
    Ok(count)
}

/// Static surface topology plus the mutable vertex buffer
pub struct SurfaceMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    splits: Vec<CellSplit>,
    width_cells: usize,
    height_cells: usize,
    cell_size: f32,
}

impl SurfaceMesh {
    /// Build a centered `(width_cells + 1) x (height_cells + 1)` vertex grid in the XZ plane
    ///
    /// # Arguments
    /// * `width_cells` - Cells along X
    /// * `height_cells` - Cells along Z
    /// * `cell_size` - Distance between neighbouring vertices
    /// * `noise_amplitude` - Initial heights are drawn from `[0, noise_amplitude) - 10`
    /// * `rng` - Source for the height jitter and the per-cell diagonal coin flips
    pub fn build<R: Rng>(
        width_cells: usize,
        height_cells: usize,
        cell_size: f32,
        noise_amplitude: f32,
        rng: &mut R,
    ) -> Result<Self, WaveError> {
        let vertex_count = grid_vertex_count(width_cells, height_cells)?;
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(WaveError::dimension(format!(
                "cell size must be positive, got {}",
                cell_size
            )));
        }
        if !noise_amplitude.is_finite() || noise_amplitude < 0.0 {
            return Err(WaveError::wave_parameter(format!(
                "noise amplitude must be finite and >= 0, got {}",
                noise_amplitude
            )));
        }

        let half_width = width_cells as f32 * 0.5;
        let half_height = height_cells as f32 * 0.5;

        let mut vertices = Vec::with_capacity(vertex_count);
        for i in 0..=width_cells {
            for j in 0..=height_cells {
                let jitter = if noise_amplitude > 0.0 {
                    rng.gen_range(0.0..noise_amplitude)
                } else {
                    0.0
                };
                vertices.push(Vertex {
                    position: [
                        (i as f32 - half_width) * cell_size,
                        jitter + BASE_PLANE_OFFSET,
                        (half_height - j as f32) * cell_size,
                    ],
                    normal: [0.0, 1.0, 0.0],
                });
            }
        }

        let mut mesh = Self {
            vertices,
            indices: Vec::with_capacity(width_cells * height_cells * 6),
            splits: Vec::with_capacity(width_cells * height_cells),
            width_cells,
            height_cells,
            cell_size,
        };

        for i in 1..=width_cells {
            for j in 1..=height_cells {
                let a = mesh.vertex_index(i - 1, j - 1);
                let b = mesh.vertex_index(i, j - 1);
                let c = mesh.vertex_index(i - 1, j);
                let d = mesh.vertex_index(i, j);

                let split = if rng.gen_bool(0.5) {
                    CellSplit::DiagonalBC
                } else {
                    CellSplit::DiagonalAD
                };

                match split {
                    CellSplit::DiagonalBC => mesh.indices.extend_from_slice(&[a, b, c, c, b, d]),
                    CellSplit::DiagonalAD => mesh.indices.extend_from_slice(&[a, b, d, a, d, c]),
                }
                mesh.splits.push(split);
            }
        }

        mesh.recompute_normals();

        log::debug!(
            "Built {}x{} surface: {} vertices, {} triangles",
            width_cells,
            height_cells,
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );

        Ok(mesh)
    }

    /// Vertex buffer index of lattice point `(i, j)`
    pub fn vertex_index(&self, i: usize, j: usize) -> u32 {
        (i * (self.height_cells + 1) + j) as u32
    }

    /// Diagonal chosen for cell `(i, j)`, `1 <= i <= width_cells`, `1 <= j <= height_cells`
    pub fn cell_split(&self, i: usize, j: usize) -> Option<CellSplit> {
        if i == 0 || j == 0 || i > self.width_cells || j > self.height_cells {
            return None;
        }
        self.splits
            .get((i - 1) * self.height_cells + (j - 1))
            .copied()
    }

    pub fn width_cells(&self) -> usize {
        self.width_cells
    }

    pub fn height_cells(&self) -> usize {
        self.height_cells
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Recompute area-weighted vertex normals from the current positions
    pub fn recompute_normals(&mut self) {
        let mut accumulated = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let pa = Vec3::from_array(self.vertices[ia].position);
            let pb = Vec3::from_array(self.vertices[ib].position);
            let pc = Vec3::from_array(self.vertices[ic].position);

            // Unnormalized: the cross product length weights by triangle area
            let face = (pc - pb).cross(pa - pb);
            accumulated[ia] += face;
            accumulated[ib] += face;
            accumulated[ic] += face;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(accumulated) {
            vertex.normal = normal.try_normalize().unwrap_or(Vec3::Y).to_array();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(w: usize, h: usize, seed: u64) -> SurfaceMesh {
        let mut rng = StdRng::seed_from_u64(seed);
        SurfaceMesh::build(w, h, 18.0, 4.0, &mut rng).unwrap()
    }

    #[test]
    fn test_surface_mesh_creation() {
        for (w, h) in [(1, 1), (2, 2), (3, 7), (100, 80)] {
            let mesh = build(w, h, 7);

            assert_eq!(mesh.vertices.len(), (w + 1) * (h + 1));
            assert_eq!(mesh.indices.len(), w * h * 6);

            let vertex_count = mesh.vertices.len() as u32;
            assert!(mesh.indices.iter().all(|&idx| idx < vertex_count));
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            SurfaceMesh::build(0, 4, 18.0, 4.0, &mut rng),
            Err(WaveError::InvalidDimension(_))
        ));
        assert!(matches!(
            SurfaceMesh::build(4, 0, 18.0, 4.0, &mut rng),
            Err(WaveError::InvalidDimension(_))
        ));
        assert!(SurfaceMesh::build(4, 4, 0.0, 4.0, &mut rng).is_err());
        assert!(SurfaceMesh::build(4, 4, 18.0, f32::NAN, &mut rng).is_err());
    }

    #[test]
    fn test_oversized_grids_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        for (w, h) in [(usize::MAX, 1), (1, usize::MAX), (65_536, 65_536)] {
            assert!(matches!(
                SurfaceMesh::build(w, h, 18.0, 4.0, &mut rng),
                Err(WaveError::InvalidDimension(_))
            ));
        }
    }

    #[test]
    fn test_grid_vertex_count_limit() {
        assert_eq!(grid_vertex_count(100, 80).unwrap(), 101 * 81);
        // 65536 x 65535 vertices still fits a u32 index
        assert_eq!(
            grid_vertex_count(65_535, 65_534).unwrap(),
            65_536 * 65_535
        );
        assert!(grid_vertex_count(65_536, 65_535).is_err());
        assert!(grid_vertex_count(u32::MAX as usize, 1).is_err());
        assert!(grid_vertex_count(0, 5).is_err());
    }

    #[test]
    fn test_grid_is_centered() {
        let mesh = build(2, 2, 3);

        let center = mesh.vertices[mesh.vertex_index(1, 1) as usize].position;
        assert_eq!(center[0], 0.0);
        assert_eq!(center[2], 0.0);

        let corner = mesh.vertices[mesh.vertex_index(0, 0) as usize].position;
        assert_eq!(corner[0], -18.0);
        assert_eq!(corner[2], 18.0);
    }

    #[test]
    fn test_initial_jitter_range() {
        let mesh = build(20, 20, 11);
        for v in &mesh.vertices {
            assert!(v.position[1] >= -10.0 && v.position[1] <= -6.0);
        }
    }

    #[test]
    fn test_vertex_index_is_bijective() {
        let mesh = build(4, 3, 5);
        let mut seen = vec![false; mesh.vertices.len()];
        for i in 0..=4 {
            for j in 0..=3 {
                let idx = mesh.vertex_index(i, j) as usize;
                assert!(!seen[idx]);
                seen[idx] = true;
            }
        }
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn test_cell_splits_match_indices_and_are_stable() {
        let mut mesh = build(6, 5, 42);
        let first: Vec<_> = (1..=6)
            .flat_map(|i| (1..=5).map(move |j| (i, j)))
            .map(|(i, j)| mesh.cell_split(i, j).unwrap())
            .collect();

        // Geometry updates never touch topology
        mesh.vertices[0].position[1] = 50.0;
        mesh.recompute_normals();

        let mut cell = 0;
        for i in 1..=6 {
            for j in 1..=5 {
                let split = mesh.cell_split(i, j).unwrap();
                assert_eq!(split, first[cell]);

                let a = mesh.vertex_index(i - 1, j - 1);
                let b = mesh.vertex_index(i, j - 1);
                let c = mesh.vertex_index(i - 1, j);
                let d = mesh.vertex_index(i, j);
                let expected = match split {
                    CellSplit::DiagonalBC => [a, b, c, c, b, d],
                    CellSplit::DiagonalAD => [a, b, d, a, d, c],
                };
                assert_eq!(&mesh.indices[cell * 6..cell * 6 + 6], &expected);
                cell += 1;
            }
        }

        assert_eq!(mesh.cell_split(0, 1), None);
        assert_eq!(mesh.cell_split(7, 1), None);
    }

    #[test]
    fn test_both_splits_occur() {
        let mesh = build(10, 10, 9);
        let bc = (1..=10)
            .flat_map(|i| (1..=10).map(move |j| (i, j)))
            .filter(|&(i, j)| mesh.cell_split(i, j) == Some(CellSplit::DiagonalBC))
            .count();
        assert!(bc > 0 && bc < 100);
    }

    #[test]
    fn test_same_seed_same_mesh() {
        let a = build(5, 5, 1234);
        let b = build(5, 5, 1234);
        assert_eq!(a.indices, b.indices);
        for (va, vb) in a.vertices.iter().zip(&b.vertices) {
            assert_eq!(va.position, vb.position);
        }
    }

    #[test]
    fn test_flat_surface_normals_point_along_y() {
        let mut rng = StdRng::seed_from_u64(2);
        let mesh = SurfaceMesh::build(3, 3, 18.0, 0.0, &mut rng).unwrap();
        for v in &mesh.vertices {
            assert!(v.normal[0].abs() < 1e-6);
            assert!((v.normal[1] - 1.0).abs() < 1e-6);
            assert!(v.normal[2].abs() < 1e-6);
        }
    }
}
