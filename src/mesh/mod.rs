//! Mesh generation for VoronoiDiagram
//!
//! Generates engine-agnostic mesh data from the diagram's cells.

mod colors;

pub use colors::{BasicColorMapper, CellColor, ColorMapper, CustomColorMapper};

use glam::DVec2;
use std::collections::HashSet;

use crate::diagram::VoronoiDiagram;

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - wgpu: Use directly as vertex buffers
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions (2D coordinates)
    pub positions: Vec<[f32; 2]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Generate mesh from a diagram with color mapping
///
/// Each cell is triangulated as a triangle fan from its centroid to its
/// boundary vertices. All vertices of a cell share its color.
pub fn generate_mesh<C: ColorMapper>(diagram: &VoronoiDiagram, color_mapper: &C) -> MeshData {
    generate_mesh_with_visibility(diagram, color_mapper, None, [0.0, 0.0, 0.0, 1.0])
}

/// Generate mesh with per-cell visibility
///
/// # Arguments
/// * `diagram` - The diagram to generate mesh for
/// * `color_mapper` - Maps cells to colors
/// * `visible_cells` - Optional slice of visible cell IDs. If None, all cells are visible.
/// * `hidden_color` - Color for hidden cells
pub fn generate_mesh_with_visibility<C: ColorMapper>(
    diagram: &VoronoiDiagram,
    color_mapper: &C,
    visible_cells: Option<&[usize]>,
    hidden_color: CellColor,
) -> MeshData {
    let mut mesh = MeshData::default();

    let visible_set: Option<HashSet<usize>> = visible_cells.map(|cells| cells.iter().copied().collect());

    for cell in diagram.cells() {
        // Skip empty and degenerate cells
        if cell.vertices.len() < 3 {
            continue;
        }
        let Some(center) = cell.centroid() else {
            continue;
        };

        let is_visible = visible_set
            .as_ref()
            .map(|set| set.contains(&cell.id))
            .unwrap_or(true);

        let color = if is_visible {
            color_mapper.map_color(cell)
        } else {
            hidden_color
        };

        triangulate_cell(center, &cell.vertices, color, &mut mesh);
    }

    mesh
}

/// Triangulate a single cell as a triangle fan
fn triangulate_cell(center: DVec2, vertices: &[DVec2], color: CellColor, mesh: &mut MeshData) {
    let base_idx = mesh.positions.len() as u32;

    mesh.positions.push(center.as_vec2().to_array());
    mesh.colors.push(color);

    for vertex in vertices {
        mesh.positions.push(vertex.as_vec2().to_array());
        mesh.colors.push(color);
    }

    let num_vertices = vertices.len();
    for i in 0..num_vertices {
        let next_i = (i + 1) % num_vertices;
        mesh.indices.push(base_idx); // Center
        mesh.indices.push(base_idx + 1 + i as u32); // Current vertex
        mesh.indices.push(base_idx + 1 + next_i as u32); // Next vertex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::DiagramConfigBuilder;

    fn small_diagram() -> VoronoiDiagram {
        let config = DiagramConfigBuilder::new()
            .seed(42)
            .site_count(200)
            .unwrap()
            .bounds(Rect::new(0.0, 0.0, 100.0, 100.0))
            .unwrap()
            .build()
            .unwrap();
        VoronoiDiagram::generate(config).unwrap()
    }

    #[test]
    fn test_generate_mesh() {
        let diagram = small_diagram();
        let mesh = generate_mesh(&diagram, &BasicColorMapper);

        assert!(!mesh.is_empty());
        assert!(mesh.triangle_count() > 0);
        assert_eq!(mesh.positions.len(), mesh.colors.len());
        assert_eq!(mesh.indices.len() % 3, 0);

        // One centroid plus the boundary per cell, one triangle per boundary edge
        let boundary: usize = diagram.cells().iter().map(|c| c.vertex_count()).sum();
        assert_eq!(mesh.vertex_count(), boundary + diagram.cell_count());
        assert_eq!(mesh.triangle_count(), boundary);
    }

    #[test]
    fn test_mesh_covers_bounds() {
        let diagram = small_diagram();
        let mesh = generate_mesh(&diagram, &BasicColorMapper);

        let mut area = 0.0f64;
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| DVec2::from(mesh.positions[i as usize].map(f64::from)));
            area += crate::geometry::signed_area2(a, b, c) * 0.5;
        }
        // f32 positions
        assert!((area - diagram.bounds().area()).abs() < 0.1);
    }

    #[test]
    fn test_mesh_with_visibility() {
        let diagram = small_diagram();
        let visible: Vec<usize> = (0..10).collect();
        let hidden = [0.0, 0.0, 0.0, 1.0];
        let mesh = generate_mesh_with_visibility(
            &diagram,
            &CustomColorMapper::default(),
            Some(&visible),
            hidden,
        );

        let hidden_vertices = mesh.colors.iter().filter(|&&c| c == hidden).count();
        let visible_vertices: usize = diagram.cells()[..10].iter().map(|c| c.vertex_count() + 1).sum();
        assert_eq!(hidden_vertices, mesh.vertex_count() - visible_vertices);
    }

    #[test]
    fn test_mesh_consistency() {
        let diagram = small_diagram();
        let mesh1 = generate_mesh(&diagram, &BasicColorMapper);
        let mesh2 = generate_mesh(&diagram, &BasicColorMapper);

        assert_eq!(mesh1.positions, mesh2.positions);
        assert_eq!(mesh1.indices, mesh2.indices);
    }
}
