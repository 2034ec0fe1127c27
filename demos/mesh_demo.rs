//! Demonstration of mesh generation

use rust_voronoi_plane::*;

fn main() -> Result<()> {
    println!("Generating diagram...");

    let config = DiagramConfigBuilder::new()
        .seed(42)
        .site_count(1_000)?
        .lloyd_iterations(3)?
        .build()?;

    let diagram = VoronoiDiagram::generate(config)?;
    println!("Generated {} cells", diagram.cell_count());

    // Generate mesh with default colors
    let color_mapper = BasicColorMapper;
    let mesh = generate_mesh(&diagram, &color_mapper);

    println!("\nMesh statistics:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Indices: {}", mesh.indices.len());

    // Memory estimate
    let mem_positions = mesh.positions.len() * 8; // 2 floats * 4 bytes
    let mem_colors = mesh.colors.len() * 16; // 4 floats * 4 bytes
    let mem_indices = mesh.indices.len() * 4;
    let total = mem_positions + mem_colors + mem_indices;
    println!("\nMemory usage:");
    println!("  Positions: {} bytes", mem_positions);
    println!("  Colors: {} bytes", mem_colors);
    println!("  Indices: {} bytes", mem_indices);
    println!("  Total: {} bytes ({:.2} MB)", total, total as f32 / 1024.0 / 1024.0);

    // Hull cells in a different color
    let custom = CustomColorMapper {
        hull: [0.8, 0.1, 0.1, 1.0],
        ..Default::default()
    };
    let _mesh2 = generate_mesh(&diagram, &custom);
    println!("\nCustom color mapper works!");

    // Only a neighborhood visible
    let visible = diagram.find_cells_within_radius(0, 4);
    let masked = generate_mesh_with_visibility(&diagram, &color_mapper, Some(&visible), [0.0, 0.0, 0.0, 1.0]);
    println!("Masked mesh: {} vertices, {} visible cells", masked.vertex_count(), visible.len());

    // Scaling
    println!("\n=== Scaling ===");
    for count in [100, 1_000, 10_000] {
        let config = DiagramConfigBuilder::new()
            .seed(42)
            .site_count(count)?
            .lloyd_iterations(1)?
            .build()?;

        let diagram = VoronoiDiagram::generate(config)?;
        let mesh = generate_mesh(&diagram, &color_mapper);

        println!(
            "{} sites: {} cells, {} vertices, {} triangles",
            count,
            diagram.cell_count(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
    }

    Ok(())
}
