//! Complete workflow demonstration for rust_voronoi_plane

use rust_voronoi_plane::*;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();

    println!("=== rust_voronoi_plane Complete Demo ===\n");

    // Step 1: Configure diagram
    println!("Step 1: Configuring diagram...");
    let config = DiagramConfigBuilder::new()
        .seed(12345)
        .site_count(2_000)?
        .distribution(SiteDistribution::JitteredGrid)
        .bounds(Rect::new(0.0, 0.0, 1600.0, 900.0))?
        .lloyd_iterations(5)?
        .build()?;

    println!("  Seed: {}", config.seed);
    println!("  Sites: {} ({})", config.site_count, config.distribution.name());
    println!("  Bounds: {:?}", config.bounds);

    // Step 2: Generate diagram
    println!("\nStep 2: Generating diagram...");
    let diagram = VoronoiDiagram::generate(config)?;
    println!("  Generated {} cells", diagram.cell_count());
    println!("  Triangles: {}", diagram.triangulation().triangle_count());
    println!("  Hull sites: {}", diagram.triangulation().hull.len());
    println!("  Shared vertices: {}", diagram.vertices().len());

    // Step 3: Cell statistics
    println!("\nStep 3: Cell statistics:");
    let areas: Vec<f64> = diagram.cells().iter().map(|c| c.area()).collect();
    let total: f64 = areas.iter().sum();
    let min = areas.iter().copied().fold(f64::INFINITY, f64::min);
    let max = areas.iter().copied().fold(0.0, f64::max);
    println!("  Total area: {:.1} (bounds {:.1})", total, diagram.bounds().area());
    println!("  Cell area: min {:.1}, max {:.1}", min, max);

    let total_neighbors: usize = diagram.cells().iter().map(|c| c.neighbor_count()).sum();
    println!(
        "  Average neighbors per cell: {:.2}",
        total_neighbors as f64 / diagram.cell_count() as f64
    );

    // Step 4: Spatial queries
    #[cfg(feature = "spatial-index")]
    {
        println!("\nStep 4: Spatial queries:");
        let test_pos = DVec2::new(800.0, 450.0);
        if let Some(cell_id) = diagram.find_cell_at(test_pos) {
            let cell = diagram.cell(cell_id)?;
            println!("  Position {:?} -> Cell {} at {:?}", test_pos, cell_id, cell.site);
            println!("  Cell has {} neighbors", cell.neighbor_count());
            println!(
                "  {} cells within 3 hops",
                diagram.find_cells_within_radius(cell_id, 3).len()
            );
        }
    }

    // Step 5: Generate mesh
    println!("\nStep 5: Generating mesh...");
    let mesh = generate_mesh(&diagram, &BasicColorMapper);
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());

    println!("\n=== Demo Complete ===");
    Ok(())
}
