//! Example: Compute a diagram from explicit sites
//!
//! Demonstrates the kernel pipeline step by step: triangulate, build the
//! dual, clip.

use rust_voronoi_plane::generation::{build_dual, clip_cells, generate_random_sites, triangulate};
use rust_voronoi_plane::*;

fn main() {
    println!("Voronoi Diagram Generation Example");
    println!("==================================\n");

    let bounds = Rect::new(-100.0, -100.0, 200.0, 200.0);
    let sites = generate_random_sites(50, &bounds, 42);

    let triangulation = triangulate(&sites);
    println!("Triangulation:");
    println!("  Triangles: {}", triangulation.triangle_count());
    println!("  Hull: {:?}", triangulation.hull);
    println!();

    let dual = build_dual(&sites, &triangulation, Some(&bounds));
    let open = dual.polygons.iter().filter(|p| p.unclosed).count();
    println!("Dual graph:");
    println!("  Polygon vertices: {}", dual.vertices.len());
    println!("  Open polygons: {}", open);
    println!();

    let clipped = clip_cells(&sites, &dual, &bounds);
    println!("Clipped diagram:");
    println!("  Shared vertices: {}", clipped.vertices.len());

    println!("\nSample cells:");
    for (id, polygon) in clipped.polygons().iter().enumerate().take(5) {
        println!(
            "  Cell {}: site=({:.2}, {:.2}), vertices={}",
            id,
            sites[id].x,
            sites[id].y,
            polygon.len()
        );
    }

    println!("\nGeneration complete!");
}
