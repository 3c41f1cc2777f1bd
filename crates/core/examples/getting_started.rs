use geoscan::compute::geohash::encode;
use geoscan::{Coordinate, geohash_queries, query_bits};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=trace to see every planned cell)
    env_logger::init();

    println!("=== geoscan - Getting Started ===\n");

    // === GEOHASH ENCODING ===
    println!("1. Geohash Encoding");
    println!("-------------------");

    let sf = Coordinate::new(37.7749, -122.4194);
    for precision in [1, 3, 5, 7, 10] {
        println!("   {} at {:>2} chars: {}", sf, precision, encode(&sf, precision)?);
    }
    println!();

    // === QUERY PLANNING ===
    println!("2. Planning a 1 km Radius Query");
    println!("-------------------------------");

    let radius = 1_000.0;
    let bits = query_bits(&sf, radius);
    println!("   Query precision: {} bits ({} chars)", bits, bits.div_ceil(5));

    let ranges = geohash_queries(&sf, radius)?;
    println!("   {} range(s) to scan:", ranges.len());
    for range in &ranges {
        println!("     field >= {:?} AND field < {:?}", range.start, range.end);
    }
    println!();

    // === RADIUS vs PRECISION ===
    println!("3. Radius vs Precision");
    println!("----------------------");

    for radius in [10.0, 100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0] {
        let ranges = geohash_queries(&sf, radius)?;
        println!(
            "   {:>9} m -> {:>2} bits, {} range(s)",
            radius,
            query_bits(&sf, radius),
            ranges.len()
        );
    }

    Ok(())
}
