use geoscan::{Config, Coordinate, GeoDB};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== geoscan - Nearby Delivery Requests ===\n");

    let config = Config::default().with_precision(9);
    let mut db = GeoDB::memory_with_config(config)?;

    // Open help requests around the Bay Area
    let requests = [
        ("request:mission", Coordinate::new(37.7599, -122.4148), "groceries, 2 bags"),
        ("request:soma", Coordinate::new(37.7785, -122.4056), "prepared meals"),
        ("request:richmond", Coordinate::new(37.7802, -122.4824), "pharmacy pickup"),
        ("request:oakland", Coordinate::new(37.8044, -122.2712), "groceries, 1 bag"),
        ("request:berkeley", Coordinate::new(37.8715, -122.2730), "baby formula"),
    ];

    for (key, location, details) in requests {
        db.insert_location(key, &location, details)?;
    }
    println!("Stored {} open requests\n", db.len()?);

    let volunteer = Coordinate::new(37.7749, -122.4194);
    for radius in [2_000.0, 6_000.0, 20_000.0] {
        let ranges = db.query_ranges(&volunteer, radius)?;
        let nearby = db.query_within_radius(&volunteer, radius, 0)?;

        println!(
            "Within {:.0} km ({} range scan(s)):",
            radius / 1_000.0,
            ranges.len()
        );
        for (location, distance) in &nearby {
            println!(
                "   {:<18} {:>6.0} m  {}",
                location.key,
                distance,
                String::from_utf8_lossy(&location.data)
            );
        }
        println!();
    }

    // A volunteer picks up a request, it leaves the index
    db.remove("request:soma")?;
    let remaining = db.count_within_radius(&volunteer, 6_000.0)?;
    println!("After pickup, {} request(s) within 6 km", remaining);

    Ok(())
}
