// src/bin/seed.rs
// Loads the district and geography reference data the preference
// endpoints and the aggregator depend on. Safe to re-run: existing
// codes are left untouched.

use anyhow::Context;
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;
use std::time::Duration;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

// Kerala districts with bounding boxes (sw_lon, sw_lat, ne_lon, ne_lat)
const DISTRICTS: &[(&str, &str, f64, f64, f64, f64)] = &[
    ("TVM", "Thiruvananthapuram", 76.84, 8.28, 77.33, 8.85),
    ("KLM", "Kollam", 76.43, 8.74, 77.13, 9.07),
    ("PTA", "Pathanamthitta", 76.45, 9.10, 77.25, 9.65),
    ("ALP", "Alappuzha", 76.20, 9.23, 76.57, 9.60),
    ("KTM", "Kottayam", 76.27, 9.25, 76.81, 9.76),
    ("IDK", "Idukki", 76.65, 9.30, 77.30, 10.20),
    ("EKM", "Ernakulam", 76.08, 9.62, 76.69, 10.26),
    ("TSR", "Thrissur", 75.88, 10.15, 76.50, 10.70),
    ("PLK", "Palakkad", 76.38, 10.40, 76.92, 11.15),
    ("MLP", "Malappuram", 75.93, 10.70, 76.48, 11.30),
    ("KKD", "Kozhikode", 75.63, 11.15, 76.12, 11.65),
    ("WYD", "Wayanad", 75.82, 11.48, 76.25, 11.98),
    ("KGD", "Kasaragod", 74.85, 12.20, 75.42, 12.70),
    ("KNR", "Kannur", 75.15, 11.67, 75.72, 12.28),
];

// Geography categories (code, name, api_code, description)
const GEOGRAPHIES: &[(&str, &str, &str, &str)] = &[
    (
        "BEACH",
        "Beach & Coastal",
        "beach",
        "Coastal areas, beaches, and seaside locations",
    ),
    (
        "HILL",
        "Hills & Mountains",
        "mountain",
        "Hill stations, mountain peaks, and elevated areas",
    ),
    (
        "FRST",
        "Forests & Wildlife",
        "forest",
        "Forest areas, wildlife sanctuaries, and nature reserves",
    ),
    (
        "LAKE",
        "Lakes & Backwaters",
        "lake",
        "Lakes, backwaters, and water bodies",
    ),
    (
        "HIST",
        "Historical Sites",
        "historical",
        "Historical monuments, forts, and heritage sites",
    ),
    (
        "SPRT",
        "Spiritual Places",
        "religious",
        "Temples, churches, mosques, and spiritual destinations",
    ),
    (
        "ADV",
        "Adventure Sports",
        "adventure",
        "Adventure activities and sports destinations",
    ),
    (
        "CULT",
        "Cultural Sites",
        "cultural",
        "Cultural centers, art galleries, and local experiences",
    ),
];

async fn seed_districts(pool: &PgPool) -> anyhow::Result<u64> {
    let mut inserted = 0;

    for &(code, name, sw_lon, sw_lat, ne_lon, ne_lat) in DISTRICTS {
        let rows = sqlx::query(
            r#"
            INSERT INTO districts (code, name, sw_longitude, sw_latitude, ne_longitude, ne_latitude)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(sw_lon)
        .bind(sw_lat)
        .bind(ne_lon)
        .bind(ne_lat)
        .execute(pool)
        .await
        .with_context(|| format!("inserting district {}", code))?
        .rows_affected();

        inserted += rows;
    }

    Ok(inserted)
}

async fn seed_geographies(pool: &PgPool) -> anyhow::Result<u64> {
    let mut inserted = 0;

    for &(code, name, api_code, description) in GEOGRAPHIES {
        let rows = sqlx::query(
            r#"
            INSERT INTO geographies (code, name, api_code, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(api_code)
        .bind(description)
        .execute(pool)
        .await
        .with_context(|| format!("inserting geography {}", code))?
        .rows_affected();

        inserted += rows;
    }

    Ok(inserted)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    println!("{}🌍 GlobeMate reference data seeder{}", BOLD, RESET);
    println!("{}Connecting to database...{}", CYAN, RESET);

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .context("connecting to database")?;

    let districts = seed_districts(&pool).await?;
    if districts > 0 {
        println!("{}✅ Districts: {} inserted{}", GREEN, districts, RESET);
    } else {
        println!("{}• Districts already seeded{}", YELLOW, RESET);
    }

    let geographies = seed_geographies(&pool).await?;
    if geographies > 0 {
        println!("{}✅ Geographies: {} inserted{}", GREEN, geographies, RESET);
    } else {
        println!("{}• Geographies already seeded{}", YELLOW, RESET);
    }

    println!("{}✨ Done{}", BOLD, RESET);
    Ok(())
}
