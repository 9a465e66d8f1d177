//! Database seeder for Lotworks development and testing.
//!
//! Seeds a handful of vehicles across two lots, including one damaged
//! acquisition so the workshop flow has something to complete.
//!
//! Usage: cargo run --bin seeder

use lotworks_core::inventory::VehicleCondition;
use lotworks_db::repositories::NewVehicle;
use lotworks_db::InventoryRepository;
use lotworks_shared::{Actor, Role};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = lotworks_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let admin = Actor {
        user_id: 1,
        username: "admin".into(),
        role: Role::Admin,
        location: "HQ".into(),
    };

    let inventory = InventoryRepository::new(db);

    println!("Seeding vehicles...");
    for vehicle in seed_vehicles() {
        let make = vehicle.make.clone();
        let model = vehicle.model.clone();
        match inventory.create(&admin, vehicle).await {
            Ok(created) => println!("  {} {} -> VIN {}", make, model, created.vin_number),
            Err(err) => println!("  {make} {model} skipped: {err}"),
        }
    }

    println!("Done.");
}

fn seed_vehicles() -> Vec<NewVehicle> {
    vec![
        NewVehicle {
            vin_number: None,
            make: "Toyota".into(),
            model: "Camry".into(),
            year: 2021,
            mileage: 32_000,
            condition: VehicleCondition::Normal,
            cost: Decimal::new(15_000, 0),
            sale_price: Decimal::new(18_500, 0),
            location: Some("Denver".into()),
        },
        NewVehicle {
            vin_number: None,
            make: "Honda".into(),
            model: "Civic".into(),
            year: 2019,
            mileage: 58_000,
            condition: VehicleCondition::Normal,
            cost: Decimal::new(11_000, 0),
            sale_price: Decimal::new(13_900, 0),
            location: Some("Denver".into()),
        },
        NewVehicle {
            vin_number: None,
            make: "Ford".into(),
            model: "F-150".into(),
            year: 2020,
            mileage: 74_000,
            condition: VehicleCondition::Damaged,
            cost: Decimal::new(19_000, 0),
            sale_price: Decimal::new(24_500, 0),
            location: Some("Boston".into()),
        },
        NewVehicle {
            vin_number: None,
            make: "Subaru".into(),
            model: "Outback".into(),
            year: 2022,
            mileage: 21_000,
            condition: VehicleCondition::Normal,
            cost: Decimal::new(21_000, 0),
            sale_price: Decimal::new(25_900, 0),
            location: Some("Boston".into()),
        },
    ]
}
