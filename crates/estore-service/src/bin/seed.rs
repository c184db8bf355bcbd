//! # Demo Store Seeder
//!
//! Bootstraps operator accounts and a small inventory.
//!
//! ## Usage
//! ```bash
//! # Use the configured data directory
//! cargo run -p estore-service --bin seed
//!
//! # Seed a specific directory
//! cargo run -p estore-service --bin seed -- --data ./data
//!
//! # Read a specific config file
//! cargo run -p estore-service --bin seed -- --config ./estore.toml
//! ```
//!
//! ## Generated Data
//! - Accounts: `admin` / `manager` / `cashier`, password `<username>123`
//! - Categories per sector with a reorder level
//! - Two suppliers
//! - Items spread over the categories, some already at their reorder level

use std::env;
use std::path::PathBuf;

use estore_core::{Money, NewItem, Role, Session};
use estore_db::Database;
use estore_service::{init_tracing, AppConfig, AuthService, InventoryService, NewUser};

/// (category, min stock level, sector)
const CATEGORIES: &[(&str, u32, &str)] = &[
    ("Smartphones", 5, "Mobile"),
    ("Chargers", 20, "Accessories"),
    ("Headphones", 10, "Audio"),
    ("Laptops", 3, "Computing"),
];

/// (name, category index, purchase cents, selling cents, stock)
const ITEMS: &[(&str, usize, i64, i64, u32)] = &[
    ("Galaxy A15", 0, 14_900, 19_900, 12),
    ("Pixel 8a", 0, 38_000, 49_900, 4),
    ("USB-C Fast Charger 25W", 1, 900, 1_500, 60),
    ("Wireless Charging Pad", 1, 1_400, 2_499, 20),
    ("Over-Ear ANC Headphones", 2, 9_000, 14_999, 8),
    ("Wired Earbuds", 2, 300, 999, 45),
    ("14\" Ultrabook", 3, 62_000, 84_900, 2),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut data_dir: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("EStore Demo Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data <DIR>     Data directory (overrides config)");
                println!("  -c, --config <PATH>  Config file path");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = AppConfig::load(config_path)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    println!("EStore Demo Seeder");
    println!("==================");
    println!("Data directory: {}", config.data_dir.display());
    println!();

    let db = Database::new(config.db_config());
    let auth = AuthService::new(db.clone(), &config);
    let inventory = InventoryService::new(db.clone());

    if db.users().count() > 0 {
        println!("Store already has users; skipping seed.");
        println!("Delete the data directory to regenerate.");
        return Ok(());
    }

    let mut session = Session::new();
    let accounts = [
        ("admin", "Store Administrator", Role::Administrator),
        (
            "manager",
            "Floor Manager",
            Role::Manager {
                managed_sectors: CATEGORIES.iter().map(|c| c.2.to_string()).collect(),
            },
        ),
        (
            "cashier",
            "Front Cashier",
            Role::Cashier {
                sector: "Mobile".to_string(),
            },
        ),
    ];
    for (username, name, role) in accounts {
        let ok = auth.register_user(
            &session,
            NewUser {
                username: username.to_string(),
                password: format!("{username}123"),
                name: name.to_string(),
                email: format!("{username}@estore.local"),
                phone: "555-0100".to_string(),
                role,
            },
        );
        if !ok {
            return Err(format!("could not create account {username}").into());
        }
        // Only the first account may be an administrator without a session.
        if username == "admin" && !auth.login(&mut session, "admin", "admin123") {
            return Err("could not log in as admin".into());
        }
        println!("✓ Account {username} (password {username}123)");
    }

    if !auth.login(&mut session, "manager", "manager123") {
        return Err("could not log in as manager".into());
    }

    for (name, min, sector) in CATEGORIES {
        inventory.add_category(&session, name, *min, sector);
    }
    inventory.add_supplier(&session, "Acme Distribution", "orders@acme.test");
    inventory.add_supplier(&session, "Globex Wholesale", "+1 555 0199");

    let categories = inventory.get_all_categories();
    let suppliers = inventory.get_all_suppliers();
    if categories.len() != CATEGORIES.len() || suppliers.is_empty() {
        return Err("could not create categories and suppliers".into());
    }

    for (n, (name, category, purchase, selling, stock)) in ITEMS.iter().enumerate() {
        inventory.add_item(
            &session,
            NewItem {
                name: name.to_string(),
                category_id: categories[*category].id.clone(),
                supplier_id: suppliers[n % suppliers.len()].id.clone(),
                purchase_price: Money::from_cents(*purchase),
                selling_price: Money::from_cents(*selling),
                quantity: *stock,
            },
        );
    }
    auth.logout(&mut session);

    println!("✓ {} categories", categories.len());
    println!("✓ {} suppliers", suppliers.len());
    println!("✓ {} items", inventory.get_all_items().len());
    println!("✓ {} items at or below reorder level", inventory.check_low_stock().len());
    Ok(())
}
