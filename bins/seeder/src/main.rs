//! Standalone admin account provisioning.
//!
//! Ensures the schema exists and that exactly one administrative account
//! exists for the configured identity. An existing account is reported and
//! left untouched: no duplicate, no password reset. Any failure aborts the
//! process with a nonzero exit.
//!
//! Usage: ADMIN_PASSWORD=... cargo run --bin seeder

use duitku_core::auth::hash_password;
use duitku_db::{
    UserRepository,
    migration::{Migrator, MigratorTrait},
};

const DEFAULT_ADMIN_EMAIL: &str = "admin@info.com";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let admin_email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let admin_password =
        std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set in environment");

    println!("Connecting to database...");
    let db = duitku_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Ensuring schema exists...");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let user_repo = UserRepository::new(db);

    println!("Seeding admin account...");
    let existing = user_repo
        .find_by_email(&admin_email)
        .await
        .expect("Failed to query admin account");

    if let Some(user) = existing {
        println!("  Admin account already exists, leaving untouched");
        println!("  Email:   {}", user.email);
        println!("  User ID: {}", user.id);
        return;
    }

    let password_hash = hash_password(&admin_password).expect("Failed to hash admin password");

    let user = user_repo
        .create(&admin_email, &password_hash)
        .await
        .expect("Failed to create admin account");

    println!("  Created admin account");
    println!("  Email:   {}", user.email);
    println!("  User ID: {}", user.id);
}
