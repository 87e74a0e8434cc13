/// Database connection and schema creation
pub mod database;

/// Catalog seed data loaded from a TOML file
pub mod seed;

/// Process settings read from the environment
pub mod settings;
