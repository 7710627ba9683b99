//! AfriLink setup scripts - the fixed, ordered step list
//!
//! Scripts are read from disk when each step runs, relative to the base
//! directory. They are applied in the order listed here and never reordered.

/// All setup scripts, in application order.
///
/// IMPORTANT: When adding a new script:
/// 1. Create the SQL file: scripts/NNN_description.sql
/// 2. Add an entry here in order
/// 3. Add any new table to EXPECTED_TABLES
pub const SETUP_SCRIPTS: &[&str] = &[
    "scripts/001_create_users_and_profiles.sql",
    "scripts/002_create_wallets.sql",
    "scripts/003_create_currencies.sql",
    "scripts/004_create_transactions.sql",
    "scripts/005_create_kyc_documents.sql",
    "scripts/006_create_system_settings.sql",
    "scripts/007_seed_currencies.sql",
];

/// Tables a completed setup leaves in the public schema, in report order.
pub const EXPECTED_TABLES: &[&str] = &[
    "profiles",
    "admin_users",
    "wallets",
    "currencies",
    "exchange_rates",
    "transactions",
    "kyc_documents",
    "system_settings",
];

/// Number of rows inserted by 007_seed_currencies.sql
pub const SEEDED_CURRENCIES: usize = 13;
