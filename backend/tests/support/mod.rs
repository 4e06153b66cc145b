//! Database helpers shared by the PostgreSQL-backed integration suites.

#![allow(dead_code, reason = "each suite uses a subset of the helpers")]

use std::fmt::Display;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use robots_backend::outbound::persistence::ROBOTS_DDL;

const SKIP_VALUES: [&str; 3] = ["1", "true", "yes"];

/// Turn a cluster setup failure into a skip when `SKIP_TEST_CLUSTER` allows it.
///
/// Without the opt-out the failure panics, so a broken CI cluster is never
/// reported as a pass.
pub fn handle_cluster_setup_failure<T>(reason: impl Display) -> Option<T> {
    let skip = std::env::var("SKIP_TEST_CLUSTER")
        .is_ok_and(|value| SKIP_VALUES.iter().any(|on| value.eq_ignore_ascii_case(on)));
    assert!(
        skip,
        "embedded PostgreSQL unavailable ({reason}); set SKIP_TEST_CLUSTER=1 to skip"
    );
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

/// Describe a `postgres` error including SQLSTATE, detail and hint, which
/// its `Display` output omits for server-side errors.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );

    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }

    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }

    summary
}

/// Drop and recreate `name`, then create the robots table in it.
///
/// Uses `postgres` rather than Diesel so `DROP DATABASE` runs outside a
/// transaction.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<String, String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut admin = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    // Separate statements: a multi-statement batch runs in an implicit
    // transaction, which DROP DATABASE refuses.
    admin
        .batch_execute(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .map_err(|err| format_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = cluster.connection().database_url(name);
    let mut client = Client::connect(&url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(ROBOTS_DDL)
        .map_err(|err| format_postgres_error(&err))?;
    Ok(url)
}

/// Drop the robots table to simulate schema loss.
pub fn drop_robots_table(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute("DROP TABLE IF EXISTS robots;")
        .map_err(|err| format_postgres_error(&err))
}
