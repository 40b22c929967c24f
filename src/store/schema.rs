//! Table DDL and database bootstrap. Every statement is idempotent so startup can run it each time.

use crate::config::NameCase;
use crate::error::{AppError, ConfigError};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const CATEGORIES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        seq BIGINT GENERATED ALWAYS AS IDENTITY
    )
"#;

const SUPPLIERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS suppliers (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        phone TEXT,
        seq BIGINT GENERATED ALWAYS AS IDENTITY
    )
"#;

const PRODUCTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        category_id UUID NOT NULL
            CONSTRAINT products_category_id_fkey REFERENCES categories (id) ON DELETE RESTRICT,
        price DOUBLE PRECISION NOT NULL,
        quantity INTEGER NOT NULL,
        image_url TEXT,
        supplier_id UUID NOT NULL
            CONSTRAINT products_supplier_id_fkey REFERENCES suppliers (id) ON DELETE RESTRICT,
        seq BIGINT GENERATED ALWAYS AS IDENTITY
    )
"#;

const SHARED_INDEXES: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS suppliers_email_key ON suppliers (email)",
    "CREATE INDEX IF NOT EXISTS products_category_id_idx ON products (category_id)",
    "CREATE INDEX IF NOT EXISTS products_supplier_id_idx ON products (supplier_id)",
];

/// Name uniqueness is an index rather than a column constraint so the case rule can be switched.
const CASE_SENSITIVE_NAMES: &[&str] = &[
    "DROP INDEX IF EXISTS categories_name_lower_key",
    "DROP INDEX IF EXISTS suppliers_name_lower_key",
    "CREATE UNIQUE INDEX IF NOT EXISTS categories_name_key ON categories (name)",
    "CREATE UNIQUE INDEX IF NOT EXISTS suppliers_name_key ON suppliers (name)",
];

const CASE_INSENSITIVE_NAMES: &[&str] = &[
    "DROP INDEX IF EXISTS categories_name_key",
    "DROP INDEX IF EXISTS suppliers_name_key",
    "CREATE UNIQUE INDEX IF NOT EXISTS categories_name_lower_key ON categories (lower(name))",
    "CREATE UNIQUE INDEX IF NOT EXISTS suppliers_name_lower_key ON suppliers (lower(name))",
];

/// Create categories, suppliers and products (in FK order) plus their unique indexes.
pub async fn ensure_tables(pool: &PgPool, name_case: NameCase) -> Result<(), AppError> {
    for ddl in [CATEGORIES_DDL, SUPPLIERS_DDL, PRODUCTS_DDL] {
        sqlx::query(ddl).execute(pool).await?;
    }
    let name_indexes = match name_case {
        NameCase::Sensitive => CASE_SENSITIVE_NAMES,
        NameCase::Insensitive => CASE_INSENSITIVE_NAMES,
    };
    for stmt in SHARED_INDEXES.iter().chain(name_indexes) {
        sqlx::query(stmt).execute(pool).await?;
    }
    tracing::info!(?name_case, "inventory tables ready");
    Ok(())
}

/// Client-facing field behind a constraint or unique index name.
pub(crate) fn constraint_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "categories_name_key" | "categories_name_lower_key" | "suppliers_name_key"
        | "suppliers_name_lower_key" => Some("name"),
        "suppliers_email_key" => Some("email"),
        "products_category_id_fkey" => Some("category_id"),
        "products_supplier_id_fkey" => Some("supplier_id"),
        _ => None,
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|_| invalid_url(database_url))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn invalid_url(url: &str) -> AppError {
    AppError::Config(ConfigError::Invalid {
        key: "DATABASE_URL",
        value: url.to_string(),
    })
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| invalid_url(url))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
