//! Declared row types and startup validation against the live SQLite schema.

use crate::error::SchemaError;
use serde::Serialize;
use sqlx::SqlitePool;

pub const MEASUREMENT_TABLE: &str = "measurement";
pub const STATION_TABLE: &str = "station";

/// One weather station row.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Station {
    pub station: String,
    pub name: String,
}

/// A table the queries depend on, with the columns they read.
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const DECLARED_TABLES: &[TableSpec] = &[
    TableSpec {
        name: MEASUREMENT_TABLE,
        columns: &["station", "date", "prcp", "tobs"],
    },
    TableSpec {
        name: STATION_TABLE,
        columns: &["station", "name"],
    },
];

#[derive(Clone, Debug, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared SQLite type, empty when the column has none.
    pub decl_type: String,
    pub not_null: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReflectedTable {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

impl ReflectedTable {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Live layout of the declared tables, extra columns included.
#[derive(Clone, Debug, Serialize)]
pub struct ReflectedSchema {
    pub tables: Vec<ReflectedTable>,
}

impl ReflectedSchema {
    pub fn table(&self, name: &str) -> Option<&ReflectedTable> {
        self.tables.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Inspect the database and check every declared table and column exists.
pub async fn reflect(pool: &SqlitePool) -> Result<ReflectedSchema, SchemaError> {
    let mut tables = Vec::with_capacity(DECLARED_TABLES.len());
    for spec in DECLARED_TABLES {
        let exists: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1 COLLATE NOCASE")
                .bind(spec.name)
                .fetch_optional(pool)
                .await?;
        if exists.is_none() {
            return Err(SchemaError::MissingTable(spec.name));
        }

        // table_info returns (cid, name, type, notnull, dflt_value, pk)
        let rows: Vec<(String, String, i64)> =
            sqlx::query_as("SELECT name, type, \"notnull\" FROM pragma_table_info(?1)")
                .bind(spec.name)
                .fetch_all(pool)
                .await?;
        let table = ReflectedTable {
            name: spec.name.to_string(),
            columns: rows
                .into_iter()
                .map(|(name, decl_type, not_null)| ColumnInfo {
                    name,
                    decl_type,
                    not_null: not_null != 0,
                })
                .collect(),
        };
        for column in spec.columns {
            if table.column(column).is_none() {
                return Err(SchemaError::MissingColumn {
                    table: spec.name,
                    column: *column,
                });
            }
        }
        tables.push(table);
    }
    Ok(ReflectedSchema { tables })
}
