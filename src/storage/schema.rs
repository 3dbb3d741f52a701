//! Database schema definitions.
//!
//! The `expenses` table is built up by numbered migration steps rather than a
//! single `CREATE TABLE`, so that files written before the version table
//! existed (version 0, any subset of the later columns) converge on the same
//! layout as a fresh install.

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// Name of the expense table.
pub const EXPENSES_TABLE: &str = "expenses";

/// Column layout of the expense table, in insert order.
pub const EXPENSE_COLUMNS: [&str; 4] = ["amount", "category", "date", "description"];

/// SQL for the schema version table.
pub const SCHEMA_INFO_SQL: &str = r"
CREATE TABLE IF NOT EXISTS schema_info (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// SQL to check whether a table exists.
pub const TABLE_EXISTS_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name=?;
";

/// SQL to get schema version.
pub const GET_VERSION_SQL: &str = r"
SELECT value FROM schema_info WHERE key = 'version';
";

/// SQL to set schema version.
pub const SET_VERSION_SQL: &str = r"
INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?);
";

/// Positional insert; relies on the column order in [`EXPENSE_COLUMNS`].
pub const INSERT_EXPENSE_SQL: &str = "INSERT INTO expenses VALUES (?1, ?2, ?3, ?4)";

/// Full-table read, projected to the record fields.
pub const SELECT_EXPENSES_SQL: &str = "SELECT amount, category, date, description FROM expenses";

/// Row count.
pub const COUNT_EXPENSES_SQL: &str = "SELECT COUNT(*) FROM expenses";

/// A single additive schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaChange {
    /// Create a table that does not exist yet.
    CreateTable {
        /// Table name.
        table: &'static str,
        /// `CREATE TABLE` statement.
        sql: &'static str,
    },
    /// Add a column to an existing table.
    AddColumn {
        /// Table name.
        table: &'static str,
        /// Column name.
        column: &'static str,
        /// Column type declaration.
        definition: &'static str,
    },
}

impl SchemaChange {
    /// Returns the SQL that applies this change.
    #[must_use]
    pub fn sql(&self) -> String {
        match self {
            Self::CreateTable { sql, .. } => (*sql).to_string(),
            Self::AddColumn {
                table,
                column,
                definition,
            } => format!("ALTER TABLE {table} ADD COLUMN {column} {definition}"),
        }
    }
}

/// A numbered migration step.
pub struct Migration {
    /// Version this migration upgrades from.
    pub from_version: u32,
    /// Version this migration upgrades to.
    pub to_version: u32,
    /// Human-readable summary, used in logs.
    pub description: &'static str,
    /// The change itself.
    pub change: SchemaChange,
}

/// Base table as first shipped: amount and category only.
const CREATE_EXPENSES_SQL: &str = r"
CREATE TABLE IF NOT EXISTS expenses (
    amount REAL,
    category TEXT
);
";

/// Available migrations, in order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        from_version: 0,
        to_version: 1,
        description: "create expenses table",
        change: SchemaChange::CreateTable {
            table: EXPENSES_TABLE,
            sql: CREATE_EXPENSES_SQL,
        },
    },
    Migration {
        from_version: 1,
        to_version: 2,
        description: "add expenses.date",
        change: SchemaChange::AddColumn {
            table: EXPENSES_TABLE,
            column: "date",
            definition: "TEXT",
        },
    },
    Migration {
        from_version: 2,
        to_version: 3,
        description: "add expenses.description",
        change: SchemaChange::AddColumn {
            table: EXPENSES_TABLE,
            column: "description",
            definition: "TEXT",
        },
    },
];

/// Gets migrations needed to upgrade from a version.
#[must_use]
pub fn get_migrations_from(current_version: u32) -> Vec<&'static Migration> {
    MIGRATIONS
        .iter()
        .filter(|m| m.from_version >= current_version && m.to_version <= CURRENT_SCHEMA_VERSION)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_ordered() {
        for pair in MIGRATIONS.windows(2) {
            assert_eq!(pair[0].to_version, pair[1].from_version);
        }
        for migration in MIGRATIONS {
            assert_eq!(migration.to_version, migration.from_version + 1);
        }
    }

    #[test]
    fn test_migrations_reach_current_version() {
        let last = MIGRATIONS.last().map(|m| m.to_version);
        assert_eq!(last, Some(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn test_get_migrations_from() {
        assert_eq!(get_migrations_from(0).len(), MIGRATIONS.len());
        assert_eq!(get_migrations_from(2).len(), 1);
        assert!(get_migrations_from(CURRENT_SCHEMA_VERSION).is_empty());
    }

    #[test]
    fn test_add_column_sql() {
        let change = SchemaChange::AddColumn {
            table: "expenses",
            column: "date",
            definition: "TEXT",
        };
        assert_eq!(change.sql(), "ALTER TABLE expenses ADD COLUMN date TEXT");
    }

    #[test]
    fn test_migrations_produce_expense_columns() {
        // The create step provides the first two columns; the rest are added in order.
        let added: Vec<&str> = MIGRATIONS
            .iter()
            .filter_map(|m| match m.change {
                SchemaChange::AddColumn { column, .. } => Some(column),
                SchemaChange::CreateTable { .. } => None,
            })
            .collect();
        assert_eq!(added, EXPENSE_COLUMNS[2..]);
        assert!(CREATE_EXPENSES_SQL.contains("amount REAL"));
        assert!(CREATE_EXPENSES_SQL.contains("category TEXT"));
    }
}
