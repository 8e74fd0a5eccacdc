use crate::error::DatabaseError;
use fxhash::FxHashMap;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// Creates the migration bookkeeping table. Always applied first, outside the manifest.
const BOOTSTRAP: &str = "
    DEFINE TABLE IF NOT EXISTS migration SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS migration_key ON migration FIELDS slice, version UNIQUE;
";

const IDENTITY_V1: &str = "
    DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE;
";

const CUSTOMERS_V1: &str = "
    DEFINE TABLE IF NOT EXISTS customer SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS address SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS address_customer ON address FIELDS customer;
";

const CHECKLISTS_V1: &str = "
    DEFINE TABLE IF NOT EXISTS checklist SCHEMALESS;
";

const CONTRACTS_V1: &str = "
    DEFINE TABLE IF NOT EXISTS contract SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS contract_customer ON contract FIELDS customer;
";

const WORKORDERS_V1: &str = "
    DEFINE TABLE IF NOT EXISTS work_order SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS work_order_contract ON work_order FIELDS contract;
";

const REPORTS_V1: &str = "
    DEFINE TABLE IF NOT EXISTS report SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS report_work_order ON report FIELDS work_order UNIQUE;
";

#[derive(Debug)]
pub(crate) struct Migration {
    pub slice: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    const fn new(slice: &'static str, version: &'static str, script: &'static str) -> Self {
        Self { slice, version, script }
    }

    fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.script.as_bytes()))
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration {
            slice: self.slice.to_owned(),
            version: self.version.to_owned(),
            checksum: self.checksum(),
        }
    }
}

/// The embedded manifest, in application order. Identity comes first because
/// other slices reference user records.
fn builtin_migrations() -> Vec<Migration> {
    vec![
        Migration::new("identity", "0001", IDENTITY_V1),
        Migration::new("customers", "0001", CUSTOMERS_V1),
        Migration::new("checklists", "0001", CHECKLISTS_V1),
        Migration::new("contracts", "0001", CONTRACTS_V1),
        Migration::new("workorders", "0001", WORKORDERS_V1),
        Migration::new("reports", "0001", REPORTS_V1),
    ]
}

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct AppliedMigration {
    pub slice: String,
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        self.db
            .query(BOOTSTRAP)
            .await?
            .check()
            .map_err(|e| DatabaseError::Migration(format!("Bootstrap failed: {e}")))?;

        let mut report = MigrationReport::default();
        let applied_migrations = self.get_migrations_map().await?;

        for migration in builtin_migrations() {
            if let Some(applied) =
                applied_migrations.get(&format!("{}:{}", migration.slice, migration.version))
            {
                ensure_checksum_match(&migration, &applied.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply_migration(&migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{
                slice: $slice,
                version: $version,
                checksum: $checksum,
                applied_at: time::now()
            }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(&query)
            .bind(("slice", migration.slice))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await?
            .check()
            .map_err(|e| {
                DatabaseError::Migration(format!(
                    "SQL execution failed at {}:{}: {e}",
                    migration.slice, migration.version
                ))
            })?;

        Ok(())
    }

    async fn get_migrations_map(
        &self,
    ) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        let entries = self
            .db
            .query("SELECT slice, version, checksum FROM migration")
            .await?
            .take::<Vec<AppliedMigration>>(0)
            .map_err(|e| DatabaseError::Migration(format!("Parsing migrations map: {e}")))?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.slice, entry.version), entry))
            .collect())
    }
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    let expected = migration.checksum();
    if existing != expected {
        return Err(DatabaseError::Migration(format!(
            "Checksum mismatch for {}:{} (expected {}, got {})",
            migration.slice, migration.version, expected, existing
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksums_are_stable_hex_digests() {
        let migration = Migration::new("identity", "0001", IDENTITY_V1);
        let first = migration.checksum();
        assert_eq!(first.len(), 64);
        assert_eq!(first, migration.checksum());
    }

    #[test]
    fn manifest_has_unique_slice_versions() {
        let migrations = builtin_migrations();
        let mut seen = fxhash::FxHashSet::default();
        for m in &migrations {
            assert!(seen.insert(format!("{}:{}", m.slice, m.version)), "duplicate: {}", m.slice);
        }
    }

    #[test]
    fn checksum_mismatch_is_rejected() {
        let migration = Migration::new("identity", "0001", IDENTITY_V1);
        assert!(ensure_checksum_match(&migration, "deadbeef").is_err());
        assert!(ensure_checksum_match(&migration, &migration.checksum()).is_ok());
    }
}
