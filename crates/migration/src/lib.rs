pub use sea_orm_migration::prelude::*;

mod m20240101_000001_ledger;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_ledger::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::Database;

    use super::*;

    #[tokio::test]
    async fn up_and_down() {
        let db = Database::connect("sqlite::memory:").await.unwrap();

        Migrator::up(&db, None).await.unwrap();
        let manager = SchemaManager::new(&db);
        for table in ["accounts", "budgets", "transactions"] {
            assert!(manager.has_table(table).await.unwrap(), "{table}");
        }
        assert!(manager.has_column("transactions", "budget_id").await.unwrap());

        Migrator::down(&db, None).await.unwrap();
        for table in ["accounts", "budgets", "transactions"] {
            assert!(!manager.has_table(table).await.unwrap(), "{table}");
        }
    }
}
