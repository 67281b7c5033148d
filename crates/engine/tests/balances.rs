use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use engine::{BalanceReport, Engine, NewTransactionCmd, TransactionKind, UpdateTransactionCmd};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

/// Accounts and budgets ids, after a mix of every write.
async fn seed(engine: &Engine) -> (i32, i32, i32, i32) {
    let checking = engine.new_account("Checking", 500).await.unwrap();
    let savings = engine.new_account("Savings", 0).await.unwrap();
    let food = engine.new_budget("Food", 200).await.unwrap();
    let fun = engine.new_budget("Fun", 100).await.unwrap();

    let lunch = engine
        .create_transaction(
            NewTransactionCmd::new("Lunch", TransactionKind::Out, 15, checking.id)
                .budget_id(food.id),
        )
        .await
        .unwrap();
    let cinema = engine
        .create_transaction(
            NewTransactionCmd::new("Cinema", TransactionKind::Out, 20, checking.id)
                .budget_id(fun.id),
        )
        .await
        .unwrap();
    engine
        .create_transaction(NewTransactionCmd::new(
            "Refund",
            TransactionKind::In,
            40,
            savings.id,
        ))
        .await
        .unwrap();

    engine
        .update_transaction(
            UpdateTransactionCmd::new(lunch.id)
                .amount(25)
                .account_id(savings.id)
                .budget_id(fun.id),
        )
        .await
        .unwrap();
    engine.delete_transaction(cinema.id).await.unwrap();

    (checking.id, savings.id, food.id, fun.id)
}

#[tokio::test]
async fn incremental_counters_match_recomputation() {
    let (engine, _db) = engine_with_db().await;
    let (checking, savings, food, fun) = seed(&engine).await;

    let accounts = engine.accounts().await.unwrap();
    let budgets = engine.budgets().await.unwrap();
    let balance = |id| accounts.iter().find(|a| a.id == id).unwrap().balance;
    let current = |id| budgets.iter().find(|b| b.id == id).unwrap().current;
    assert_eq!(balance(checking), 500);
    assert_eq!(balance(savings), 15);
    assert_eq!(current(food), 200);
    assert_eq!(current(fun), 75);

    let report = engine.recompute_balances().await.unwrap();

    assert!(report.is_clean());
    assert_eq!(engine.accounts().await.unwrap(), accounts);
    assert_eq!(engine.budgets().await.unwrap(), budgets);
}

#[tokio::test]
async fn recompute_fixes_drift() {
    let (engine, db) = engine_with_db().await;
    let (checking, _savings, _food, fun) = seed(&engine).await;

    db.execute_unprepared(&format!(
        "UPDATE accounts SET balance = 999 WHERE id = {checking}"
    ))
    .await
    .unwrap();
    db.execute_unprepared(&format!("UPDATE budgets SET current = 0 WHERE id = {fun}"))
        .await
        .unwrap();

    let report = engine.recompute_balances().await.unwrap();

    assert_eq!(
        report,
        BalanceReport {
            accounts_fixed: 1,
            budgets_fixed: 1,
        }
    );
    let accounts = engine.accounts().await.unwrap();
    let budgets = engine.budgets().await.unwrap();
    assert_eq!(
        accounts.iter().find(|a| a.id == checking).unwrap().balance,
        500
    );
    assert_eq!(budgets.iter().find(|b| b.id == fun).unwrap().current, 75);

    assert!(engine.recompute_balances().await.unwrap().is_clean());
}

#[tokio::test]
async fn recompute_on_empty_ledger() {
    let (engine, _db) = engine_with_db().await;

    assert_eq!(
        engine.recompute_balances().await.unwrap(),
        BalanceReport::default()
    );
}
