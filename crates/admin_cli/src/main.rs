use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::Engine;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "ledger_admin")]
#[command(about = "Admin utilities for the ledger (seed accounts/budgets, fix balances)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./ledger.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Account(Account),
    Budget(Budget),
    Balances(Balances),
}

#[derive(Args, Debug)]
struct Account {
    #[command(subcommand)]
    command: AccountCommand,
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    Create(AccountCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct AccountCreateArgs {
    #[arg(long)]
    name: String,
    /// Recorded as an "Opening balance" income transaction.
    #[arg(long, default_value_t = 0)]
    opening_balance: i64,
}

#[derive(Args, Debug)]
struct Budget {
    #[command(subcommand)]
    command: BudgetCommand,
}

#[derive(Subcommand, Debug)]
enum BudgetCommand {
    Create(BudgetCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct BudgetCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    max: i64,
}

#[derive(Args, Debug)]
struct Balances {
    #[command(subcommand)]
    command: BalancesCommand,
}

#[derive(Subcommand, Debug)]
enum BalancesCommand {
    /// Rebuild account balances and budget counters from the transactions.
    Recompute,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::Account(Account {
            command: AccountCommand::Create(args),
        }) => {
            let account = engine
                .new_account(&args.name, args.opening_balance)
                .await?;
            println!(
                "created account: {} ({}), balance {}",
                account.name, account.id, account.balance
            );
        }
        Command::Account(Account {
            command: AccountCommand::List,
        }) => {
            for account in engine.accounts().await? {
                println!("{}\t{}\t{}", account.id, account.name, account.balance);
            }
        }
        Command::Budget(Budget {
            command: BudgetCommand::Create(args),
        }) => {
            let budget = engine.new_budget(&args.name, args.max).await?;
            println!("created budget: {} ({}), max {}", budget.name, budget.id, budget.max);
        }
        Command::Budget(Budget {
            command: BudgetCommand::List,
        }) => {
            for budget in engine.budgets().await? {
                println!(
                    "{}\t{}\t{}/{}\tspent {}",
                    budget.id,
                    budget.name,
                    budget.current,
                    budget.max,
                    budget.spent()
                );
            }
        }
        Command::Balances(Balances {
            command: BalancesCommand::Recompute,
        }) => {
            let report = engine.recompute_balances().await?;
            if report.is_clean() {
                println!("balances already consistent");
            } else {
                println!(
                    "fixed {} accounts and {} budgets",
                    report.accounts_fixed, report.budgets_fixed
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn account_create_defaults_to_empty_balance() {
        let cli = Cli::try_parse_from([
            "ledger_admin",
            "--database-url",
            "sqlite::memory:",
            "account",
            "create",
            "--name",
            "Checking",
        ])
        .unwrap();

        let Command::Account(Account {
            command: AccountCommand::Create(args),
        }) = cli.command
        else {
            panic!("unexpected command: {:?}", cli.command);
        };
        assert_eq!(args.name, "Checking");
        assert_eq!(args.opening_balance, 0);
    }

    #[test]
    fn budget_create_requires_max() {
        let res = Cli::try_parse_from([
            "ledger_admin",
            "--database-url",
            "sqlite::memory:",
            "budget",
            "create",
            "--name",
            "Food",
        ]);

        assert!(res.is_err());
    }
}
