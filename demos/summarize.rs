use bank_statement_insights::{LedgerBuilder, ViewParams};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Usage: summarize <statement.csv|xlsx> [profile label] [query]
    let args: Vec<String> = env::args().collect();
    let Some(file_path) = args.get(1) else {
        eprintln!("usage: summarize <statement file> [profile label] [search query]");
        std::process::exit(2);
    };

    let mut builder = LedgerBuilder::new().filename(file_path);
    if let Some(label) = args.get(2) {
        builder = builder.profile(label);
    }
    let ledger = builder.build()?;

    let params = ViewParams {
        query: args.get(3).cloned().unwrap_or_default(),
        ..ViewParams::default()
    };
    let dashboard = ledger.view(&params)?;

    println!("Found {} transactions\n", ledger.len());

    let totals = dashboard.totals;
    println!("Total income:   {:>12.2}", totals.income);
    println!("Total expenses: {:>12.2}", totals.expenses);
    println!("Net flow:       {:>12.2}", totals.net_flow);
    println!("Savings rate:   {:>11.2}%\n", totals.savings_rate);

    println!("Month      Income      Expense     Net         Budget diff");
    for (month, budget) in dashboard.monthly.iter().zip(&dashboard.budget) {
        println!(
            "{}    {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}",
            month.label(),
            month.income,
            month.expense,
            month.net,
            budget.difference
        );
    }

    println!("\nExpenses by category:");
    for total in &dashboard.category_totals {
        println!("  {:<14} {:>10.2}", total.category, total.amount);
    }

    println!("\nTop expenses:");
    for tx in &dashboard.top_expenses {
        println!("  {}  {:>10.2}  {}", tx.date, tx.amount, tx.description);
    }

    println!("\nTop incomes:");
    for tx in &dashboard.top_incomes {
        println!("  {}  {:>10.2}  {}", tx.date, tx.amount, tx.description);
    }

    Ok(())
}
