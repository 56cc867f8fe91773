//! `salesbridge`: fetch Odoo sale orders for a date range and print them.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use salesbridge_core::SalesError;
use salesbridge_gateway::OdooClient;
use salesbridge_sales::SaleOrder;

#[derive(Debug, Parser)]
#[command(name = "salesbridge", about = "Fetch Odoo sales data by date range.", version)]
struct Cli {
    #[arg(long = "from", value_name = "YYYY-MM-DD", help = "Start date (YYYY-MM-DD)")]
    date_from: String,
    #[arg(long = "to", value_name = "YYYY-MM-DD", help = "End date (YYYY-MM-DD)")]
    date_to: String,
    #[arg(long, help = "Limit number of records")]
    limit: Option<u32>,
    #[arg(long, help = "Print a one-line-per-order summary instead of JSON")]
    summary: bool,
}

fn main() -> ExitCode {
    salesbridge_observability::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            // Bad input gets the same code clap uses for usage errors.
            match err.downcast_ref::<SalesError>() {
                Some(e) if e.is_client_error() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let client = OdooClient::from_env()?;
    let orders = client.get_sales_data(cli.date_from.as_str(), cli.date_to.as_str(), cli.limit)?;
    tracing::info!(
        count = orders.len(),
        from = %cli.date_from,
        to = %cli.date_to,
        "fetched sale orders"
    );

    let rendered = if cli.summary {
        render_summary(&orders)
    } else {
        render_json(&orders)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write output")?;
    Ok(())
}

fn render_json(orders: &[SaleOrder]) -> Result<String> {
    let payload: Vec<serde_json::Value> =
        orders.iter().map(SaleOrder::to_serializable).collect();
    serde_json::to_string_pretty(&payload).context("failed to encode orders")
}

fn render_summary(orders: &[SaleOrder]) -> String {
    let mut lines = vec![format!("Fetched {} sale orders", orders.len())];
    lines.extend(orders.iter().map(|o| {
        format!(
            "{} | {} | {:.2} | {}",
            o.ordered_at.format("%Y-%m-%d %H:%M:%S"),
            o.reference,
            o.total_amount,
            o.party_name.as_deref().unwrap_or("-"),
        )
    }));
    lines.join("\n")
}
