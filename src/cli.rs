/*!
tabviz command line interface

Drives the query-state codec and the chart pipeline from the shell: inspect
how a query string parses, regenerate the canonical URLs for a table, or run
chart-type resolution and aggregation against column/row JSON files.
*/

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tabviz::chart::ChartModel;
use tabviz::column::ColumnRef;
use tabviz::query::{parse_query, url};
use tabviz::row::Row;
use tabviz::VERSION;

#[derive(Parser)]
#[command(name = "tabviz")]
#[command(about = "Query-state codec and chart-data pipeline for table browsing")]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a URL query string and show the structured query state
    Parse {
        /// The query string, with or without its leading '?'
        query: String,

        /// Output format (json, debug)
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Build the canonical page, row-query API, and chart URLs
    Urls {
        /// Table name
        table: String,

        /// The query string carrying the state
        query: String,

        /// 1-based page number for the page/API URLs
        #[arg(long)]
        page: Option<i64>,

        /// Rows per page for the page/API URLs
        #[arg(long = "per-page")]
        per_page: Option<i64>,
    },

    /// Resolve the chart type and compute chart data
    Chart {
        /// Table name
        table: String,

        /// The query string carrying the x/y/color bindings
        query: String,

        /// Path to the table's column metadata JSON (array of columns)
        #[arg(long)]
        columns: PathBuf,

        /// Path to rows JSON; omit to only resolve the chart type
        #[arg(long)]
        rows: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { query, format } => {
            let parsed = parse_query(&query);

            for warning in parsed.warnings() {
                eprintln!("warning: {}", warning);
            }

            match format.as_str() {
                "json" => {
                    let output = serde_json::json!({
                        "params": parsed.params(),
                        "pagination": parsed.pagination(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                "debug" => {
                    println!("{:#?}", parsed.params());
                    println!("{:#?}", parsed.pagination());
                }
                _ => {
                    eprintln!("Unknown format: {}", format);
                    std::process::exit(1);
                }
            }
        }

        Commands::Urls {
            table,
            query,
            page,
            per_page,
        } => {
            let parsed = parse_query(&query);

            for warning in parsed.warnings() {
                eprintln!("warning: {}", warning);
            }

            println!("page:  {}", url::table_url(&table, page, per_page, parsed.params()));
            println!("query: {}", url::table_query_url(&table, page, per_page, parsed.params()));
            println!("chart: {}", url::chart_url(&table, None, parsed.params()));
        }

        Commands::Chart {
            table,
            query,
            columns,
            rows,
        } => {
            let parsed = parse_query(&query);

            for warning in parsed.warnings() {
                eprintln!("warning: {}", warning);
            }

            let columns: Vec<ColumnRef> = serde_json::from_str(&std::fs::read_to_string(columns)?)?;
            let model = ChartModel::new(&table, &columns, parsed.params());
            println!("type: {}", model.chart_type());

            if let Some(rows_path) = rows {
                let rows: Vec<Row> = serde_json::from_str(&std::fs::read_to_string(rows_path)?)?;
                let data = model.data(rows)?;
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
        }
    }

    Ok(())
}
