use clap::Parser;
use investor_intel::config::{Config, RemoteCredentials};
use investor_intel::export::{read_input_file, upsert_remote};
use investor_intel::infra::SupabaseTable;
use investor_intel::logging;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "upload-remote")]
#[command(about = "Upsert an investor CSV into the hosted Supabase table")]
struct Cli {
    /// CSV to upload (defaults to export.sample_path)
    csv: Option<PathBuf>,
}

const USAGE: &str = "Usage: upload-remote [CSV_FILE]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();
    let cli = Cli::parse();
    let config = Config::load_or_default()?;

    let csv_path = cli
        .csv
        .unwrap_or_else(|| PathBuf::from(&config.export.sample_path));
    println!("📂 Loading data from {}...", csv_path.display());
    let records = match read_input_file(&csv_path, USAGE) {
        Ok(records) => records,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };
    println!("Loaded {} records", records.len());

    let credentials = RemoteCredentials::from_env()?;

    let table = SupabaseTable::new(
        credentials,
        &config.remote.table,
        Duration::from_secs(config.remote.timeout_seconds),
    );

    println!("☁️  Uploading {} records...", records.len());
    let report = upsert_remote(&table, &records, config.remote.batch_size).await;

    println!(
        "✅ Upload complete: {} upserted, {} inserted individually",
        report.rows_upserted, report.rows_inserted
    );
    if report.batches_failed > 0 {
        println!(
            "⚠️  {}/{} batches fell back to single inserts",
            report.batches_failed, report.batches
        );
    }
    for failure in &report.failures {
        println!("   ❌ {}: {}", failure.name, failure.error);
    }
    Ok(())
}
