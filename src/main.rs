use anyhow::Context;
use clap::Parser;
use investor_intel::apis::edgar::EdgarAcquirer;
use investor_intel::config::Config;
use investor_intel::infra::ReqwestHttp;
use investor_intel::logging;
use investor_intel::pipeline::{Pipeline, PipelineOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Settings come from `config.toml`; the binary takes no arguments.
#[derive(Parser)]
#[command(name = "investor_intel")]
#[command(about = "Collect investment advisers and institutional holders from SEC EDGAR into a CSV")]
#[command(version = "0.1.0")]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();
    Cli::parse();
    let config = Config::load_or_default()?;

    println!("{}", "=".repeat(60));
    println!("🚀 SEC EDGAR INVESTMENT INTELLIGENCE SCRAPER");
    println!("{}", "=".repeat(60));

    let http = ReqwestHttp::new(&config.registry.user_agent)
        .context("failed to build registry HTTP client")?;
    let options = PipelineOptions {
        region_filter: config.registry.region.clone(),
        limit: config.registry.limit,
        output_path: PathBuf::from(&config.export.output_path),
    };
    let pipeline = Pipeline::new(EdgarAcquirer::new(Arc::new(http), config.registry));

    info!("Starting acquisition run");
    let result = pipeline.run(&options).await?;

    for report in &result.reports {
        println!(
            "📊 {}: {} candidates, {} acquired, {} skipped",
            report.filing_type,
            report.candidates,
            report.records.len(),
            report.skipped.len()
        );
    }
    for phase in &result.phase_errors {
        println!("❌ {} phase failed: {}", phase.filing_type, phase.message);
    }

    println!("\n{}", "=".repeat(60));
    println!("📈 RESULTS SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Total investors found: {}", result.records.len());
    println!("\nBreakdown by type:");
    for (category, count) in result.counts_by_category() {
        println!("   {category}: {count}");
    }
    println!("\n💾 Data saved to: {}", result.output_file.display());

    println!("\n📋 Sample Records:");
    for record in result.records.iter().take(10) {
        println!(
            "   {} | {} | {}",
            record.identifier.as_deref().unwrap_or("-"),
            record.name,
            record.category.map(|c| c.label()).unwrap_or("-")
        );
    }

    Ok(())
}
