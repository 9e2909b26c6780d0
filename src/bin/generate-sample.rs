use clap::Parser;
use investor_intel::apis::sample::generate_sample_batch;
use investor_intel::config::Config;
use investor_intel::export::write_tabular_file;
use investor_intel::logging;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "generate-sample")]
#[command(about = "Write the fixed sample investor batch to export.sample_path")]
struct Cli {}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();
    Cli::parse();
    let config = Config::load_or_default()?;

    println!("{}", "=".repeat(70));
    println!("🎯 GENERATING SAMPLE INVESTOR DATABASE");
    println!("{}", "=".repeat(70));

    let batch = generate_sample_batch();
    let output = PathBuf::from(&config.export.sample_path);
    write_tabular_file(&batch, &output)?;

    println!("✅ Generated {} sample investor records", batch.len());
    println!("\n📊 Breakdown by type:");
    let mut by_category: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &batch {
        let label = record.category.map(|c| c.label()).unwrap_or("-");
        *by_category.entry(label).or_insert(0) += 1;
    }
    for (category, count) in by_category {
        println!("  {category}: {count}");
    }
    println!("\n💾 Saved to: {}", output.display());

    println!("\n📋 SAMPLE RECORDS");
    for (i, record) in batch.iter().take(5).enumerate() {
        println!("\n{}. {}", i + 1, record.name);
        println!("   AUM: {}", record.aum_estimate.as_deref().unwrap_or("-"));
        println!("   Focus: {}", record.investment_focus.as_deref().unwrap_or("-"));
        println!("   Sectors: {}", record.sectors.as_deref().unwrap_or("-"));
        if let Some(notable) = &record.notable_investments {
            println!("   Notable: {notable}");
        }
    }
    Ok(())
}
