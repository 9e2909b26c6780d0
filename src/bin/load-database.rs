use clap::Parser;
use investor_intel::config::Config;
use investor_intel::export::read_input_file;
use investor_intel::logging;
use investor_intel::storage::{InvestorQuery, Store};
use investor_intel::types::Category;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "load-database")]
#[command(about = "Load an investor CSV into the local SQLite store and print statistics")]
struct Cli {
    /// CSV to load (defaults to export.sample_path)
    csv: Option<PathBuf>,
}

const USAGE: &str = "Usage: load-database [CSV_FILE]";

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging();
    let cli = Cli::parse();
    let config = Config::load_or_default()?;

    let csv_path = cli
        .csv
        .unwrap_or_else(|| PathBuf::from(&config.export.sample_path));
    let records = match read_input_file(&csv_path, USAGE) {
        Ok(records) => records,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };

    println!("{}", "=".repeat(70));
    println!("🗄️  INVESTOR INTELLIGENCE DATABASE");
    println!("{}", "=".repeat(70));

    let db_path = PathBuf::from(&config.store.db_path);
    let mut store = Store::open(&db_path, config.store.load_policy)?;
    let loaded = store.load(&records)?;
    println!("✅ Loaded {} investors from {}", loaded, csv_path.display());

    let stats = store.aggregate_stats()?;
    println!("\n📊 DATABASE STATISTICS");
    println!("{}", "-".repeat(70));
    println!("Total Investors: {}", stats.total);
    println!("\nBy Type:");
    for (category, count) in &stats.by_category {
        println!("  {category}: {count}");
    }
    println!("\nTop States:");
    for (state, count) in &stats.top_states {
        println!("  {state}: {count}");
    }
    println!("\nSpecialty Focus:");
    println!("  AI/ML Investors: {}", stats.ai_count);
    println!("  Music Tech Investors: {}", stats.music_count);
    println!("  Fintech Investors: {}", stats.fintech_count);

    println!("\n{}", "=".repeat(70));
    println!("🔍 EXAMPLE QUERIES");
    println!("{}", "=".repeat(70));

    println!("\n1️⃣  Family Offices:");
    for fo in store.family_offices()?.iter().take(3) {
        println!("• {}", fo.name);
        println!("  AUM: {}", fo.aum_estimate.as_deref().unwrap_or("-"));
        println!("  Focus: {}", fo.investment_focus.as_deref().unwrap_or("-"));
    }

    println!("\n2️⃣  AI/ML Focused Investors:");
    for investor in store.ai_investors()?.iter().take(3) {
        println!(
            "• {} ({})",
            investor.name,
            investor.category.map(|c| c.label()).unwrap_or("-")
        );
        println!("  Sectors: {}", investor.sectors.as_deref().unwrap_or("-"));
    }

    println!("\n3️⃣  California VCs:");
    let ca_vcs = store.query(
        &InvestorQuery::new()
            .category(Category::VentureCapital.label())
            .state("CA")
            .limit(3),
    )?;
    for vc in &ca_vcs {
        println!("• {}", vc.name);
        println!(
            "  Location: {}, {}",
            vc.city.as_deref().unwrap_or("-"),
            vc.state.as_deref().unwrap_or("-")
        );
        let notable: String = vc
            .notable_investments
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(100)
            .collect();
        println!("  Notable: {notable}");
    }

    store.close()?;
    println!("\n💾 Database saved to: {}", db_path.display());
    Ok(())
}
