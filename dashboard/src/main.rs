use anyhow::Context;
use clap::Parser;
use generator::profile::{build_example_catalog, GeneratorConfig};
use gui_bridge::bridge::GuiBridge;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::DashboardConfig;
use workflow::runner::{DashboardReport, Runner};

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Reading-history dashboard driver")]
struct Args {
    /// Catalog export (CSV) to analyse
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Analyse a generated example catalog instead of a file
    #[arg(long, default_value_t = false)]
    example: bool,
    /// Seed for the generated example catalog
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Year to scope the side-by-side panels to (defaults to the latest year)
    #[arg(long)]
    year: Option<i32>,
    /// Load a dashboard config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the full report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
    /// Keep the HTTP bridge alive for uploads from the presentation layer
    #[arg(long, default_value_t = false)]
    serve: bool,
    /// Address for the HTTP bridge (overrides the config)
    #[arg(long)]
    bind: Option<SocketAddr>,
}

fn print_report(report: &DashboardReport) {
    let summary = &report.summary;
    println!(
        "Catalog -> rows {}, rated {}, read {}, unread {}, authors {}, pages {}",
        summary.rows,
        summary.rated,
        summary.read,
        summary.unread,
        summary.distinct_authors,
        summary.total_pages
    );
    if let Some(range) = report.year_range {
        println!("Years added {}..={}, showing {:?}", range.min, range.max, report.year);
    }
    for panel in &report.panels {
        print!("  {:<40} {:>5} points", panel.all_time.title, panel.all_time.len());
        match &panel.scoped {
            Some(scoped) => println!(" | {:<48} {:>5} points", scoped.title, scoped.len()),
            None => println!(),
        }
    }
    if !report.warnings.is_empty() {
        println!("{} cells could not be parsed and were left empty", report.warnings.len());
    }
    if !report.missing_columns.is_empty() {
        println!("Missing columns: {}", report.missing_columns.join(", "));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = &args.config {
        DashboardConfig::load(path)?
    } else {
        DashboardConfig::default()
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let runner = Runner::new(config);
    let gui_bridge = GuiBridge::new(Arc::new(runner.clone()));

    let table = if let Some(path) = &args.catalog {
        Some(runner.load_path(path)?)
    } else if args.example {
        let generator = GeneratorConfig {
            seed: args.seed,
            ..Default::default()
        };
        let contents = build_example_catalog(&generator).context("generating example catalog")?;
        Some(runner.load_str(&contents)?)
    } else {
        None
    };

    match table {
        Some(table) => {
            let report = runner.execute(&table, args.year);
            print_report(&report);
            gui_bridge.publish("Catalog results ready.", &report);

            if let Some(report_path) = &args.report {
                if let Some(parent) = report_path.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("creating {}", parent.display()))?;
                }
                let json = serde_json::to_string_pretty(&report).context("serializing report")?;
                fs::write(report_path, json)
                    .with_context(|| format!("writing report {}", report_path.display()))?;
            }
        }
        None if !args.serve => {
            anyhow::bail!("nothing to do: pass --catalog, --example or --serve");
        }
        None => {}
    }

    if args.serve {
        let addr = gui_bridge.serve(runner.config().bind)?;
        gui_bridge.publish_status(&format!(
            "HTTP bridge running on http://{} (Ctrl+C to stop)...",
            addr
        ));
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
