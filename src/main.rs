use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod chart;
mod log;
mod model;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "gc-histo-viz")]
#[command(about = "GC class-histogram and heap-occupancy visualizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the heap series file and per-class memory report for one
    /// server/pid pair.
    Report {
        /// Server name (selects the per-server log directory).
        server: String,

        /// Process id the logs were captured from.
        pid: String,

        /// Base directory holding the per-server log directories.
        #[arg(long, default_value = "./histo")]
        base: String,

        /// Also write the flattened per-class series as JSON.
        #[arg(long)]
        series_json: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Report {
            server,
            pid,
            base,
            series_json,
        } => {
            let dir = PathBuf::from(&base).join(&server);
            fs::create_dir_all(&dir)
                .with_context(|| format!("create output directory {}", dir.display()))?;

            // 1) Heap path: parse the occupancy log, write the tab-separated series.
            let heap_in = dir.join(format!("my-heap-{}.log", pid));
            let heap_out = dir.join(format!("heap-{}.log", pid));

            let heaps = log::parse_heap_file(&heap_in)?;
            match (heaps.first(), heaps.last()) {
                (Some(first), Some(last)) => println!(
                    "{} heap samples read, ranging from {} to {}",
                    heaps.len(),
                    first.time,
                    last.time
                ),
                _ => println!("0 heap samples read"),
            }

            let file = fs::File::create(&heap_out)
                .with_context(|| format!("create heap series file {}", heap_out.display()))?;
            let mut writer = BufWriter::new(file);
            render::write_heap_series(&mut writer, &heaps)?;
            writer
                .flush()
                .with_context(|| format!("flush heap series file {}", heap_out.display()))?;
            println!("Wrote {}", heap_out.display());

            // 2) Histogram path: parse, flatten, render the chart report.
            let histo_in = dir.join(format!("my-histo-{}.log", pid));
            let histo_out = dir.join(format!("histo-{}.html", pid));

            let histograms = log::parse_histogram_file(&histo_in)?;
            println!("{} histograms read", histograms.len());

            let series = model::flatten(&histograms);

            let title = format!("memory usage of {}-{}", server, pid);
            let chart = chart::SvgChart::default();
            let (html, stats) = render::render_histogram_report(&series, &title, &chart);
            fs::write(&histo_out, html)
                .with_context(|| format!("write report {}", histo_out.display()))?;
            println!(
                "dropped {} of total {}",
                stats.filtered,
                stats.rendered + stats.filtered
            );
            println!("Wrote {}", histo_out.display());

            if let Some(path) = series_json {
                let json = serde_json::to_string_pretty(&series)?;
                fs::write(&path, json).with_context(|| format!("write series JSON {}", path))?;
                println!("Wrote {}", path);
            }
        }
    }

    Ok(())
}
