use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod models;
mod report;
mod series;
mod snapshot;
mod source;

#[derive(Parser)]
#[command(name = "wellness-monitor")]
#[command(about = "Team wellness monitoring views over a tabular export", long_about = None)]
struct Cli {
    /// Path to the wellness CSV export
    #[arg(long, default_value = "wellness.csv")]
    csv: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable report dates
    Dates,
    /// List the players present in the source
    Players,
    /// Team comparison table for one date
    Snapshot {
        /// Date in YYYY-MM-DD form, one of the selectable dates
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        json: bool,
    },
    /// One player's trend, last-7 overview and averages
    Player {
        #[arg(long)]
        name: String,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dataset = source::load_csv(&cli.csv)
        .with_context(|| format!("failed to load wellness data from {}", cli.csv.display()))?;

    match cli.command {
        Commands::Dates => {
            print!(
                "{}",
                report::render_dates(&snapshot::selectable_dates(&dataset))
            );
        }
        Commands::Players => {
            print!("{}", report::render_players(&dataset.players()));
        }
        Commands::Snapshot { date, json } => {
            let snap = snapshot::snapshot(&dataset, date);
            if json {
                println!("{}", serde_json::to_string_pretty(&snap)?);
            } else {
                print!("{}", report::render_snapshot(&snap));
                if snap.rows.len() == 1 {
                    print!(
                        "{}",
                        report::render_dates(&snapshot::selectable_dates(&dataset))
                    );
                }
            }
        }
        Commands::Player { name, json } => {
            let series = series::history(&dataset, &name);
            let mut rng = rand::thread_rng();
            let points = series::plot_points(&series, &mut rng);
            let window = series::window(&series);
            let averages = series::average(&series);

            if json {
                #[derive(serde::Serialize)]
                struct PlayerView<'a> {
                    series: &'a models::PlayerSeries,
                    points: &'a [models::PlotPoint],
                    window: &'a models::TrailingWindow,
                    averages: &'a models::MetricValues,
                }

                let view = PlayerView {
                    series: &series,
                    points: &points,
                    window: &window,
                    averages: &averages,
                };
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!(
                    "{}",
                    report::render_history(&series, &points, &window, &averages)
                );
            }
        }
    }

    Ok(())
}
