//! fitsplit - personalized weekly workout plan generator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fitsplit::catalog::Catalog;
use fitsplit::engine::Planner;
use fitsplit::profile::{Gender, UserProfile};

#[derive(Parser)]
#[command(name = "fitsplit")]
#[command(author, version, about = "Personalized weekly workout plan generator")]
struct Cli {
    /// Path to the exercise catalog CSV
    #[arg(short, long, env = "FITSPLIT_CATALOG", default_value = "data/exercises.csv")]
    catalog: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a weekly workout plan
    Plan {
        /// Gender (drives the 5-day focus-day candidates)
        #[arg(short, long, value_enum, default_value = "unknown")]
        gender: Gender,

        /// Height in centimeters
        #[arg(long)]
        height: f64,

        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Training days per week (1-5)
        #[arg(short, long, default_value = "3")]
        days: u8,

        /// Injured muscle or body part (repeatable)
        #[arg(short, long = "injury")]
        injuries: Vec<String>,

        /// Preferred body part (repeatable)
        #[arg(short, long = "prefer")]
        preferred: Vec<String>,

        /// Preferred equipment (repeatable)
        #[arg(short, long = "equipment")]
        equipment: Vec<String>,

        /// Seed for reproducible plans
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show catalog statistics
    Catalog,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::load_csv(&cli.catalog)
        .with_context(|| format!("cannot load exercise catalog from {}", cli.catalog))?;

    match cli.command {
        Commands::Plan {
            gender,
            height,
            weight,
            days,
            injuries,
            preferred,
            equipment,
            seed,
            json,
        } => {
            let profile =
                UserProfile::new(gender, height, weight, injuries, days, preferred, equipment)?;
            let planner = Planner::new(catalog);
            let plan = planner.build_week_plan(&profile, seed)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                return Ok(());
            }

            println!("BMI: {} ({})", plan.bmi, plan.bmi_category);
            println!("Split: {}", plan.split_type);
            println!("{:-<60}", "");
            for day in &plan.days {
                println!("Day {} - {}", day.day, day.focus);
                for ex in &day.exercises {
                    println!(
                        "  {:30} | {:12} | {}",
                        ex.name,
                        ex.body_part,
                        ex.equipment.join(", ")
                    );
                }
                println!();
            }
        }

        Commands::Catalog => {
            println!("Exercises: {}", catalog.len());
            println!("{:-<30}", "");
            for (part, count) in catalog.body_part_counts() {
                println!("{:12} {:4}", part.label(), count);
            }
        }
    }

    Ok(())
}
