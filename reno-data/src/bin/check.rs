use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reno_core::{
    Answer, AnswerSet, AreaTag, CostEstimator, PropertySize, PropertyType, RenovationType, Style,
};
use reno_data::PricingTableLoader;

/// Validate a pricing table CSV file and print its rates.
///
/// The CSV file should have the following columns:
/// - table: property_type, property_size, room, renovation_type or style
/// - key: the option key (e.g. condo, medium, kitchen, full, modern)
/// - amount: base cost for sizes, flat cost for rooms (empty otherwise)
/// - multiplier: factor for every table except room (empty for rooms)
///
/// Pass all five answers to also price a sample job against the table.
#[derive(Parser, Debug)]
#[command(name = "pricing-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing the pricing table
    #[arg(short, long)]
    file: PathBuf,

    /// Sample property type (e.g. condo, semi-d)
    #[arg(long)]
    property_type: Option<PropertyType>,

    /// Sample property size (small, medium, large, xlarge, xxlarge)
    #[arg(long)]
    size: Option<PropertySize>,

    /// Sample areas, comma separated (e.g. living,kitchen or all)
    #[arg(long, value_delimiter = ',')]
    areas: Vec<AreaTag>,

    /// Sample renovation type (furniture, partial, full)
    #[arg(long)]
    renovation: Option<RenovationType>,

    /// Sample style (e.g. modern, classic)
    #[arg(long)]
    style: Option<Style>,
}

impl Args {
    fn sample_answers(&self) -> Option<AnswerSet> {
        let any_given = self.property_type.is_some()
            || self.size.is_some()
            || !self.areas.is_empty()
            || self.renovation.is_some()
            || self.style.is_some();
        if !any_given {
            return None;
        }

        let mut answers = AnswerSet::new();
        if let Some(property_type) = self.property_type {
            answers.set(Answer::PropertyType(property_type));
        }
        if let Some(size) = self.size {
            answers.set(Answer::PropertySize(size));
        }
        for tag in &self.areas {
            answers.select_area(*tag);
        }
        if let Some(renovation) = self.renovation {
            answers.set(Answer::RenovationType(renovation));
        }
        if let Some(style) = self.style {
            answers.set(Answer::Style(style));
        }
        Some(answers)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Loading pricing table from: {}", args.file.display());

    let table = PricingTableLoader::load_from_path(&args.file)
        .with_context(|| format!("Failed to load pricing table: {}", args.file.display()))?;

    println!("{table}");

    if let Some(answers) = args.sample_answers() {
        let estimate = CostEstimator::new(&table)
            .estimate(&answers)
            .context("Sample estimate needs all five answers")?;

        println!();
        for item in &estimate.breakdown {
            println!("{:<16} {}", item.label, item.value);
        }
        println!("Estimate: RM {} - RM {}", estimate.min, estimate.max);
    }

    Ok(())
}
