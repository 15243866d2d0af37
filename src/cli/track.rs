use clap::Subcommand;
use glucoplan::config::Config;
use glucoplan_shared::mealplan::Slot;
use time::Date;

use super::plan::parse_date;
use super::print_json;

#[derive(Subcommand)]
pub enum TrackCommand {
    /// Mark a meal as eaten, or unmark it
    Meal {
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,

        #[arg(long)]
        slot: Slot,
    },
    /// Mark the medication of breakfast or dinner as taken, or unmark it
    Medication {
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,

        #[arg(long)]
        slot: Slot,
    },
}

pub async fn run(
    config: Config,
    user_id: String,
    command: TrackCommand,
    json: bool,
) -> anyhow::Result<()> {
    let service = glucoplan::plan_service(&config).await?;
    let today = glucoplan_mealplan::today(&config.planner.timezone);

    let (date, record) = match command {
        TrackCommand::Meal { date, slot } => {
            let date = date.unwrap_or(today);
            (date, service.toggle_meal(&user_id, date, slot).await?)
        }
        TrackCommand::Medication { date, slot } => {
            let date = date.unwrap_or(today);
            (date, service.toggle_medication(&user_id, date, slot).await?)
        }
    };

    if json {
        return print_json(&record);
    }

    let completed: Vec<&str> = record.completed.iter().map(AsRef::as_ref).collect();
    let medication: Vec<&str> = record.medication_taken.iter().map(AsRef::as_ref).collect();
    println!("{date}");
    println!("  eaten:      {}", completed.join(", "));
    println!("  medication: {}", medication.join(", "));

    Ok(())
}
