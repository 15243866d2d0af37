use clap::Subcommand;
use glucoplan::config::Config;
use glucoplan_mealplan::SwapOutcome;
use glucoplan_shared::mealplan::Slot;
use glucoplan_shared::user::Profile;
use time::Date;

use super::{print_day, print_json};

#[derive(Subcommand)]
pub enum PlanCommand {
    /// Print the stored plan from yesterday on
    Show,
    /// Roll the plan forward to cover the current window
    Sync,
    /// Throw the plan away and generate a new one from today
    Regenerate,
    /// Delete the plan and its tracking
    Reset,
    /// Replace one meal of a planned day
    Swap {
        /// Day to change (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,

        #[arg(long)]
        slot: Slot,

        /// Dish ids that must not be proposed
        #[arg(long = "avoid")]
        avoid: Vec<String>,
    },
}

pub(crate) fn parse_date(value: &str) -> Result<Date, glucoplan_shared::Error> {
    glucoplan_shared::parse_day(value)
}

pub async fn run(
    config: Config,
    user_id: String,
    profile: Profile,
    command: PlanCommand,
    json: bool,
) -> anyhow::Result<()> {
    let service = glucoplan::plan_service(&config).await?;
    let today = glucoplan_mealplan::today(&config.planner.timezone);

    match command {
        PlanCommand::Show => {
            let view = service.show(&user_id, today).await?;
            if view.days.is_empty() {
                tracing::warn!("no plan stored for {user_id}, run `plan sync` first");
            }

            if json {
                print_json(&view.days)?;
            } else {
                view.days.iter().for_each(print_day);
            }
        }
        PlanCommand::Sync => {
            let view = service.boot(&user_id, &profile, today).await?;
            tracing::info!(days = view.days.len(), "plan synced for {user_id}");

            if json {
                print_json(&view.days)?;
            } else {
                view.days.iter().for_each(print_day);
            }
        }
        PlanCommand::Regenerate => {
            let days = service.regenerate(&user_id, &profile, today).await?;

            if json {
                print_json(&days)?;
            } else {
                days.iter().for_each(print_day);
            }
        }
        PlanCommand::Reset => {
            service.reset(&user_id).await?;
            tracing::info!("plan of {user_id} deleted");
        }
        PlanCommand::Swap { date, slot, avoid } => {
            let date = date.unwrap_or(today);
            match service.swap(&user_id, &profile, date, slot, &avoid).await? {
                SwapOutcome::Unchanged => {
                    tracing::warn!("no alternative left for {slot} on {date}");
                }
                SwapOutcome::Swapped(day) if json => print_json(&day)?,
                SwapOutcome::Swapped(day) => print_day(&day),
            }
        }
    }

    Ok(())
}
