pub mod catalog;
pub mod plan;
pub mod track;

use glucoplan_shared::mealplan::Day;

/// Prints `value` as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

pub fn print_day(day: &Day) {
    let compensated = if day.lunch_has_carbs {
        " (low-carb dinner)"
    } else {
        ""
    };
    println!("{} - lunch {}{compensated}", day.date, day.pattern);

    for (slot, meal) in day.meals.iter() {
        let medication = if meal.medication_linked {
            " + medication"
        } else {
            ""
        };
        println!(
            "  {:<16} {} [{}]{medication}",
            slot.as_ref(),
            meal.name,
            meal.id
        );
    }
}
