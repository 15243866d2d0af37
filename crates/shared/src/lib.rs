mod command;
mod date;
pub mod mealplan;
pub mod user;

pub use command::*;
pub use date::*;
