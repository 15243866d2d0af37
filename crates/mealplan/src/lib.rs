mod catalog;
mod filter;
mod history;
mod scheduler;
mod selection;
mod store;
mod swap;
mod synthesizer;

pub use catalog::*;
pub use filter::*;
pub use history::*;
pub use scheduler::*;
pub use selection::*;
pub use store::*;
pub use swap::*;
pub use synthesizer::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod service;
        mod sqlite;

        pub use service::*;
        pub use sqlite::*;
    }
}
