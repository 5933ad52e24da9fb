pub mod cache;
pub mod standings;

pub use standings::{Clock, FixedClock, InMemoryDirectory, LadderDirectory, StandingsService, SystemClock};
