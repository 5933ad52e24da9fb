//! Prize pool funding and payout estimates.

pub mod period;
pub mod pool;

pub use period::PeriodWindow;
pub use pool::{PayoutRow, PrizePoolCalculator, PrizePoolPeriod, PrizePoolSummary};
