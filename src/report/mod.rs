//! Pure aggregation over the expense list. Every computation takes "today"
//! as an explicit argument; nothing in here reads the clock or mutates.

pub mod summary;
pub mod trend;
pub mod week;

pub use summary::{CategoryTotal, DayTotal, WeeklySummary};
pub use trend::{trend_series, TrendPoint, TREND_DAYS};
pub use week::WeekWindow;
