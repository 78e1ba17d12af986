pub mod record;
pub mod summary;

pub use record::Record;
pub use summary::{ActivityTotal, DailyTotal, DashboardData, HoursPivot};
