pub mod error;
pub mod model;
pub mod repository;
pub mod service;

pub use error::PipelineError;
pub use model::record::Record;
pub use model::summary::{ActivityTotal, DailyTotal, DashboardData, HoursPivot};
pub use repository::{CsvRoutineRepository, RoutineRepository};
pub use service::dashboard::{build_dashboard, distinct_dates, filter_by_dates};
