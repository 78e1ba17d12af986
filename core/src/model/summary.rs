use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date-by-activity matrix of summed hours.
///
/// Rows follow `dates` (ascending), columns follow `activities`
/// (first-appearance order over the filtered rows), and combinations with
/// no logged entry hold 0.0. The same shape backs both the summary table
/// and the trend view, which consumes the rows as an ordered series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct HoursPivot {
    pub dates: Vec<NaiveDate>,
    pub activities: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl HoursPivot {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Sum over every cell. Equals the total hours of the filtered rows
    /// that carry a valid date.
    pub fn total_hours(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActivityTotal {
    pub activity: String,
    pub hours: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Everything one render pass derives from the table and the current
/// date selection. Recomputed from scratch on every interaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub pivot: HoursPivot,
    pub activity_totals: Vec<ActivityTotal>,
    pub time_series: HoursPivot,
    pub daily_totals: Vec<DailyTotal>,
    /// Dates whose hours do not sum to exactly 24, ascending.
    pub imbalanced: Vec<DailyTotal>,
}
