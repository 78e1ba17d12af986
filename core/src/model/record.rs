use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged activity entry, as read from the CSV.
///
/// `date` is `None` when the raw value failed to parse; such rows stay in
/// the table but are excluded from every date-keyed view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Record {
    pub date: Option<NaiveDate>,
    pub activity: String,
    pub hours_spent: f64,
}

impl Record {
    pub fn new(date: Option<NaiveDate>, activity: impl Into<String>, hours_spent: f64) -> Self {
        Self {
            date,
            activity: activity.into(),
            hours_spent,
        }
    }
}
