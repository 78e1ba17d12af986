use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::model::record::Record;
use crate::model::summary::{ActivityTotal, DailyTotal, DashboardData, HoursPivot};

/// All distinct parseable dates in the table, ascending. These are the
/// options for the date multi-select; the default selection is all of them.
pub fn distinct_dates(records: &[Record]) -> Vec<NaiveDate> {
    let dates: BTreeSet<NaiveDate> = records.iter().filter_map(|r| r.date).collect();
    dates.into_iter().collect()
}

/// Rows whose date parsed and is in the selection, original order kept.
/// An empty selection yields an empty table; every aggregate downstream
/// handles that by producing empty output.
pub fn filter_by_dates(records: &[Record], selection: &BTreeSet<NaiveDate>) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.date.is_some_and(|d| selection.contains(&d)))
        .cloned()
        .collect()
}

/// Run the whole pipeline for one render pass: filter, the four
/// group-and-sum reductions, and imbalance detection.
pub fn build_dashboard(records: &[Record], selection: &BTreeSet<NaiveDate>) -> DashboardData {
    let filtered = filter_by_dates(records, selection);

    let pivot = pivot_hours(&filtered);
    let activity_totals = activity_totals(&filtered);
    // Same reduction and shape as the pivot, consumed as an ordered series
    // by the trend view.
    let time_series = pivot_hours(&filtered);
    let daily_totals = daily_totals(&filtered);
    let imbalanced = imbalanced_days(&daily_totals);

    DashboardData {
        pivot,
        activity_totals,
        time_series,
        daily_totals,
        imbalanced,
    }
}

/// Group by (date, activity) and sum hours, reshaped into a date-by-activity
/// matrix. Dates ascending, activities in first-appearance order, gaps 0.0.
pub fn pivot_hours(filtered: &[Record]) -> HoursPivot {
    let mut activities: Vec<String> = Vec::new();
    for record in filtered {
        if record.date.is_none() {
            continue;
        }
        if !activities.contains(&record.activity) {
            activities.push(record.activity.clone());
        }
    }

    let dates: Vec<NaiveDate> = distinct_dates(filtered);

    let date_index: HashMap<NaiveDate, usize> =
        dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();
    let activity_index: HashMap<&str, usize> = activities
        .iter()
        .enumerate()
        .map(|(i, a)| (a.as_str(), i))
        .collect();

    let mut cells = vec![vec![0.0; activities.len()]; dates.len()];
    for record in filtered {
        let Some(date) = record.date else { continue };
        if let (Some(&row), Some(&col)) = (
            date_index.get(&date),
            activity_index.get(record.activity.as_str()),
        ) {
            cells[row][col] += record.hours_spent;
        }
    }

    HoursPivot {
        dates,
        activities,
        cells,
    }
}

/// Group by activity only and sum hours over the full filtered range.
/// Feeds the share/pie view; empty input gives an empty list.
pub fn activity_totals(filtered: &[Record]) -> Vec<ActivityTotal> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();

    for record in filtered {
        if !sums.contains_key(&record.activity) {
            order.push(record.activity.clone());
        }
        *sums.entry(record.activity.clone()).or_insert(0.0) += record.hours_spent;
    }

    order
        .into_iter()
        .map(|activity| {
            let hours = sums.get(&activity).copied().unwrap_or(0.0);
            ActivityTotal { activity, hours }
        })
        .collect()
}

/// Group by date only and sum hours, ascending by date.
pub fn daily_totals(filtered: &[Record]) -> Vec<DailyTotal> {
    let mut sums: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in filtered {
        let Some(date) = record.date else { continue };
        *sums.entry(date).or_insert(0.0) += record.hours_spent;
    }
    sums.into_iter()
        .map(|(date, hours)| DailyTotal { date, hours })
        .collect()
}

/// Every date whose total is not exactly 24. Exact float equality on
/// purpose: a 23.9999999999 produced by summation is flagged, matching the
/// dashboard's documented behavior. No tolerance band.
pub fn imbalanced_days(daily: &[DailyTotal]) -> Vec<DailyTotal> {
    daily.iter().filter(|d| d.hours != 24.0).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rec(date: Option<NaiveDate>, activity: &str, hours: f64) -> Record {
        Record::new(date, activity, hours)
    }

    fn sample() -> Vec<Record> {
        vec![
            rec(Some(d(2025, 7, 1)), "Sleep", 8.0),
            rec(Some(d(2025, 7, 1)), "Work", 9.0),
            rec(Some(d(2025, 7, 2)), "Sleep", 7.0),
            rec(Some(d(2025, 7, 2)), "Leisure", 3.0),
        ]
    }

    fn all_dates(records: &[Record]) -> BTreeSet<NaiveDate> {
        distinct_dates(records).into_iter().collect()
    }

    #[test]
    fn test_end_to_end_sample() {
        let records = sample();
        let data = build_dashboard(&records, &all_dates(&records));

        assert_eq!(data.pivot.dates, vec![d(2025, 7, 1), d(2025, 7, 2)]);
        assert_eq!(data.pivot.activities, vec!["Sleep", "Work", "Leisure"]);
        assert_eq!(data.pivot.cells[0], vec![8.0, 9.0, 0.0]);
        assert_eq!(data.pivot.cells[1], vec![7.0, 0.0, 3.0]);

        let totals: Vec<(&str, f64)> = data
            .activity_totals
            .iter()
            .map(|t| (t.activity.as_str(), t.hours))
            .collect();
        assert_eq!(totals, vec![("Sleep", 15.0), ("Work", 9.0), ("Leisure", 3.0)]);

        assert_eq!(data.daily_totals.len(), 2);
        assert_eq!(data.daily_totals[0].hours, 17.0);
        assert_eq!(data.daily_totals[1].hours, 10.0);

        // Neither day reaches 24 hours.
        assert_eq!(data.imbalanced.len(), 2);
        assert_eq!(data.imbalanced[0].date, d(2025, 7, 1));
        assert_eq!(data.imbalanced[1].date, d(2025, 7, 2));
    }

    #[test]
    fn test_filter_keeps_only_selected_valid_dates() {
        let mut records = sample();
        records.push(rec(None, "Untracked", 2.0));

        let selection: BTreeSet<NaiveDate> = [d(2025, 7, 1)].into_iter().collect();
        let filtered = filter_by_dates(&records, &selection);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.date == Some(d(2025, 7, 1))));
        // Original order is preserved.
        assert_eq!(filtered[0].activity, "Sleep");
        assert_eq!(filtered[1].activity, "Work");
    }

    #[test]
    fn test_empty_selection_yields_empty_aggregates() {
        let records = sample();
        let data = build_dashboard(&records, &BTreeSet::new());

        assert!(data.pivot.is_empty());
        assert!(data.activity_totals.is_empty());
        assert!(data.time_series.is_empty());
        assert!(data.daily_totals.is_empty());
        assert!(data.imbalanced.is_empty());
    }

    #[test]
    fn test_pivot_conserves_total_hours() {
        let records = sample();
        let selection = all_dates(&records);
        let filtered = filter_by_dates(&records, &selection);
        let pivot = pivot_hours(&filtered);

        let direct: f64 = filtered.iter().map(|r| r.hours_spent).sum();
        assert_eq!(pivot.total_hours(), direct);
    }

    #[test]
    fn test_duplicate_groups_are_summed() {
        let records = vec![
            rec(Some(d(2025, 7, 1)), "Work", 4.0),
            rec(Some(d(2025, 7, 1)), "Work", 5.0),
        ];
        let data = build_dashboard(&records, &all_dates(&records));
        assert_eq!(data.pivot.cells[0], vec![9.0]);
        assert_eq!(data.daily_totals[0].hours, 9.0);
    }

    #[test]
    fn test_imbalance_uses_exact_equality() {
        let records = vec![
            // Exactly 24, never flagged.
            rec(Some(d(2025, 7, 1)), "Sleep", 8.0),
            rec(Some(d(2025, 7, 1)), "Work", 16.0),
            // Sums to 23.9999999999, flagged even though it is a near miss.
            rec(Some(d(2025, 7, 2)), "Sleep", 8.0),
            rec(Some(d(2025, 7, 2)), "Work", 8.0),
            rec(Some(d(2025, 7, 2)), "Leisure", 7.9999999999),
        ];
        let data = build_dashboard(&records, &all_dates(&records));

        assert_eq!(data.imbalanced.len(), 1);
        assert_eq!(data.imbalanced[0].date, d(2025, 7, 2));
        assert!(data.imbalanced[0].hours != 24.0);
    }

    #[test]
    fn test_time_series_matches_pivot_shape() {
        let records = sample();
        let data = build_dashboard(&records, &all_dates(&records));
        assert_eq!(data.time_series, data.pivot);
    }

    #[test]
    fn test_distinct_dates_skips_null_dates() {
        let records = vec![
            rec(None, "Sleep", 8.0),
            rec(Some(d(2025, 7, 2)), "Work", 9.0),
            rec(Some(d(2025, 7, 1)), "Work", 1.0),
        ];
        assert_eq!(distinct_dates(&records), vec![d(2025, 7, 1), d(2025, 7, 2)]);
    }
}
