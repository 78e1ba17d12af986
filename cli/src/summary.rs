use routinely_core::DashboardData;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Print the pivot table and the imbalanced-day list.
///
/// The pivot has one column per activity, so the table is assembled with
/// the builder instead of a derived row struct. Hours are shown with one
/// decimal; the underlying values keep full precision.
pub fn print_summary(data: &DashboardData) {
    if data.pivot.is_empty() {
        println!("No rows match the selected dates.");
    } else {
        let mut builder = Builder::default();

        let mut header = vec!["Date".to_string()];
        header.extend(data.pivot.activities.iter().cloned());
        builder.push_record(header);

        for (i, date) in data.pivot.dates.iter().enumerate() {
            let mut row = vec![date.format("%Y-%m-%d").to_string()];
            row.extend(data.pivot.cells[i].iter().map(|h| format!("{:.1}", h)));
            builder.push_record(row);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        println!("{}", table);
    }

    println!();
    if data.imbalanced.is_empty() {
        println!("Every selected day sums to 24 hours.");
    } else {
        println!("Days with <24 or >24 hours logged:");
        let mut builder = Builder::default();
        builder.push_record(["Date", "Total (h)"]);
        for day in &data.imbalanced {
            builder.push_record([
                day.date.format("%Y-%m-%d").to_string(),
                format!("{:.1}", day.hours),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        println!("{}", table);
    }
}
