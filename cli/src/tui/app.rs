use std::collections::BTreeSet;

use chrono::NaiveDate;
use ratatui::widgets::ListState;
use routinely_core::{
    build_dashboard, distinct_dates, CsvRoutineRepository, DashboardData, RoutineRepository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Summary,
    ActivityShare,
    Trend,
    DailyTotals,
    Imbalance,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Summary,
        View::ActivityShare,
        View::Trend,
        View::DailyTotals,
        View::Imbalance,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Summary => "Summary",
            View::ActivityShare => "By Activity",
            View::Trend => "Trend",
            View::DailyTotals => "Daily Hours",
            View::Imbalance => "Imbalanced",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Summary => 0,
            View::ActivityShare => 1,
            View::Trend => 2,
            View::DailyTotals => 3,
            View::Imbalance => 4,
        }
    }
}

pub struct App {
    repo: CsvRoutineRepository,
    pub date_options: Vec<NaiveDate>,
    pub selected: BTreeSet<NaiveDate>,
    pub dashboard: DashboardData,
    pub raw_rows: Vec<String>,
    pub show_raw: bool,
    pub view: View,
    pub cursor: ListState,
    pub error: Option<String>,
    pub created_notice: bool,
}

impl App {
    pub fn new(repo: CsvRoutineRepository) -> App {
        let created_notice = repo.was_created();
        let mut app = App {
            repo,
            date_options: Vec::new(),
            selected: BTreeSet::new(),
            dashboard: DashboardData::default(),
            raw_rows: Vec::new(),
            show_raw: false,
            view: View::Summary,
            cursor: ListState::default(),
            error: None,
            created_notice,
        };

        // Default selection is every date present in the file.
        if let Ok(records) = app.repo.load() {
            app.selected = distinct_dates(&records).into_iter().collect();
        }
        app.refresh();
        if !app.date_options.is_empty() {
            app.cursor.select(Some(0));
        }
        app
    }

    /// Re-run the whole pipeline from the file. Called after every change
    /// to the selection or the raw toggle; only the user's selection
    /// survives between passes.
    pub fn refresh(&mut self) {
        let records = match self.repo.load() {
            Ok(records) => records,
            Err(err) => return self.fail(err),
        };
        let raw_rows = match self.repo.raw_rows() {
            Ok(rows) => rows,
            Err(err) => return self.fail(err),
        };

        self.date_options = distinct_dates(&records);
        // Drop selections for dates no longer present in the file.
        let options = &self.date_options;
        self.selected.retain(|d| options.contains(d));

        self.dashboard = build_dashboard(&records, &self.selected);
        self.raw_rows = raw_rows;
        self.error = None;

        if self.date_options.is_empty() {
            self.cursor.select(None);
        } else if self
            .cursor
            .selected()
            .is_none_or(|i| i >= self.date_options.len())
        {
            self.cursor.select(Some(self.date_options.len() - 1));
        }
    }

    fn fail(&mut self, err: routinely_core::PipelineError) {
        // Fatal: show only the message, no partial tables or charts.
        self.error = Some(err.to_string());
        self.dashboard = DashboardData::default();
        self.raw_rows.clear();
        self.date_options.clear();
        self.cursor.select(None);
    }

    pub fn next_date(&mut self) {
        if self.date_options.is_empty() {
            return;
        }
        let i = match self.cursor.selected() {
            Some(i) if i >= self.date_options.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.cursor.select(Some(i));
    }

    pub fn previous_date(&mut self) {
        if self.date_options.is_empty() {
            return;
        }
        let i = match self.cursor.selected() {
            Some(0) | None => self.date_options.len() - 1,
            Some(i) => i - 1,
        };
        self.cursor.select(Some(i));
    }

    pub fn toggle_selected_date(&mut self) {
        if let Some(date) = self
            .cursor
            .selected()
            .and_then(|i| self.date_options.get(i).copied())
        {
            if !self.selected.remove(&date) {
                self.selected.insert(date);
            }
            self.refresh();
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.date_options.iter().copied().collect();
        self.refresh();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
        self.refresh();
    }

    pub fn toggle_raw(&mut self) {
        self.show_raw = !self.show_raw;
        self.refresh();
    }

    pub fn next_view(&mut self) {
        let i = (self.view.index() + 1) % View::ALL.len();
        self.view = View::ALL[i];
    }

    pub fn previous_view(&mut self) {
        let i = (self.view.index() + View::ALL.len() - 1) % View::ALL.len();
        self.view = View::ALL[i];
    }

    pub fn set_view_by_digit(&mut self, c: char) {
        if let Some(i) = c.to_digit(10) {
            let i = i as usize;
            if i >= 1 && i <= View::ALL.len() {
                self.view = View::ALL[i - 1];
            }
        }
    }
}
