//! Listing definitions for each console tab.

use crate::records::{money, ActivityEntry, AttendanceRecord, Employee, PayrollRecord};
use crate::seed;
use roster::listing::{ListingConfig, MemorySource, PageFetcher, QueryParams, RemoteSource};
use roster::ratatui::layout::Constraint;
use roster::ratatui::style::{Color, Style};
use roster::ratatui::text::Span;
use roster::widgets::{Column, FilterOption, FilterSelect, Listing};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Employees,
    Activity,
    Attendance,
    Payroll,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Employees, Tab::Activity, Tab::Attendance, Tab::Payroll];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Employees => "Employees",
            Tab::Activity => "Activity Log",
            Tab::Attendance => "Attendance",
            Tab::Payroll => "Payroll",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Employees => 0,
            Tab::Activity => 1,
            Tab::Attendance => 2,
            Tab::Payroll => 3,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

fn options(values: &[&str]) -> Vec<FilterOption> {
    values.iter().copied().map(FilterOption::from).collect()
}

fn status_style(status: &str) -> Style {
    match status {
        "Active" | "Present" | "Paid" => Style::default().fg(Color::Green),
        "Absent" => Style::default().fg(Color::Red),
        "On leave" | "Leave" | "Late" | "Pending" | "Probation" => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    }
}

fn status_column<T: 'static>(status: impl Fn(&T) -> &str + Send + Sync + 'static) -> Column<T> {
    Column::new("Status", move |row: &T| {
        let value = status(row);
        Span::styled(value.to_owned(), status_style(value))
    })
}

pub fn employees(staff: Vec<Employee>, config: &ListingConfig) -> Listing<Employee> {
    let source = MemorySource::new(staff)
        .search_field(|e: &Employee| e.name.clone())
        .search_field(|e: &Employee| e.department.clone())
        .filter_field("department", |e: &Employee| e.department.clone())
        .filter_field("status", |e: &Employee| e.status.clone());
    Listing::new(
        Tab::Employees.title(),
        source,
        vec![
            Column::text("ID", |e: &Employee| e.id.to_string()).with_width(Constraint::Length(6)),
            Column::text("Name", |e: &Employee| e.name.clone()),
            Column::text("Department", |e: &Employee| e.department.clone()),
            Column::text("Role", |e: &Employee| e.role.clone()),
            status_column(|e: &Employee| e.status.as_str()),
        ],
        config,
    )
    .with_filter(FilterSelect::controlled("department", "Department", options(seed::DEPARTMENTS)))
    .with_filter(FilterSelect::controlled("status", "Status", options(seed::EMPLOYMENT_STATUSES)))
    .with_empty_text("No employees match")
}

pub fn activity(entries: Vec<ActivityEntry>, config: &ListingConfig) -> Listing<ActivityEntry> {
    let source = MemorySource::new(entries)
        .search_field(|a: &ActivityEntry| a.actor.clone())
        .search_field(|a: &ActivityEntry| a.target.clone())
        .filter_field("action", |a: &ActivityEntry| a.action.clone());
    Listing::new(
        Tab::Activity.title(),
        source,
        vec![
            Column::text("When", |a: &ActivityEntry| a.at.clone()),
            Column::text("Actor", |a: &ActivityEntry| a.actor.clone()),
            Column::text("Action", |a: &ActivityEntry| a.action.clone()),
            Column::text("Target", |a: &ActivityEntry| a.target.clone()),
        ],
        config,
    )
    .with_filter(FilterSelect::standalone("action", "Action", options(seed::ACTIONS)))
    .with_empty_text("No activity recorded")
}

pub fn attendance(
    fetcher: Arc<dyn PageFetcher<AttendanceRecord>>,
    config: &ListingConfig,
) -> Listing<AttendanceRecord> {
    let time = |value: &Option<String>| value.clone().unwrap_or_else(|| "—".to_owned());
    Listing::new(
        Tab::Attendance.title(),
        RemoteSource::new(fetcher, "attendance"),
        vec![
            Column::text("Employee", |r: &AttendanceRecord| r.employee.clone()),
            Column::text("Date", |r: &AttendanceRecord| r.date.clone()),
            status_column(|r: &AttendanceRecord| r.status.as_str()),
            Column::text("Check-in", move |r: &AttendanceRecord| time(&r.check_in)),
            Column::text("Check-out", move |r: &AttendanceRecord| time(&r.check_out)),
        ],
        config,
    )
    .with_filter(FilterSelect::controlled(
        "status",
        "Status",
        options(&["Present", "Absent", "Leave", "Late"]),
    ))
    .with_empty_text("No attendance records")
}

pub fn payroll(
    fetcher: Arc<dyn PageFetcher<PayrollRecord>>,
    config: &ListingConfig,
) -> Listing<PayrollRecord> {
    let params = QueryParams::default().filter("status", "paymentStatus");
    Listing::new(
        Tab::Payroll.title(),
        RemoteSource::new(fetcher, "payroll").with_params(params),
        vec![
            Column::text("Employee", |r: &PayrollRecord| r.employee.clone()),
            Column::text("Period", |r: &PayrollRecord| r.period.clone()),
            Column::text("Gross", |r: &PayrollRecord| money(r.gross)),
            Column::text("Net", |r: &PayrollRecord| money(r.net)).with_header_fn(
                |rows: &[PayrollRecord]| {
                    format!("Net (page {})", money(rows.iter().map(|r| r.net).sum()))
                },
            ),
            status_column(|r: &PayrollRecord| r.status.as_str()),
        ],
        config,
    )
    .with_filter(FilterSelect::controlled(
        "status",
        "Status",
        options(&["Paid", "Pending", "Processing"]),
    ))
    .with_empty_text("No payroll runs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_wrap_both_ways() {
        assert_eq!(Tab::Payroll.next(), Tab::Employees);
        assert_eq!(Tab::Employees.previous(), Tab::Payroll);
        for tab in Tab::ALL {
            assert_eq!(Tab::ALL[tab.index()], tab);
        }
    }

    #[test]
    fn employee_search_covers_department() {
        let mut listing = employees(seed::employees(), &ListingConfig::default());
        let _ = listing.mount();
        let _ = listing.set_search("human res");
        assert!(!listing.items().is_empty());
        assert!(listing.items().iter().all(|e| e.department == "Human Resources"));
    }

    #[test]
    fn activity_action_filter_is_standalone() {
        let listing = activity(seed::activity(), &ListingConfig::default());
        let select = &listing.filter_bar().selects()[0];
        assert_eq!(select.mode(), roster::widgets::SelectMode::Standalone);
    }
}
