//! Built-in data for the in-memory tabs.

use crate::records::{ActivityEntry, Employee};

pub const DEPARTMENTS: &[&str] = &["Engineering", "Finance", "Human Resources", "Operations", "Sales"];
pub const EMPLOYMENT_STATUSES: &[&str] = &["Active", "On leave", "Probation"];
pub const ACTIONS: &[&str] = &["Approved leave", "Ran payroll", "Updated record", "Uploaded document"];

const FIRST_NAMES: &[&str] = &[
    "Ali", "Sara", "Omar", "Mona", "Youssef", "Laila", "Karim", "Nour", "Hassan", "Dina", "Tarek",
    "Rania", "Sami",
];
const LAST_NAMES: &[&str] = &["Hassan", "Lee", "Farouk", "Said", "Nasser", "Khalil", "Haddad"];
const ROLES: &[&str] = &["Analyst", "Engineer", "Manager", "Specialist", "Coordinator"];

/// 91 employees: every first and last name pairing.
pub fn employees() -> Vec<Employee> {
    let mut staff = Vec::with_capacity(FIRST_NAMES.len() * LAST_NAMES.len());
    for (i, first) in FIRST_NAMES.iter().enumerate() {
        for (j, last) in LAST_NAMES.iter().enumerate() {
            let n = i * LAST_NAMES.len() + j;
            let status = if n % 11 == 5 {
                EMPLOYMENT_STATUSES[2]
            } else if n % 7 == 3 {
                EMPLOYMENT_STATUSES[1]
            } else {
                EMPLOYMENT_STATUSES[0]
            };
            staff.push(Employee {
                id: 1001 + u32::try_from(n).unwrap_or(0),
                name: format!("{first} {last}"),
                department: DEPARTMENTS[n % DEPARTMENTS.len()].to_owned(),
                role: ROLES[(n / 2) % ROLES.len()].to_owned(),
                status: status.to_owned(),
            });
        }
    }
    staff
}

pub fn activity() -> Vec<ActivityEntry> {
    let actors = ["admin", "m.said", "hr.bot"];
    (0..36)
        .map(|n: usize| ActivityEntry {
            at: format!("2026-03-{:02} {:02}:{:02}", 1 + n / 3, 8 + n % 9, (n * 17) % 60),
            actor: actors[n % actors.len()].to_owned(),
            action: ACTIONS[n % ACTIONS.len()].to_owned(),
            target: format!(
                "{} {}",
                FIRST_NAMES[n % FIRST_NAMES.len()],
                LAST_NAMES[n % LAST_NAMES.len()]
            ),
        })
        .collect()
}
