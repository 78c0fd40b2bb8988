use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Task;

/// Location filter for the agenda view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocationFilter {
    /// Keep every task.
    #[default]
    All,
    /// Keep only tasks whose location matches exactly.
    Only(String),
}

impl LocationFilter {
    pub fn matches(&self, location: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == location,
        }
    }
}

/// Display bucket a due date falls into, relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    Today,
    Tomorrow,
    On(NaiveDate),
}

impl DueLabel {
    pub fn for_date(due: NaiveDate, today: NaiveDate) -> Self {
        if due == today {
            Self::Today
        } else if Some(due) == today.succ_opt() {
            Self::Tomorrow
        } else {
            Self::On(due)
        }
    }
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("Today"),
            Self::Tomorrow => f.write_str("Tomorrow"),
            Self::On(date) => write!(f, "{}", date.format("%B %-d, %Y")),
        }
    }
}

/// One label bucket of the agenda, holding its tasks in due-date order.
#[derive(Debug, Clone, Serialize)]
pub struct AgendaGroup {
    pub label: String,
    pub tasks: Vec<Task>,
}

/// Derive the grouped agenda for `day`.
///
/// Pure and recomputed on every call: sort ascending by due date-time, label
/// each task relative to `day`, bucket by label in first-encounter order, and
/// apply the location filter, dropping groups it empties. The result is a
/// total function of `(day, tasks, filter)`.
pub fn group_by_due_date(
    tasks: &[Task],
    filter: &LocationFilter,
    day: NaiveDate,
) -> Vec<AgendaGroup> {
    let mut kept: Vec<&Task> = tasks
        .iter()
        .filter(|t| filter.matches(&t.location))
        .collect();
    kept.sort_by_key(|t| t.due_date);

    let mut groups: Vec<AgendaGroup> = Vec::new();
    for task in kept {
        let label = DueLabel::for_date(task.due_date.date_naive(), day).to_string();
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.tasks.push(task.clone()),
            None => groups.push(AgendaGroup {
                label,
                tasks: vec![task.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: i64, location: &str, y: i32, m: u32, d: u32, hour: u32) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            location: location.to_string(),
            due_date: Utc.with_ymd_and_hms(y, m, d, hour, 0, 0).unwrap(),
            notes: None,
            recurrence: Default::default(),
            completed: false,
        }
    }

    #[test]
    fn labels_relative_to_the_reference_day() {
        let today = day(2025, 1, 1);
        assert_eq!(DueLabel::for_date(day(2025, 1, 1), today), DueLabel::Today);
        assert_eq!(
            DueLabel::for_date(day(2025, 1, 2), today),
            DueLabel::Tomorrow
        );
        assert_eq!(
            DueLabel::for_date(day(2025, 3, 15), today).to_string(),
            "March 15, 2025"
        );
    }

    #[test]
    fn groups_a_same_day_task_under_today() {
        let tasks = vec![task(1, "Kitchen", 2025, 1, 1, 0)];
        let groups = group_by_due_date(&tasks, &LocationFilter::All, day(2025, 1, 1));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Today");
        assert_eq!(groups[0].tasks[0].id, 1);
    }

    #[test]
    fn orders_groups_by_first_encounter_over_the_sorted_pass() {
        let tasks = vec![
            task(3, "Garage", 2025, 1, 3, 9),
            task(1, "Kitchen", 2025, 1, 1, 9),
            task(2, "Bathroom", 2025, 1, 2, 9),
            task(4, "Kitchen", 2025, 1, 1, 18),
        ];
        let groups = group_by_due_date(&tasks, &LocationFilter::All, day(2025, 1, 1));

        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Today", "Tomorrow", "January 3, 2025"]);

        let today_ids: Vec<i64> = groups[0].tasks.iter().map(|t| t.id).collect();
        assert_eq!(today_ids, [1, 4]);
    }

    #[test]
    fn regrouping_the_same_inputs_is_identical() {
        let tasks = vec![
            task(1, "Kitchen", 2025, 6, 10, 8),
            task(2, "Bathroom", 2025, 6, 11, 8),
            task(3, "Kitchen", 2025, 6, 10, 20),
        ];
        let reference = day(2025, 6, 10);

        let first = group_by_due_date(&tasks, &LocationFilter::All, reference);
        let second = group_by_due_date(&tasks, &LocationFilter::All, reference);

        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn location_filter_drops_non_matching_tasks_and_empty_groups() {
        let tasks = vec![
            task(1, "Kitchen", 2025, 1, 1, 9),
            task(2, "Bathroom", 2025, 1, 2, 9),
            task(3, "Kitchen", 2025, 1, 2, 12),
        ];
        let filter = LocationFilter::Only("Kitchen".to_string());
        let groups = group_by_due_date(&tasks, &filter, day(2025, 1, 1));

        assert_eq!(groups.len(), 2);
        for group in &groups {
            assert!(group.tasks.iter().all(|t| t.location == "Kitchen"));
        }

        let bathroom_only = group_by_due_date(
            &tasks,
            &LocationFilter::Only("Bathroom".to_string()),
            day(2025, 1, 1),
        );
        assert_eq!(bathroom_only.len(), 1);
        assert_eq!(bathroom_only[0].label, "Tomorrow");
    }
}
