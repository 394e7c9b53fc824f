// Plain-text task table

use crate::models::Task;
use colored::Colorize;
use std::fmt::Write;

const HEADERS: [&str; 7] = ["ID", "Name", "Description", "Assigned To", "Due Date", "Status", "Actions"];

/// Actions offered for a task row
pub fn actions(task: &Task) -> Vec<&'static str> {
    let mut actions = vec!["edit", "delete"];
    if !task.is_done() {
        actions.push("done");
    }
    actions
}

/// Render the full table, one row per task in store order
pub fn render_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks\n".to_string();
    }

    let rows: Vec<[String; 7]> = tasks
        .iter()
        .map(|t| {
            [
                t.id.to_string(),
                t.name.clone(),
                t.description.clone(),
                t.assigned_to.clone(),
                t.due_date.clone(),
                t.status.clone(),
                actions(t).join(" "),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(|h| h.bold().to_string()), &HEADERS.map(str::to_string), &widths);

    for (row, task) in rows.iter().zip(tasks) {
        let mut styled = row.clone();
        if task.is_done() {
            styled[5] = row[5].green().to_string();
        }
        push_line(&mut out, &styled, row, &widths);
    }

    out
}

// Pad using the unstyled text so escape codes don't skew column widths
fn push_line(out: &mut String, styled: &[String; 7], plain: &[String; 7], widths: &[usize; 7]) {
    let last = styled.len() - 1;
    for (i, (cell, raw)) in styled.iter().zip(plain).enumerate() {
        out.push_str(cell);
        if i < last {
            let pad = widths[i] - raw.chars().count() + 2;
            let _ = write!(out, "{:pad$}", "", pad = pad);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskFields;

    fn task(id: u64, name: &str, status: &str) -> Task {
        TaskFields::new(name, "Fix bug", "Ann", "2024-01-01", status).into_task(id)
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_table(&[]), "No tasks\n");
    }

    #[test]
    fn test_actions_hide_done_for_finished_tasks() {
        assert_eq!(actions(&task(0, "a", "todo")), vec!["edit", "delete", "done"]);
        assert_eq!(actions(&task(0, "a", "Done")), vec!["edit", "delete"]);
        // Only the exact label counts
        assert_eq!(actions(&task(0, "a", "done")).len(), 3);
    }

    #[test]
    fn test_one_row_per_task_in_order() {
        let tasks = vec![task(2, "second", "todo"), task(0, "first", "Done")];
        let out = render_table(&tasks);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Assigned To"));
        assert!(lines[1].contains("second"));
        assert!(lines[1].contains("edit delete done"));
        assert!(lines[2].contains("first"));
        assert!(lines[2].contains("Done"));
        assert!(!lines[2].contains("delete done"));
    }

    #[test]
    fn test_rows_show_every_field() {
        let out = render_table(&[task(7, "Fix", "review")]);

        for needle in ["7", "Fix", "Fix bug", "Ann", "2024-01-01", "review"] {
            assert!(out.contains(needle), "missing {}", needle);
        }
    }
}
