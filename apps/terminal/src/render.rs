use std::fmt::Write as _;

use client_core::{FilterMode, OperationKind, TodoView};
use shared::domain::Item;

pub fn render(view: &TodoView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "todos");

    if !view.is_empty {
        let marker = if view.all_completed { "[x]" } else { "[ ]" };
        let _ = writeln!(out, "{marker} toggle all");
    }
    let input = if view.is_adding {
        "(saving...)".to_string()
    } else if view.query.is_empty() {
        "What needs to be done?".to_string()
    } else {
        view.query.clone()
    };
    let _ = writeln!(out, "> {input}");

    for item in &view.visible {
        let _ = writeln!(out, "{}", item_line(view, item));
    }
    if let Some(placeholder) = &view.placeholder {
        let _ = writeln!(out, "[ ] -- {} (loading)", placeholder.title);
    }

    if !view.is_empty {
        let filters: Vec<String> = FilterMode::ALL
            .iter()
            .map(|mode| {
                if *mode == view.filter {
                    format!("[{}]", mode.label())
                } else {
                    mode.label().to_string()
                }
            })
            .collect();
        let clear = if view.none_completed {
            ""
        } else {
            "  (clear-completed)"
        };
        let _ = writeln!(
            out,
            "{} items left  {}{clear}",
            view.remaining,
            filters.join(" ")
        );
    }

    if let Some(notification) = view.notification {
        let _ = writeln!(out, "! {notification}");
    }
    out
}

fn item_line(view: &TodoView, item: &Item) -> String {
    let check = if item.completed { "[x]" } else { "[ ]" };
    let operation = view.operation_for(item.id);
    let editing = view.editing == Some(item.id) || operation == Some(OperationKind::EditLoading);
    let title = if editing {
        format!("<{}>", item.title)
    } else {
        item.title.clone()
    };
    let status = match operation {
        Some(_) => " (loading)",
        None => "",
    };
    format!("{check} {:>3} {title}{status}", item.id.0)
}
