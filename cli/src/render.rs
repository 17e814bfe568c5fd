//! Terminal text for command results.

use todo_core::Todo;

const RULE_WIDTH: usize = 50;

pub fn added(todo: &Todo) -> String {
    format!("Added todo #{}: \"{}\"", todo.id, todo.text)
}

pub fn completed(todo: &Todo) -> String {
    format!("Marked todo #{} as completed: \"{}\"", todo.id, todo.text)
}

pub fn already_completed(todo: &Todo) -> String {
    format!("Todo #{} is already completed", todo.id)
}

pub fn removed(todo: &Todo) -> String {
    format!("Removed todo #{}: \"{}\"", todo.id, todo.text)
}

pub fn list(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No todos yet! Add one with: todo add \"Your todo\"".to_string();
    }

    let rule = "─".repeat(RULE_WIDTH);
    let mut out = format!("\nYour Todos:\n{rule}\n");
    for todo in todos {
        let (mark, prefix) = if todo.completed { ('✓', "(done) ") } else { (' ', "") };
        out.push_str(&format!("[{mark}] #{} - {prefix}{}\n", todo.id, todo.text));
    }
    out.push_str(&rule);
    out
}
