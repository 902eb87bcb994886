//! Standalone in-memory todo CLI.
//!
//! A deliberately self-contained variant: no database, no accounts, no shared
//! code with the service. Tasks live in a `TaskBook` owned by the menu loop
//! and vanish when the process exits. Unlike the service's idempotent
//! "complete", option 5 here flips a task between Incomplete and Complete.

use std::fmt;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Incomplete,
    Complete,
}

impl Status {
    fn flipped(self) -> Self {
        match self {
            Status::Incomplete => Status::Complete,
            Status::Complete => Status::Incomplete,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Incomplete => write!(f, "Incomplete"),
            Status::Complete => write!(f, "Complete"),
        }
    }
}

#[derive(Debug)]
struct Task {
    id: u32,
    description: String,
    status: Status,
}

/// All CLI state: the ordered task list plus the id counter. Ids start at 1
/// and are never reused, even after deletion.
#[derive(Default)]
struct TaskBook {
    tasks: Vec<Task>,
    last_id: u32,
}

impl TaskBook {
    fn add(&mut self, description: &str) -> u32 {
        self.last_id += 1;
        self.tasks.push(Task {
            id: self.last_id,
            description: description.to_string(),
            status: Status::Incomplete,
        });
        self.last_id
    }

    fn all(&self) -> &[Task] {
        &self.tasks
    }

    fn find(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn update(&mut self, id: u32, description: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.description = description.to_string();
                true
            }
            None => false,
        }
    }

    fn delete(&mut self, id: u32) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() < before
    }

    fn toggle(&mut self, id: u32) -> Option<Status> {
        self.tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.status = task.status.flipped();
            task.status
        })
    }
}

fn print_banner() {
    println!("\n{}", "=".repeat(30));
    println!("   taskpilot (offline mode)");
    println!("{}", "=".repeat(30));
}

fn print_menu() {
    println!("\nMain Menu:");
    println!("1. Add Task");
    println!("2. View Task List");
    println!("3. Update Task");
    println!("4. Delete Task");
    println!("5. Mark Task Complete/Incomplete");
    println!("6. Exit");
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().expect("flush stdout");
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .expect("read stdin");
    line.trim().to_string()
}

/// Prompts until a whole number is entered.
fn read_id(prompt: &str) -> u32 {
    loop {
        let raw = read_line(prompt);
        match raw.parse() {
            Ok(id) => return id,
            Err(_) => println!("Error: Invalid ID. Please enter a number."),
        }
    }
}

fn add_task_ui(book: &mut TaskBook) {
    println!("\n--- Add Task ---");
    let description = read_line("Enter task description: ");
    if description.is_empty() {
        println!("Error: Description cannot be empty.");
        return;
    }
    let id = book.add(&description);
    println!("Success: Task added with ID {}.", id);
}

fn view_tasks_ui(book: &TaskBook) {
    println!("\n--- Task List ---");
    if book.all().is_empty() {
        println!("No tasks found.");
        return;
    }
    println!("{:<5} {:<12} {}", "ID", "Status", "Description");
    println!("{}", "-".repeat(40));
    for task in book.all() {
        println!(
            "{:<5} {:<12} {}",
            task.id,
            task.status.to_string(),
            task.description
        );
    }
}

fn update_task_ui(book: &mut TaskBook) {
    println!("\n--- Update Task ---");
    let id = read_id("Enter Task ID to update: ");
    let current = match book.find(id) {
        Some(task) => task.description.clone(),
        None => {
            println!("Error: Task with ID {} not found.", id);
            return;
        }
    };

    let new_description = read_line(&format!("Enter new description (current: {}): ", current));
    if new_description.is_empty() {
        println!("Error: Description cannot be empty.");
        return;
    }

    if book.update(id, &new_description) {
        println!("Success: Task updated.");
    }
}

fn delete_task_ui(book: &mut TaskBook) {
    println!("\n--- Delete Task ---");
    let id = read_id("Enter Task ID to delete: ");
    if book.delete(id) {
        println!("Success: Task {} deleted.", id);
    } else {
        println!("Error: Task with ID {} not found.", id);
    }
}

fn toggle_status_ui(book: &mut TaskBook) {
    println!("\n--- Toggle Status ---");
    let id = read_id("Enter Task ID to toggle status: ");
    match book.toggle(id) {
        Some(status) => println!("Success: Task {} is now {}.", id, status),
        None => println!("Error: Task with ID {} not found.", id),
    }
}

fn main() {
    let mut book = TaskBook::default();
    print_banner();
    loop {
        print_menu();
        let choice = read_line("\nEnter choice (1-6): ");

        match choice.as_str() {
            "1" => add_task_ui(&mut book),
            "2" => view_tasks_ui(&book),
            "3" => update_task_ui(&mut book),
            "4" => delete_task_ui(&mut book),
            "5" => toggle_status_ui(&mut book),
            "6" => {
                println!("Exiting application. Goodbye!");
                return;
            }
            _ => println!("Error: Invalid option, please try again."),
        }
    }
}
