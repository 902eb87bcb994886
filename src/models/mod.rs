pub mod todo;
pub mod user;

pub use todo::{NewTodo, Priority, Todo, TodoPatch, TodoStatus};
pub use user::{SignupRequest, TokenResponse, User};
