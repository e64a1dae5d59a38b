pub mod todo;
pub mod user;

pub use todo::{ItemInput, ListInput, TodoItem, TodoList, UpdateItemInput, UpdateListInput};
pub use user::{SignInInput, SignInResponse, SignUpInput, SignUpResponse, User};
