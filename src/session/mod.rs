pub mod controller;
pub mod state;

pub use controller::{execute, SessionController};
pub use state::{reduce, Action, Command, SessionState, Tab};
