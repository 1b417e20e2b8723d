pub mod commentary;
pub mod config;
pub mod error;
pub mod msg;
pub mod state;
pub mod table;

pub use crate::error::TableError;
pub use crate::state::Table;
pub use crate::table::{HandView, TableSnapshot, Transition};
