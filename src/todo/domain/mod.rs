//! Domain model for todo lists and tasks.
//!
//! Lists and tasks are constructed only from validated scalar values, so any
//! instance that exists satisfies the title and text length bounds. All
//! infrastructure concerns stay outside of this boundary.

mod error;
mod ids;
mod list;
mod task;
mod timestamp;

pub use error::TodoDomainError;
pub use ids::{ListId, TaskId};
pub use list::{List, ListTitle, PersistedListData};
pub use task::{PersistedTaskData, Task, TaskPatch, TaskText};
