mod done;
mod team;

pub use done::{Done, DoneListPage, GOAL_MARKER};
pub use team::Team;
