//! Client-side task state.
//!
//! One [`TaskBook`] and one [`SeasonalBoard`] per session own all mutable
//! task state; screens derive what they show from snapshots ([`group_by_due_date`]
//! for the daily agenda) instead of keeping copies of their own.

mod agenda;
mod board;
mod tasks;
mod timers;

pub use agenda::{group_by_due_date, AgendaGroup, DueLabel, LocationFilter};
pub use board::SeasonalBoard;
pub use tasks::TaskBook;
pub use timers::REMOVAL_DELAY;
