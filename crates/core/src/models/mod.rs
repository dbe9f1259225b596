pub mod defaults;
pub mod event;
pub mod schedule;
pub mod time_slot;
