pub mod admin;
pub mod time_slot;
