pub mod live;
pub mod schedule;
