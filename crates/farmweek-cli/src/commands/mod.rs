pub mod classify;
pub mod climate;
pub mod events;
pub mod plan;
