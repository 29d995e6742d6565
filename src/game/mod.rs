pub mod mechanics;
pub mod scheduler;
