pub mod log;
pub mod system;
