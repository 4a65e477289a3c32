pub mod catalog;
pub mod config;
pub mod course;
pub mod dsp;
pub mod models;
pub mod runner;
pub mod session;
pub mod utils;
pub mod visualization;
