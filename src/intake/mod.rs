pub mod core;


pub use core::{IntakePipeline, IntakeService, Outcome};
