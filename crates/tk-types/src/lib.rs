pub mod args;
pub mod errors;
pub mod log;
pub mod outcome;

pub use args::*;
pub use errors::*;
pub use log::*;
pub use outcome::*;
