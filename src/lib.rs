pub mod cli;
pub mod ctx;
pub mod error;
pub mod features;
pub mod indicators;
pub mod input;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod present;
pub mod schema;
pub mod validate;
