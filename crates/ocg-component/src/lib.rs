pub mod emitters;
pub mod error;
pub mod generator;
pub mod source;
pub mod writer;

pub use error::EmitError;
pub use generator::{ComponentConfig, ComponentGenerator};
pub use writer::{write, write_files};
