pub mod http;
pub mod loader;

pub use loader::{resolve_location, LoadError, Loader};
