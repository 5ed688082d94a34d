pub mod env;
pub mod templates;

pub use env::*;
pub use templates::*;
