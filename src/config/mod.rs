pub mod models;
pub mod parser;
#[cfg(test)]
mod tests;

pub use models::*;
pub use parser::*;
