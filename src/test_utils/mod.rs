//! Test utilities: mock collaborators and data factories

pub mod factories;
pub mod mocks;

pub use factories::*;
pub use mocks::*;
