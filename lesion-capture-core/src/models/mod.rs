pub mod artifact;
pub mod error;
pub mod inference;
pub mod state;
