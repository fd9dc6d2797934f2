// src/domain/mod.rs
pub mod block;
pub mod content;
pub mod error;
pub mod note;

pub use block::{AudioSource, Block};
pub use error::DomainError;
pub use note::Note;
