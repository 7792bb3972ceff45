pub mod points_repository;
pub mod word_repository;

pub use points_repository::JsonFilePointsStore;
pub use word_repository::{FileWordSource, HttpWordSource, WordRepository};
