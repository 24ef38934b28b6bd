//! Data models for Carrel

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorRef};
pub use book::{Book, BookDetail, BookListRow, BookRef};
pub use book_instance::{BookInstance, BookInstanceRow, InstanceStatus, STATUS_OPTIONS};
pub use genre::Genre;
