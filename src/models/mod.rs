pub mod book;
pub mod person;
