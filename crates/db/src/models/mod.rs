pub mod category;
pub mod note;
pub mod user;
