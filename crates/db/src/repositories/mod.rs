pub mod category_repo;
pub mod note_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use note_repo::NoteRepo;
pub use user_repo::UserRepo;
