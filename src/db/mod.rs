pub mod memory;
pub mod model;
pub mod repo;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use model::*;
pub use repo::*;
pub use sqlite::SqliteRepository;
