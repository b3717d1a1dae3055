pub mod memory;
pub mod postgres;
pub mod profiles;

pub use memory::InMemoryProfileStore;
pub use postgres::{create_pool, run_migrations};
pub use profiles::{PgProfileStore, ProfileStore};
