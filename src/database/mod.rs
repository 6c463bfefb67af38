pub mod connection;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;


pub use connection::{database_url, establish_connection, run_migrations, DatabasePool};
pub use memory::InMemoryObservationStore;
pub use models::SurferObservation;
pub use repository::PgObservationStore;
pub use store::{ObservationStore, StoreError};
