pub mod hive;

pub use hive::PostgresHiveRepository;
