pub mod alert;
pub mod hive_directory;
pub mod sensor;

pub use alert::PostgresAlertRepository;
pub use hive_directory::PostgresHiveDirectory;
pub use sensor::PostgresSensorRepository;
