pub mod notification;
pub mod settings;
pub mod template;

pub use notification::PostgresNotificationRepository;
pub use settings::PostgresSettingsRepository;
pub use template::PostgresTemplateRepository;
