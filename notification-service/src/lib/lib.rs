pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::notification;
pub use domain::settings;
pub use domain::template;
pub use outbound::repositories;
