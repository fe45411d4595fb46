use std::sync::Arc;

use auth::AccessGuard;
use auth::Authenticator;
use auth::PostgresCallerDirectory;
use notification_service::config::Config;
use notification_service::inbound::http::router::create_router;
use notification_service::notification::service::NotificationService;
use notification_service::repositories::PostgresNotificationRepository;
use notification_service::repositories::PostgresSettingsRepository;
use notification_service::repositories::PostgresTemplateRepository;
use notification_service::settings::service::SettingsService;
use notification_service::template::service::TemplateService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "notification-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    tracing::info!(
        http_port = config.server.http_port,
        debug = config.server.debug,
        jwt_algorithm = %config.jwt.algorithm,
        allowed_origins = ?config.cors.allowed_origins,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(&config.jwt)?);

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    // users must already exist; the identity service migrates first
    let mut migrator = sqlx::migrate!("./migrations");
    migrator.set_ignore_missing(true);
    migrator.run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let guard = AccessGuard::new(
        authenticator,
        Arc::new(PostgresCallerDirectory::new(pg_pool.clone())),
    );
    let template_repository = Arc::new(PostgresTemplateRepository::new(pg_pool.clone()));
    let settings_repository = Arc::new(PostgresSettingsRepository::new(pg_pool.clone()));
    let notification_repository = Arc::new(PostgresNotificationRepository::new(pg_pool));

    let template_service = Arc::new(TemplateService::new(Arc::clone(&template_repository)));
    let settings_service = Arc::new(SettingsService::new(settings_repository));
    let notification_service = Arc::new(NotificationService::new(
        notification_repository,
        template_repository,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        template_service,
        settings_service,
        notification_service,
        guard,
        &config.cors.allowed_origins,
    );
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
