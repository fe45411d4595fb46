use std::sync::Arc;

use auth::AccessGuard;
use auth::Authenticator;
use auth::PostgresCallerDirectory;
use monitoring_service::alert::service::AlertService;
use monitoring_service::config::Config;
use monitoring_service::inbound::http::router::create_router;
use monitoring_service::repositories::PostgresAlertRepository;
use monitoring_service::repositories::PostgresHiveDirectory;
use monitoring_service::repositories::PostgresSensorRepository;
use monitoring_service::sensor::service::SensorService;
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
        service = "monitoring-service",
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

    // users and hives must already exist; identity and hive services migrate first
    let mut migrator = sqlx::migrate!("./migrations");
    migrator.set_ignore_missing(true);
    migrator.run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let guard = AccessGuard::new(
        authenticator,
        Arc::new(PostgresCallerDirectory::new(pg_pool.clone())),
    );
    let sensor_repository = Arc::new(PostgresSensorRepository::new(pg_pool.clone()));
    let hive_directory = Arc::new(PostgresHiveDirectory::new(pg_pool.clone()));
    let alert_repository = Arc::new(PostgresAlertRepository::new(pg_pool));

    let sensor_service = Arc::new(SensorService::new(
        Arc::clone(&sensor_repository),
        hive_directory,
    ));
    let alert_service = Arc::new(AlertService::new(alert_repository, sensor_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        sensor_service,
        alert_service,
        guard,
        &config.cors.allowed_origins,
    );
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
