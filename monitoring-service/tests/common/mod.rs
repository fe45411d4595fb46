use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::AccessError;
use auth::AccessGuard;
use auth::Authenticator;
use auth::Caller;
use auth::CallerDirectory;
use auth::Page;
use auth::TokenSettings;
use auth::UserId;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::DateTime;
use chrono::Utc;
use http_body_util::BodyExt;
use monitoring_service::alert::errors::AlertError;
use monitoring_service::alert::models::Alert;
use monitoring_service::alert::models::AlertFilter;
use monitoring_service::alert::models::AlertId;
use monitoring_service::alert::ports::AlertRepository;
use monitoring_service::alert::service::AlertService;
use monitoring_service::inbound::http::router::create_router;
use monitoring_service::sensor::errors::SensorError;
use monitoring_service::sensor::models::HiveId;
use monitoring_service::sensor::models::Measurement;
use monitoring_service::sensor::models::MeasurementSummary;
use monitoring_service::sensor::models::Sensor;
use monitoring_service::sensor::models::SensorId;
use monitoring_service::sensor::models::TimeRange;
use monitoring_service::sensor::ports::HiveDirectory;
use monitoring_service::sensor::ports::SensorRepository;
use monitoring_service::sensor::service::SensorService;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

#[derive(Default)]
pub struct InMemoryDirectory {
    callers: Mutex<HashMap<String, Caller>>,
}

#[async_trait]
impl CallerDirectory for InMemoryDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<Caller>, AccessError> {
        Ok(self.callers.lock().unwrap().get(username).cloned())
    }
}

/// Hive ownership as the hive service would have stored it.
#[derive(Default)]
pub struct InMemoryHives {
    owners: Mutex<HashMap<HiveId, UserId>>,
}

#[async_trait]
impl HiveDirectory for InMemoryHives {
    async fn hive_owner(&self, hive_id: &HiveId) -> Result<Option<UserId>, SensorError> {
        Ok(self.owners.lock().unwrap().get(hive_id).copied())
    }
}

fn paged<T>(items: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    items
        .skip(page.skip() as usize)
        .take(page.limit() as usize)
        .collect()
}

fn newest_first(mut measurements: Vec<Measurement>) -> Vec<Measurement> {
    measurements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    measurements
}

#[derive(Default)]
pub struct InMemorySensorRepository {
    sensors: Mutex<Vec<Sensor>>,
    measurements: Mutex<Vec<Measurement>>,
}

#[async_trait]
impl SensorRepository for InMemorySensorRepository {
    async fn create_sensor(&self, sensor: Sensor) -> Result<Sensor, SensorError> {
        self.sensors.lock().unwrap().push(sensor.clone());
        Ok(sensor)
    }

    async fn find_sensor(&self, id: &SensorId) -> Result<Option<Sensor>, SensorError> {
        Ok(self.sensors.lock().unwrap().iter().find(|s| s.id == *id).cloned())
    }

    async fn list_sensors_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Sensor>, SensorError> {
        let sensors = self.sensors.lock().unwrap();
        Ok(paged(
            sensors.iter().filter(|s| s.owner_id == *owner_id).cloned(),
            page,
        ))
    }

    async fn list_sensors_by_hive(
        &self,
        hive_id: &HiveId,
        page: Page,
    ) -> Result<Vec<Sensor>, SensorError> {
        let sensors = self.sensors.lock().unwrap();
        Ok(paged(
            sensors.iter().filter(|s| s.hive_id == *hive_id).cloned(),
            page,
        ))
    }

    async fn delete_sensor(&self, id: &SensorId) -> Result<(), SensorError> {
        let mut sensors = self.sensors.lock().unwrap();
        let before = sensors.len();
        sensors.retain(|s| s.id != *id);
        if sensors.len() == before {
            return Err(SensorError::SensorNotFound(id.to_string()));
        }
        self.measurements
            .lock()
            .unwrap()
            .retain(|m| m.sensor_id != *id);
        Ok(())
    }

    async fn create_measurement(
        &self,
        measurement: Measurement,
    ) -> Result<Measurement, SensorError> {
        self.measurements.lock().unwrap().push(measurement.clone());
        Ok(measurement)
    }

    async fn measurement_summary(
        &self,
        sensor_id: &SensorId,
    ) -> Result<MeasurementSummary, SensorError> {
        // Insertion order stands in for creation order.
        let measurements: Vec<Measurement> = self
            .measurements
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.sensor_id == *sensor_id)
            .cloned()
            .collect();

        let Some(latest) = measurements.last() else {
            return Ok(MeasurementSummary::default());
        };
        let values: Vec<f64> = measurements.iter().map(|m| m.value).collect();

        Ok(MeasurementSummary {
            min_value: values.iter().copied().reduce(f64::min),
            max_value: values.iter().copied().reduce(f64::max),
            avg_value: Some(values.iter().sum::<f64>() / values.len() as f64),
            last_value: Some(latest.value),
            battery_level: latest.battery_level,
            last_measurement_time: Some(latest.created_at),
            measurement_count: measurements.len() as i64,
        })
    }

    async fn list_measurements_by_sensor(
        &self,
        sensor_id: &SensorId,
        range: TimeRange,
        page: Page,
    ) -> Result<Vec<Measurement>, SensorError> {
        let measurements = self
            .measurements
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.sensor_id == *sensor_id && range.contains(m.created_at))
            .cloned()
            .collect();

        Ok(paged(newest_first(measurements).into_iter(), page))
    }

    async fn list_measurements_by_owner(
        &self,
        owner_id: &UserId,
        page: Page,
    ) -> Result<Vec<Measurement>, SensorError> {
        let owned: Vec<SensorId> = self
            .sensors
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.owner_id == *owner_id)
            .map(|s| s.id)
            .collect();
        let measurements = self
            .measurements
            .lock()
            .unwrap()
            .iter()
            .filter(|m| owned.contains(&m.sensor_id))
            .cloned()
            .collect();

        Ok(paged(newest_first(measurements).into_iter(), page))
    }
}

#[derive(Default)]
pub struct InMemoryAlertRepository {
    alerts: Mutex<Vec<Alert>>,
}

#[async_trait]
impl AlertRepository for InMemoryAlertRepository {
    async fn create_alert(&self, alert: Alert) -> Result<Alert, AlertError> {
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(alert)
    }

    async fn find_alert(&self, id: &AlertId) -> Result<Option<Alert>, AlertError> {
        Ok(self.alerts.lock().unwrap().iter().find(|a| a.id == *id).cloned())
    }

    async fn list_alerts(
        &self,
        owner_id: &UserId,
        filter: AlertFilter,
        page: Page,
    ) -> Result<Vec<Alert>, AlertError> {
        let alerts = self.alerts.lock().unwrap();
        Ok(paged(
            alerts
                .iter()
                .rev()
                .filter(|a| a.owner_id == *owner_id && filter.matches(a))
                .cloned(),
            page,
        ))
    }

    async fn resolve_alert(&self, id: &AlertId, at: DateTime<Utc>) -> Result<Alert, AlertError> {
        let mut alerts = self.alerts.lock().unwrap();
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == *id)
            .ok_or_else(|| AlertError::NotFound(id.to_string()))?;
        alert.resolve(at);
        Ok(alert.clone())
    }
}

pub struct TestApp {
    pub router: Router,
    pub authenticator: Arc<Authenticator>,
    pub directory: Arc<InMemoryDirectory>,
    pub hives: Arc<InMemoryHives>,
}

impl TestApp {
    pub fn new() -> Self {
        let authenticator = Arc::new(
            Authenticator::new(&TokenSettings::new(TEST_SECRET)).expect("valid token settings"),
        );
        let directory = Arc::new(InMemoryDirectory::default());
        let hives = Arc::new(InMemoryHives::default());
        let sensors = Arc::new(InMemorySensorRepository::default());
        let guard = AccessGuard::new(Arc::clone(&authenticator), directory.clone());

        let sensor_service = Arc::new(SensorService::new(Arc::clone(&sensors), hives.clone()));
        let alert_service = Arc::new(AlertService::new(
            Arc::new(InMemoryAlertRepository::default()),
            sensors,
        ));

        let router = create_router(
            sensor_service,
            alert_service,
            guard,
            &["http://localhost:3000".to_string()],
        );

        Self {
            router,
            authenticator,
            directory,
            hives,
        }
    }

    pub fn sign_in(&self, username: &str) -> (UserId, String) {
        let id = UserId::new();
        self.directory.callers.lock().unwrap().insert(
            username.to_string(),
            Caller {
                id,
                username: username.to_string(),
                is_active: true,
                is_superuser: false,
            },
        );
        let token = self
            .authenticator
            .issue_token(username)
            .expect("token issued")
            .access_token;

        (id, token)
    }

    /// Record a hive as owned by `owner` and return its id.
    pub fn hive_of(&self, owner: UserId) -> String {
        let hive_id = HiveId(Uuid::new_v4());
        self.hives.owners.lock().unwrap().insert(hive_id, owner);
        hive_id.to_string()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    /// Register a sensor on `hive_id` and return its id.
    pub async fn create_sensor(&self, token: &str, hive_id: &str, sensor_type: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/sensors/",
                Some(token),
                Some(serde_json::json!({
                    "hive_id": hive_id,
                    "name": format!("{} sensor", sensor_type),
                    "sensor_type": sensor_type,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create sensor failed: {}", body);

        body["data"]["id"].as_str().unwrap().to_string()
    }
}
