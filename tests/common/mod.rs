use async_trait::async_trait;
use chrono::Utc;
use feedback::configuration::{DatabaseSettings, Settings};
use feedback::db::{FeedbackStore, StoreError};
use feedback::models;
use serde_json::json;
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const VALID_TOKEN: &str = "valid-token";

/// In-memory stand-in for the Postgres store.
pub struct InMemoryStore {
    records: RwLock<HashMap<Uuid, models::Feedback>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryStore {
    async fn insert(&self, mut feedback: models::Feedback) -> Result<models::Feedback, StoreError> {
        let now = Utc::now();
        feedback.id = Uuid::new_v4();
        feedback.created_at = now;
        feedback.updated_at = now;

        let mut records = self.records.write().await;
        records.insert(feedback.id, feedback.clone());
        Ok(feedback)
    }

    async fn find_by_product(
        &self,
        product_id: &str,
    ) -> Result<Vec<models::Feedback>, StoreError> {
        let records = self.records.read().await;
        let mut feedbacks: Vec<models::Feedback> = records
            .values()
            .filter(|feedback| feedback.product_id == product_id)
            .cloned()
            .collect();
        feedbacks.sort_by_key(|feedback| feedback.created_at);
        Ok(feedbacks)
    }

    async fn moderate(&self, id: Uuid) -> Result<Uuid, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(feedback) => {
                feedback.moderated = true;
                feedback.updated_at = Utc::now();
                Ok(id)
            }
            None => Err(StoreError::NotFound),
        }
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub auth_server: MockServer,
}

pub async fn spawn_app() -> TestApp {
    let auth_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", format!("Bearer {}", VALID_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "_id": "user-1",
                "first_name": "Test",
                "last_name": "User",
                "email": "test@example.com",
                "email_confirmed": true
            }
        })))
        .mount(&auth_server)
        .await;

    // Every other credential is rejected by the auth service.
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&auth_server)
        .await;

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let settings = Settings {
        app_host: "127.0.0.1".to_string(),
        app_port: port,
        auth_url: format!("{}/me", auth_server.uri()),
        auth_cache_ttl_secs: 60,
        database: DatabaseSettings {
            username: "unused".to_string(),
            password: "unused".to_string(),
            host: "127.0.0.1".to_string(),
            port: 5432,
            database_name: "unused".to_string(),
        },
    };

    let store = Arc::new(InMemoryStore::new());
    let server = feedback::startup::run(listener, store.clone(), settings)
        .await
        .expect("Failed to start server.");
    tokio::spawn(server);

    TestApp {
        address,
        store,
        auth_server,
    }
}
