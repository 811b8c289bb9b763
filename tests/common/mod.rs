use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use postwright::config::{Config, OpenAiConfig, RegistrationMode};
use postwright::r#gen::client::{CompletionBackend, CompletionError};
use postwright::store::Store;

/// Scripted completion backend. Returns the configured reply, or the queued
/// failure once, and records every prompt it was handed.
pub struct MockCompletion {
    pub reply: Mutex<String>,
    pub fail_next: Mutex<Option<CompletionError>>,
    pub calls: AtomicUsize,
    pub last_prompt: Mutex<Option<(String, String)>>,
}

impl MockCompletion {
    pub fn new() -> Self {
        MockCompletion {
            reply: Mutex::new(
                "Here is a thoughtful LinkedIn post about your topic, written to engage."
                    .to_string(),
            ),
            fail_next: Mutex::new(None),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub async fn set_reply(&self, reply: &str) {
        *self.reply.lock().await = reply.to_string();
    }

    pub async fn fail_next(&self, err: CompletionError) {
        *self.fail_next.lock().await = Some(err);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for MockCompletion {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().await = Some((system.to_string(), user.to_string()));
        if let Some(err) = self.fail_next.lock().await.take() {
            return Err(err);
        }
        Ok(self.reply.lock().await.clone())
    }
}

/// A running test server with a throwaway data directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub completion: Arc<MockCompletion>,
    pub data_dir: PathBuf,
    _tmp: tempfile::TempDir,
}

pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let data_dir = tmp.path().to_path_buf();

    let config = Config {
        data_dir: data_dir.clone(),
        jwt_secret: "test-secret".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        registration: RegistrationMode::Open,
        log_level: "warn".to_string(),
        openai: OpenAiConfig {
            api_key: "sk-test".to_string(),
            model: "gpt-4".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
        },
    };

    let store = Store::open(&data_dir).expect("failed to open store");
    let completion = Arc::new(MockCompletion::new());
    let app = postwright::build_app(store, completion.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        addr,
        client: Client::new(),
        completion,
        data_dir,
        _tmp: tmp,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn register(&self, username: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/register"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("register request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn login(&self, username: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Register the bootstrap admin and return its access token.
    pub async fn bootstrap(&self) -> String {
        let (body, status) = self.register("admin", "password123").await;
        assert_eq!(status, StatusCode::OK, "bootstrap register failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Create a user through the admin API and return a token for them.
    pub async fn create_and_login_user(&self, admin_token: &str, username: &str) -> String {
        let resp = self
            .client
            .post(self.url("/api/v1/admin/users"))
            .bearer_auth(admin_token)
            .json(&json!({ "username": username, "password": "password123" }))
            .send()
            .await
            .expect("create user failed");
        assert_eq!(resp.status(), StatusCode::OK, "create user non-200");

        let (body, status) = self.login(username, "password123").await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_company(&self, token: &str, name: &str) -> Value {
        let resp = self
            .client
            .post(self.url("/api/v1/admin/companies"))
            .bearer_auth(token)
            .json(&json!({ "name": name, "subscription_type": "monthly" }))
            .send()
            .await
            .expect("create company failed");
        assert_eq!(resp.status(), StatusCode::OK, "create company non-200");
        resp.json().await.unwrap()
    }

    pub fn generate_body(topic: &str) -> Value {
        json!({
            "topic": topic,
            "purpose": "Inform professionals",
            "audience": "Professionals",
            "message": "AI transforms care",
            "tone_intensity": "Moderate",
            "language_style": "Professional",
            "post_length": "Short",
            "formatting": "Paragraphs",
            "post_goal": "Educate",
            "template": "professional",
        })
    }

    pub async fn generate(&self, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/posts/generate"))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("generate request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_json(&self, token: &str, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}
