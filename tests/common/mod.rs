//! In-memory gateway shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use souk::{Gateway, GatewayError};
use tokio::sync::oneshot;

type Reply = Result<Value, GatewayError>;

/// Answers requests from canned routes, or holds them until a test releases
/// the matching gate.
#[derive(Default)]
pub struct FakeGateway {
    routes: Mutex<HashMap<String, Reply>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    calls: Mutex<Vec<String>>,
    posted: Mutex<Vec<(String, Value)>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every `key` request with `reply`.
    pub fn route(self, key: &str, reply: Reply) -> Self {
        self.routes.lock().unwrap().insert(key.to_string(), reply);
        self
    }

    /// Hold the next `key` request until the returned sender fires.
    pub fn gate(&self, key: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(key.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, key: &str) -> usize {
        self.calls().iter().filter(|call| *call == key).count()
    }

    pub fn posted(&self) -> Vec<(String, Value)> {
        self.posted.lock().unwrap().clone()
    }

    async fn respond(&self, key: String) -> Reply {
        self.calls.lock().unwrap().push(key.clone());
        let gate = self.gates.lock().unwrap().remove(&key);
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(GatewayError::Unknown("gate dropped".into())));
        }
        let reply = self.routes.lock().unwrap().get(&key).cloned();
        reply.unwrap_or(Err(GatewayError::Server {
            status: 404,
            message: Some(format!("no route for {key}")),
        }))
    }
}

fn key(method: &str, path: &str, query: &[(&str, String)]) -> String {
    if query.is_empty() {
        return format!("{method} {path}");
    }
    let query: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{method} {path}?{}", query.join("&"))
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, GatewayError> {
        self.respond(key("GET", path, query)).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, GatewayError> {
        self.posted.lock().unwrap().push((path.to_string(), body));
        self.respond(key("POST", path, &[])).await
    }

    async fn delete(&self, path: &str) -> Result<(), GatewayError> {
        self.respond(key("DELETE", path, &[])).await.map(|_| ())
    }
}
