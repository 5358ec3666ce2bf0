#![allow(dead_code)]

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

/// What the stub backend answers for a given `stock` value.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Default)]
struct Backend {
    replies: HashMap<String, Reply>,
    received: Vec<String>,
}

/// A `/api/news` backend bound to an ephemeral local port.
#[derive(Clone)]
pub struct StubBackend {
    pub addr: SocketAddr,
    state: Arc<Mutex<Backend>>,
}

impl StubBackend {
    pub async fn start(replies: Vec<(&str, Reply)>) -> Self {
        let state = Arc::new(Mutex::new(Backend {
            replies: replies
                .into_iter()
                .map(|(stock, reply)| (stock.to_string(), reply))
                .collect(),
            received: Vec::new(),
        }));

        let app = Router::new()
            .route("/api/news", get(news))
            .with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Decoded `stock` values in the order they were requested.
    pub async fn received(&self) -> Vec<String> {
        self.state.lock().await.received.clone()
    }
}

async fn news(
    State(state): State<Arc<Mutex<Backend>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let stock = params.get("stock").cloned().unwrap_or_default();
    let mut backend = state.lock().await;
    backend.received.push(stock.clone());
    let reply = backend
        .replies
        .get(&stock)
        .cloned()
        .unwrap_or_else(|| Reply::json(serde_json::json!([])));

    Response::builder()
        .status(reply.status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(reply.body))
        .unwrap()
}

/// Texts of every element matching `selector` in an HTML fragment.
pub fn select_texts(html: &str, selector: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    fragment
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect()
}

/// Values of `attr` on every element matching `selector`.
pub fn select_attrs(html: &str, selector: &str, attr: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    fragment
        .select(&selector)
        .filter_map(|el| el.value().attr(attr).map(str::to_string))
        .collect()
}
