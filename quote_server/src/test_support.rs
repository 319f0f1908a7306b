//! Test doubles shared by the server's unit tests.
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use log::{LevelFilter, Log, Metadata, Record};
use quote_common::{Deadline, Quote, QuoteError, Result};
use tokio::net::TcpListener;

use crate::routes::create_router;
use crate::service::QuoteService;
use crate::storage::{PersistedQuoteRecord, QuoteSink};

const UPSTREAM_PATH: &str = "/json/last/USD-BRL";

/// Provider body with the full set of metadata fields.
pub fn quote_body(bid: &str) -> String {
    format!(
        r#"{{"USDBRL":{{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.47","low":"5.40","varBid":"0.02","pctChange":"0.39","bid":"{}","ask":"5.44","timestamp":"1718380800","create_date":"2024-06-14 13:00:00"}}}}"#,
        bid
    )
}

/// Scripted pricing API.
#[derive(Debug, Clone)]
pub struct MockUpstream {
    status: StatusCode,
    body: String,
    delay: Duration,
}

impl MockUpstream {
    pub fn ok(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn status(code: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(code).unwrap(),
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn spawn(self) -> RunningUpstream {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let app = Router::new().route(
            UPSTREAM_PATH,
            get(move || {
                let mock = self.clone();
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(mock.delay).await;
                    (mock.status, mock.body)
                }
            }),
        );
        let addr = serve(app).await;
        RunningUpstream { addr, hits }
    }
}

pub struct RunningUpstream {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl RunningUpstream {
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, UPSTREAM_PATH)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// How a `RecordingSink` answers `append`.
#[derive(Debug, Clone, Copy)]
pub enum SinkBehavior {
    Accept,
    Stall(Duration),
    Fail,
}

/// In-memory sink counting every append it is asked to perform.
#[derive(Debug)]
pub struct RecordingSink {
    behavior: SinkBehavior,
    calls: AtomicUsize,
    stored: AtomicUsize,
}

impl RecordingSink {
    pub fn new(behavior: SinkBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            stored: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> usize {
        self.stored.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSink for RecordingSink {
    async fn append(&self, quote: &Quote, _deadline: &Deadline) -> Result<PersistedQuoteRecord> {
        let id = self.calls.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        match self.behavior {
            SinkBehavior::Accept => {}
            SinkBehavior::Stall(delay) => tokio::time::sleep(delay).await,
            SinkBehavior::Fail => return Err(QuoteError::Storage("database is locked".into())),
        }
        self.stored.fetch_add(1, Ordering::SeqCst);
        Ok(PersistedQuoteRecord {
            id,
            bid: quote.bid.clone(),
            recorded_at: chrono::Utc::now().naive_utc(),
        })
    }
}

/// Serve the full quote service on an ephemeral port and return its `/quote` URL.
pub async fn spawn_service(service: QuoteService) -> String {
    let addr = serve(create_router(Arc::new(service))).await;
    format!("http://{}{}", addr, quote_common::net::QUOTE_PATH)
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());
static INIT_LOGGER: Once = Once::new();

/// Logger keeping every record as `"<LEVEL> <message>"`. Shared by all tests
/// in the process, so assertions should look for lines unique to the test.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = CAPTURED.lock() {
            lines.push(format!("{} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Install the capturing logger once per test process.
pub fn capture_logs() {
    INIT_LOGGER.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Debug);
    });
}

/// Returns `true` if any captured line contains `needle`.
pub fn logged(needle: &str) -> bool {
    CAPTURED.lock().unwrap().iter().any(|line| line.contains(needle))
}
