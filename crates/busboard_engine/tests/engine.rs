use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use busboard_engine::{
    EngineEvent, EngineHandle, FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher,
};

const WAIT: Duration = Duration::from_secs(2);

struct CannedFetcher {
    body: &'static [u8],
    calls: AtomicUsize,
}

impl CannedFetcher {
    fn new(body: &'static [u8]) -> Arc<Self> {
        Arc::new(Self {
            body,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchOutput {
            bytes: self.body.to_vec(),
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                redirect_count: 0,
                content_type: Some("application/json".to_string()),
                byte_len: self.body.len() as u64,
            },
        })
    }
}

#[test]
fn armed_timer_fires_once() {
    let (engine, events) = EngineHandle::with_fetcher(CannedFetcher::new(b"[]")).unwrap();
    engine.arm_timer(7, Duration::from_millis(20));

    assert_eq!(
        events.recv_timeout(WAIT).unwrap(),
        EngineEvent::TimerFired { timer_id: 7 }
    );
    assert!(events.recv_timeout(Duration::from_millis(100)).is_err());
    engine.shutdown();
}

#[test]
fn cancelled_timer_never_fires() {
    let (engine, events) = EngineHandle::with_fetcher(CannedFetcher::new(b"[]")).unwrap();
    engine.arm_timer(1, Duration::from_millis(80));
    engine.cancel_timer(1);
    engine.arm_timer(2, Duration::from_millis(20));

    assert_eq!(
        events.recv_timeout(WAIT).unwrap(),
        EngineEvent::TimerFired { timer_id: 2 }
    );
    assert!(events.recv_timeout(Duration::from_millis(200)).is_err());
    engine.shutdown();
}

#[test]
fn fetch_delivers_decoded_payload_with_url() {
    let fetcher = CannedFetcher::new(br#"[{"lineName":"K2"}]"#);
    let (engine, events) = EngineHandle::with_fetcher(fetcher.clone()).unwrap();
    engine.fetch("https://example.test/arrivals");

    match events.recv_timeout(WAIT).unwrap() {
        EngineEvent::FetchCompleted { url, result } => {
            assert_eq!(url, "https://example.test/arrivals");
            assert_eq!(result.unwrap(), serde_json::json!([{"lineName": "K2"}]));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    engine.shutdown();
}

#[test]
fn malformed_body_is_reported_as_fetch_error() {
    let (engine, events) = EngineHandle::with_fetcher(CannedFetcher::new(b"{oops")).unwrap();
    engine.fetch("https://example.test/arrivals");

    match events.recv_timeout(WAIT).unwrap() {
        EngineEvent::FetchCompleted { result, .. } => {
            assert_eq!(result.unwrap_err().kind, FailureKind::MalformedPayload);
        }
        other => panic!("unexpected event {other:?}"),
    }
    engine.shutdown();
}

#[test]
fn commands_after_shutdown_are_dropped() {
    let (engine, events) = EngineHandle::with_fetcher(CannedFetcher::new(b"[]")).unwrap();
    engine.shutdown();
    std::thread::sleep(Duration::from_millis(50));
    engine.arm_timer(1, Duration::from_millis(1));
    assert!(events.recv_timeout(Duration::from_millis(100)).is_err());
}
