#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chanid_engine::{
    BrowserLauncher, ChannelLookup, EngineEvent, EventSink, FailureKind, LookupError, LookupPage,
};

/// How the fake site answers for one URL.
#[derive(Debug, Clone)]
pub enum Reply {
    Banner(String),
    Fail(FailureKind),
    Slow(Duration, String),
}

#[derive(Default)]
pub struct Counters {
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub lookups: AtomicUsize,
    pub launches: AtomicUsize,
    pub pages_opened: AtomicUsize,
    pub pages_closed: AtomicUsize,
    pub open_pages: AtomicUsize,
    pub max_open_pages: AtomicUsize,
    pub closed: AtomicBool,
}

pub struct FakeLauncher {
    replies: HashMap<String, Reply>,
    fail_launch: bool,
    pub counters: Arc<Counters>,
}

impl FakeLauncher {
    pub fn new(replies: impl IntoIterator<Item = (&'static str, Reply)>) -> Self {
        Self {
            replies: replies
                .into_iter()
                .map(|(url, reply)| (url.to_string(), reply))
                .collect(),
            fail_launch: false,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::new([])
        }
    }
}

#[async_trait::async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn ChannelLookup>, LookupError> {
        self.counters.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail_launch {
            return Err(LookupError::new(FailureKind::Launch, "no chrome here"));
        }
        Ok(Box::new(FakeLookup {
            replies: self.replies.clone(),
            counters: self.counters.clone(),
        }))
    }
}

struct FakeLookup {
    replies: HashMap<String, Reply>,
    counters: Arc<Counters>,
}

#[async_trait::async_trait]
impl ChannelLookup for FakeLookup {
    async fn open_page(&self) -> Result<Box<dyn LookupPage>, LookupError> {
        self.counters.pages_opened.fetch_add(1, Ordering::SeqCst);
        let open = self.counters.open_pages.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_open_pages.fetch_max(open, Ordering::SeqCst);
        Ok(Box::new(FakePage {
            replies: self.replies.clone(),
            counters: self.counters.clone(),
        }))
    }

    async fn close(self: Box<Self>) {
        self.counters.closed.store(true, Ordering::SeqCst);
    }
}

struct FakePage {
    replies: HashMap<String, Reply>,
    counters: Arc<Counters>,
}

#[async_trait::async_trait]
impl LookupPage for FakePage {
    async fn submit(&self, url: &str) -> Result<String, LookupError> {
        self.counters.lookups.fetch_add(1, Ordering::SeqCst);
        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = match self.replies.get(url).cloned() {
            Some(Reply::Banner(text)) => {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok(text)
            }
            Some(Reply::Slow(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Some(Reply::Fail(kind)) => Err(LookupError::new(kind, "scripted failure")),
            None => Err(LookupError::new(FailureKind::Navigation, "unknown url")),
        };

        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn close(self: Box<Self>) {
        self.counters.pages_closed.fetch_add(1, Ordering::SeqCst);
        self.counters.open_pages.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn banner(id: &str) -> Reply {
    Reply::Banner(format!("チャンネルIDが見つかりました！ チャンネルID: {id}\n"))
}
