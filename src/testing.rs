//! In-memory doubles for the transport, DOM and notifier seams.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use regex::Regex;

use crate::commands::{HttpReply, Transport};
use crate::components::Sleeper;
use crate::controls::ControlElement;
use crate::counters::CounterRefresh;
use crate::dom::{BadgeElement, IconElement, MarkupFragment, Page};
use crate::error::SyncError;
use crate::models::Severity;
use crate::notify::Notifier;
use crate::store::{self, Toast, ToastPhase, ToastQueue};

// ========================
// Transport
// ========================

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn has_header(&self, name: &str, value: &str) -> bool {
        self.headers.iter().any(|(n, v)| n == name && v == value)
    }
}

enum PendingReply {
    Ready(Result<HttpReply, SyncError>),
    Deferred(oneshot::Receiver<HttpReply>),
}

/// POST replies are served in queue order; GET replies per URL
#[derive(Default)]
pub struct FakeTransport {
    posts: RefCell<VecDeque<PendingReply>>,
    gets: RefCell<HashMap<String, VecDeque<Result<HttpReply, SyncError>>>>,
    post_log: RefCell<Vec<RecordedRequest>>,
    get_log: RefCell<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_post(&self, reply: HttpReply) {
        self.posts.borrow_mut().push_back(PendingReply::Ready(Ok(reply)));
    }

    pub fn queue_post_error(&self, error: SyncError) {
        self.posts.borrow_mut().push_back(PendingReply::Ready(Err(error)));
    }

    /// Next POST stays in flight until the sender fires
    pub fn defer_post(&self) -> oneshot::Sender<HttpReply> {
        let (tx, rx) = oneshot::channel();
        self.posts.borrow_mut().push_back(PendingReply::Deferred(rx));
        tx
    }

    pub fn queue_get(&self, url: &str, reply: HttpReply) {
        self.gets.borrow_mut().entry(url.to_string()).or_default().push_back(Ok(reply));
    }

    pub fn queue_get_error(&self, url: &str, error: SyncError) {
        self.gets.borrow_mut().entry(url.to_string()).or_default().push_back(Err(error));
    }

    pub fn posts(&self) -> Vec<RecordedRequest> {
        self.post_log.borrow().clone()
    }

    pub fn gets(&self) -> Vec<RecordedRequest> {
        self.get_log.borrow().clone()
    }
}

fn record(url: &str, headers: &[(&str, &str)]) -> RecordedRequest {
    RecordedRequest {
        url: url.to_string(),
        headers: headers.iter().map(|(n, v)| (n.to_string(), v.to_string())).collect(),
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn post(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply, SyncError> {
        self.post_log.borrow_mut().push(record(url, headers));
        let pending = self.posts.borrow_mut().pop_front();
        match pending {
            Some(PendingReply::Ready(result)) => result,
            Some(PendingReply::Deferred(rx)) => rx
                .await
                .map_err(|_| SyncError::Transport("request abandoned".to_string())),
            None => Err(SyncError::Transport(format!("no reply queued for {}", url))),
        }
    }

    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpReply, SyncError> {
        self.get_log.borrow_mut().push(record(url, headers));
        let next = self.gets.borrow_mut().get_mut(url).and_then(|queue| queue.pop_front());
        next.unwrap_or_else(|| Err(SyncError::Transport(format!("no reply queued for {}", url))))
    }
}

// ========================
// DOM
// ========================

#[derive(Clone, Default)]
pub struct FakeIcon {
    classes: Rc<RefCell<Vec<String>>>,
}

impl FakeIcon {
    pub fn new(class_name: &str) -> Self {
        let icon = Self::default();
        IconElement::set_class_name(&icon, class_name);
        icon
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().clone()
    }

    pub fn class_name(&self) -> String {
        self.classes.borrow().join(" ")
    }
}

impl IconElement for FakeIcon {
    fn add_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|c| c != class);
    }

    fn set_class_name(&self, value: &str) {
        *self.classes.borrow_mut() = value.split_whitespace().map(str::to_string).collect();
    }
}

#[derive(Default)]
struct BadgeState {
    text: Option<String>,
    visible: Option<bool>,
}

/// Clones share state, so the test keeps a handle to what the page hands out
#[derive(Clone, Default)]
pub struct FakeBadge {
    state: Rc<RefCell<BadgeState>>,
}

impl FakeBadge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<String> {
        self.state.borrow().text.clone()
    }

    pub fn visible(&self) -> Option<bool> {
        self.state.borrow().visible
    }
}

impl BadgeElement for FakeBadge {
    fn set_text(&self, text: &str) {
        self.state.borrow_mut().text = Some(text.to_string());
    }

    fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().visible = Some(visible);
    }
}

/// A toggle control: attributes plus at most one icon
#[derive(Default)]
pub struct FakeControl {
    attributes: HashMap<String, String>,
    icon: Option<FakeIcon>,
}

impl FakeControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_icon(mut self, class_name: &str) -> Self {
        self.icon = Some(FakeIcon::new(class_name));
        self
    }
}

impl ControlElement for FakeControl {
    type Icon = FakeIcon;

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn find_icon(&self, selector: &str) -> Option<FakeIcon> {
        if selector.is_empty() {
            return None;
        }
        self.icon.clone()
    }
}

/// Understands `.class` and `tag.class` selectors over flat markup
pub struct FakeFragment {
    html: String,
}

impl FakeFragment {
    fn split_selector(selector: &str) -> (&str, &str) {
        match selector.split_once('.') {
            Some((tag, class)) => (tag, class),
            None => (selector, ""),
        }
    }
}

impl MarkupFragment for FakeFragment {
    fn count(&self, selector: &str) -> usize {
        let (tag, class) = Self::split_selector(selector);
        let tag_pattern = if tag.is_empty() { r"[a-z0-9]+" } else { tag };
        let open = Regex::new(&format!(r#"<{}\b[^>]*class="([^"]*)""#, tag_pattern)).unwrap();
        open.captures_iter(&self.html)
            .filter(|captures| captures[1].split_whitespace().any(|c| c == class))
            .count()
    }

    fn texts(&self, selector: &str) -> Vec<String> {
        let (tag, class) = Self::split_selector(selector);
        let element = Regex::new(&format!(r#"(?s)<{0}\b[^>]*class="([^"]*)"[^>]*>(.*?)</{0}>"#, tag)).unwrap();
        element
            .captures_iter(&self.html)
            .filter(|captures| captures[1].split_whitespace().any(|c| c == class))
            .map(|captures| captures[2].to_string())
            .collect()
    }
}

#[derive(Default)]
pub struct FakePage {
    badges: RefCell<HashMap<String, FakeBadge>>,
    parse_fails: Cell<bool>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_badge(&self, selector: &str) -> FakeBadge {
        let badge = FakeBadge::new();
        self.badges.borrow_mut().insert(selector.to_string(), badge.clone());
        badge
    }

    pub fn badge_attached(&self, selector: &str) -> bool {
        self.badges.borrow().contains_key(selector)
    }

    pub fn fail_parsing(&self) {
        self.parse_fails.set(true);
    }
}

impl Page for FakePage {
    fn badge(&self, selector: &str) -> Option<Box<dyn BadgeElement>> {
        let badge = self.badges.borrow().get(selector).cloned()?;
        Some(Box::new(badge))
    }

    fn parse_markup(&self, html: &str) -> Result<Box<dyn MarkupFragment>, SyncError> {
        if self.parse_fails.get() {
            return Err(SyncError::Decode("unparseable".to_string()));
        }
        Ok(Box::new(FakeFragment { html: html.to_string() }))
    }
}

// ========================
// Notifier / counters
// ========================

#[derive(Default)]
pub struct CapturingNotifier {
    messages: RefCell<Vec<(String, Severity)>>,
}

impl CapturingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages.borrow().clone()
    }
}

impl Notifier for CapturingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages.borrow_mut().push((message.to_string(), severity));
    }
}

#[derive(Default)]
pub struct CountingRefresh {
    calls: Cell<usize>,
}

impl CountingRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl CounterRefresh for CountingRefresh {
    async fn refresh_counters(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

// ========================
// Toasts
// ========================

/// Toast list without the reactive store
#[derive(Default)]
pub struct LocalToasts {
    toasts: RefCell<Vec<Toast>>,
    next_id: Cell<u64>,
    remove_calls: Cell<usize>,
}

impl LocalToasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, id: u64) -> Option<ToastPhase> {
        self.toasts.borrow().iter().find(|toast| toast.id == id).map(|toast| toast.phase)
    }

    pub fn ids(&self) -> Vec<u64> {
        self.toasts.borrow().iter().map(|toast| toast.id).collect()
    }

    /// Every `remove` call, including ones for toasts already gone
    pub fn removals(&self) -> usize {
        self.remove_calls.get()
    }
}

impl ToastQueue for LocalToasts {
    fn push(&self, message: &str, severity: Severity) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        store::push_toast(&mut self.toasts.borrow_mut(), id, message, severity);
        id
    }

    fn begin_hide(&self, id: u64) -> bool {
        store::begin_hide(&mut self.toasts.borrow_mut(), id)
    }

    fn remove(&self, id: u64) -> bool {
        self.remove_calls.set(self.remove_calls.get() + 1);
        store::remove_toast(&mut self.toasts.borrow_mut(), id)
    }
}

/// Timers that only elapse when the test fires them
#[derive(Default)]
pub struct ManualSleeper {
    timers: RefCell<Vec<(u32, oneshot::Sender<()>)>>,
}

impl ManualSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations of timers still running, oldest first
    pub fn pending(&self) -> Vec<u32> {
        self.timers.borrow().iter().map(|(ms, _)| *ms).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn fire(&self, index: usize) {
        let (_, tx) = self.timers.borrow_mut().remove(index);
        let _ = tx.send(());
    }
}

#[async_trait(?Send)]
impl Sleeper for ManualSleeper {
    async fn sleep(&self, ms: u32) {
        let (tx, rx) = oneshot::channel();
        self.timers.borrow_mut().push((ms, tx));
        let _ = rx.await;
    }
}
