//! Executes controller effects on tokio.
//!
//! Every page instance runs inside a [`PageSession`]: the set of fetch tasks
//! it started plus its refresh timer. Replacing the session aborts both, and
//! every message a task posts carries the [`PageId`] it was started for, so
//! a result that outlives its page is recognisable and dropped.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info};

use crate::api::MarketApi;
use crate::controller::{Effect, Loaded};
use crate::routes::Navigation;
use crate::tui::Message;

/// Identity of one page instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page-{}", self.0)
    }
}

/// Posts [`Message::Refresh`] every period until dropped.
///
/// The first tick comes one full period after creation.
#[derive(Debug)]
pub struct RefreshTimer {
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    pub fn spawn(page: PageId, period: Duration, tx: mpsc::UnboundedSender<Message>) -> Self {
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                if tx.send(Message::Refresh(page)).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// In-flight work of one page.
#[derive(Debug)]
pub struct PageSession {
    page: PageId,
    tasks: JoinSet<()>,
    _timer: RefreshTimer,
}

impl PageSession {
    pub fn page(&self) -> PageId {
        self.page
    }

    /// Number of fetch tasks not yet reaped.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        debug!(page = %self.page, in_flight = self.tasks.len(), "tearing down page");
        self.tasks.abort_all();
    }
}

/// Runs fetches for the current page.
pub struct Runtime {
    api: Arc<dyn MarketApi>,
    tx: mpsc::UnboundedSender<Message>,
    refresh_interval: Duration,
    next_page: u64,
    session: Option<PageSession>,
}

impl Runtime {
    pub fn new(
        api: Arc<dyn MarketApi>,
        tx: mpsc::UnboundedSender<Message>,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            api,
            tx,
            refresh_interval,
            next_page: 0,
            session: None,
        }
    }

    /// Tears down the current page and starts a new one.
    ///
    /// `boot` is the new page's initial batch. Its fetches run concurrently
    /// and each result is posted as soon as it settles.
    pub fn start_page(&mut self, boot: Vec<Effect>) -> PageId {
        self.session = None;

        self.next_page += 1;
        let page = PageId(self.next_page);
        info!(%page, fetches = boot.len(), "starting page");

        let mut tasks = JoinSet::new();
        let fetches: Vec<_> = boot
            .into_iter()
            .filter(|effect| !matches!(effect, Effect::Navigate(_)))
            .map(|effect| post_fetch(Arc::clone(&self.api), self.tx.clone(), page, effect))
            .collect();
        tasks.spawn(async move {
            join_all(fetches).await;
            debug!(%page, "initial load settled");
        });

        self.session = Some(PageSession {
            page,
            tasks,
            _timer: RefreshTimer::spawn(page, self.refresh_interval, self.tx.clone()),
        });
        page
    }

    /// Runs follow-up effects for the current page.
    ///
    /// Returns the navigation, if one of the effects asks to leave the page.
    pub fn dispatch(&mut self, effects: Vec<Effect>) -> Option<Navigation> {
        let mut navigation = None;
        for effect in effects {
            if let Effect::Navigate(target) = effect {
                navigation.get_or_insert(target);
                continue;
            }
            let Some(session) = self.session.as_mut() else {
                debug!(?effect, "no page to run effect for");
                continue;
            };
            while session.tasks.try_join_next().is_some() {}
            session.tasks.spawn(post_fetch(
                Arc::clone(&self.api),
                self.tx.clone(),
                session.page,
                effect,
            ));
        }
        navigation
    }

    /// Whether `page` is the page currently running.
    pub fn is_current(&self, page: PageId) -> bool {
        self.current() == Some(page)
    }

    pub fn current(&self) -> Option<PageId> {
        self.session.as_ref().map(PageSession::page)
    }

    pub fn session(&self) -> Option<&PageSession> {
        self.session.as_ref()
    }

    /// Aborts everything belonging to the current page.
    pub fn shutdown(&mut self) {
        self.session = None;
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("refresh_interval", &self.refresh_interval)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Performs `effect` and posts the result for `page`.
fn post_fetch(
    api: Arc<dyn MarketApi>,
    tx: mpsc::UnboundedSender<Message>,
    page: PageId,
    effect: Effect,
) -> impl Future<Output = ()> + Send + 'static {
    async move {
        if let Some(loaded) = fetch(api.as_ref(), effect).await {
            // The receiver is gone only while the app is exiting.
            let _ = tx.send(Message::Loaded { page, loaded });
        }
    }
}

/// Performs one fetch effect against `api`.
///
/// Returns `None` for effects that are not fetches.
pub async fn fetch(api: &dyn MarketApi, effect: Effect) -> Option<Loaded> {
    let loaded = match effect {
        Effect::FetchPrices(slot) => Loaded::Prices {
            slot,
            result: api.get_prices().await,
        },
        Effect::FetchChart { seq, symbol, days } => Loaded::Chart {
            seq,
            result: api.get_chart_data(&symbol, days).await,
        },
        Effect::FetchNews => Loaded::News(api.get_news().await),
        Effect::Navigate(_) => return None,
    };
    Some(loaded)
}
