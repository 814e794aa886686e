//! Page flows end to end: runtime, controllers, and app state against a stub
//! backend.

mod common;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::time::timeout;

use common::{CHART_JSON, Routes, serve};
use oilwatch::api::{ApiClient, MarketApi};
use oilwatch::controller::{Effect, Page, PriceSlot};
use oilwatch::routes::{Navigation, Route};
use oilwatch::runtime::Runtime;
use oilwatch::tui::{App, Event, Message, update};

const SITE: &str = "https://liveoilprices.com";

struct Harness {
    app: App,
    runtime: Runtime,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl Harness {
    async fn start(route: Route, refresh: Duration) -> Self {
        let stub = serve(Routes::fixtures().ok("/api/charts/BRENT?days=90", CHART_JSON)).await;
        let api: Arc<dyn MarketApi> = Arc::new(ApiClient::new(&stub.base_url).unwrap());
        let (tx, rx) = mpsc::unbounded_channel();
        let mut runtime = Runtime::new(api, tx, refresh);

        let mut app = App::new(&route, SITE, (120, 40));
        let boot = app.boot();
        app.page_id = Some(runtime.start_page(boot));
        Self { app, runtime, rx }
    }

    /// Feeds the next message to the app and runs what it asks for.
    async fn step(&mut self) -> Option<Navigation> {
        let message = timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("timed out waiting for a message")
            .expect("channel closed");
        let effects = update(&mut self.app, message);
        self.runtime.dispatch(effects)
    }

    async fn steps(&mut self, n: usize) {
        for _ in 0..n {
            assert_eq!(self.step().await, None);
        }
    }

    fn press(&mut self, code: KeyCode) -> Option<Navigation> {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        let effects = update(&mut self.app, Message::Input(Event::Key(key)));
        self.runtime.dispatch(effects)
    }

    fn follow(&mut self, navigation: Navigation) {
        let Navigation::Page(route) = navigation else {
            panic!("expected page navigation, got {navigation:?}");
        };
        let boot = self.app.open(&route);
        self.app.page_id = Some(self.runtime.start_page(boot));
    }
}

#[tokio::test]
async fn test_landing_page_loads_every_section() {
    let mut h = Harness::start(Route::Landing, Duration::from_secs(3600)).await;
    h.steps(3).await;

    let Page::Landing(page) = &h.app.page else {
        panic!("expected landing page");
    };

    let symbols: Vec<_> = page.grid().cards().iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols, ["WTI", "BRENT", "NATGAS"]);
    assert_eq!(page.grid().cards()[0].badge.text, "↓ -1.22%");
    assert_eq!(page.table().len(), 4);
    assert_eq!(page.ticker().len(), 4);

    let news = page.news().expect("news loaded");
    assert_eq!(news.featured.as_ref().unwrap().title, "OPEC+ holds output steady");
    assert_eq!(news.cards().count(), 3);

    let stats = page.chart().stats();
    assert_eq!(stats[0].label, "Period Change");
    assert_eq!(stats[0].value.text, "+$4.20 (+6.00%)");
    assert_eq!(stats[4].value.text, "$74.20");
    assert_eq!(page.chart().readout().close.text, "--");
}

#[tokio::test]
async fn test_opening_a_card_switches_to_its_detail_page() {
    let mut h = Harness::start(Route::Landing, Duration::from_secs(3600)).await;
    h.steps(3).await;

    assert_eq!(h.press(KeyCode::Down), None);
    let navigation = h.press(KeyCode::Enter).expect("card navigates");
    assert_eq!(navigation, Navigation::Page(Route::Commodity("BRENT".into())));

    let old_page = h.app.page_id;
    h.follow(navigation);
    assert_ne!(h.app.page_id, old_page);
    h.steps(4).await;

    let Page::Detail(page) = &h.app.page else {
        panic!("expected detail page");
    };
    let header = page.header().expect("header loaded");
    assert_eq!(header.price.text, "$82.10");
    assert_eq!(header.change.text, "+0.45 (+0.55%)");
    assert_eq!(
        header.title,
        "Brent Crude Price Today $82.10 (+0.55%) — Live Oil Prices"
    );
    assert_eq!(page.canonical(), Some("https://liveoilprices.com/commodity/BRENT"));

    let related: Vec<_> = page.related().iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(related, ["WTI", "DUBAI", "NATGAS"]);

    // Only one article matches BRENT's categories, so the whole feed is shown.
    assert_eq!(page.news().len(), 3);
    assert_eq!(page.chart_title(), Some("Crude Oil WTI Price Chart"));

    assert_eq!(
        h.press(KeyCode::Char('h')),
        Some(Navigation::Page(Route::Landing))
    );
}

#[tokio::test]
async fn test_refresh_updates_cards_in_place() {
    let mut h = Harness::start(Route::Landing, Duration::from_secs(1)).await;
    h.steps(3).await;

    let Page::Landing(page) = &h.app.page else {
        panic!("expected landing page");
    };
    let ids: Vec<_> = page.grid().cards().iter().map(|c| c.price.id).collect();

    // Timer tick, then the refresh fetch it asked for.
    let message = timeout(Duration::from_secs(5), h.rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(message, Message::Refresh(_)));
    let effects = update(&mut h.app, message);
    assert_eq!(effects, [Effect::FetchPrices(PriceSlot::Refresh)]);
    assert_eq!(h.runtime.dispatch(effects), None);
    h.steps(1).await;

    let Page::Landing(page) = &h.app.page else {
        panic!("expected landing page");
    };
    let after: Vec<_> = page.grid().cards().iter().map(|c| c.price.id).collect();
    assert_eq!(ids, after);
}

#[tokio::test]
async fn test_external_article_link_is_not_a_page() {
    let mut h = Harness::start(Route::Landing, Duration::from_secs(3600)).await;
    h.steps(3).await;

    // Cards, Chart, Market, News.
    for _ in 0..3 {
        h.press(KeyCode::Tab);
    }
    let navigation = h.press(KeyCode::Enter);
    assert_eq!(
        navigation,
        Some(Navigation::External(
            "https://example.com/opec-holds-output".into()
        ))
    );
}
