//! Candlestick chart adapter.
//!
//! [`ChartAdapter`] owns at most one live [`ChartInstance`]: a candle series
//! and a volume series sharing a time axis, sized to a container. Creating a
//! new instance always disposes the previous one first, together with its
//! crosshair subscription and its resize registration, so nothing leaks
//! across chart reloads.

use std::fmt;

use rust_decimal::Decimal;
use tracing::trace;

use crate::models::Ohlcv;

/// Share of the plot height given to the volume histogram, in percent.
const VOLUME_HEIGHT_PCT: u16 = 15;

/// The area a chart is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    /// Stable name of the anchor, e.g. `"chartContainer"`.
    pub id: &'static str,
    pub width: u16,
    pub height: u16,
}

impl Container {
    pub fn new(id: &'static str, width: u16, height: u16) -> Self {
        Self { id, width, height }
    }
}

/// Bar values under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosshairValues {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

/// Observer invoked on pointer movement over the chart.
pub type CrosshairCallback = Box<dyn FnMut(&CrosshairValues) + Send>;

/// One point of the price series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candle {
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// One point of the volume series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeBar {
    pub time: i64,
    pub value: u64,
    /// Drawn in the up colour when the bar closed at or above its open.
    pub rising: bool,
}

/// Extent of the data currently in view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRange {
    pub from: i64,
    pub to: i64,
    pub price_low: Decimal,
    pub price_high: Decimal,
    pub volume_high: u64,
}

/// A live chart bound to one container.
pub struct ChartInstance {
    container: Container,
    candles: Vec<Candle>,
    volumes: Vec<VolumeBar>,
    visible: Option<VisibleRange>,
    crosshair: Option<CrosshairCallback>,
    hovered: Option<usize>,
}

impl ChartInstance {
    fn new(container: Container) -> Self {
        Self {
            container,
            candles: Vec::new(),
            volumes: Vec::new(),
            visible: None,
            crosshair: None,
            hovered: None,
        }
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn volumes(&self) -> &[VolumeBar] {
        &self.volumes
    }

    /// The fitted view, or `None` before any data arrived.
    pub fn visible_range(&self) -> Option<&VisibleRange> {
        self.visible.as_ref()
    }

    /// Index of the bar the crosshair is on.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Rows reserved for the volume histogram at the bottom of the plot.
    pub fn volume_rows(&self) -> u16 {
        if self.container.height < 4 {
            return 0;
        }
        (self.container.height * VOLUME_HEIGHT_PCT / 100).max(1)
    }

    /// Rows available to the candles above the histogram.
    pub fn price_rows(&self) -> u16 {
        self.container.height - self.volume_rows()
    }

    /// Maps a plot column to the bar drawn there.
    ///
    /// Columns spread evenly over the whole series, so every bar is visible
    /// whatever the width. Painters and the crosshair share this mapping.
    pub fn bar_at(&self, column: u16) -> Option<usize> {
        let len = self.candles.len();
        let width = usize::from(self.container.width);
        if len == 0 || width == 0 || usize::from(column) >= width {
            return None;
        }
        Some((usize::from(column) * len / width).min(len - 1))
    }

    fn set_data(&mut self, data: &[Ohlcv]) {
        self.candles = data
            .iter()
            .map(|d| Candle {
                time: d.time,
                open: d.open,
                high: d.high,
                low: d.low,
                close: d.close,
            })
            .collect();
        self.volumes = data
            .iter()
            .map(|d| VolumeBar {
                time: d.time,
                value: d.volume,
                rising: d.is_rising(),
            })
            .collect();
        self.hovered = None;
        self.fit_content();
    }

    /// Rescales the view so every loaded bar fits.
    fn fit_content(&mut self) {
        let (Some(first), Some(last)) = (self.candles.first(), self.candles.last()) else {
            self.visible = None;
            return;
        };

        let price_low = self
            .candles
            .iter()
            .map(|c| c.low)
            .min()
            .unwrap_or(first.low);
        let price_high = self
            .candles
            .iter()
            .map(|c| c.high)
            .max()
            .unwrap_or(first.high);
        let volume_high = self.volumes.iter().map(|v| v.value).max().unwrap_or(0);

        self.visible = Some(VisibleRange {
            from: first.time,
            to: last.time,
            price_low,
            price_high,
            volume_high,
        });
    }

    fn crosshair_at(&mut self, column: u16) {
        self.hovered = self.bar_at(column);
        let Some(index) = self.hovered else {
            return;
        };
        let candle = &self.candles[index];
        let values = CrosshairValues {
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: self.volumes[index].value,
        };
        if let Some(callback) = self.crosshair.as_mut() {
            callback(&values);
        }
    }
}

impl fmt::Debug for ChartInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartInstance")
            .field("container", &self.container)
            .field("bars", &self.candles.len())
            .field("visible", &self.visible)
            .field("subscribed", &self.crosshair.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for ChartInstance {
    fn drop(&mut self) {
        trace!(container = self.container.id, "chart disposed");
    }
}

/// Owner of the single live chart of a page.
#[derive(Debug, Default)]
pub struct ChartAdapter {
    instance: Option<ChartInstance>,
}

impl ChartAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty chart in `container`, replacing any existing one.
    pub fn init_chart(&mut self, container: Container) {
        self.dispose();
        trace!(
            container = container.id,
            width = container.width,
            height = container.height,
            "chart created"
        );
        self.instance = Some(ChartInstance::new(container));
    }

    /// Replaces the entire dataset and fits the view to it.
    ///
    /// Does nothing when no chart exists.
    pub fn update_chart_data(&mut self, data: &[Ohlcv]) {
        if let Some(instance) = self.instance.as_mut() {
            instance.set_data(data);
        }
    }

    /// Registers the crosshair observer, replacing any previous one.
    ///
    /// Does nothing when no chart exists.
    pub fn subscribe_crosshair<F>(&mut self, callback: F)
    where
        F: FnMut(&CrosshairValues) + Send + 'static,
    {
        if let Some(instance) = self.instance.as_mut() {
            instance.crosshair = Some(Box::new(callback));
        }
    }

    /// Resizes the live chart if `container` is the one it observes.
    pub fn observe_resize(&mut self, container: Container) {
        if let Some(instance) = self.instance.as_mut()
            && instance.container.id == container.id
        {
            instance.container = container;
            instance.hovered = None;
        }
    }

    /// Moves the crosshair to a plot column and notifies the observer.
    pub fn pointer_moved(&mut self, column: u16) {
        if let Some(instance) = self.instance.as_mut() {
            instance.crosshair_at(column);
        }
    }

    /// Hides the crosshair.
    pub fn pointer_left(&mut self) {
        if let Some(instance) = self.instance.as_mut() {
            instance.hovered = None;
        }
    }

    /// Tears down the live chart, if any.
    pub fn dispose(&mut self) {
        self.instance = None;
    }

    pub fn instance(&self) -> Option<&ChartInstance> {
        self.instance.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rust_decimal_macros::dec;

    use super::*;

    fn bar(time: i64, open: Decimal, close: Decimal, volume: u64) -> Ohlcv {
        Ohlcv {
            time,
            open,
            high: open.max(close) + dec!(1),
            low: open.min(close) - dec!(1),
            close,
            volume,
        }
    }

    fn series() -> Vec<Ohlcv> {
        vec![
            bar(100, dec!(70), dec!(72), 1000),
            bar(200, dec!(72), dec!(71), 3000),
            bar(300, dec!(71), dec!(75), 2000),
        ]
    }

    #[test]
    fn update_without_chart_is_noop() {
        let mut adapter = ChartAdapter::new();
        adapter.update_chart_data(&series());
        assert!(adapter.instance().is_none());
    }

    #[test]
    fn update_replaces_data_and_fits_view() {
        let mut adapter = ChartAdapter::new();
        adapter.init_chart(Container::new("chart", 30, 20));
        adapter.update_chart_data(&series());
        adapter.update_chart_data(&series()[..2]);

        let chart = adapter.instance().unwrap();
        assert_eq!(chart.candles().len(), 2);
        let range = chart.visible_range().unwrap();
        assert_eq!(range.from, 100);
        assert_eq!(range.to, 200);
        assert_eq!(range.price_low, dec!(69));
        assert_eq!(range.price_high, dec!(73));
        assert_eq!(range.volume_high, 3000);
        assert!(chart.volumes()[0].rising);
        assert!(!chart.volumes()[1].rising);
    }

    #[test]
    fn init_replaces_previous_instance_and_subscription() {
        let hits = Arc::new(Mutex::new(0));
        let mut adapter = ChartAdapter::new();
        adapter.init_chart(Container::new("chart", 30, 20));
        let counter = Arc::clone(&hits);
        adapter.subscribe_crosshair(move |_| *counter.lock().unwrap() += 1);

        adapter.init_chart(Container::new("chart", 30, 20));
        adapter.update_chart_data(&series());
        adapter.pointer_moved(0);

        assert_eq!(*hits.lock().unwrap(), 0);
        assert!(adapter.instance().unwrap().hovered().is_some());
    }

    #[test]
    fn crosshair_reports_bar_under_pointer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut adapter = ChartAdapter::new();
        adapter.init_chart(Container::new("chart", 30, 20));
        let sink = Arc::clone(&seen);
        adapter.subscribe_crosshair(move |v| sink.lock().unwrap().push(v.clone()));
        adapter.update_chart_data(&series());

        adapter.pointer_moved(29);
        adapter.pointer_moved(30);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].close, dec!(75));
        assert_eq!(seen[0].volume, 2000);
    }

    #[test]
    fn bar_mapping_spreads_over_width() {
        let mut adapter = ChartAdapter::new();
        adapter.init_chart(Container::new("chart", 6, 20));
        adapter.update_chart_data(&series());
        let chart = adapter.instance().unwrap();

        let bars: Vec<_> = (0..6).map(|c| chart.bar_at(c).unwrap()).collect();
        assert_eq!(bars, [0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn resize_only_applies_to_observed_container() {
        let mut adapter = ChartAdapter::new();
        adapter.init_chart(Container::new("chart", 30, 20));
        adapter.observe_resize(Container::new("other", 10, 10));
        assert_eq!(adapter.instance().unwrap().container().width, 30);

        adapter.observe_resize(Container::new("chart", 50, 12));
        let container = adapter.instance().unwrap().container();
        assert_eq!((container.width, container.height), (50, 12));
    }

    #[test]
    fn volume_takes_bottom_share() {
        let mut adapter = ChartAdapter::new();
        adapter.init_chart(Container::new("chart", 30, 20));
        let chart = adapter.instance().unwrap();
        assert_eq!(chart.volume_rows(), 3);
        assert_eq!(chart.price_rows(), 17);
    }

    #[test]
    fn dispose_drops_instance() {
        let mut adapter = ChartAdapter::new();
        adapter.init_chart(Container::new("chart", 30, 20));
        adapter.dispose();
        assert!(adapter.instance().is_none());
    }
}
