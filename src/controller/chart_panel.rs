//! The chart section shared by both pages.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error};

use super::{Effect, RequestSeq};
use crate::Result;
use crate::chart::{ChartAdapter, Container};
use crate::models::ChartData;
use crate::render::{ChartReadout, ChartStats, NodeIds, StatItem, render_chart_stats};

/// Anchor name of the chart container on both pages.
pub const CHART_CONTAINER: &str = "chartContainer";

/// Chart, stats panel, and crosshair readout of one page.
///
/// Each load recreates the chart and issues a new sequence number; only the
/// response to the newest load is drawn.
#[derive(Debug)]
pub struct ChartPanel {
    adapter: ChartAdapter,
    seq: RequestSeq,
    /// Symbol of the newest load.
    symbol: String,
    size: (u16, u16),
    readout: Arc<Mutex<ChartReadout>>,
    stats: Vec<StatItem>,
}

impl ChartPanel {
    pub fn new(size: (u16, u16), ids: &mut NodeIds) -> Self {
        Self {
            adapter: ChartAdapter::new(),
            seq: RequestSeq::new(),
            symbol: String::new(),
            size,
            readout: Arc::new(Mutex::new(ChartReadout::new(ids))),
            stats: Vec::new(),
        }
    }

    fn container(&self) -> Container {
        Container::new(CHART_CONTAINER, self.size.0, self.size.1)
    }

    /// Recreates the chart and returns the fetch for `symbol` over `days`.
    pub fn load(&mut self, symbol: &str, days: u32) -> Effect {
        self.adapter.init_chart(self.container());

        let readout = Arc::clone(&self.readout);
        self.adapter.subscribe_crosshair(move |values| {
            readout
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .apply(values);
        });

        self.symbol = symbol.to_string();
        Effect::FetchChart {
            seq: self.seq.next(),
            symbol: self.symbol.clone(),
            days,
        }
    }

    /// Draws a chart response if it answers the newest load.
    ///
    /// Returns the data that was drawn.
    pub fn apply(
        &mut self,
        seq: u64,
        result: Result<ChartData>,
        ids: &mut NodeIds,
    ) -> Option<ChartData> {
        if !self.seq.is_latest(seq) {
            debug!(seq, "discarding superseded chart response");
            return None;
        }

        match result {
            Ok(data) => {
                self.adapter.update_chart_data(&data.data);
                self.stats = render_chart_stats(ChartStats::compute(&data.data).as_ref(), ids);
                Some(data)
            }
            Err(e) => {
                error!(symbol = %self.symbol, "failed to load chart: {e}");
                None
            }
        }
    }

    pub fn pointer_moved(&mut self, column: u16) {
        self.adapter.pointer_moved(column);
    }

    pub fn pointer_left(&mut self) {
        self.adapter.pointer_left();
    }

    /// Tracks a new plot size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.adapter.observe_resize(self.container());
    }

    pub fn adapter(&self) -> &ChartAdapter {
        &self.adapter
    }

    pub fn stats(&self) -> &[StatItem] {
        &self.stats
    }

    /// Snapshot of the crosshair readout.
    pub fn readout(&self) -> ChartReadout {
        self.readout
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for ChartPanel {
    fn drop(&mut self) {
        self.adapter.dispose();
    }
}
