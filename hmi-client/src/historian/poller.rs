/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

use hmi_history_client::{HistoryError, HistoryQuery, HistorySource};
use hmi_types::{Callback, Tag};
use log::{debug, error, info, warn};

use super::{ChartBuffer, ChartSurface, HistorianConfig, PollMode};
use crate::event_bus::EventBus;
use crate::events::HmiEvent;
use crate::platform;

/// What one history request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollStep {
    /// Rows in the response.
    pub received: usize,
    /// Rows that made it onto the chart.
    pub appended: usize,
    /// Whether the tail cursor moved.
    pub advanced: bool,
}

/// Keeps a [`ChartBuffer`] in step with the history endpoint.
///
/// All requests are issued from one sequential task, so at most one is in
/// flight. The tail cursor only moves after a successful response.
pub struct HistorianPoller<H> {
    source: H,
    tags: Vec<Tag>,
    mode: PollMode,
    window_ms: f64,
    chart: ChartBuffer,
    surface: Box<dyn ChartSurface>,
    events: EventBus,
    clock: Callback<(), f64>,
    cursor: Option<f64>,
}

impl<H: HistorySource> HistorianPoller<H> {
    pub fn new(
        source: H,
        config: &HistorianConfig,
        surface: Box<dyn ChartSurface>,
        events: EventBus,
    ) -> Self {
        Self {
            source,
            tags: config.tags(),
            mode: config.poll,
            window_ms: config.window_ms,
            chart: ChartBuffer::new(&config.series),
            surface,
            events,
            clock: Callback::from(|_| platform::now_ms()),
            cursor: None,
        }
    }

    /// Replaces the wall clock (epoch ms).
    pub fn with_clock(mut self, clock: Callback<(), f64>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cursor(&self) -> Option<f64> {
        self.cursor
    }

    pub fn chart(&self) -> &ChartBuffer {
        &self.chart
    }

    /// Loads `[now - window, now]`. In cursor mode this pages until a short
    /// page comes back. The chart is rendered once at the end.
    pub async fn backfill(&mut self) -> Result<PollStep, HistoryError> {
        let now = self.clock.emit(());
        let mut total = PollStep::default();
        match self.mode {
            PollMode::Cursor { limit, .. } => {
                self.cursor = Some(now - self.window_ms);
                loop {
                    let step = self.step(now).await?;
                    total.received += step.received;
                    total.appended += step.appended;
                    total.advanced |= step.advanced;
                    if step.received < limit as usize || !step.advanced {
                        break;
                    }
                }
            }
            PollMode::Range { .. } => {
                self.cursor = None;
                total = self.step(now).await?;
            }
        }
        self.refresh(now);
        info!(
            "Historian backfill: {} rows over {} tags, cursor {:?}",
            total.appended,
            self.tags.len(),
            self.cursor
        );
        Ok(total)
    }

    /// One tail poll: fetch, append, advance, trim, render.
    pub async fn poll_once(&mut self) -> Result<PollStep, HistoryError> {
        let now = self.clock.emit(());
        let step = self.step(now).await?;
        self.refresh(now);
        debug!(
            "Historian poll: {} rows ({} charted), cursor {:?}",
            step.received, step.appended, self.cursor
        );
        Ok(step)
    }

    /// Delay before the next tail poll, given how the last one went.
    pub fn next_delay(&self, last: Option<&PollStep>) -> u32 {
        match self.mode {
            PollMode::Cursor { limit, idle_ms } => match last {
                // A full page means the server has more; catch up now.
                Some(step) if step.received >= limit as usize && step.advanced => 0,
                _ => idle_ms,
            },
            PollMode::Range { interval_ms } => interval_ms,
        }
    }

    /// Backfills, then polls the tail until the task is dropped.
    ///
    /// A failed backfill stops the historian. A failed tail poll is reported
    /// and retried from the same cursor after the idle delay.
    pub async fn run(mut self) {
        if let Err(err) = self.backfill().await {
            error!("Historian backfill failed, not polling: {err}");
            self.events.emit(HmiEvent::HistorianStopped(err.to_string()));
            return;
        }
        let mut delay = self.next_delay(None);
        loop {
            platform::sleep(delay).await;
            let last = match self.poll_once().await {
                Ok(step) => Some(step),
                Err(err) => {
                    warn!("History fetch failed: {err}");
                    self.events
                        .emit(HmiEvent::HistoryFetchFailed(err.to_string()));
                    None
                }
            };
            delay = self.next_delay(last.as_ref());
        }
    }

    async fn step(&mut self, now: f64) -> Result<PollStep, HistoryError> {
        match self.mode {
            PollMode::Cursor { limit, .. } => {
                let query = HistoryQuery::cursor(&self.tags, limit, self.cursor);
                let page = self.source.fetch(&query).await?;
                let appended = self.chart.append_rows(&page.rows);
                let previous = self.cursor;
                if !page.rows.is_empty() {
                    if let Some(next) = page.end.or(page.last_ts()) {
                        self.cursor = Some(never_back(previous, next));
                    }
                }
                Ok(PollStep {
                    received: page.rows.len(),
                    appended,
                    advanced: self.cursor != previous,
                })
            }
            PollMode::Range { .. } => {
                let previous = self.cursor;
                let start = previous.unwrap_or(now - self.window_ms);
                let query = HistoryQuery::range(&self.tags, start, now);
                let page = self.source.fetch(&query).await?;
                let fresh: Vec<_> = match self.cursor {
                    Some(cursor) => page
                        .rows
                        .iter()
                        .filter(|row| row.ts > cursor)
                        .cloned()
                        .collect(),
                    None => page.rows.clone(),
                };
                let appended = self.chart.append_rows(&fresh);
                let next = page
                    .end
                    .or(page.last_ts())
                    .or(query.range_end())
                    .unwrap_or(now);
                self.cursor = Some(never_back(previous, next));
                Ok(PollStep {
                    received: page.rows.len(),
                    appended,
                    advanced: self.cursor != previous,
                })
            }
        }
    }

    fn refresh(&mut self, now: f64) {
        self.chart.trim(now, self.window_ms);
        self.surface.render(&self.chart);
    }
}

fn never_back(previous: Option<f64>, next: f64) -> f64 {
    previous.map_or(next, |previous| previous.max(next))
}
