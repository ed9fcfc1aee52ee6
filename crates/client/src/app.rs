//! The watch loop.
//!
//! One task owns every panel. Timer ticks and filter commands start
//! refreshes; each fetch runs in its own spawned task and reports back over
//! an `mpsc` channel tagged with the ticket its panel issued. The panel's
//! [`RefreshGate`] decides whether the result is still wanted. The summary
//! card refreshes alongside the panels and prints a single status line.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use popdash_core::areas::is_known_area;
use popdash_core::change::{percentage_change, PopulationSummary};
use popdash_core::chart::{ChartInstance, ChartRenderer};
use popdash_core::error::CoreError;
use popdash_core::refresh::{RefreshGate, RefreshTicket, RefreshTrigger};
use popdash_core::rows::{AreaNowRow, PopulationDetail};
use popdash_core::series::{regroup, snapshot, ChartData};
use popdash_core::window::TimeWindow;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api::DashboardClient;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::filter::{DashboardFilter, FilterCommand};
use crate::render::TerminalRenderer;

/// Fetch results waiting to be applied.
const FETCH_CHANNEL_CAPACITY: usize = 16;

/// Label of the single column in the current-population panel.
const AREA_NOW_LABEL: &str = "latest";

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// What a panel plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// Population per area, from `/api/population/by-area`.
    Population,
    /// Peak payment per category, from `/api/data`.
    Payments,
    /// Midpoint of the min/max estimates per area, from the `totalData`
    /// section of `/api/population/detail`.
    Detail,
    /// Latest population per area, from `/api/population/area-now`.
    AreaNow,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Population,
        PanelKind::Payments,
        PanelKind::Detail,
        PanelKind::AreaNow,
    ];

    pub fn canvas(self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::Payments => "payments",
            Self::Detail => "population-detail",
            Self::AreaNow => "area-now",
        }
    }
}

/// One chart plus the gate that serializes its refreshes.
pub struct Panel<R: ChartRenderer> {
    kind: PanelKind,
    chart: ChartInstance<R>,
    gate: RefreshGate,
}

impl<R: ChartRenderer> Panel<R> {
    pub fn new(kind: PanelKind, renderer: R) -> Self {
        Self {
            kind,
            chart: ChartInstance::new(kind.canvas(), renderer),
            gate: RefreshGate::new(),
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn chart(&self) -> &ChartInstance<R> {
        &self.chart
    }

    /// Ask for a refresh. `None` means a timer tick was coalesced.
    pub fn begin(&mut self, trigger: RefreshTrigger) -> Option<RefreshTicket> {
        self.gate.begin(trigger)
    }

    /// Apply a finished fetch. Returns `false` if it was superseded.
    ///
    /// A failed fetch keeps whatever is on screen and only updates the
    /// status line.
    pub fn apply(&mut self, ticket: RefreshTicket, result: Result<ChartData, ClientError>) -> bool {
        if !self.gate.complete(ticket) {
            tracing::debug!(
                canvas = self.kind.canvas(),
                ticket = ticket.sequence(),
                "Dropping superseded refresh"
            );
            return false;
        }

        match result {
            Ok(data) => {
                if let Err(e) = self.chart.render(&data) {
                    tracing::warn!(canvas = self.kind.canvas(), error = %e, "Chart render failed");
                }
            }
            Err(e) => {
                tracing::warn!(canvas = self.kind.canvas(), error = %e, "Refresh failed");
                self.chart.mark_failed(e.to_string());
            }
        }
        tracing::info!(canvas = self.kind.canvas(), status = %self.chart.status(), "Panel updated");
        true
    }

    pub fn destroy(&mut self) {
        self.chart.destroy();
    }
}

// ---------------------------------------------------------------------------
// Summary card
// ---------------------------------------------------------------------------

/// Latest-hour versus previous-hour population, shown as one line.
#[derive(Debug, Default)]
pub struct SummaryCard {
    gate: RefreshGate,
    last: Option<PopulationSummary>,
    failure: Option<String>,
}

impl SummaryCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, trigger: RefreshTrigger) -> Option<RefreshTicket> {
        self.gate.begin(trigger)
    }

    /// Apply a finished fetch. Returns `false` if it was superseded.
    ///
    /// A failed fetch keeps the last figures and notes the failure.
    pub fn apply(
        &mut self,
        ticket: RefreshTicket,
        result: Result<PopulationSummary, ClientError>,
    ) -> bool {
        if !self.gate.complete(ticket) {
            return false;
        }
        match result {
            Ok(summary) => {
                self.last = Some(summary);
                self.failure = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Summary refresh failed");
                self.failure = Some(e.to_string());
            }
        }
        true
    }

    /// Status line, e.g. `summary: 150 now, 100 an hour earlier, change +50.0%`.
    pub fn line(&self) -> String {
        let mut line = match &self.last {
            Some(summary) => format!(
                "summary: {} now, {} an hour earlier, change {}",
                headcount(summary.current),
                headcount(summary.previous),
                percentage_change(summary.previous, summary.current).label(),
            ),
            None => "summary: no data yet".to_string(),
        };
        if let Some(reason) = &self.failure {
            line.push_str(&format!(" (failed to load: {reason})"));
        }
        line
    }
}

fn headcount(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.0}"))
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// A fetch result tagged with who asked for it and the ticket they issued.
#[derive(Debug)]
pub enum FetchOutcome {
    Chart {
        kind: PanelKind,
        ticket: RefreshTicket,
        result: Result<ChartData, ClientError>,
    },
    Summary {
        ticket: RefreshTicket,
        result: Result<PopulationSummary, ClientError>,
    },
}

/// Fetch and regroup the rows for one panel.
pub async fn fetch(
    client: &DashboardClient,
    kind: PanelKind,
    filter: &DashboardFilter,
) -> Result<ChartData, ClientError> {
    let data = match kind {
        PanelKind::Population => regroup(&client.population_by_area(filter).await?)?,
        PanelKind::Payments => regroup(&client.category_peaks(filter).await?)?,
        PanelKind::Detail => detail_chart(&client.population_detail(filter).await?)?,
        PanelKind::AreaNow => area_now_chart(&client.area_now().await?, filter),
    };
    Ok(data)
}

/// Chart of the whole detail window, one series per area.
pub fn detail_chart(detail: &PopulationDetail) -> Result<ChartData, CoreError> {
    regroup(&detail.total_data)
}

/// One column holding each area's latest count. The endpoint has no area
/// parameter, so the area filter is applied here.
pub fn area_now_chart(rows: &[AreaNowRow], filter: &DashboardFilter) -> ChartData {
    snapshot(
        AREA_NOW_LABEL,
        rows.iter()
            .filter(|row| filter.includes_area(&row.area_nm))
            .map(|row| (row.area_nm.as_str(), row.cnt)),
    )
}

fn refresh_all<R: ChartRenderer>(
    panels: &mut [Panel<R>],
    summary: &mut SummaryCard,
    trigger: RefreshTrigger,
    client: &DashboardClient,
    filter: &DashboardFilter,
    tx: &mpsc::Sender<FetchOutcome>,
) {
    for panel in panels.iter_mut() {
        let Some(ticket) = panel.begin(trigger) else {
            tracing::debug!(canvas = panel.kind.canvas(), "Refresh in flight, tick coalesced");
            continue;
        };

        let kind = panel.kind;
        let client = client.clone();
        let filter = filter.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = fetch(&client, kind, &filter).await;
            if tx.send(FetchOutcome::Chart { kind, ticket, result }).await.is_err() {
                tracing::debug!(canvas = kind.canvas(), "Watch loop gone, discarding result");
            }
        });
    }

    if let Some(ticket) = summary.begin(trigger) {
        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.population_summary().await;
            if tx.send(FetchOutcome::Summary { ticket, result }).await.is_err() {
                tracing::debug!("Watch loop gone, discarding summary");
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Watch loop
// ---------------------------------------------------------------------------

/// Run the dashboard until `cancel` fires, stdin says `quit`, or setup fails.
pub async fn run(config: ClientConfig, cancel: CancellationToken) -> Result<(), ClientError> {
    let client = DashboardClient::new(&config)?;
    let mut filter = DashboardFilter::new(TimeWindow::new(config.window_hours)?, config.area.as_deref());

    let mut panels: Vec<Panel<TerminalRenderer<Stdout>>> = PanelKind::ALL
        .into_iter()
        .map(|kind| Panel::new(kind, TerminalRenderer::new(io::stdout())))
        .collect();
    let mut summary = SummaryCard::new();

    let (tx, mut rx) = mpsc::channel::<FetchOutcome>(FETCH_CHANNEL_CAPACITY);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    // The first tick completes immediately and performs the initial load.
    let mut interval = tokio::time::interval(Duration::from_secs(config.refresh_secs.max(1)));

    tracing::info!(
        api = client.base_url(),
        refresh_secs = config.refresh_secs,
        hours = filter.window.hours(),
        "Dashboard started"
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Dashboard stopping");
                break;
            }
            _ = interval.tick() => {
                refresh_all(&mut panels, &mut summary, RefreshTrigger::Timer, &client, &filter, &tx);
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match FilterCommand::parse(&line) {
                    Ok(Some(FilterCommand::Quit)) => break,
                    Ok(Some(command)) => {
                        if let FilterCommand::SetAreas(areas) = &command {
                            for area in areas.iter().filter(|a| !is_known_area(a)) {
                                tracing::warn!(area = %area, "Not a monitored area, it will match no rows");
                            }
                        }
                        let changed = filter.apply(&command);
                        if changed || command == FilterCommand::Refresh {
                            tracing::info!(
                                hours = filter.window.hours(),
                                areas = ?filter.areas,
                                "Filter changed, refreshing"
                            );
                            refresh_all(
                                &mut panels,
                                &mut summary,
                                RefreshTrigger::FilterChange,
                                &client,
                                &filter,
                                &tx,
                            );
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!(error = %e, "Ignoring input"),
                },
                Ok(None) => {
                    tracing::debug!("stdin closed, timer refresh only");
                    stdin_open = false;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed, timer refresh only");
                    stdin_open = false;
                }
            },
            Some(outcome) = rx.recv() => match outcome {
                FetchOutcome::Chart { kind, ticket, result } => {
                    if let Some(panel) = panels.iter_mut().find(|p| p.kind == kind) {
                        panel.apply(ticket, result);
                    }
                }
                FetchOutcome::Summary { ticket, result } => {
                    if summary.apply(ticket, result) {
                        if let Err(e) = writeln!(io::stdout().lock(), "{}", summary.line()) {
                            tracing::warn!(error = %e, "Summary write failed");
                        }
                    }
                }
            },
        }
    }

    for panel in &mut panels {
        panel.destroy();
    }
    Ok(())
}
