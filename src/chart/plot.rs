//! Declarative chart description handed to the renderer.
//!
//! Nothing here draws. A [`PlotSpec`] says which values go on which panel and
//! how they look; the rendering side maps it onto its plotting library.

use chrono::NaiveDate;
use serde::Serialize;

use crate::chart::style::ChartStyle;
use crate::indicators::registry::{IndicatorKind, Placement};
use crate::models::indicators::{AugmentedSeries, IndicatorOutput, SqueezeState};
use crate::models::signal::SignalKind;
use crate::signals::{momentum_bars, MomentumBar};

const PRICE_PANEL: usize = 0;
const VOLUME_PANEL: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Line,
    Bar,
    Scatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    TriangleUp,
    TriangleDown,
    Cross,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub index: usize,
    pub title: String,
    pub ratio: f64,
}

/// One plotted sequence, row-aligned with [`PlotSpec::dates`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub label: Option<String>,
    pub panel: usize,
    pub kind: TraceKind,
    pub color: String,
    pub linewidth: f64,
    pub linestyle: String,
    pub alpha: f64,
    pub marker: Option<Marker>,
    pub values: Vec<Option<f64>>,
}

impl Trace {
    fn new(panel: usize, kind: TraceKind, color: &str, values: Vec<Option<f64>>) -> Self {
        Self {
            label: None,
            panel,
            kind,
            color: color.to_string(),
            linewidth: 1.0,
            linestyle: "-".to_string(),
            alpha: 1.0,
            marker: None,
            values,
        }
    }

    fn line(panel: usize, color: &str, values: &[Option<f64>]) -> Self {
        Self::new(panel, TraceKind::Line, color, values.to_vec())
    }

    fn bar(panel: usize, color: &str, values: Vec<Option<f64>>) -> Self {
        Self::new(panel, TraceKind::Bar, color, values)
    }

    fn scatter(panel: usize, color: &str, marker: Marker, values: Vec<Option<f64>>) -> Self {
        let mut trace = Self::new(panel, TraceKind::Scatter, color, values);
        trace.marker = Some(marker);
        trace
    }

    fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn dashed(mut self) -> Self {
        self.linestyle = "--".to_string();
        self
    }

    fn width(mut self, linewidth: f64) -> Self {
        self.linewidth = linewidth;
        self
    }

    fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Shaded area between two price-panel series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fill {
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
    pub color: String,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub title: String,
    pub dates: Vec<NaiveDate>,
    pub panels: Vec<Panel>,
    pub traces: Vec<Trace>,
    pub fill: Option<Fill>,
    pub show_legend: bool,
}

fn zero_marker(states: &[Option<SqueezeState>], wanted: SqueezeState) -> Vec<Option<f64>> {
    states
        .iter()
        .map(|s| (*s == Some(wanted)).then_some(0.0))
        .collect()
}

impl PlotSpec {
    /// Lay out `series`: price (panel 0, with overlays and signal markers),
    /// volume (panel 1), then one panel per oscillator in RSI, MACD,
    /// Stochastic, Squeeze order.
    pub fn build(series: &AugmentedSeries, style: &ChartStyle, title: &str) -> Self {
        let mut spec = Self {
            title: title.to_string(),
            dates: series.candles.iter().map(|c| c.date).collect(),
            panels: vec![
                Panel {
                    index: PRICE_PANEL,
                    title: "Price".to_string(),
                    ratio: 3.0,
                },
                Panel {
                    index: VOLUME_PANEL,
                    title: "Volume".to_string(),
                    ratio: 1.0,
                },
            ],
            traces: Vec::new(),
            fill: None,
            show_legend: false,
        };

        for kind in IndicatorKind::all() {
            for output in series.indicators.iter().filter(|o| o.kind() == kind) {
                match kind.placement() {
                    Placement::Overlay => spec.add_overlay(output, style),
                    Placement::Panel => {
                        let panel = spec.push_panel(output);
                        spec.add_panel_traces(output, panel);
                    }
                }
            }
        }

        spec.add_signal_markers(series);
        spec
    }

    pub fn panel_ratios(&self) -> Vec<f64> {
        self.panels.iter().map(|p| p.ratio).collect()
    }

    pub fn traces_on(&self, panel: usize) -> impl Iterator<Item = &Trace> {
        self.traces.iter().filter(move |t| t.panel == panel)
    }

    fn push_panel(&mut self, output: &IndicatorOutput) -> usize {
        let title = match output {
            IndicatorOutput::Rsi(rsi) => format!("RSI({})", rsi.params.period),
            other => other.kind().name().to_string(),
        };
        let index = self.panels.len();
        self.panels.push(Panel {
            index,
            title,
            ratio: 1.5,
        });
        index
    }

    fn add_overlay(&mut self, output: &IndicatorOutput, style: &ChartStyle) {
        match output {
            IndicatorOutput::MovingAverage(ma) => {
                let label = ma.spec.label();
                let line = style.line_for(&label);
                let mut trace = Trace::line(PRICE_PANEL, &line.color, &ma.values)
                    .labelled(label)
                    .width(line.linewidth);
                trace.linestyle = line.linestyle;
                self.traces.push(trace);
                self.show_legend = true;
            }
            IndicatorOutput::Bollinger(bb) => {
                self.traces
                    .push(Trace::line(PRICE_PANEL, "grey", &bb.upper).dashed().width(0.7));
                self.traces
                    .push(Trace::line(PRICE_PANEL, "grey", &bb.lower).dashed().width(0.7));
                self.fill = Some(Fill {
                    upper: bb.upper.clone(),
                    lower: bb.lower.clone(),
                    color: "grey".to_string(),
                    alpha: 0.2,
                });
            }
            _ => {}
        }
    }

    fn add_panel_traces(&mut self, output: &IndicatorOutput, panel: usize) {
        match output {
            IndicatorOutput::Rsi(rsi) => {
                self.traces.push(Trace::line(panel, "green", &rsi.values));
            }
            IndicatorOutput::Macd(m) => {
                self.traces
                    .push(Trace::line(panel, "blue", &m.macd).labelled("MACD"));
                self.traces
                    .push(Trace::line(panel, "red", &m.signal).dashed());
                self.traces
                    .push(Trace::bar(panel, "gray", m.histogram.clone()).alpha(0.5));
            }
            IndicatorOutput::Stochastic(s) => {
                self.traces.push(Trace::line(panel, "blue", &s.k));
                self.traces.push(Trace::line(panel, "red", &s.d).dashed());
            }
            IndicatorOutput::Squeeze(sq) => {
                let bars = momentum_bars(&sq.momentum);
                let buckets = [
                    (MomentumBar::PositiveRising, "lightgreen"),
                    (MomentumBar::PositiveFalling, "darkgreen"),
                    (MomentumBar::NegativeRising, "lightcoral"),
                    (MomentumBar::NegativeFalling, "darkred"),
                ];
                for (bucket, color) in buckets {
                    let values = sq
                        .momentum
                        .iter()
                        .zip(&bars)
                        .map(|(v, bar)| if *bar == Some(bucket) { *v } else { None })
                        .collect();
                    self.traces.push(Trace::bar(panel, color, values));
                }
                self.traces.push(Trace::scatter(
                    panel,
                    "black",
                    Marker::Cross,
                    zero_marker(&sq.state, SqueezeState::On),
                ));
                self.traces.push(Trace::scatter(
                    panel,
                    "green",
                    Marker::Cross,
                    zero_marker(&sq.state, SqueezeState::Off),
                ));
            }
            _ => {}
        }
    }

    fn add_signal_markers(&mut self, series: &AugmentedSeries) {
        let Some(signals) = series.signals() else {
            return;
        };

        let prices_for = |kind: SignalKind| -> Vec<Option<f64>> {
            signals
                .iter()
                .map(|s| match s {
                    Some(event) if event.kind == kind => Some(event.price),
                    _ => None,
                })
                .collect()
        };
        let buys = prices_for(SignalKind::Buy);
        let sells = prices_for(SignalKind::Sell);

        if buys.iter().any(Option::is_some) {
            self.traces.push(
                Trace::scatter(PRICE_PANEL, "lime", Marker::TriangleUp, buys)
                    .labelled("Buy Signal"),
            );
            self.show_legend = true;
        }
        if sells.iter().any(Option::is_some) {
            self.traces.push(
                Trace::scatter(PRICE_PANEL, "red", Marker::TriangleDown, sells)
                    .labelled("Sell Signal"),
            );
            self.show_legend = true;
        }
    }
}
