use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;
use crate::indicators::parser::parse_moving_average_label;
use crate::models::candle::Candle;
use crate::models::signal::SignalEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovingAverageKind {
    Simple,
    Exponential,
}

/// One requested moving average.
///
/// Deserializes from either `{"kind": "simple", "period": 20}` or a
/// dashboard label such as `"MA20"` / `"EMA12"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MovingAverageRepr")]
pub struct MovingAverageSpec {
    pub kind: MovingAverageKind,
    pub period: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MovingAverageRepr {
    Label(String),
    Spec { kind: MovingAverageKind, period: usize },
}

impl TryFrom<MovingAverageRepr> for MovingAverageSpec {
    type Error = IndicatorError;

    fn try_from(repr: MovingAverageRepr) -> Result<Self, Self::Error> {
        match repr {
            MovingAverageRepr::Label(label) => parse_moving_average_label(&label),
            MovingAverageRepr::Spec { kind, period } => Ok(Self { kind, period }),
        }
    }
}

impl MovingAverageSpec {
    pub fn simple(period: usize) -> Self {
        Self {
            kind: MovingAverageKind::Simple,
            period,
        }
    }

    pub fn exponential(period: usize) -> Self {
        Self {
            kind: MovingAverageKind::Exponential,
            period,
        }
    }

    /// Dashboard label, also the key used for line styles (`MA20`, `EMA12`).
    pub fn label(&self) -> String {
        match self.kind {
            MovingAverageKind::Simple => format!("MA{}", self.period),
            MovingAverageKind::Exponential => format!("EMA{}", self.period),
        }
    }

    pub fn column_name(&self) -> String {
        match self.kind {
            MovingAverageKind::Simple => format!("MA_{}", self.period),
            MovingAverageKind::Exponential => format!("EMA_{}", self.period),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    pub period: usize,
    pub mult: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: 20,
            mult: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// `smooth_k = 1` gives the raw %K line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticParams {
    pub k: usize,
    pub d: usize,
    pub smooth_k: usize,
}

impl Default for StochasticParams {
    fn default() -> Self {
        Self {
            k: 14,
            d: 3,
            smooth_k: 1,
        }
    }
}

/// LazyBear squeeze momentum parameters.
///
/// `kc_mult` is also the Bollinger deviation multiplier. Sharing it is how the
/// reference indicator is defined; splitting it into two independent
/// multipliers changes which bars count as a squeeze.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqueezeParams {
    pub bb_length: usize,
    pub kc_length: usize,
    pub kc_mult: f64,
    pub use_true_range: bool,
}

impl Default for SqueezeParams {
    fn default() -> Self {
        Self {
            bb_length: 20,
            kc_length: 20,
            kc_mult: 1.5,
            use_true_range: true,
        }
    }
}

/// Which rule produces Sell markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellRule {
    /// Squeeze fired with negative, falling momentum (mirror of the Buy rule).
    #[default]
    SqueezeFired,
    /// Momentum crossing down through zero, regardless of squeeze state.
    ZeroCross,
}

/// An indicator switch: `true`/`false`, or a parameter object that implies
/// `true`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Toggle<T> {
    Flag(bool),
    With(T),
}

impl<T> Default for Toggle<T> {
    fn default() -> Self {
        Toggle::Flag(false)
    }
}

impl<T: Default + Clone> Toggle<T> {
    /// Effective parameters, or `None` when the indicator is off.
    pub fn resolve(&self) -> Option<T> {
        match self {
            Toggle::Flag(true) => Some(T::default()),
            Toggle::Flag(false) => None,
            Toggle::With(params) => Some(params.clone()),
        }
    }
}

/// Which indicators to compute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub moving_averages: Vec<MovingAverageSpec>,
    pub bbands: Toggle<BollingerParams>,
    pub rsi: Toggle<RsiParams>,
    pub macd: Toggle<MacdParams>,
    pub stochastic: Toggle<StochasticParams>,
    pub squeeze: Toggle<SqueezeParams>,
    pub sell_rule: SellRule,
}

impl IndicatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_moving_average(mut self, spec: MovingAverageSpec) -> Self {
        self.moving_averages.push(spec);
        self
    }

    pub fn with_bbands(mut self, params: BollingerParams) -> Self {
        self.bbands = Toggle::With(params);
        self
    }

    pub fn with_rsi(mut self, params: RsiParams) -> Self {
        self.rsi = Toggle::With(params);
        self
    }

    pub fn with_macd(mut self, params: MacdParams) -> Self {
        self.macd = Toggle::With(params);
        self
    }

    pub fn with_stochastic(mut self, params: StochasticParams) -> Self {
        self.stochastic = Toggle::With(params);
        self
    }

    pub fn with_squeeze(mut self, params: SqueezeParams) -> Self {
        self.squeeze = Toggle::With(params);
        self
    }

    pub fn with_sell_rule(mut self, rule: SellRule) -> Self {
        self.sell_rule = rule;
        self
    }

    /// Everything on with default parameters, plus the dashboard's MA set.
    pub fn all_defaults() -> Self {
        Self {
            moving_averages: [5, 20, 60, 120]
                .iter()
                .map(|&p| MovingAverageSpec::simple(p))
                .collect(),
            bbands: Toggle::Flag(true),
            rsi: Toggle::Flag(true),
            macd: Toggle::Flag(true),
            stochastic: Toggle::Flag(true),
            squeeze: Toggle::Flag(true),
            sell_rule: SellRule::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageSeries {
    pub spec: MovingAverageSpec,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerSeries {
    pub params: BollingerParams,
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiSeries {
    pub params: RsiParams,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub params: MacdParams,
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StochasticSeries {
    pub params: StochasticParams,
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

/// Volatility regime of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqueezeState {
    /// Bollinger envelope strictly inside the Keltner envelope.
    On,
    /// Bollinger envelope strictly contains the Keltner envelope.
    Off,
    Neither,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqueezeSeries {
    pub params: SqueezeParams,
    pub bb_upper: Vec<Option<f64>>,
    pub bb_lower: Vec<Option<f64>>,
    pub kc_upper: Vec<Option<f64>>,
    pub kc_lower: Vec<Option<f64>>,
    pub state: Vec<Option<SqueezeState>>,
    pub momentum: Vec<Option<f64>>,
}

/// One computed indicator. Consumers match on the variant instead of probing
/// column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorOutput {
    MovingAverage(MovingAverageSeries),
    Bollinger(BollingerSeries),
    Rsi(RsiSeries),
    Macd(MacdSeries),
    Stochastic(StochasticSeries),
    Squeeze(SqueezeSeries),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Flag(Vec<Option<bool>>),
}

/// A named column of an augmented series, for table-shaped consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    fn numeric(name: impl Into<String>, values: &[Option<f64>]) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Numeric(values.to_vec()),
        }
    }

    fn flag(name: impl Into<String>, values: Vec<Option<bool>>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Flag(values),
        }
    }
}

fn state_flags(states: &[Option<SqueezeState>], wanted: SqueezeState) -> Vec<Option<bool>> {
    states.iter().map(|s| s.map(|s| s == wanted)).collect()
}

impl IndicatorOutput {
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorOutput::MovingAverage(_) => "moving_average",
            IndicatorOutput::Bollinger(_) => "bollinger",
            IndicatorOutput::Rsi(_) => "rsi",
            IndicatorOutput::Macd(_) => "macd",
            IndicatorOutput::Stochastic(_) => "stochastic",
            IndicatorOutput::Squeeze(_) => "squeeze",
        }
    }

    pub fn columns(&self) -> Vec<Column> {
        match self {
            IndicatorOutput::MovingAverage(ma) => {
                vec![Column::numeric(ma.spec.column_name(), &ma.values)]
            }
            IndicatorOutput::Bollinger(bb) => {
                let suffix = format!("{}_{:.1}", bb.params.period, bb.params.mult);
                vec![
                    Column::numeric(format!("BBL_{}", suffix), &bb.lower),
                    Column::numeric(format!("BBM_{}", suffix), &bb.middle),
                    Column::numeric(format!("BBU_{}", suffix), &bb.upper),
                ]
            }
            IndicatorOutput::Rsi(rsi) => {
                vec![Column::numeric(format!("RSI_{}", rsi.params.period), &rsi.values)]
            }
            IndicatorOutput::Macd(m) => {
                let suffix = format!("{}_{}_{}", m.params.fast, m.params.slow, m.params.signal);
                vec![
                    Column::numeric(format!("MACD_{}", suffix), &m.macd),
                    Column::numeric(format!("MACDh_{}", suffix), &m.histogram),
                    Column::numeric(format!("MACDs_{}", suffix), &m.signal),
                ]
            }
            IndicatorOutput::Stochastic(s) => {
                let suffix = format!("{}_{}_{}", s.params.k, s.params.d, s.params.smooth_k);
                vec![
                    Column::numeric(format!("STOCHk_{}", suffix), &s.k),
                    Column::numeric(format!("STOCHd_{}", suffix), &s.d),
                ]
            }
            IndicatorOutput::Squeeze(sq) => vec![
                Column::numeric("BBU_SQZ", &sq.bb_upper),
                Column::numeric("BBL_SQZ", &sq.bb_lower),
                Column::numeric("KCU_SQZ", &sq.kc_upper),
                Column::numeric("KCL_SQZ", &sq.kc_lower),
                Column::flag("SQZ_ON", state_flags(&sq.state, SqueezeState::On)),
                Column::flag("SQZ_OFF", state_flags(&sq.state, SqueezeState::Off)),
                Column::flag("SQZ_NO", state_flags(&sq.state, SqueezeState::Neither)),
                Column::numeric("SQZ_VAL", &sq.momentum),
            ],
        }
    }

    fn tail(&self, start: usize) -> Self {
        fn cut<T: Clone>(values: &[T], start: usize) -> Vec<T> {
            values[start.min(values.len())..].to_vec()
        }

        match self {
            IndicatorOutput::MovingAverage(ma) => IndicatorOutput::MovingAverage(MovingAverageSeries {
                spec: ma.spec,
                values: cut(&ma.values, start),
            }),
            IndicatorOutput::Bollinger(bb) => IndicatorOutput::Bollinger(BollingerSeries {
                params: bb.params,
                upper: cut(&bb.upper, start),
                middle: cut(&bb.middle, start),
                lower: cut(&bb.lower, start),
            }),
            IndicatorOutput::Rsi(rsi) => IndicatorOutput::Rsi(RsiSeries {
                params: rsi.params,
                values: cut(&rsi.values, start),
            }),
            IndicatorOutput::Macd(m) => IndicatorOutput::Macd(MacdSeries {
                params: m.params,
                macd: cut(&m.macd, start),
                signal: cut(&m.signal, start),
                histogram: cut(&m.histogram, start),
            }),
            IndicatorOutput::Stochastic(s) => IndicatorOutput::Stochastic(StochasticSeries {
                params: s.params,
                k: cut(&s.k, start),
                d: cut(&s.d, start),
            }),
            IndicatorOutput::Squeeze(sq) => IndicatorOutput::Squeeze(SqueezeSeries {
                params: sq.params,
                bb_upper: cut(&sq.bb_upper, start),
                bb_lower: cut(&sq.bb_lower, start),
                kc_upper: cut(&sq.kc_upper, start),
                kc_lower: cut(&sq.kc_lower, start),
                state: cut(&sq.state, start),
                momentum: cut(&sq.momentum, start),
            }),
        }
    }
}

/// Input candles plus every requested indicator, row-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedSeries {
    pub candles: Vec<Candle>,
    pub indicators: Vec<IndicatorOutput>,
    /// Present when the squeeze indicator was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signals: Option<Vec<Option<SignalEvent>>>,
}

impl AugmentedSeries {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self {
            candles,
            indicators: Vec::new(),
            signals: None,
        }
    }

    pub fn with_indicator(mut self, output: IndicatorOutput) -> Self {
        self.indicators.push(output);
        self
    }

    pub fn with_signals(mut self, signals: Vec<Option<SignalEvent>>) -> Self {
        self.signals = Some(signals);
        self
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn moving_average(&self, spec: MovingAverageSpec) -> Option<&MovingAverageSeries> {
        self.indicators.iter().find_map(|i| match i {
            IndicatorOutput::MovingAverage(ma) if ma.spec == spec => Some(ma),
            _ => None,
        })
    }

    pub fn moving_averages(&self) -> impl Iterator<Item = &MovingAverageSeries> {
        self.indicators.iter().filter_map(|i| match i {
            IndicatorOutput::MovingAverage(ma) => Some(ma),
            _ => None,
        })
    }

    pub fn bollinger(&self) -> Option<&BollingerSeries> {
        self.indicators.iter().find_map(|i| match i {
            IndicatorOutput::Bollinger(bb) => Some(bb),
            _ => None,
        })
    }

    pub fn rsi(&self) -> Option<&RsiSeries> {
        self.indicators.iter().find_map(|i| match i {
            IndicatorOutput::Rsi(rsi) => Some(rsi),
            _ => None,
        })
    }

    pub fn macd(&self) -> Option<&MacdSeries> {
        self.indicators.iter().find_map(|i| match i {
            IndicatorOutput::Macd(m) => Some(m),
            _ => None,
        })
    }

    pub fn stochastic(&self) -> Option<&StochasticSeries> {
        self.indicators.iter().find_map(|i| match i {
            IndicatorOutput::Stochastic(s) => Some(s),
            _ => None,
        })
    }

    pub fn squeeze(&self) -> Option<&SqueezeSeries> {
        self.indicators.iter().find_map(|i| match i {
            IndicatorOutput::Squeeze(sq) => Some(sq),
            _ => None,
        })
    }

    pub fn signals(&self) -> Option<&[Option<SignalEvent>]> {
        self.signals.as_deref()
    }

    /// Rows carrying a Buy or Sell marker, with their candle.
    pub fn signal_events(&self) -> Vec<(&Candle, SignalEvent)> {
        match &self.signals {
            Some(signals) => self
                .candles
                .iter()
                .zip(signals)
                .filter_map(|(candle, event)| event.map(|e| (candle, e)))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn columns(&self) -> Vec<Column> {
        self.indicators.iter().flat_map(|i| i.columns()).collect()
    }

    /// The trailing `limit` rows of every column.
    pub fn tail(&self, limit: usize) -> Self {
        let start = self.candles.len().saturating_sub(limit);
        Self {
            candles: self.candles[start..].to_vec(),
            indicators: self.indicators.iter().map(|i| i.tail(start)).collect(),
            signals: self.signals.as_ref().map(|s| s[start.min(s.len())..].to_vec()),
        }
    }
}
