//! Inputs for the chart renderer: line styles and the plot layout.

pub mod plot;
pub mod style;

pub use plot::{Fill, Marker, Panel, PlotSpec, Trace, TraceKind};
pub use style::{ChartStyle, LineStyle, StyleError};
