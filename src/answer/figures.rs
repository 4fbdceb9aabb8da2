//! The narrow image-generation interface. This core never renders pixels;
//! callers hand in a [`FigureRenderer`] and get back captioned, base64
//! figures attached to the answer. A renderer failure skips that figure and
//! is logged; it can never fail the request.

use crate::types::answer::{Figure, MAX_FIGURES};
use crate::types::execute::{ExecuteResult, PointSeries, RegionAggregate};
use thiserror::Error;

/// Error a renderer implementation may return for one figure.
#[derive(Debug, Error)]
#[error("figure rendering failed: {0}")]
pub struct RenderError(pub String);

/// Renders result blocks into base64-encoded PNG payloads.
///
/// Implemented by the presentation layer (plotting stack of its choosing);
/// this core only decides which figures to request and how to caption them.
pub trait FigureRenderer {
    fn render_series(&self, series: &PointSeries) -> Result<String, RenderError>;
    fn render_aggregate(&self, aggregate: &RegionAggregate) -> Result<String, RenderError>;
}

/// Walks an execution result and collects up to [`MAX_FIGURES`] figures:
/// one per point series, then one per regional aggregate. Climatology
/// blocks are multi-panel and stay un-rendered here.
pub fn collect_figures(renderer: &dyn FigureRenderer, result: &ExecuteResult) -> Vec<Figure> {
    let mut figures = Vec::new();
    for series in &result.series {
        if figures.len() == MAX_FIGURES {
            return figures;
        }
        match renderer.render_series(series) {
            Ok(image) => figures.push(Figure {
                variable: series.variable.clone(),
                caption: format!("{} time series", series.variable),
                image,
            }),
            Err(err) => log::warn!("skipping series figure for {}: {err}", series.variable),
        }
    }
    for aggregate in &result.aggregates {
        if figures.len() == MAX_FIGURES {
            return figures;
        }
        match renderer.render_aggregate(aggregate) {
            Ok(image) => figures.push(Figure {
                variable: aggregate.variable.clone(),
                caption: format!("{} mean±IQR (region)", aggregate.variable),
                image,
            }),
            Err(err) => log::warn!("skipping aggregate figure for {}: {err}", aggregate.variable),
        }
    }
    figures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::execute::Aggregation;

    /// Renders a fixed payload, failing for one designated variable.
    struct StubRenderer {
        fail_for: Option<String>,
    }

    impl FigureRenderer for StubRenderer {
        fn render_series(&self, series: &PointSeries) -> Result<String, RenderError> {
            if self.fail_for.as_deref() == Some(series.variable.as_str()) {
                return Err(RenderError("backend exploded".into()));
            }
            Ok(format!("png:{}", series.variable))
        }

        fn render_aggregate(&self, aggregate: &RegionAggregate) -> Result<String, RenderError> {
            Ok(format!("png:{}", aggregate.variable))
        }
    }

    fn result_with(n_series: usize, n_aggregates: usize) -> ExecuteResult {
        ExecuteResult {
            series: (0..n_series)
                .map(|i| PointSeries {
                    variable: format!("var{i}"),
                    ..PointSeries::default()
                })
                .collect(),
            aggregates: (0..n_aggregates)
                .map(|i| RegionAggregate {
                    variable: format!("agg{i}"),
                    unit: String::new(),
                    aggregation: Aggregation::default(),
                })
                .collect(),
            ..ExecuteResult::default()
        }
    }

    #[test]
    fn collects_series_then_aggregates_with_captions() {
        let renderer = StubRenderer { fail_for: None };
        let figures = collect_figures(&renderer, &result_with(1, 1));
        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0].caption, "var0 time series");
        assert_eq!(figures[1].caption, "agg0 mean±IQR (region)");
        assert_eq!(figures[1].image, "png:agg0");
    }

    #[test]
    fn render_failure_skips_the_figure_only() {
        let renderer = StubRenderer {
            fail_for: Some("var0".into()),
        };
        let figures = collect_figures(&renderer, &result_with(2, 0));
        assert_eq!(figures.len(), 1);
        assert_eq!(figures[0].variable, "var1");
    }

    #[test]
    fn caps_at_four_figures() {
        let renderer = StubRenderer { fail_for: None };
        let figures = collect_figures(&renderer, &result_with(3, 3));
        assert_eq!(figures.len(), MAX_FIGURES);
    }
}
