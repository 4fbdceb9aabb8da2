//! This module provides the main entry point for turning weather query
//! results into structured answers. A [`MeteoWriter`] bundles the resolver,
//! capability filter, summarizers and answer assembly behind builder-style
//! methods; every operation is a pure transformation over the inputs handed
//! in, so one writer can serve any number of concurrent queries.

use crate::answer::assemble::{assemble_answer, assemble_with_generator};
use crate::answer::figures::FigureRenderer;
use crate::answer::generate::TextGenerator;
use crate::export::record::DatasetRecord;
use crate::summary::group::{summarize_grouped, GroupKey};
use crate::summary::series::{summarize_point_series, SeriesSummary, DEFAULT_SPARSE_THRESHOLD};
use crate::types::answer::StructuredAnswer;
use crate::types::execute::{ExecuteResult, PointSeries};
use crate::types::plan::Plan;
use crate::types::time_mode::TimeMode;
use crate::variables::alias::resolve_variables;
use crate::variables::capability::{filter_supported, CapabilitySet, VariablePartition};
use bon::bon;

/// The writer client: variable resolution, capability filtering, series and
/// distribution summaries, and answer assembly under one configuration.
///
/// Create one with [`MeteoWriter::default()`] or tune it through the
/// builder:
///
/// ```
/// use meteowriter::MeteoWriter;
///
/// let writer = MeteoWriter::builder().sparse_threshold(0.08).build();
/// # let _ = writer;
/// ```
pub struct MeteoWriter {
    sparse_threshold: f64,
}

impl Default for MeteoWriter {
    fn default() -> Self {
        MeteoWriter {
            sparse_threshold: DEFAULT_SPARSE_THRESHOLD,
        }
    }
}

#[bon]
impl MeteoWriter {
    /// Creates a writer.
    ///
    /// # Arguments
    ///
    /// * `.sparse_threshold(f64)`: Optional. Maximum strictly-positive
    ///   sample fraction for a series to be summarized as sparse
    ///   (event-like). Defaults to `0.05`.
    #[builder]
    pub fn new(sparse_threshold: Option<f64>) -> Self {
        MeteoWriter {
            sparse_threshold: sparse_threshold.unwrap_or(DEFAULT_SPARSE_THRESHOLD),
        }
    }

    /// Resolves free-text variable tokens to canonical identifiers.
    ///
    /// Unknown tokens pass through verbatim; the output is deduplicated and
    /// order-preserving. See [`crate::resolve_variables`].
    ///
    /// # Examples
    ///
    /// ```
    /// use meteowriter::{MeteoWriter, TimeMode};
    ///
    /// let writer = MeteoWriter::default();
    /// let canonical = writer
    ///     .resolve()
    ///     .variables(&["temp".into(), "humidity".into()])
    ///     .mode(TimeMode::Current)
    ///     .call();
    /// assert_eq!(canonical, vec!["temperature_2m", "relative_humidity_2m"]);
    /// ```
    #[builder]
    pub fn resolve(&self, variables: &[String], mode: TimeMode) -> Vec<String> {
        resolve_variables(variables, mode)
    }

    /// Partitions canonical variables into supported and unsupported for a
    /// mode, with the permissive fallbacks described in
    /// [`crate::filter_supported`].
    #[builder]
    pub fn filter_supported(
        &self,
        capabilities: &CapabilitySet,
        variables: &[String],
        mode: TimeMode,
    ) -> VariablePartition {
        filter_supported(capabilities, variables, mode)
    }

    /// Summarizes one point series into narrative lines and statistics,
    /// using this writer's sparse threshold.
    ///
    /// * `.label(&str)`: Optional. Display name for the variable; defaults
    ///   to the canonical variable on the series.
    #[builder]
    pub fn summarize_series(
        &self,
        series: &PointSeries,
        place: &str,
        label: Option<&str>,
    ) -> SeriesSummary {
        summarize_point_series(
            series,
            place,
            label.unwrap_or(&series.variable),
            self.sparse_threshold,
        )
    }

    /// Per-bin distribution lines for a series, grouped by hour or month.
    #[builder]
    pub fn summarize_groups(&self, series: &PointSeries, group: GroupKey) -> Vec<String> {
        summarize_grouped(series, group)
    }

    /// Assembles the deterministic structured answer for one executed plan.
    ///
    /// * `.renderer(&dyn FigureRenderer)`: Optional. When present, figures
    ///   are rendered and attached (capped at 4).
    ///
    /// # Examples
    ///
    /// ```
    /// use meteowriter::{ExecuteResult, MeteoWriter, Plan};
    ///
    /// let writer = MeteoWriter::default();
    /// let answer = writer
    ///     .answer()
    ///     .place("Kyoto")
    ///     .plan(&Plan::default())
    ///     .result(&ExecuteResult::default())
    ///     .call();
    /// assert!(!answer.answer.is_empty());
    /// ```
    #[builder]
    pub fn answer(
        &self,
        place: &str,
        plan: &Plan,
        result: &ExecuteResult,
        renderer: Option<&dyn FigureRenderer>,
    ) -> StructuredAnswer {
        assemble_answer(place, plan, result, renderer)
    }

    /// Assembles an answer through a text-generation backend, recovering
    /// malformed output and falling back to the deterministic writer when
    /// the backend fails. Always returns a complete answer.
    ///
    /// * `.forecast_days(u32)` / `.historical_years(u32)`: Optional wording
    ///   for the synthesized question; default 7 days / 1 year.
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn answer_with_model(
        &self,
        place: &str,
        mode: TimeMode,
        plan: &Plan,
        result: &ExecuteResult,
        generator: &dyn TextGenerator,
        renderer: Option<&dyn FigureRenderer>,
        forecast_days: Option<u32>,
        historical_years: Option<u32>,
    ) -> StructuredAnswer {
        assemble_with_generator(
            place,
            mode,
            plan,
            result,
            generator,
            renderer,
            forecast_days.unwrap_or(7),
            historical_years.unwrap_or(1),
        )
    }

    /// Pairs an answer with its originating input as one dataset record.
    #[builder]
    pub fn dataset_record(
        &self,
        place: &str,
        mode: TimeMode,
        plan: &Plan,
        result: &ExecuteResult,
        answer: StructuredAnswer,
    ) -> DatasetRecord {
        DatasetRecord::new(place, mode, plan.clone(), result.clone(), answer)
    }
}
