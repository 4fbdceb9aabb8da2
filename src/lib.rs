mod answer;
mod error;
mod export;
mod meteowriter;
mod summary;
mod types;
mod variables;

pub use error::MeteoWriterError;
pub use meteowriter::*;

pub use answer::assemble::{assemble_answer, assemble_with_generator};
pub use answer::cleanup::clean_model_reply;
pub use answer::extract::extract_structured_answer;
pub use answer::figures::{collect_figures, FigureRenderer, RenderError};
pub use answer::generate::{GenerateError, TextGenerator};
pub use answer::prompt::{
    build_chat_prompt, build_context, build_summary_prompt, data_window_line, location_line,
    synthesize_question, ChatRole, ChatTurn,
};

pub use summary::aggregate::summarize_aggregate;
pub use summary::group::{summarize_grouped, GroupKey, MAX_GROUP_LINES};
pub use summary::series::{
    is_accumulating, summarize_point_series, SeriesSummary, SparseStats, DEFAULT_SPARSE_THRESHOLD,
};
pub use summary::stats::{describe, quantile, SeriesStats, Trend};

pub use types::answer::{Figure, StructuredAnswer, MAX_FIGURES, MAX_FOLLOWUPS, MAX_KEY_NUMBERS};
pub use types::execute::{
    Aggregation, Climatology, ClimatologyBlocks, DiurnalBlock, ExecuteResult, LongTermBlock,
    PointSeries, RegionAggregate, SeasonalBlock,
};
pub use types::plan::{Plan, PlanItem, PlanMeta, ResolvedPlace, Window};
pub use types::time_mode::{ParseTimeModeError, TimeMode};

pub use export::error::ExportError;
pub use export::record::{DatasetRecord, RecordInput, GUARDRAIL_PROMPT};
pub use export::writer::DatasetWriter;

pub use variables::alias::resolve_variables;
pub use variables::capability::{
    filter_supported, CapabilityDocument, CapabilitySet, VariablePartition,
};
