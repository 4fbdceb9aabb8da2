//! One training example for the downstream writer model: the guardrail
//! system text, the full query input (plan + execution result), and the
//! structured answer produced for it.

use crate::types::answer::StructuredAnswer;
use crate::types::execute::ExecuteResult;
use crate::types::plan::Plan;
use crate::types::time_mode::TimeMode;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// System text stored with every record. It pins the writer model to the
/// provided data and the fixed output schema.
pub const GUARDRAIL_PROMPT: &str = "You are the weather answer writer. Never invent numbers. \
     Only use the provided query results to produce a response matching the structured answer \
     schema. Include citations and limitations; keep language concise.";

/// The input half of a record: everything the writer saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordInput {
    pub place: String,
    pub time_mode: TimeMode,
    pub plan: Plan,
    pub execute_result: ExecuteResult,
    /// When the record was assembled, RFC 3339 UTC.
    pub timestamp_utc: String,
}

/// A complete `{system, input, output}` training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub system: String,
    pub input: RecordInput,
    pub output: StructuredAnswer,
}

impl DatasetRecord {
    /// Pairs an answer with the plan and result it was derived from,
    /// stamped with the current UTC time and the guardrail text.
    pub fn new(
        place: &str,
        time_mode: TimeMode,
        plan: Plan,
        execute_result: ExecuteResult,
        output: StructuredAnswer,
    ) -> Self {
        DatasetRecord {
            system: GUARDRAIL_PROMPT.to_string(),
            input: RecordInput {
                place: place.to_string(),
                time_mode,
                plan,
                execute_result,
                timestamp_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            },
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_all_sections() {
        let record = DatasetRecord::new(
            "Kyoto",
            TimeMode::Current,
            Plan::default(),
            ExecuteResult::default(),
            StructuredAnswer::default(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["system"], GUARDRAIL_PROMPT);
        assert_eq!(json["input"]["place"], "Kyoto");
        assert_eq!(json["input"]["time_mode"], "current");
        assert!(json["input"]["plan"].is_object());
        assert!(json["input"]["execute_result"].is_object());
        assert!(json["input"]["timestamp_utc"].as_str().unwrap().ends_with('Z'));
        assert!(json["output"]["title"].is_string());
    }

    #[test]
    fn record_round_trips() {
        let record = DatasetRecord::new(
            "Oslo",
            TimeMode::Historical,
            Plan::default(),
            ExecuteResult::default(),
            StructuredAnswer::default(),
        );
        let line = serde_json::to_string(&record).unwrap();
        let back: DatasetRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }
}
