//! Batch sort job configuration.

use serde::{Deserialize, Serialize};
use sortd_core::{BatchRequest, SortRequest};
use std::fmt;
use std::str::FromStr;

/// Order in which sorted sequences appear in a batch result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrder {
    /// Whatever order the workers finish in. Callers must not rely on
    /// positional correspondence with the request.
    #[default]
    Completion,
    /// Same order as the request.
    Input,
}

impl fmt::Display for ResultOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultOrder::Completion => f.write_str("completion"),
            ResultOrder::Input => f.write_str("input"),
        }
    }
}

impl FromStr for ResultOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completion" => Ok(ResultOrder::Completion),
            "input" => Ok(ResultOrder::Input),
            other => Err(format!(
                "unknown result order '{other}' (expected 'completion' or 'input')"
            )),
        }
    }
}

/// A batch sort job: the sequences plus how to order the results.
#[derive(Debug, Clone, Default)]
pub struct BatchJob {
    /// The sequences to sort, each an independent unit of work
    pub sequences: Vec<SortRequest>,
    /// Result ordering policy; `None` uses the engine's configured order
    pub order: Option<ResultOrder>,
}

impl BatchJob {
    pub fn new(sequences: Vec<SortRequest>) -> Self {
        Self {
            sequences,
            order: None,
        }
    }

    pub fn order(mut self, order: ResultOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl From<BatchRequest> for BatchJob {
    fn from(batch: BatchRequest) -> Self {
        Self::new(batch.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_order_names() {
        assert_eq!("completion".parse::<ResultOrder>(), Ok(ResultOrder::Completion));
        assert_eq!("INPUT".parse::<ResultOrder>(), Ok(ResultOrder::Input));
        assert!("random".parse::<ResultOrder>().is_err());
    }

    #[test]
    fn order_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&ResultOrder::Input).unwrap(), r#""input""#);
        let order: ResultOrder = serde_json::from_str(r#""completion""#).unwrap();
        assert_eq!(order, ResultOrder::Completion);
    }

    #[test]
    fn job_leaves_order_to_the_engine_unless_set() {
        let job = BatchJob::from(BatchRequest::new(vec![SortRequest::new(vec![1])]));
        assert_eq!(job.order, None);
        assert_eq!(job.len(), 1);
        assert_eq!(job.order(ResultOrder::Input).order, Some(ResultOrder::Input));
    }
}
