//! Analysis service response envelope.

use super::{Block, DocumentGraph};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Terminal and non-terminal states of an asynchronous analysis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// The job is still running
    InProgress,
    /// The job completed
    Succeeded,
    /// The job failed; no blocks should be trusted
    Failed,
    /// Some pages could not be analyzed
    PartialSuccess,
}

impl JobStatus {
    /// Whether the job has stopped running.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::InProgress)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::PartialSuccess => "PARTIAL_SUCCESS",
        };
        f.write_str(s)
    }
}

/// Document-level metadata reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    /// Number of pages in the analyzed document
    #[serde(default)]
    pub pages: u32,
}

/// A non-fatal warning attached to a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Warning {
    /// Service error code
    #[serde(default)]
    pub error_code: Option<String>,

    /// Affected pages
    #[serde(default)]
    pub pages: Vec<u32>,
}

/// One page of an analysis response.
///
/// Large jobs are returned in several pages linked by `next_token`; each
/// page carries a slice of the block list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisResponse {
    /// Job state (absent for synchronous analysis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_status: Option<JobStatus>,

    /// Human-readable reason for a failed job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    /// Token for the next result page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    /// Document metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<DocumentMetadata>,

    /// Non-fatal warnings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,

    /// Blocks of this result page
    pub blocks: Vec<Block>,
}

impl AnalysisResponse {
    /// Create a successful single-page response from blocks.
    pub fn succeeded(blocks: Vec<Block>) -> Self {
        Self {
            job_status: Some(JobStatus::Succeeded),
            status_message: None,
            next_token: None,
            document_metadata: None,
            warnings: Vec::new(),
            blocks,
        }
    }

    /// Check that the job reached a state whose blocks may be reduced.
    pub fn check_status(&self) -> Result<()> {
        match self.job_status {
            Some(JobStatus::Failed) => Err(Error::JobFailed(
                self.status_message
                    .clone()
                    .unwrap_or_else(|| "no status message".to_string()),
            )),
            Some(JobStatus::InProgress) => Err(Error::JobInProgress),
            Some(JobStatus::PartialSuccess) => {
                log::warn!(
                    "Analysis job partially succeeded: {}",
                    self.status_message.as_deref().unwrap_or("some pages failed")
                );
                Ok(())
            }
            Some(JobStatus::Succeeded) | None => Ok(()),
        }
    }

    /// Convert a single response into a graph.
    pub fn into_graph(self) -> Result<DocumentGraph> {
        DocumentGraph::from_responses(vec![self])
    }
}

impl DocumentGraph {
    /// Merge paginated responses of one job into a single graph.
    ///
    /// Blocks are concatenated in page order. Any page reporting a failed or
    /// unfinished job aborts the merge.
    pub fn from_responses(responses: Vec<AnalysisResponse>) -> Result<Self> {
        for response in &responses {
            response.check_status()?;
        }

        let total: usize = responses.iter().map(|r| r.blocks.len()).sum();
        let mut blocks = Vec::with_capacity(total);
        for response in responses {
            blocks.extend(response.blocks);
        }

        log::debug!("DocumentGraph: merged {} blocks", blocks.len());
        Ok(Self::from_blocks(blocks))
    }
}

/// Any JSON document shape the service (or its SDKs) produce.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseDocument {
    /// One response object
    Single(AnalysisResponse),
    /// Several response pages, in order
    Pages(Vec<AnalysisResponse>),
    /// A bare block list
    Blocks(Vec<Block>),
}

impl ResponseDocument {
    /// Flatten into response pages.
    pub fn into_responses(self) -> Vec<AnalysisResponse> {
        match self {
            ResponseDocument::Single(r) => vec![r],
            ResponseDocument::Pages(pages) => pages,
            ResponseDocument::Blocks(blocks) => vec![AnalysisResponse {
                job_status: None,
                ..AnalysisResponse::succeeded(blocks)
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_job_is_error() {
        let response = AnalysisResponse {
            job_status: Some(JobStatus::Failed),
            status_message: Some("INVALID_S3_OBJECT".to_string()),
            ..AnalysisResponse::succeeded(vec![Block::line("l", "text")])
        };
        let err = response.into_graph().unwrap_err();
        assert!(matches!(err, Error::JobFailed(ref m) if m == "INVALID_S3_OBJECT"));
    }

    #[test]
    fn test_in_progress_job_is_error() {
        let response = AnalysisResponse {
            job_status: Some(JobStatus::InProgress),
            ..AnalysisResponse::succeeded(Vec::new())
        };
        assert!(matches!(response.into_graph(), Err(Error::JobInProgress)));
    }

    #[test]
    fn test_partial_success_proceeds() {
        let response = AnalysisResponse {
            job_status: Some(JobStatus::PartialSuccess),
            ..AnalysisResponse::succeeded(vec![Block::line("l", "text")])
        };
        assert_eq!(response.into_graph().unwrap().len(), 1);
    }

    #[test]
    fn test_merge_pages_in_order() {
        let first = AnalysisResponse {
            next_token: Some("token".to_string()),
            ..AnalysisResponse::succeeded(vec![Block::line("a", "1")])
        };
        let second = AnalysisResponse::succeeded(vec![Block::line("b", "2")]);

        let graph = DocumentGraph::from_responses(vec![first, second]).unwrap();
        let ids: Vec<_> = graph.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_document_shapes() {
        let single = r#"{"JobStatus": "SUCCEEDED", "Blocks": []}"#;
        let doc: ResponseDocument = serde_json::from_str(single).unwrap();
        assert!(matches!(doc, ResponseDocument::Single(_)));

        let pages = r#"[{"Blocks": []}, {"Blocks": []}]"#;
        let doc: ResponseDocument = serde_json::from_str(pages).unwrap();
        assert_eq!(doc.into_responses().len(), 2);

        let blocks = r#"[{"Id": "x", "BlockType": "LINE", "Text": "hi"}]"#;
        let doc: ResponseDocument = serde_json::from_str(blocks).unwrap();
        assert!(matches!(doc, ResponseDocument::Blocks(ref b) if b.len() == 1));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(JobStatus::PartialSuccess.to_string(), "PARTIAL_SUCCESS");
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::InProgress.is_terminal());
    }
}
