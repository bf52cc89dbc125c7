//! Builds the ordered stage pipeline from a set of required documents.

use crate::core::{
    AcidNumber, EnvelopeId, RequiredDocument, SequentialWorkflowData, WorkflowStage,
    WorkflowStatus,
};
use crate::errors::EmptyWorkflowError;

/// Builder for an envelope's sequential workflow.
///
/// Document order is preserved as stage order: first seen, first processed.
/// One legal entity may own several stages, one per document it reviews;
/// stages are never merged by entity because each document is independently
/// actionable.
#[derive(Debug, Clone)]
pub struct WorkflowBuilder {
    envelope_id: EnvelopeId,
    acid_number: AcidNumber,
    documents: Vec<RequiredDocument>,
}

impl WorkflowBuilder {
    /// Creates a builder for the given envelope.
    #[must_use]
    pub fn new(envelope_id: EnvelopeId, acid_number: AcidNumber) -> Self {
        Self {
            envelope_id,
            acid_number,
            documents: Vec::new(),
        }
    }

    /// Sets the required documents, replacing any previously added.
    #[must_use]
    pub fn documents(mut self, documents: impl IntoIterator<Item = RequiredDocument>) -> Self {
        self.documents = documents.into_iter().collect();
        self
    }

    /// Appends a single required document.
    #[must_use]
    pub fn document(mut self, document: RequiredDocument) -> Self {
        self.documents.push(document);
        self
    }

    /// Builds the workflow aggregate.
    ///
    /// Stage 1 enters `Pending` or `PaymentRequired` depending on its fee;
    /// all later stages start `Blocked`. The workflow itself is
    /// `NotStarted` until the engine starts it.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyWorkflowError`] when no documents were supplied; a
    /// workflow must have at least one stage.
    pub fn build(self) -> Result<SequentialWorkflowData, EmptyWorkflowError> {
        if self.documents.is_empty() {
            return Err(EmptyWorkflowError {
                envelope_id: self.envelope_id,
            });
        }

        let stages: Vec<WorkflowStage> = self
            .documents
            .iter()
            .enumerate()
            .map(|(index, document)| WorkflowStage::from_document(index as u32 + 1, document))
            .collect();

        Ok(SequentialWorkflowData {
            envelope_id: self.envelope_id,
            acid_number: self.acid_number,
            total_stages: stages.len() as u32,
            current_stage: 1,
            workflow_status: WorkflowStatus::NotStarted,
            stages,
        })
    }
}

/// Convenience wrapper matching the portal-facing operation shape.
///
/// # Errors
///
/// Returns [`EmptyWorkflowError`] when `documents` is empty.
pub fn build_workflow(
    documents: Vec<RequiredDocument>,
    envelope_id: EnvelopeId,
    acid_number: AcidNumber,
) -> Result<SequentialWorkflowData, EmptyWorkflowError> {
    WorkflowBuilder::new(envelope_id, acid_number)
        .documents(documents)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Money, StageStatus};
    use pretty_assertions::assert_eq;

    fn documents(count: u32) -> Vec<RequiredDocument> {
        (1..=count)
            .map(|n| {
                RequiredDocument::new(
                    format!("doc-{n}"),
                    format!("Document {n}"),
                    format!("entity-{n}"),
                    format!("Entity {n}"),
                )
            })
            .collect()
    }

    #[test]
    fn test_build_produces_contiguous_stage_numbers() {
        let workflow = build_workflow(documents(5), EnvelopeId::new(), AcidNumber::new("A-1"))
            .unwrap();

        assert_eq!(workflow.total_stages, 5);
        let numbers: Vec<u32> = workflow.stages.iter().map(|s| s.stage_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        workflow.validate().unwrap();
    }

    #[test]
    fn test_only_first_stage_is_current() {
        let workflow = build_workflow(documents(3), EnvelopeId::new(), AcidNumber::new("A-1"))
            .unwrap();

        let current: Vec<u32> = workflow
            .stages
            .iter()
            .filter(|s| s.is_current)
            .map(|s| s.stage_number)
            .collect();
        assert_eq!(current, vec![1]);
        assert_eq!(workflow.current_stage, 1);
        assert_eq!(workflow.workflow_status, WorkflowStatus::NotStarted);
    }

    #[test]
    fn test_document_order_is_stage_order() {
        let docs = vec![
            RequiredDocument::new("inv", "Invoice", "customs", "Customs"),
            RequiredDocument::new("pl", "Packing List", "port", "Port Authority"),
            RequiredDocument::new("coo", "Certificate of Origin", "customs", "Customs"),
        ];
        let workflow =
            build_workflow(docs, EnvelopeId::new(), AcidNumber::new("A-2")).unwrap();

        let ids: Vec<&str> = workflow
            .stages
            .iter()
            .map(|s| s.document_id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["inv", "pl", "coo"]);
    }

    #[test]
    fn test_same_entity_keeps_separate_stages() {
        let docs = vec![
            RequiredDocument::new("inv", "Invoice", "customs", "Customs"),
            RequiredDocument::new("decl", "Declaration", "customs", "Customs"),
        ];
        let workflow =
            build_workflow(docs, EnvelopeId::new(), AcidNumber::new("A-3")).unwrap();

        assert_eq!(workflow.total_stages, 2);
        assert_eq!(workflow.stages[0].legal_entity_id, workflow.stages[1].legal_entity_id);
    }

    #[test]
    fn test_fee_sets_payment_required_on_first_stage_only_when_reachable() {
        let docs = vec![
            RequiredDocument::new("permit", "Permit", "ministry", "Ministry")
                .with_fee(Money::new(5000, "EGP")),
            RequiredDocument::new("license", "License", "bank", "Bank")
                .with_fee(Money::new(2000, "EGP")),
        ];
        let workflow =
            build_workflow(docs, EnvelopeId::new(), AcidNumber::new("A-4")).unwrap();

        assert_eq!(workflow.stages[0].status, StageStatus::PaymentRequired);
        assert_eq!(workflow.stages[0].payment_amount, Some(Money::new(5000, "EGP")));
        // Later fee stages stay blocked; the fee is kept for unblocking.
        assert_eq!(workflow.stages[1].status, StageStatus::Blocked);
        assert!(workflow.stages[1].payment_required);
    }

    #[test]
    fn test_empty_documents_fail() {
        let err = build_workflow(Vec::new(), EnvelopeId::new(), AcidNumber::new("A-5"))
            .unwrap_err();
        assert!(err.to_string().contains("no required documents"));
    }
}
