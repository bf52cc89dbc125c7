//! Display-oriented aggregates derived from the stage list.

use crate::core::{StageStatus, WorkflowStage, WorkflowStatus};
use serde::{Deserialize, Serialize};

/// Progress summary for an envelope's workflow.
///
/// Pure projection over the stage list: recomputable at any time, from any
/// replica, and never stored where it could drift from the stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowProgress {
    /// Number of completed stages.
    pub completed_count: u32,
    /// Total number of stages.
    pub total_count: u32,
    /// Completion percentage, 0.0 to 100.0.
    pub progress_percent: f64,
    /// Envelope-level display status.
    pub display_status: WorkflowStatus,
}

impl WorkflowProgress {
    /// Projects the progress summary from a stage list.
    ///
    /// Display precedence: rejected > completed > in-progress family >
    /// not-started.
    #[must_use]
    pub fn project(stages: &[WorkflowStage]) -> Self {
        let total_count = stages.len() as u32;
        let completed_count = stages
            .iter()
            .filter(|stage| stage.status == StageStatus::Completed)
            .count() as u32;

        let progress_percent = if total_count == 0 {
            0.0
        } else {
            f64::from(completed_count) / f64::from(total_count) * 100.0
        };

        Self {
            completed_count,
            total_count,
            progress_percent,
            display_status: Self::display_status(stages, completed_count, total_count),
        }
    }

    fn display_status(
        stages: &[WorkflowStage],
        completed_count: u32,
        total_count: u32,
    ) -> WorkflowStatus {
        if stages
            .iter()
            .any(|stage| stage.status == StageStatus::Rejected)
        {
            return WorkflowStatus::Rejected;
        }
        if total_count > 0 && completed_count == total_count {
            return WorkflowStatus::Completed;
        }
        if stages.iter().any(|stage| {
            stage.status.is_active() || stage.status == StageStatus::Completed
        }) {
            return WorkflowStatus::InProgress;
        }
        WorkflowStatus::NotStarted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RequiredDocument;

    fn stages(count: u32) -> Vec<WorkflowStage> {
        (1..=count)
            .map(|n| {
                let doc = RequiredDocument::new(
                    format!("doc-{n}"),
                    format!("Document {n}"),
                    format!("entity-{n}"),
                    format!("Entity {n}"),
                );
                WorkflowStage::from_document(n, &doc)
            })
            .collect()
    }

    #[test]
    fn test_fresh_workflow_not_started() {
        // A fresh pipeline only has Pending/Blocked stages.
        let progress = WorkflowProgress::project(&stages(3));
        assert_eq!(progress.display_status, WorkflowStatus::NotStarted);
        assert_eq!(progress.completed_count, 0);
        assert!((progress.progress_percent - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_completion_is_in_progress() {
        let mut stages = stages(4);
        stages[0].status = StageStatus::Completed;
        let progress = WorkflowProgress::project(&stages);

        assert_eq!(progress.display_status, WorkflowStatus::InProgress);
        assert_eq!(progress.completed_count, 1);
        assert!((progress.progress_percent - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_payment_required_counts_as_in_progress() {
        let mut stages = stages(2);
        stages[0].status = StageStatus::PaymentRequired;
        let progress = WorkflowProgress::project(&stages);

        assert_eq!(progress.display_status, WorkflowStatus::InProgress);
    }

    #[test]
    fn test_rejection_takes_precedence() {
        let mut stages = stages(3);
        stages[0].status = StageStatus::Completed;
        stages[1].status = StageStatus::Rejected;
        let progress = WorkflowProgress::project(&stages);

        assert_eq!(progress.display_status, WorkflowStatus::Rejected);
        assert_eq!(progress.completed_count, 1);
    }

    #[test]
    fn test_all_completed() {
        let mut stages = stages(2);
        for stage in &mut stages {
            stage.status = StageStatus::Completed;
        }
        let progress = WorkflowProgress::project(&stages);

        assert_eq!(progress.display_status, WorkflowStatus::Completed);
        assert!((progress.progress_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stage_list() {
        let progress = WorkflowProgress::project(&[]);
        assert_eq!(progress.total_count, 0);
        assert!((progress.progress_percent - 0.0).abs() < f64::EPSILON);
        assert_eq!(progress.display_status, WorkflowStatus::NotStarted);
    }
}
