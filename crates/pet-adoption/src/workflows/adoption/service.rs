use std::sync::Arc;

use super::access::AccessGate;
use super::repository::AdoptionRepository;
use super::submission::SubmissionGateway;
use super::transition::{StatusTransitionHandler, DEFAULT_REJECTION_REASON};

/// Tunables for the adoption workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub default_rejection_reason: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            default_rejection_reason: DEFAULT_REJECTION_REASON.to_string(),
        }
    }
}

/// Service composing the submission gateway, access gate, and transition handler over a
/// single repository.
pub struct AdoptionService<R> {
    submissions: SubmissionGateway<R>,
    access: AccessGate<R>,
    transitions: StatusTransitionHandler<R>,
}

impl<R> AdoptionService<R>
where
    R: AdoptionRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: WorkflowConfig) -> Self {
        Self {
            submissions: SubmissionGateway::new(repository.clone()),
            access: AccessGate::new(repository.clone()),
            transitions: StatusTransitionHandler::with_rejection_reason(
                repository,
                config.default_rejection_reason,
            ),
        }
    }

    pub fn submissions(&self) -> &SubmissionGateway<R> {
        &self.submissions
    }

    pub fn access(&self) -> &AccessGate<R> {
        &self.access
    }

    pub fn transitions(&self) -> &StatusTransitionHandler<R> {
        &self.transitions
    }
}
