use serde::Serialize;

use crate::api::AdminResponse;

/// Low-level call a workflow step made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    DeactivateUser,
    ResolveAlias,
    DeleteAlias,
    PutAlias,
    DelistRoom,
    ShutdownRoom,
    QuarantineMedia,
}

impl AdminAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::DeactivateUser => "deactivate_user",
            AdminAction::ResolveAlias => "resolve_alias",
            AdminAction::DeleteAlias => "delete_alias",
            AdminAction::PutAlias => "put_alias",
            AdminAction::DelistRoom => "delist_room",
            AdminAction::ShutdownRoom => "shutdown_room",
            AdminAction::QuarantineMedia => "quarantine_media",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    Success,
    Failure,
}

impl StepOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            StepOutcome::Success => "SUCCESS",
            StepOutcome::Failure => "FAILURE",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub action: AdminAction,
    pub target: String,
    pub status: u16,
    pub body: String,
}

impl StepResult {
    pub fn new(action: AdminAction, target: &str, response: AdminResponse) -> Self {
        Self {
            action,
            target: target.to_string(),
            status: response.status,
            body: response.body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn outcome(&self) -> StepOutcome {
        if self.is_success() {
            StepOutcome::Success
        } else {
            StepOutcome::Failure
        }
    }
}

/// Everything one workflow invocation did, in call order.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    pub workflow: String,
    pub reason: Option<String>,
    /// Room the workflow acted on, or the room an alias resolved to
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_quarantined: Option<u64>,
    /// Alias lookup feeding the log lines; not counted as a step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup: Option<StepResult>,
    pub steps: Vec<StepResult>,
}

impl WorkflowReport {
    pub fn new(workflow: &str, reason: Option<&str>) -> Self {
        Self {
            workflow: workflow.to_string(),
            reason: reason.map(str::to_string),
            room_id: None,
            num_quarantined: None,
            lookup: None,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: StepResult) {
        self.steps.push(step);
    }

    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(StepResult::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().filter(|s| !s.is_success())
    }
}
