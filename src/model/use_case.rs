//! Use case domain model.

use crate::model::facility::{FacilityId, OperationalStatus};
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// Stable store-assigned identifier for a use case row.
pub type UseCaseId = i64;

/// An operational scenario tied to a facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    /// Store-assigned row id.
    pub id: UseCaseId,
    pub title: String,
    pub description: String,
    pub objective: String,
    pub operational_status: OperationalStatus,
    /// Owning facility. Immutable after create.
    pub facility_id: FacilityId,
}

/// Use case fields without identity or ownership; used by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCaseDraft {
    pub title: String,
    pub description: String,
    pub objective: String,
    pub operational_status: OperationalStatus,
}

impl UseCaseDraft {
    /// Creates a draft with empty description/objective.
    pub fn new(title: impl Into<String>, operational_status: OperationalStatus) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            objective: String::new(),
            operational_status,
        }
    }

    /// Checks draft invariants before the repository builds SQL from it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyUseCaseTitle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::UseCaseDraft;
    use crate::model::facility::OperationalStatus;
    use crate::model::ValidationError;

    #[test]
    fn draft_rejects_blank_title() {
        let draft = UseCaseDraft::new("", OperationalStatus::Active);
        assert_eq!(draft.validate(), Err(ValidationError::EmptyUseCaseTitle));
    }
}
