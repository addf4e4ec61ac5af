//! Pure state transitions for the booking form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::models::{BookingDraft, ChildDetails};
use crate::catalog::Location;
use crate::pricing::{calculate_pricing, MAX_CHILDREN};

/// One edit made to the booking form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum DraftAction {
    SetParentName(String),
    SetParentEmail(String),
    SetParentPhone(String),
    SetParentAddress(String),
    SetLocation(Location),
    SelectPlan(String),
    SetStartDate(Option<NaiveDate>),
    AddChild,
    UpdateChild { index: usize, child: ChildDetails },
    RemoveChild { index: usize },
}

impl BookingDraft {
    /// Apply an edit and return the updated draft with fresh pricing.
    ///
    /// Edits that would break the 1..=5 children bound or point at a missing
    /// child row leave the draft unchanged.
    pub fn apply(mut self, action: DraftAction) -> Self {
        match action {
            DraftAction::SetParentName(value) => self.parent.parent_name = value,
            DraftAction::SetParentEmail(value) => self.parent.parent_email = value,
            DraftAction::SetParentPhone(value) => self.parent.parent_phone = value,
            DraftAction::SetParentAddress(value) => self.parent.parent_address = value,
            // both locations sell the same plans
            DraftAction::SetLocation(location) => self.location = location,
            DraftAction::SelectPlan(plan_id) => self.plan_id = Some(plan_id),
            DraftAction::SetStartDate(date) => self.start_date = date,
            DraftAction::AddChild => {
                if self.children.len() < MAX_CHILDREN {
                    self.children.push(ChildDetails::default());
                }
            }
            DraftAction::UpdateChild { index, child } => {
                if let Some(slot) = self.children.get_mut(index) {
                    *slot = child;
                }
            }
            DraftAction::RemoveChild { index } => {
                if self.children.len() > 1 && index < self.children.len() {
                    self.children.remove(index);
                }
            }
        }
        self.reprice()
    }

    /// Recompute `pricing` from the selected plan and number of children
    pub fn reprice(mut self) -> Self {
        self.pricing = self
            .plan()
            .and_then(|plan| calculate_pricing(plan.price, self.children.len()).ok());
        self
    }
}
