// ABOUTME: Muscle-targeting selection persisted remotely and its projection into session inputs
// ABOUTME: Group selection is insertion ordered and bounded by a configurable maximum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Workout Session Engine Contributors

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Muscle selection as exchanged with the remote persistence endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MuscleSelectionData {
    /// Selected muscle groups in the order they were picked
    pub selected_groups: Vec<String>,
    /// Specific muscles picked within each group
    pub selected_muscles: BTreeMap<String, BTreeSet<String>>,
}

impl MuscleSelectionData {
    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_groups.is_empty() && self.selected_muscles.values().all(BTreeSet::is_empty)
    }

    /// Whether `group` is selected
    #[must_use]
    pub fn contains_group(&self, group: &str) -> bool {
        self.selected_groups.iter().any(|selected| selected == group)
    }

    /// Toggle a muscle group, returning whether it is selected afterwards
    ///
    /// Deselecting a group also drops the specific muscles picked inside it.
    ///
    /// # Errors
    ///
    /// Returns `SelectionLimitExceeded` when selecting would exceed `max_groups`
    pub fn toggle_group(&mut self, group: &str, max_groups: usize) -> AppResult<bool> {
        if self.contains_group(group) {
            self.selected_groups.retain(|selected| selected != group);
            self.selected_muscles.remove(group);
            return Ok(false);
        }
        if self.selected_groups.len() >= max_groups {
            return Err(AppError::selection_limit(max_groups));
        }
        self.selected_groups.push(group.to_owned());
        Ok(true)
    }

    /// Toggle a specific muscle, returning whether it is selected afterwards
    ///
    /// Picking a muscle in an unselected group selects the group first.
    ///
    /// # Errors
    ///
    /// Returns `SelectionLimitExceeded` when the implicit group selection would exceed `max_groups`
    pub fn toggle_muscle(&mut self, group: &str, muscle: &str, max_groups: usize) -> AppResult<bool> {
        if !self.contains_group(group) {
            self.toggle_group(group, max_groups)?;
        }
        let muscles = self.selected_muscles.entry(group.to_owned()).or_default();
        let selected = if muscles.remove(muscle) {
            false
        } else {
            muscles.insert(muscle.to_owned());
            true
        };
        if muscles.is_empty() {
            self.selected_muscles.remove(group);
        }
        Ok(selected)
    }

    /// Deduplicate groups, cap them at `max_groups`, and drop orphaned muscle entries
    #[must_use]
    pub fn normalized(mut self, max_groups: usize) -> Self {
        let mut seen = BTreeSet::new();
        self.selected_groups.retain(|group| seen.insert(group.clone()));
        if self.selected_groups.len() > max_groups {
            debug!(
                selected = self.selected_groups.len(),
                max_groups, "Truncating muscle group selection"
            );
            self.selected_groups.truncate(max_groups);
        }
        let groups = &self.selected_groups;
        self.selected_muscles
            .retain(|group, muscles| !muscles.is_empty() && groups.contains(group));
        self
    }

    /// Project this selection into the session's targeting shape
    #[must_use]
    pub fn to_targeting(&self) -> MuscleTargeting {
        MuscleTargeting {
            target_groups: self.selected_groups.clone(),
            specific_muscles: self.selected_muscles.clone(),
            primary_focus: self.selected_groups.first().cloned(),
        }
    }
}

/// Muscle targeting as carried on `SessionInputs` and in the resolved payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MuscleTargeting {
    /// Groups to target
    pub target_groups: Vec<String>,
    /// Specific muscles per group
    pub specific_muscles: BTreeMap<String, BTreeSet<String>>,
    /// Group to emphasise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_focus: Option<String>,
}

impl MuscleTargeting {
    /// Whether the targeting carries no groups, muscles, or focus
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.target_groups.is_empty()
            && self.specific_muscles.values().all(BTreeSet::is_empty)
            && self.primary_focus.is_none()
    }
}
