//! Navigation registry as stored in `navigation.json`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::SectionId;

/// One entry of the top navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub id: SectionId,
    pub label: String,
    /// Icon registry key; resolution is the renderer's business.
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationData {
    #[serde(default)]
    pub items: Vec<NavItem>,
}

impl NavigationData {
    pub fn from_json(raw: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(raw)?;
        data.validate()?;
        Ok(data)
    }

    /// Section ids must be non-empty and unique, since they double as
    /// anchor targets.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for (position, item) in self.items.iter().enumerate() {
            if item.id.as_str().trim().is_empty() {
                return Err(ModelError::EmptySectionId { position });
            }
            if !seen.insert(item.id.as_str()) {
                return Err(ModelError::DuplicateSection(item.id.to_string()));
            }
        }
        Ok(())
    }

    /// Section registry in declaration order.
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }
}
