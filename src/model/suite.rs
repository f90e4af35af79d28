use serde_derive::Serialize;

use super::test_result::Case;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    pub uuid: uuid::Uuid,
    pub name: String,
    pub children: Vec<Case>,
    pub start: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<u64>,
}

impl Suite {
    pub fn new(name: String, start: u64) -> Self {
        Self {
            uuid: uuid::Uuid::new_v4(),
            name,
            children: Vec::new(),
            start,
            stop: None,
        }
    }

    pub fn cases(&self) -> &[Case] {
        &self.children
    }

    /// The most recently started case, which stays current after it ends.
    pub fn current_case(&self) -> Option<&Case> {
        self.children.last()
    }

    pub fn current_case_mut(&mut self) -> Option<&mut Case> {
        self.children.last_mut()
    }

    pub fn is_finished(&self) -> bool {
        self.stop.is_some()
    }
}
