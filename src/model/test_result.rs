use serde_derive::Serialize;

use super::{
    attachment::Attachment,
    label::Label,
    parameter::Parameter,
    status::{Status, StatusDetails},
};

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub name: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_details: Option<StatusDetails>,
    pub steps: Vec<Step>,
    pub attachments: Vec<Attachment>,
    pub start: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<u64>,
}

impl Step {
    pub fn new(name: String, start: u64) -> Self {
        Self {
            name,
            status: Status::Unset,
            status_details: None,
            steps: Vec::new(),
            attachments: Vec::new(),
            start,
            stop: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.stop.is_none()
    }

    fn step_mut(&mut self, path: &[usize]) -> Option<&mut Step> {
        match path.split_first() {
            None => Some(self),
            Some((index, rest)) => self.steps.get_mut(*index)?.step_mut(rest),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum DescriptionKind {
    Text,
    Html,
    Markdown,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    pub value: String,
    pub r#type: DescriptionKind,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub uuid: uuid::Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    pub labels: Vec<Label>,
    pub parameters: Vec<Parameter>,
    pub steps: Vec<Step>,
    pub attachments: Vec<Attachment>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_details: Option<StatusDetails>,
    pub start: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<u64>,
}

impl Case {
    pub fn new(name: String, start: u64) -> Self {
        Self {
            uuid: uuid::Uuid::new_v4(),
            name,
            description: None,
            labels: Vec::new(),
            parameters: Vec::new(),
            steps: Vec::new(),
            attachments: Vec::new(),
            status: Status::Unset,
            status_details: None,
            start,
            stop: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stop.is_some()
    }

    /// Step reached by following child indexes from the case root.
    pub fn step_mut(&mut self, path: &[usize]) -> Option<&mut Step> {
        let (index, rest) = path.split_first()?;
        self.steps.get_mut(*index)?.step_mut(rest)
    }

    pub fn labels_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.labels
            .iter()
            .filter(move |label| label.name == name)
            .map(|label| label.value.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::{Case, Step};

    #[test]
    fn test_step_lookup_by_path() {
        let mut case = Case::new("lookup".to_owned(), 0);
        let mut outer = Step::new("outer".to_owned(), 1);
        outer.steps.push(Step::new("first".to_owned(), 2));
        outer.steps.push(Step::new("second".to_owned(), 3));
        case.steps.push(outer);

        assert_eq!(case.step_mut(&[0]).map(|s| s.name.clone()), Some("outer".to_owned()));
        assert_eq!(case.step_mut(&[0, 1]).map(|s| s.start), Some(3));
        assert!(case.step_mut(&[0, 2]).is_none());
        assert!(case.step_mut(&[]).is_none());
    }

    #[test]
    fn test_case_serializes_camel_case() {
        let mut case = Case::new("serialized".to_owned(), 5);
        case.stop = Some(9);
        let value = serde_json::to_value(&case).unwrap();

        assert_eq!(value["name"], "serialized");
        assert_eq!(value["status"], "unset");
        assert_eq!(value["stop"], 9);
        assert!(value.get("statusDetails").is_none());
        assert!(value.get("description").is_none());
    }
}
