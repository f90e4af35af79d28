use super::Recorder;
use crate::error::{Error, Result};
use crate::model::{Description, DescriptionKind, Label, LabelName, Parameter, ParameterKind, Severity};

impl Recorder {
    pub fn add_label<N, V>(&self, name: N, value: V) -> Result<()>
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.push_label(Label::new(name, value))
    }

    pub fn feature<V: Into<String>>(&self, value: V) -> Result<()> {
        self.add_label(LabelName::Feature.as_str(), value)
    }

    pub fn story<V: Into<String>>(&self, value: V) -> Result<()> {
        self.add_label(LabelName::Story.as_str(), value)
    }

    pub fn severity(&self, severity: Severity) -> Result<()> {
        self.add_label(LabelName::Severity.as_str(), severity.as_str())
    }

    pub fn add_argument<N, V>(&self, name: N, value: V) -> Result<()>
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.add_parameter(name.into(), value.into(), ParameterKind::Argument)
    }

    pub fn add_environment<N, V>(&self, name: N, value: V) -> Result<()>
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.add_parameter(name.into(), value.into(), ParameterKind::EnvironmentVariable)
    }

    /// Sets the plain text description. A case holds one description only.
    pub fn description<S: Into<String>>(&self, text: S) -> Result<()> {
        self.description_with(DescriptionKind::Text, text)
    }

    pub fn description_with<S: Into<String>>(&self, kind: DescriptionKind, text: S) -> Result<()> {
        let value = text.into();
        self.with_case(|case| {
            if case.description.is_some() {
                return Err(Error::DescriptionAlreadySet(case.name.clone()));
            }
            case.description = Some(Description { value, r#type: kind });
            Ok(())
        })
    }

    fn add_parameter(&self, name: String, value: String, kind: ParameterKind) -> Result<()> {
        self.with_case(|case| {
            trace!("Case '{}' parameter {}={}", case.name, name, value);
            case.parameters.push(Parameter { name, value, kind });
            Ok(())
        })
    }
}
