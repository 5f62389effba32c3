//! Commands sent to `/device/{id}/exec` and the job handle returned for them

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::capability::{Capability, CapabilityParameter};
use crate::errors::{Result, SomfyError};

/// A named parameter value attached to a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandParameter {
    pub name: String,
    pub value: Value,
}

impl CommandParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    /// Build a parameter named after a capability parameter
    #[must_use]
    pub fn of_capability_parameter(parameter: CapabilityParameter, value: impl Into<Value>) -> Self {
        Self::new(parameter.identification(), value)
    }
}

/// A command to execute on a device
///
/// Serialized as `{"name": "position", "parameters": [{"name": "position", "value": 40}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<CommandParameter>,
}

impl Command {
    /// Build a command for `capability` with the given parameters, unchecked.
    #[must_use]
    pub fn of_capability(
        capability: Capability,
        parameters: impl IntoIterator<Item = CommandParameter>,
    ) -> Self {
        Self {
            name: capability.identification().to_string(),
            parameters: parameters.into_iter().collect(),
        }
    }

    /// Build a command for `capability`, checking the parameters against the
    /// ones the capability declares.
    ///
    /// # Errors
    /// Returns `SomfyError::InvalidCommand` when a parameter is not declared
    /// by the capability, has a value of the wrong JSON type, or when a
    /// required parameter is missing.
    pub fn try_of_capability(
        capability: Capability,
        parameters: impl IntoIterator<Item = CommandParameter>,
    ) -> Result<Self> {
        let command = Self::of_capability(capability, parameters);
        let declared = capability.parameters();

        for parameter in &command.parameters {
            let Some(declared_param) = declared.iter().find(|p| p.identification() == parameter.name)
            else {
                return Err(SomfyError::InvalidCommand(format!(
                    "capability '{capability}' does not accept parameter '{}'",
                    parameter.name
                )));
            };

            if !declared_param.parameter_type().accepts(&parameter.value) {
                return Err(SomfyError::InvalidCommand(format!(
                    "parameter '{}' of capability '{capability}' must be {}, got {}",
                    parameter.name,
                    declared_param.parameter_type(),
                    parameter.value
                )));
            }
        }

        if let Some(missing) = declared.iter().find(|p| {
            p.is_required() && !command.parameters.iter().any(|c| c.name == p.identification())
        }) {
            return Err(SomfyError::InvalidCommand(format!(
                "capability '{capability}' requires parameter '{missing}'"
            )));
        }

        Ok(command)
    }
}

impl From<Capability> for Command {
    fn from(capability: Capability) -> Self {
        Self::of_capability(capability, [])
    }
}

/// Response of the exec endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    pub job_id: String,
}
