//! Device capabilities and their parameters
//!
//! On the wire a capability is an object such as
//! `{"name": "position", "parameters": [{"name": "position", "type": "integer"}]}`.
//! Only `name` is significant for decoding; the parameter list is fixed per
//! capability and taken from the table below.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::impl_wire_identifier;

/// JSON type a capability parameter value must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterType {
    Integer,
}

impl_wire_identifier!(ParameterType {
    Integer => "integer",
});

impl ParameterType {
    /// Whether `value` is of this type
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Integer => value.is_i64() || value.is_u64(),
        }
    }
}

/// A parameter a capability accepts when executed as a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityParameter {
    /// Target position in percent (0 = open, 100 = closed)
    Position,
}

impl_wire_identifier!(CapabilityParameter {
    Position => "position",
});

impl CapabilityParameter {
    #[must_use]
    pub const fn parameter_type(&self) -> ParameterType {
        match self {
            Self::Position => ParameterType::Integer,
        }
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        match self {
            Self::Position => true,
        }
    }
}

impl Serialize for CapabilityParameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CapabilityParameter", 2)?;
        state.serialize_field("name", self.identification())?;
        state.serialize_field("type", self.parameter_type().identification())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for CapabilityParameter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = NamedObject::deserialize(deserializer)?;
        Self::from_identification(&wire.name).ok_or_else(|| {
            de::Error::custom(format!("unknown capability parameter '{}'", wire.name))
        })
    }
}

/// An action a device can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Close,
    Open,
    Position,
    PositionLowSpeed,
    Stop,
    Identify,
}

impl_wire_identifier!(Capability {
    Close => "close",
    Open => "open",
    Position => "position",
    PositionLowSpeed => "position_low_speed",
    Stop => "stop",
    Identify => "identify",
});

impl Capability {
    /// Parameters this capability accepts, in wire order
    #[must_use]
    pub const fn parameters(&self) -> &'static [CapabilityParameter] {
        match self {
            Self::Position | Self::PositionLowSpeed => &[CapabilityParameter::Position],
            Self::Close | Self::Open | Self::Stop | Self::Identify => &[],
        }
    }
}

impl Serialize for Capability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Capability", 2)?;
        state.serialize_field("name", self.identification())?;
        state.serialize_field("parameters", self.parameters())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = NamedObject::deserialize(deserializer)?;
        Self::from_identification(&wire.name)
            .ok_or_else(|| de::Error::custom(format!("unknown capability '{}'", wire.name)))
    }
}

/// Any wire object identified by its `name` field; other fields are ignored.
#[derive(Deserialize)]
struct NamedObject {
    name: String,
}
