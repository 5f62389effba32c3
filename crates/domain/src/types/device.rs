//! Devices, device types and categories

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::capability::Capability;
use crate::impl_wire_identifier;

/// Encode/decode an identifier enum as its plain wire string
macro_rules! wire_string_serde {
    ($enum_name:ident, $what:literal) => {
        impl Serialize for $enum_name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.identification())
            }
        }

        impl<'de> Deserialize<'de> for $enum_name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let identification = String::deserialize(deserializer)?;
                Self::from_identification(&identification).ok_or_else(|| {
                    de::Error::custom(format!(concat!("unknown ", $what, " '{}'"), identification))
                })
            }
        }
    };
}

/// Broad classification of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Actuator,
    RollerShutter,
    Hub,
}

impl_wire_identifier!(Category {
    Actuator => "actuator",
    RollerShutter => "roller_shutter",
    Hub => "hub",
});

wire_string_serde!(Category, "category");

/// Concrete device model, which fixes the capabilities a device offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    HubConnexoon,
    RollerShutterDiscreteGeneric,
    RollerShutterPositionableOrientableStatefulGeneric,
    RollerShutterPositionableOrientableStatefulGradhermetic,
    RollerShutterPositionableOrientableStatefulHolla,
    RollerShutterPositionableStatefulDual,
    RollerShutterPositionableStatefulGeneric,
    RollerShutterPositionableStatefulProjection,
    RollerShutterPositionableStatefulRoof,
    RollerShutterPositionableStatefulRs100,
    RollerShutterPositionableStatelessUno,
}

impl_wire_identifier!(DeviceType {
    HubConnexoon => "hub_connexoon",
    RollerShutterDiscreteGeneric => "roller_shutter_discrete_generic",
    RollerShutterPositionableOrientableStatefulGeneric =>
        "roller_shutter_positionable_orientable_stateful_generic",
    RollerShutterPositionableOrientableStatefulGradhermetic =>
        "roller_shutter_positionable_orientable_stateful_gradhermetic",
    RollerShutterPositionableOrientableStatefulHolla =>
        "roller_shutter_positionable_orientable_stateful_holla",
    RollerShutterPositionableStatefulDual => "roller_shutter_positionable_stateful_dual",
    RollerShutterPositionableStatefulGeneric => "roller_shutter_positionable_stateful_generic",
    RollerShutterPositionableStatefulProjection =>
        "roller_shutter_positionable_stateful_projection",
    RollerShutterPositionableStatefulRoof => "roller_shutter_positionable_stateful_roof",
    RollerShutterPositionableStatefulRs100 => "roller_shutter_positionable_stateful_rs100",
    RollerShutterPositionableStatelessUno => "roller_shutter_positionable_stateless_uno",
});

wire_string_serde!(DeviceType, "device type");

const DISCRETE: &[Capability] =
    &[Capability::Close, Capability::Open, Capability::Stop, Capability::Identify];

const POSITIONABLE: &[Capability] = &[
    Capability::Close,
    Capability::Open,
    Capability::Position,
    Capability::Stop,
    Capability::Identify,
];

const POSITIONABLE_LOW_SPEED: &[Capability] = &[
    Capability::Close,
    Capability::Open,
    Capability::Position,
    Capability::PositionLowSpeed,
    Capability::Stop,
    Capability::Identify,
];

impl DeviceType {
    /// Capabilities every device of this type offers
    #[must_use]
    pub const fn capabilities(&self) -> &'static [Capability] {
        match self {
            Self::HubConnexoon => &[],
            Self::RollerShutterDiscreteGeneric => DISCRETE,
            Self::RollerShutterPositionableStatefulRs100 => POSITIONABLE_LOW_SPEED,
            Self::RollerShutterPositionableOrientableStatefulGeneric
            | Self::RollerShutterPositionableOrientableStatefulGradhermetic
            | Self::RollerShutterPositionableOrientableStatefulHolla
            | Self::RollerShutterPositionableStatefulDual
            | Self::RollerShutterPositionableStatefulGeneric
            | Self::RollerShutterPositionableStatefulProjection
            | Self::RollerShutterPositionableStatefulRoof
            | Self::RollerShutterPositionableStatelessUno => POSITIONABLE,
        }
    }

    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// A reported device state, e.g. `{"name": "position", "value": 30, "type": "integer"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub state_type: String,
}

/// A device attached to a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    /// Hub the device is paired with; absent for hubs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub site_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    pub available: bool,
    #[serde(default)]
    pub version: String,
}

impl Device {
    /// Whether the device reported `capability` as available
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    #[must_use]
    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|state| state.name == name)
    }

    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}
