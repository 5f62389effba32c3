//! Data contracts exchanged with the Somfy Open API

pub mod capability;
pub mod command;
pub mod device;
pub mod site;

pub use capability::{Capability, CapabilityParameter, ParameterType};
pub use command::{Command, CommandParameter, Execution};
pub use device::{Category, Device, DeviceType, State};
pub use site::Site;
