//! Machines, their components, and the environments they live in.

use serde::{Deserialize, Serialize};

use crate::ids::{ComponentId, EnvironmentId, GroupId, MachineId};
use crate::license::{License, User};

/// An isolated environment (e.g. `sandbox`, `production`) within an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: EnvironmentId,
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A hardware or software component fingerprinted on a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub fingerprint: String,
    pub name: String,
}

/// A named group of machines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

/// A checked-out execution endpoint, identified by its fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    pub fingerprint: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub cores: Option<u32>,
    /// The license this machine is activated under. A machine without one
    /// cannot be checked out.
    #[serde(default)]
    pub license: Option<License>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub group: Option<Group>,
    #[serde(default)]
    pub owner: Option<User>,
}

impl Machine {
    /// Creates a machine with only an id and fingerprint.
    #[must_use]
    pub fn new(fingerprint: impl Into<String>) -> Self {
        Self {
            id: MachineId::new(),
            fingerprint: fingerprint.into(),
            name: None,
            platform: None,
            hostname: None,
            cores: None,
            license: None,
            components: Vec::new(),
            group: None,
            owner: None,
        }
    }

    /// Attaches a license, consuming and returning the machine.
    #[must_use]
    pub fn with_license(mut self, license: License) -> Self {
        self.license = Some(license);
        self
    }
}
