//! Core services - orchestration between ports and domain logic.
//!
//! Services don't know about concrete adapters: the HTTP server and the
//! CLI both drive the same `ScriptService`, and provisioning reaches the
//! network only through the `ModelSource` port.

mod provisioner;
mod script_service;

pub use provisioner::{ModelStatus, ProvisionOptions, ProvisionReport, Provisioner, StepStatus};
pub use script_service::ScriptService;
