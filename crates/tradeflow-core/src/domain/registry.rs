//! Explicit registry of tenant process compositions.
//!
//! The registry is the only place process definitions are resolved from;
//! tenants wire their subprocess sets here at startup, and every definition
//! tree is validated on registration. A misconfigured definition is a
//! programming error and fails fast with
//! [`WorkflowError::ConfigurationError`], never silently skipped.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::identity::{ProcessIdentity, TenantId};
use super::process::ProcessSpec;
use crate::error::WorkflowError;

/// Registry mapping (tenant, process identity) to a validated process
/// definition
#[derive(Default)]
pub struct ProcessRegistry {
    processes: HashMap<(TenantId, ProcessIdentity), Arc<dyn ProcessSpec>>,
}

impl ProcessRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a process definition for a tenant.
    ///
    /// The whole definition tree is validated before it becomes resolvable:
    /// identities and display names must be non-empty at every level, every
    /// composite level must declare at least one child, sibling subprocess
    /// and status identities must be unique within their parent, and step
    /// identities must be unique within the process.
    pub fn register(
        &mut self,
        tenant: TenantId,
        spec: Arc<dyn ProcessSpec>,
    ) -> Result<(), WorkflowError> {
        Self::validate(spec.as_ref())?;

        let key = (tenant, spec.identity());
        if self.processes.contains_key(&key) {
            return Err(WorkflowError::ConfigurationError(format!(
                "Process '{}' already registered for tenant '{}'",
                key.1 .0, key.0 .0
            )));
        }

        self.processes.insert(key, spec);
        Ok(())
    }

    /// Resolve the process definition wired for a tenant, if any
    pub fn resolve(
        &self,
        tenant: &TenantId,
        process: &ProcessIdentity,
    ) -> Option<Arc<dyn ProcessSpec>> {
        self.processes
            .get(&(tenant.clone(), process.clone()))
            .cloned()
    }

    /// Process identities wired for a tenant
    pub fn processes_for(&self, tenant: &TenantId) -> Vec<ProcessIdentity> {
        let mut identities: Vec<ProcessIdentity> = self
            .processes
            .keys()
            .filter(|(t, _)| t == tenant)
            .map(|(_, p)| p.clone())
            .collect();
        identities.sort_by(|a, b| a.0.cmp(&b.0));
        identities
    }

    fn validate(spec: &dyn ProcessSpec) -> Result<(), WorkflowError> {
        if spec.identity().0.is_empty() {
            return Err(WorkflowError::ConfigurationError(
                "Process declares an empty identity".to_string(),
            ));
        }
        if spec.display_name().is_empty() {
            return Err(WorkflowError::ConfigurationError(format!(
                "Process '{}' declares an empty display name",
                spec.identity().0
            )));
        }
        if spec.subprocesses().is_empty() {
            return Err(WorkflowError::ConfigurationError(format!(
                "Process '{}' declares no subprocesses",
                spec.identity().0
            )));
        }

        let mut seen_subprocesses = HashSet::new();
        let mut seen_steps = HashSet::new();
        for subprocess in spec.subprocesses() {
            if subprocess.identity().0.is_empty() {
                return Err(WorkflowError::ConfigurationError(format!(
                    "Subprocess in process '{}' declares an empty identity",
                    spec.identity().0
                )));
            }
            if subprocess.display_name().is_empty() {
                return Err(WorkflowError::ConfigurationError(format!(
                    "Subprocess '{}' declares an empty display name",
                    subprocess.identity().0
                )));
            }
            if !seen_subprocesses.insert(subprocess.identity()) {
                return Err(WorkflowError::ConfigurationError(format!(
                    "Duplicate subprocess identity '{}' in process '{}'",
                    subprocess.identity().0,
                    spec.identity().0
                )));
            }
            if subprocess.statuses().is_empty() {
                return Err(WorkflowError::ConfigurationError(format!(
                    "Subprocess '{}' declares no statuses",
                    subprocess.identity().0
                )));
            }

            let mut seen_statuses = HashSet::new();
            for status in subprocess.statuses() {
                if status.identity().0.is_empty() {
                    return Err(WorkflowError::ConfigurationError(format!(
                        "Status in subprocess '{}' declares an empty identity",
                        subprocess.identity().0
                    )));
                }
                if status.display_name().is_empty() {
                    return Err(WorkflowError::ConfigurationError(format!(
                        "Status '{}' declares an empty display name",
                        status.identity().0
                    )));
                }
                if !seen_statuses.insert(status.identity()) {
                    return Err(WorkflowError::ConfigurationError(format!(
                        "Duplicate status identity '{}' in subprocess '{}'",
                        status.identity().0,
                        subprocess.identity().0
                    )));
                }
                if status.steps().is_empty() {
                    return Err(WorkflowError::ConfigurationError(format!(
                        "Status '{}' declares no steps",
                        status.identity().0
                    )));
                }

                for step in status.steps() {
                    let identity = step.identity();
                    if identity.0.is_empty() {
                        return Err(WorkflowError::ConfigurationError(format!(
                            "Step in status '{}' declares an empty identity",
                            status.identity().0
                        )));
                    }
                    if step.display_name().is_empty() {
                        return Err(WorkflowError::ConfigurationError(format!(
                            "Step '{}' declares an empty display name",
                            identity.0
                        )));
                    }
                    if !seen_steps.insert(identity.clone()) {
                        return Err(WorkflowError::ConfigurationError(format!(
                            "Duplicate step identity '{}' in process '{}'",
                            identity.0,
                            spec.identity().0
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
