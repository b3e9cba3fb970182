//! A complete import-trade process fixture.
//!
//! Mirrors a realistic tenant composition: an inbound transport phase
//! (arrival tracking plus expected availability) followed by an invoicing
//! phase. Step rules read the same vehicle attributes the builders set, so
//! tests can drive red flags and disabling through the snapshot alone.

use std::sync::Arc;

use serde_json::json;

use tradeflow_core::{
    Capability, EmailContent, FileRef, ProcessIdentity, ProcessRegistry, ProcessSpec, RedFlag,
    StatusIdentity, StatusSpec, StepContext, StepIdentity, StepSpec, SubprocessIdentity,
    SubprocessSpec, TenantId, WorkflowError,
};

/// Step identity keys of the import-trade fixture
pub mod steps {
    /// Arrival confirmation step
    pub const VEHICLE_ARRIVED: &str = "vehicle-arrived";
    /// Papers handover step
    pub const PAPERS_RECEIVED: &str = "papers-received";
    /// Expected availability date step (custom summary)
    pub const AVAILABILITY_DATE: &str = "availability-date";
    /// Purchase invoice receipt step
    pub const INVOICE_RECEIVED: &str = "purchase-invoice-received";
    /// Purchase invoice payment step
    pub const INVOICE_PAID: &str = "purchase-invoice-paid";
}

struct VehicleArrivedStep;

impl StepSpec for VehicleArrivedStep {
    fn identity(&self) -> StepIdentity {
        StepIdentity::new(steps::VEHICLE_ARRIVED)
    }

    fn display_name(&self) -> &str {
        "Vehicle arrived"
    }

    fn has_quick_date_finish(&self) -> bool {
        true
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::RedFlag, Capability::Files]
    }

    fn red_flag(&self, ctx: &StepContext<'_>) -> Result<Option<RedFlag>, WorkflowError> {
        Ok(Some(RedFlag::new(
            "missing-papers",
            "Vehicle received but papers are missing",
            !ctx.vehicle.attribute_bool("papers_received"),
        )))
    }

    fn files(&self, ctx: &StepContext<'_>) -> Result<Vec<FileRef>, WorkflowError> {
        Ok(ctx.vehicle.files_in_section("cmr"))
    }
}

struct PapersReceivedStep;

impl StepSpec for PapersReceivedStep {
    fn identity(&self) -> StepIdentity {
        StepIdentity::new(steps::PAPERS_RECEIVED)
    }

    fn display_name(&self) -> &str {
        "Papers received"
    }

    fn has_quick_date_finish(&self) -> bool {
        true
    }

    fn modal_component(&self) -> Option<&str> {
        Some("PapersModal")
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::Files]
    }

    fn files(&self, ctx: &StepContext<'_>) -> Result<Vec<FileRef>, WorkflowError> {
        Ok(ctx.vehicle.files_in_section("papers"))
    }
}

struct AvailabilityDateStep;

impl StepSpec for AvailabilityDateStep {
    fn identity(&self) -> StepIdentity {
        StepIdentity::new(steps::AVAILABILITY_DATE)
    }

    fn display_name(&self) -> &str {
        "Expected availability"
    }

    fn modal_component(&self) -> Option<&str> {
        Some("AvailabilityModal")
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::ComponentData]
    }

    // The stored additional value (e.g. a calendar week) is the summary,
    // not the finish date.
    fn summary(
        &self,
        finished: Option<&tradeflow_core::FinishedStep>,
    ) -> Option<String> {
        finished.and_then(|f| f.additional_value.clone())
    }

    fn component_data(
        &self,
        ctx: &StepContext<'_>,
    ) -> Result<Option<serde_json::Value>, WorkflowError> {
        Ok(Some(json!({
            "expected_date": ctx.vehicle.attribute_str("expected_availability_date"),
        })))
    }
}

struct InvoiceReceivedStep;

impl StepSpec for InvoiceReceivedStep {
    fn identity(&self) -> StepIdentity {
        StepIdentity::new(steps::INVOICE_RECEIVED)
    }

    fn display_name(&self) -> &str {
        "Purchase invoice received"
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::Files, Capability::Disableable]
    }

    fn files(&self, ctx: &StepContext<'_>) -> Result<Vec<FileRef>, WorkflowError> {
        Ok(ctx.vehicle.files_in_section("invoices"))
    }

    fn is_disabled(&self, ctx: &StepContext<'_>) -> Result<bool, WorkflowError> {
        // Consignment vehicles are invoiced on sale, not on intake.
        Ok(ctx.vehicle.attribute_bool("consignment"))
    }
}

struct InvoicePaidStep;

impl StepSpec for InvoicePaidStep {
    fn identity(&self) -> StepIdentity {
        StepIdentity::new(steps::INVOICE_PAID)
    }

    fn display_name(&self) -> &str {
        "Purchase invoice paid"
    }

    fn has_quick_date_finish(&self) -> bool {
        true
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::Url, Capability::Email]
    }

    fn url(&self, ctx: &StepContext<'_>) -> Result<Option<String>, WorkflowError> {
        Ok(Some(format!("/vehicles/{}/invoices", ctx.vehicle.id.0)))
    }

    fn email(&self, ctx: &StepContext<'_>) -> Result<Option<EmailContent>, WorkflowError> {
        Ok(Some(EmailContent {
            recipient: ctx
                .vehicle
                .attribute_str("supplier_email")
                .unwrap_or("accounting@example.com")
                .to_string(),
            subject: format!("Payment confirmation {}", ctx.vehicle.id.0),
            template_text: "The purchase invoice for your vehicle has been paid.".to_string(),
        }))
    }
}

struct ArrivalStatus {
    steps: Vec<Arc<dyn StepSpec>>,
}

impl StatusSpec for ArrivalStatus {
    fn identity(&self) -> StatusIdentity {
        StatusIdentity("arrival".to_string())
    }

    fn display_name(&self) -> &str {
        "Arrival"
    }

    fn steps(&self) -> &[Arc<dyn StepSpec>] {
        &self.steps
    }
}

struct AvailabilityStatus {
    steps: Vec<Arc<dyn StepSpec>>,
}

impl StatusSpec for AvailabilityStatus {
    fn identity(&self) -> StatusIdentity {
        StatusIdentity("availability".to_string())
    }

    fn display_name(&self) -> &str {
        "Availability"
    }

    fn steps(&self) -> &[Arc<dyn StepSpec>] {
        &self.steps
    }
}

struct PurchaseInvoiceStatus {
    steps: Vec<Arc<dyn StepSpec>>,
}

impl StatusSpec for PurchaseInvoiceStatus {
    fn identity(&self) -> StatusIdentity {
        StatusIdentity("purchase-invoice".to_string())
    }

    fn display_name(&self) -> &str {
        "Purchase invoice"
    }

    fn steps(&self) -> &[Arc<dyn StepSpec>] {
        &self.steps
    }
}

struct TransportInboundSubprocess {
    statuses: Vec<Arc<dyn StatusSpec>>,
}

impl SubprocessSpec for TransportInboundSubprocess {
    fn identity(&self) -> SubprocessIdentity {
        SubprocessIdentity("transport-inbound".to_string())
    }

    fn display_name(&self) -> &str {
        "Transport inbound"
    }

    fn icon_component(&self) -> &str {
        "TruckIcon"
    }

    fn statuses(&self) -> &[Arc<dyn StatusSpec>] {
        &self.statuses
    }
}

struct InvoicingSubprocess {
    statuses: Vec<Arc<dyn StatusSpec>>,
}

impl SubprocessSpec for InvoicingSubprocess {
    fn identity(&self) -> SubprocessIdentity {
        SubprocessIdentity("invoicing".to_string())
    }

    fn display_name(&self) -> &str {
        "Invoicing"
    }

    fn icon_component(&self) -> &str {
        "InvoiceIcon"
    }

    fn statuses(&self) -> &[Arc<dyn StatusSpec>] {
        &self.statuses
    }
}

struct ImportTradeProcess {
    subprocesses: Vec<Arc<dyn SubprocessSpec>>,
}

impl ProcessSpec for ImportTradeProcess {
    fn identity(&self) -> ProcessIdentity {
        ProcessIdentity("trade-import".to_string())
    }

    fn display_name(&self) -> &str {
        "Trade - Import"
    }

    fn subprocesses(&self) -> &[Arc<dyn SubprocessSpec>] {
        &self.subprocesses
    }
}

/// The import-trade process definition
pub fn import_trade_process() -> Arc<dyn ProcessSpec> {
    Arc::new(ImportTradeProcess {
        subprocesses: vec![
            Arc::new(TransportInboundSubprocess {
                statuses: vec![
                    Arc::new(ArrivalStatus {
                        steps: vec![Arc::new(VehicleArrivedStep), Arc::new(PapersReceivedStep)],
                    }),
                    Arc::new(AvailabilityStatus {
                        steps: vec![Arc::new(AvailabilityDateStep)],
                    }),
                ],
            }),
            Arc::new(InvoicingSubprocess {
                statuses: vec![Arc::new(PurchaseInvoiceStatus {
                    steps: vec![Arc::new(InvoiceReceivedStep), Arc::new(InvoicePaidStep)],
                })],
            }),
        ],
    })
}

/// A registry with the import-trade process wired for the given tenant
pub fn registry_with_import_trade(tenant: &str) -> ProcessRegistry {
    let mut registry = ProcessRegistry::new();
    registry
        .register(TenantId(tenant.to_string()), import_trade_process())
        .expect("fixture process definition is valid");
    registry
}
