//! Read model of the vehicle a workflow tracks.
//!
//! The engine never loads the vehicle itself; the application layer hands it
//! an immutable snapshot (live attributes plus attached files and images)
//! so that capability computations are pure functions of the snapshot.

use serde::{Deserialize, Serialize};

use super::identity::{TenantId, VehicleId};

/// Polymorphic kind tag of the tracked vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    /// Passenger car
    Car,
    /// Light commercial vehicle
    Van,
    /// Heavy commercial vehicle
    Truck,
}

/// Reference to a file attached to the vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Storage identifier of the file
    pub id: String,

    /// Original file name shown to the user
    pub name: String,

    /// Download URL
    pub url: String,

    /// Upload section the file belongs to (e.g. "damages", "papers")
    pub section: Option<String>,
}

/// Reference to an image attached to the vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Storage identifier of the image
    pub id: String,

    /// Display URL
    pub url: String,

    /// Upload section the image belongs to
    pub section: Option<String>,
}

/// Immutable snapshot of a vehicle, loaded once per request.
///
/// `attributes` carries the live vehicle fields that step rules read
/// (red-flag conditions, disable rules, custom summaries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    /// Vehicle identifier
    pub id: VehicleId,

    /// Polymorphic kind tag
    pub kind: VehicleKind,

    /// Owning tenant (company)
    pub tenant: TenantId,

    /// Live vehicle attributes as a JSON object
    pub attributes: serde_json::Value,

    /// Files attached to the vehicle
    pub files: Vec<FileRef>,

    /// Images attached to the vehicle
    pub images: Vec<ImageRef>,
}

impl VehicleSnapshot {
    /// Look up a live attribute by key
    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    /// Read a live attribute as a boolean, defaulting to `false`
    pub fn attribute_bool(&self, key: &str) -> bool {
        self.attribute(key).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// Read a live attribute as a string
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(|v| v.as_str())
    }

    /// Files attached under the given upload section
    pub fn files_in_section(&self, section: &str) -> Vec<FileRef> {
        self.files
            .iter()
            .filter(|f| f.section.as_deref() == Some(section))
            .cloned()
            .collect()
    }

    /// Images attached under the given upload section
    pub fn images_in_section(&self, section: &str) -> Vec<ImageRef> {
        self.images
            .iter()
            .filter(|i| i.section.as_deref() == Some(section))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> VehicleSnapshot {
        VehicleSnapshot {
            id: VehicleId("veh-1".to_string()),
            kind: VehicleKind::Car,
            tenant: TenantId("company-a".to_string()),
            attributes: json!({
                "papers_received": true,
                "license_plate": "AB-123-CD",
            }),
            files: vec![
                FileRef {
                    id: "f1".to_string(),
                    name: "invoice.pdf".to_string(),
                    url: "/files/f1".to_string(),
                    section: Some("papers".to_string()),
                },
                FileRef {
                    id: "f2".to_string(),
                    name: "dent.jpg".to_string(),
                    url: "/files/f2".to_string(),
                    section: Some("damages".to_string()),
                },
            ],
            images: vec![ImageRef {
                id: "i1".to_string(),
                url: "/images/i1".to_string(),
                section: None,
            }],
        }
    }

    #[test]
    fn test_attribute_lookups() {
        let vehicle = snapshot();
        assert!(vehicle.attribute_bool("papers_received"));
        assert!(!vehicle.attribute_bool("unknown"));
        assert_eq!(vehicle.attribute_str("license_plate"), Some("AB-123-CD"));
        assert_eq!(vehicle.attribute_str("missing"), None);
    }

    #[test]
    fn test_files_in_section() {
        let vehicle = snapshot();
        let papers = vehicle.files_in_section("papers");
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].name, "invoice.pdf");
        assert!(vehicle.files_in_section("transport").is_empty());
    }

    #[test]
    fn test_images_in_section() {
        let vehicle = snapshot();
        assert!(vehicle.images_in_section("interior").is_empty());
    }

    #[test]
    fn test_vehicle_kind_serialization() {
        assert_eq!(serde_json::to_string(&VehicleKind::Van).unwrap(), "\"van\"");
    }
}
