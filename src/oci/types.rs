//! OCI resource types
//!
//! Wire models for the handful of Identity, Compute and Object Storage
//! resources the demos read and write. Field names follow the service's
//! camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tenancy (the root compartment of an account)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenancy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub home_region_key: Option<String>,
}

/// A compute instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    /// e.g. `RUNNING`, `STOPPED`, `TERMINATED`
    pub lifecycle_state: String,
    #[serde(default)]
    pub compartment_id: Option<String>,
    #[serde(default)]
    pub availability_domain: Option<String>,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub time_created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicAccessType {
    NoPublicAccess,
    ObjectRead,
    ObjectReadWithoutList,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageTier {
    Standard,
    Archive,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Versioning {
    Enabled,
    Suspended,
    Disabled,
    #[serde(other)]
    Unknown,
}

/// Request body for creating a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucketDetails {
    pub name: String,
    pub compartment_id: String,
    pub public_access_type: PublicAccessType,
    pub storage_tier: StorageTier,
    pub versioning: Versioning,
}

impl CreateBucketDetails {
    /// A private, standard-tier bucket with versioning off
    pub fn private(name: &str, compartment_id: &str) -> Self {
        Self {
            name: name.to_string(),
            compartment_id: compartment_id.to_string(),
            public_access_type: PublicAccessType::NoPublicAccess,
            storage_tier: StorageTier::Standard,
            versioning: Versioning::Disabled,
        }
    }
}

/// Full bucket metadata as returned by GetBucket / CreateBucket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub compartment_id: Option<String>,
    #[serde(default)]
    pub public_access_type: Option<PublicAccessType>,
    #[serde(default)]
    pub storage_tier: Option<StorageTier>,
    #[serde(default)]
    pub versioning: Option<Versioning>,
    #[serde(default)]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub etag: Option<String>,
}

/// An entry from ListBuckets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSummary {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub compartment_id: Option<String>,
    #[serde(default)]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub etag: Option<String>,
}

/// An entry from ListObjects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSummary {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub time_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub etag: Option<String>,
}

impl ObjectSummary {
    /// Get a human-readable size string
    pub fn size_string(&self) -> String {
        let size = match self.size {
            Some(size) => size,
            None => return String::from("-"),
        };

        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if size >= GB {
            format!("{:.2} GB", size as f64 / GB as f64)
        } else if size >= MB {
            format!("{:.2} MB", size as f64 / MB as f64)
        } else if size >= KB {
            format!("{:.2} KB", size as f64 / KB as f64)
        } else {
            format!("{} B", size)
        }
    }
}

/// One page of a ListObjects response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListObjects {
    #[serde(default)]
    pub objects: Vec<ObjectSummary>,
    #[serde(default)]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub next_start_with: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_bucket_details_wire_format() {
        let details = CreateBucketDetails::private("demo-bucket", "ocid1.compartment.oc1..c");
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "demo-bucket",
                "compartmentId": "ocid1.compartment.oc1..c",
                "publicAccessType": "NoPublicAccess",
                "storageTier": "Standard",
                "versioning": "Disabled"
            })
        );
    }

    #[test]
    fn test_instance_from_service_json() {
        let json = r#"{
            "id": "ocid1.instance.oc1..a",
            "displayName": "web-1",
            "lifecycleState": "RUNNING",
            "availabilityDomain": "Uocm:PHX-AD-1",
            "shape": "VM.Standard.E4.Flex",
            "timeCreated": "2024-03-01T12:00:00.000Z",
            "freeformTags": {}
        }"#;
        let instance: Instance = serde_json::from_str(json).unwrap();
        assert_eq!(instance.display_name, "web-1");
        assert_eq!(instance.lifecycle_state, "RUNNING");
        assert_eq!(instance.shape.as_deref(), Some("VM.Standard.E4.Flex"));
        assert!(instance.time_created.is_some());
    }

    #[test]
    fn test_bucket_unknown_enum_values() {
        let json = r#"{"name": "b", "storageTier": "InfrequentAccess", "versioning": "Enabled"}"#;
        let bucket: Bucket = serde_json::from_str(json).unwrap();
        assert_eq!(bucket.storage_tier, Some(StorageTier::Unknown));
        assert_eq!(bucket.versioning, Some(Versioning::Enabled));
        assert!(bucket.public_access_type.is_none());
    }

    #[test]
    fn test_list_objects_page() {
        let json = r#"{
            "objects": [{"name": "ace-demo/a.txt", "size": 12}, {"name": "ace-demo/b.txt"}],
            "nextStartWith": "ace-demo/c.txt"
        }"#;
        let page: ListObjects = serde_json::from_str(json).unwrap();
        assert_eq!(page.objects.len(), 2);
        assert!(page.prefixes.is_empty());
        assert_eq!(page.next_start_with.as_deref(), Some("ace-demo/c.txt"));
    }

    #[test]
    fn test_object_size_string() {
        let mut obj = ObjectSummary {
            name: "file.txt".to_string(),
            size: Some(1536),
            md5: None,
            time_created: None,
            etag: None,
        };
        assert_eq!(obj.size_string(), "1.50 KB");

        obj.size = Some(100);
        assert_eq!(obj.size_string(), "100 B");

        obj.size = Some(5 * 1024 * 1024);
        assert_eq!(obj.size_string(), "5.00 MB");

        obj.size = None;
        assert_eq!(obj.size_string(), "-");
    }
}
