use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant/customer entity selectable for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an organization.
///
/// The client assigns an id when the caller does not supply one, plus both
/// timestamps, before the record ever leaves the process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganization {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
}

/// Partial update for an organization. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Outcome of a delete. The remote API answers `{success, id}`; the fallback
/// path additionally stamps `deletedAt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReceipt {
    pub success: bool,
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_uses_camel_case_on_the_wire() {
        let json = r#"{
            "id": "11111111-1111-1111-1111-111111111111",
            "name": "Northwind Traders",
            "createdAt": "2024-01-01T10:00:00Z",
            "updatedAt": "2024-01-02T11:30:00Z"
        }"#;

        let org: Organization = serde_json::from_str(json).unwrap();
        assert_eq!(org.name, "Northwind Traders");

        let out = serde_json::to_value(&org).unwrap();
        assert!(out.get("createdAt").is_some());
        assert!(out.get("created_at").is_none());
    }

    #[test]
    fn test_new_organization_id_is_optional() {
        let payload: NewOrganization = serde_json::from_str(r#"{"name": "Acme"}"#).unwrap();
        assert!(payload.id.is_none());
        assert_eq!(payload.name, "Acme");
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = OrganizationPatch { name: None };
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }
}
