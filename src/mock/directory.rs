use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;
use uuid::{uuid, Uuid};

use crate::api::ApiError;
use crate::models::{Organization, OrganizationPatch};

/// Lookup/mutation surface of the fallback store.
///
/// Kept narrow so the in-memory list can be swapped for a real backend in
/// tests or a future persistence layer.
pub trait OrganizationDirectory: Send + Sync {
    fn list(&self) -> Vec<Organization>;

    fn find(&self, id: Uuid) -> Option<Organization>;

    /// Fails with `DuplicateId` when the id is already taken.
    fn insert(&self, org: Organization) -> Result<(), ApiError>;

    /// Merge the patch over the stored record and refresh `updated_at`.
    fn update(&self, id: Uuid, patch: &OrganizationPatch) -> Result<Organization, ApiError>;

    fn remove(&self, id: Uuid) -> Result<(), ApiError>;
}

/// The session's fallback "database": five fixed organizations, mutated in
/// place by create/update/delete while the server is unreachable. State
/// survives across calls but not across restarts.
#[derive(Debug)]
pub struct MemoryDirectory {
    orgs: Mutex<Vec<Organization>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            orgs: Mutex::new(seed_organizations()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Organization>> {
        self.orgs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl OrganizationDirectory for MemoryDirectory {
    fn list(&self) -> Vec<Organization> {
        self.lock().clone()
    }

    fn find(&self, id: Uuid) -> Option<Organization> {
        self.lock().iter().find(|org| org.id == id).cloned()
    }

    fn insert(&self, org: Organization) -> Result<(), ApiError> {
        let mut orgs = self.lock();
        if orgs.iter().any(|existing| existing.id == org.id) {
            return Err(ApiError::DuplicateId(org.id));
        }
        debug!(id = %org.id, "organization added to fallback data");
        orgs.push(org);
        Ok(())
    }

    fn update(&self, id: Uuid, patch: &OrganizationPatch) -> Result<Organization, ApiError> {
        let mut orgs = self.lock();
        let org = orgs
            .iter_mut()
            .find(|org| org.id == id)
            .ok_or(ApiError::NotFound(id))?;

        if let Some(name) = &patch.name {
            org.name = name.clone();
        }
        org.updated_at = Utc::now();
        Ok(org.clone())
    }

    fn remove(&self, id: Uuid) -> Result<(), ApiError> {
        let mut orgs = self.lock();
        let index = orgs
            .iter()
            .position(|org| org.id == id)
            .ok_or(ApiError::NotFound(id))?;
        orgs.remove(index);
        debug!(%id, "organization removed from fallback data");
        Ok(())
    }
}

fn seed_timestamp(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn seed_organization(id: Uuid, name: &str, day: u32, hour: u32, minute: u32) -> Organization {
    let stamp = seed_timestamp(day, hour, minute);
    Organization {
        id,
        name: name.to_string(),
        created_at: stamp,
        updated_at: stamp,
    }
}

/// The five organizations every session starts with.
fn seed_organizations() -> Vec<Organization> {
    vec![
        seed_organization(
            uuid!("11111111-1111-1111-1111-111111111111"),
            "Northwind Traders",
            1,
            10,
            0,
        ),
        seed_organization(
            uuid!("22222222-2222-2222-2222-222222222222"),
            "Cascade Supply Co.",
            2,
            11,
            30,
        ),
        seed_organization(
            uuid!("33333333-3333-3333-3333-333333333333"),
            "Blue Harbor Logistics",
            3,
            9,
            15,
        ),
        seed_organization(
            uuid!("44444444-4444-4444-4444-444444444444"),
            "Cedar Valley Retail",
            4,
            14,
            20,
        ),
        seed_organization(
            uuid!("55555555-5555-5555-5555-555555555555"),
            "Summit Office Supply",
            5,
            16,
            45,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_org(id: Uuid, name: &str) -> Organization {
        let now = Utc::now();
        Organization {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_seeds_five_organizations_with_fixed_ids() {
        let directory = MemoryDirectory::new();
        let orgs = directory.list();
        assert_eq!(orgs.len(), 5);
        assert_eq!(orgs[0].id, uuid!("11111111-1111-1111-1111-111111111111"));
        assert_eq!(orgs[4].name, "Summit Office Supply");
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let directory = MemoryDirectory::new();
        let taken = directory.list()[0].id;

        let result = directory.insert(sample_org(taken, "Impostor"));
        assert!(matches!(result, Err(ApiError::DuplicateId(id)) if id == taken));
        assert_eq!(directory.list().len(), 5);
    }

    #[test]
    fn test_insert_then_find_round_trips() {
        let directory = MemoryDirectory::new();
        let org = sample_org(Uuid::new_v4(), "Fresh Markets");

        directory.insert(org.clone()).unwrap();
        assert_eq!(directory.find(org.id), Some(org));
        assert_eq!(directory.list().len(), 6);
    }

    #[test]
    fn test_update_merges_patch_and_refreshes_timestamp() {
        let directory = MemoryDirectory::new();
        let before = directory.list()[0].clone();

        let patch = OrganizationPatch {
            name: Some("Renamed Traders".to_string()),
        };
        let updated = directory.update(before.id, &patch).unwrap();

        assert_eq!(updated.name, "Renamed Traders");
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at > before.updated_at);
    }

    #[test]
    fn test_empty_patch_keeps_the_name() {
        let directory = MemoryDirectory::new();
        let before = directory.list()[1].clone();

        let updated = directory
            .update(before.id, &OrganizationPatch::default())
            .unwrap();
        assert_eq!(updated.name, before.name);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let directory = MemoryDirectory::new();
        let missing = Uuid::new_v4();

        let result = directory.update(missing, &OrganizationPatch::default());
        assert!(matches!(result, Err(ApiError::NotFound(id)) if id == missing));
    }

    #[test]
    fn test_remove_deletes_exactly_one_entry() {
        let directory = MemoryDirectory::new();
        let target = directory.list()[2].id;

        directory.remove(target).unwrap();
        assert_eq!(directory.list().len(), 4);
        assert!(directory.find(target).is_none());
        assert!(matches!(
            directory.remove(target),
            Err(ApiError::NotFound(_))
        ));
    }
}
