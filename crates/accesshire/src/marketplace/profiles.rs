//! Profile synchronizer: keeps candidate and employer records in step with
//! identity-provider events and serves profile reads and edits.

use std::sync::Arc;

use tracing::info;

use super::domain::{
    AccountRole, CandidateId, CandidateProfile, CandidateProfilePatch, EmployerId,
    EmployerProfile, EmployerProfilePatch, Identity,
};
use super::gateway::ProfileStore;
use super::MarketplaceError;

pub struct ProfileSynchronizer<P> {
    profiles: Arc<P>,
}

impl<P> ProfileSynchronizer<P>
where
    P: ProfileStore,
{
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }

    /// Single entry point for sign-in and registration events. Ensures a
    /// profile record exists for the account and folds the identity fields
    /// into it; fields the identity does not carry stay untouched, so the
    /// call is safe to repeat on every sign-in.
    pub fn on_identity_established(&self, identity: &Identity) -> Result<(), MarketplaceError> {
        match identity.role {
            AccountRole::Candidate => {
                let id = CandidateId(identity.account.clone());
                self.profiles.upsert_candidate(
                    &id,
                    CandidateProfilePatch {
                        display_name: identity.display_name.clone(),
                        email: identity.email.clone(),
                        ..CandidateProfilePatch::default()
                    },
                )?;
            }
            AccountRole::Employer => {
                let id = EmployerId(identity.account.clone());
                self.profiles.upsert_employer(
                    &id,
                    EmployerProfilePatch {
                        company_name: identity.display_name.clone(),
                        contact_email: identity.email.clone(),
                        verified: None,
                    },
                )?;
            }
        }
        info!(
            account = %identity.account,
            role = ?identity.role,
            "identity profile synchronized"
        );
        Ok(())
    }

    pub fn update_candidate(
        &self,
        id: &CandidateId,
        patch: CandidateProfilePatch,
    ) -> Result<CandidateProfile, MarketplaceError> {
        let profile = self.profiles.upsert_candidate(id, patch)?;
        info!(candidate = %profile.id, "candidate profile updated");
        Ok(profile)
    }

    pub fn candidate(&self, id: &CandidateId) -> Result<CandidateProfile, MarketplaceError> {
        self.profiles
            .fetch_candidate(id)?
            .ok_or_else(|| MarketplaceError::ProfileNotFound(id.0.clone()))
    }

    pub fn update_employer(
        &self,
        id: &EmployerId,
        patch: EmployerProfilePatch,
    ) -> Result<EmployerProfile, MarketplaceError> {
        let profile = self.profiles.upsert_employer(id, patch)?;
        info!(employer = %profile.id, "employer profile updated");
        Ok(profile)
    }

    pub fn employer(&self, id: &EmployerId) -> Result<EmployerProfile, MarketplaceError> {
        self.profiles
            .fetch_employer(id)?
            .ok_or_else(|| MarketplaceError::ProfileNotFound(id.0.clone()))
    }
}
