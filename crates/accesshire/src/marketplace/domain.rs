use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct JobId(pub String);

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ApplicationId(pub String);

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct CandidateId(pub String);

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct EmployerId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EmployerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accessibility accommodations a job explicitly offers. Each flag is an
/// affirmative commitment; `false` means "not declared", never "excluded".
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessibilityFacets {
    pub remote: bool,
    pub screen_reader_friendly: bool,
    pub flexible_hours: bool,
    pub neurodiverse_inclusive: bool,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Job {
    pub id: JobId,
    pub employer_id: EmployerId,
    pub company_name: String,
    pub title: String,
    pub location: String,
    pub salary: Option<String>,
    pub description: String,
    pub accessibility_tags: Vec<String>,
    pub facets: AccessibilityFacets,
    pub posted_at: DateTime<Utc>,
}

/// Employer input for a new listing. The employer identity and company name
/// are attached by the listing desk, never supplied by the caller.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct JobDraft {
    pub title: String,
    pub location: String,
    pub salary: Option<String>,
    pub description: String,
    #[serde(default)]
    pub accessibility_tags: Vec<String>,
    #[serde(default)]
    pub facets: AccessibilityFacets,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CandidateProfile {
    pub id: CandidateId,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub education: Option<String>,
    pub experience_level: Option<String>,
    pub location: Option<String>,
    pub disability_type: Option<String>,
    pub disability_level: Option<String>,
    pub preferred_job_type: Option<String>,
    pub skills: Vec<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CandidateProfile {
    pub fn new(id: CandidateId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            display_name: None,
            email: None,
            education: None,
            experience_level: None,
            location: None,
            disability_type: None,
            disability_level: None,
            preferred_job_type: None,
            skills: Vec::new(),
            resume_url: None,
            created_at,
        }
    }

    /// Merge write: provided fields overwrite, absent fields survive, and
    /// `created_at` is fixed at first creation.
    pub fn merge(&mut self, patch: CandidateProfilePatch) {
        if let Some(display_name) = patch.display_name {
            self.display_name = Some(display_name);
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(education) = patch.education {
            self.education = Some(education);
        }
        if let Some(experience_level) = patch.experience_level {
            self.experience_level = Some(experience_level);
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(disability_type) = patch.disability_type {
            self.disability_type = Some(disability_type);
        }
        if let Some(disability_level) = patch.disability_level {
            self.disability_level = Some(disability_level);
        }
        if let Some(preferred_job_type) = patch.preferred_job_type {
            self.preferred_job_type = Some(preferred_job_type);
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if let Some(resume_url) = patch.resume_url {
            self.resume_url = Some(resume_url);
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CandidateProfilePatch {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub education: Option<String>,
    pub experience_level: Option<String>,
    pub location: Option<String>,
    pub disability_type: Option<String>,
    pub disability_level: Option<String>,
    pub preferred_job_type: Option<String>,
    pub skills: Option<Vec<String>>,
    pub resume_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EmployerProfile {
    pub id: EmployerId,
    pub company_name: Option<String>,
    pub contact_email: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl EmployerProfile {
    pub fn new(id: EmployerId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            company_name: None,
            contact_email: None,
            verified: false,
            created_at,
        }
    }

    pub fn merge(&mut self, patch: EmployerProfilePatch) {
        if let Some(company_name) = patch.company_name {
            self.company_name = Some(company_name);
        }
        if let Some(contact_email) = patch.contact_email {
            self.contact_email = Some(contact_email);
        }
        if let Some(verified) = patch.verified {
            self.verified = verified;
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EmployerProfilePatch {
    pub company_name: Option<String>,
    pub contact_email: Option<String>,
    pub verified: Option<bool>,
}

/// Authenticated account details delivered by the identity provider on each
/// sign-in or registration event.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Identity {
    pub account: String,
    pub role: AccountRole,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Candidate,
    Employer,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub job_title: String,
    pub company_name: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub version: u64,
}

/// Review pipeline states in pipeline order. `Withdrawn` sits outside the
/// employer pipeline and is reachable from any non-terminal state.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ApplicationStatus {
    Applied,
    UnderReview,
    Interview,
    Selected,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::UnderReview => "under_review",
            Self::Interview => "interview",
            Self::Selected => "selected",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Selected | Self::Rejected | Self::Withdrawn)
    }

    /// Whether the review pipeline permits moving from `self` to `next`.
    /// Movement is strictly forward, skipping stages is allowed, and a
    /// terminal state accepts no further moves.
    pub fn can_transition_to(&self, next: Self) -> bool {
        if self.is_terminal() || next == *self {
            return false;
        }
        match (self, next) {
            (_, Self::Rejected | Self::Withdrawn) => true,
            (Self::Applied, Self::UnderReview | Self::Interview | Self::Selected) => true,
            (Self::UnderReview, Self::Interview | Self::Selected) => true,
            (Self::Interview, Self::Selected) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
