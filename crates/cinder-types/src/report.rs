//! Reports, signatures, and reporting-standard identity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{ContentHash, ProjectId, ReportId, SignatureId};

/// The six supported reporting standards. Closed set; adding a standard
/// is a compile-checked variant addition, not a runtime registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardId {
    /// EU Carbon Border Adjustment Mechanism.
    Cbam,
    /// GHG Protocol Corporate Standard.
    GhgProtocol,
    /// ISO 14064-1 organization-level quantification.
    Iso14064,
    /// ISO 14067 product carbon footprint.
    Iso14067,
    /// EU CSRD / ESRS E1 disclosure.
    CsrdEsrs,
    /// Korean national ESG disclosure guideline.
    KEsg,
}

impl std::fmt::Display for StandardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StandardId {
    pub const ALL: [Self; 6] = [
        Self::Cbam,
        Self::GhgProtocol,
        Self::Iso14064,
        Self::Iso14067,
        Self::CsrdEsrs,
        Self::KEsg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cbam => "cbam",
            Self::GhgProtocol => "ghg_protocol",
            Self::Iso14064 => "iso_14064",
            Self::Iso14067 => "iso_14067",
            Self::CsrdEsrs => "csrd_esrs",
            Self::KEsg => "k_esg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cbam" => Some(Self::Cbam),
            "ghg_protocol" => Some(Self::GhgProtocol),
            "iso_14064" => Some(Self::Iso14064),
            "iso_14067" => Some(Self::Iso14067),
            "csrd_esrs" => Some(Self::CsrdEsrs),
            "k_esg" => Some(Self::KEsg),
            _ => None,
        }
    }
}

/// Report lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    PendingReview,
    Completed,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "pending_review" => Some(Self::PendingReview),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Roles that may appear in a standard's authorized-signer list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerRole {
    Executive,
    SustainabilityOfficer,
    Auditor,
    SiteManager,
}

impl std::fmt::Display for SignerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SignerRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Executive => "executive",
            Self::SustainabilityOfficer => "sustainability_officer",
            Self::Auditor => "auditor",
            Self::SiteManager => "site_manager",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "executive" => Some(Self::Executive),
            "sustainability_officer" => Some(Self::SustainabilityOfficer),
            "auditor" => Some(Self::Auditor),
            "site_manager" => Some(Self::SiteManager),
            _ => None,
        }
    }
}

/// A generated report: a field → value payload shaped by one standard's
/// requirements.
///
/// The payload is a `BTreeMap` so its JSON serialization is canonical
/// (sorted keys); the signature content hash depends on this.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub project_id: ProjectId,
    pub standard: StandardId,
    pub payload: BTreeMap<String, serde_json::Value>,
    /// Required fields that resolved to no value at assembly time.
    pub missing_fields: Vec<String>,
    /// True when `missing_fields` is non-empty. Soft: callers decide
    /// whether to proceed; signing an incomplete report is permitted.
    pub incomplete: bool,
    pub status: ReportStatus,
    /// Optional regulatory submission deadline (unix seconds).
    pub deadline: Option<u64>,
    pub generated_at: u64,
}

/// Signature validity state. Revocation never deletes the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureStatus {
    Valid,
    Revoked,
}

impl SignatureStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Revoked => "revoked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "valid" => Some(Self::Valid),
            "revoked" => Some(Self::Revoked),
            _ => None,
        }
    }
}

/// One signature over a report payload.
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Signature {
    pub id: SignatureId,
    pub report_id: ReportId,
    /// Signer identity (display name or account reference).
    pub signer: String,
    pub role: SignerRole,
    pub signed_at: u64,
    /// BLAKE3 hash of the canonical JSON payload at signing time.
    #[serde_as(as = "serde_with::hex::Hex")]
    pub content_hash: ContentHash,
    pub status: SignatureStatus,
}
