//! The signature gate: sign, verify, revoke.

use cinder_standards::requirements;
use cinder_types::{
    ContentHash, Report, ReportStatus, Signature, SignatureStatus, SignerRole,
};

use crate::store::ReportStore;
use crate::{ReportError, Result};

/// BLAKE3 hash of a report's canonical JSON payload.
///
/// The payload is a `BTreeMap`, so serialization order is stable and the
/// hash is reproducible from the stored payload alone.
pub fn content_hash(report: &Report) -> Result<ContentHash> {
    let bytes = serde_json::to_vec(&report.payload)
        .map_err(|e| ReportError::Payload(e.to_string()))?;
    Ok(*blake3::hash(&bytes).as_bytes())
}

/// Sign a report.
///
/// When the standard requires signatures, the signer's role must be in
/// its authorized list. Completeness is deliberately not checked:
/// signing an incomplete report is a permitted business decision. When
/// the count of valid signatures reaches the standard's requirement the
/// report moves to `completed`.
///
/// # Errors
///
/// - [`ReportError::UnauthorizedRole`] when the role is not authorized
/// - [`ReportError::Store`] on collaborator failure
pub fn sign(
    store: &dyn ReportStore,
    report_id: &str,
    signer: &str,
    role: SignerRole,
    now: u64,
) -> Result<Signature> {
    let report = store.report(&report_id.to_string())?;
    let req = requirements(report.standard);

    if req.signature_required && !req.authorized_roles.contains(&role) {
        return Err(ReportError::UnauthorizedRole {
            role,
            standard: report.standard,
        });
    }

    let hash = content_hash(&report)?;
    let signature = Signature {
        id: signature_id(report_id, signer, now),
        report_id: report.id.clone(),
        signer: signer.to_string(),
        role,
        signed_at: now,
        content_hash: hash,
        status: SignatureStatus::Valid,
    };
    store.save_signature(&signature)?;

    let valid = count_valid(store, &report.id)?;
    tracing::info!(
        report = report_id,
        standard = report.standard.as_str(),
        signer,
        valid,
        required = req.required_signatures,
        "report signed"
    );

    if valid >= req.required_signatures && report.status != ReportStatus::Completed {
        store.set_report_status(&report.id, ReportStatus::Completed)?;
        tracing::info!(report = report_id, "report completed");
    }

    Ok(signature)
}

/// Verify every valid signature over a report against the stored payload.
///
/// Returns `false` when there is no valid signature or when any valid
/// signature's hash no longer matches — a post-signature payload edit.
/// A mismatch is an integrity event and is always reported via `warn`,
/// never silently ignored.
pub fn verify(store: &dyn ReportStore, report_id: &str) -> Result<bool> {
    let report = store.report(&report_id.to_string())?;
    let current = content_hash(&report)?;

    let signatures = store.signatures(&report.id)?;
    let valid: Vec<&Signature> = signatures
        .iter()
        .filter(|s| s.status == SignatureStatus::Valid)
        .collect();

    if valid.is_empty() {
        return Ok(false);
    }

    for signature in valid {
        if signature.content_hash != current {
            tracing::warn!(
                report = report_id,
                signature = %signature.id,
                signed = hex::encode(signature.content_hash),
                stored = hex::encode(current),
                "integrity failure: payload changed after signing"
            );
            return Ok(false);
        }
    }
    Ok(true)
}

/// Revoke one signature without deleting the report.
///
/// A completed report whose valid-signature count drops below the
/// standard's requirement returns to `pending_review`.
pub fn revoke(store: &dyn ReportStore, signature_id: &str) -> Result<()> {
    let signature = store.signature(&signature_id.to_string())?;
    store.set_signature_status(&signature.id, SignatureStatus::Revoked)?;
    tracing::info!(
        report = %signature.report_id,
        signature = signature_id,
        "signature revoked"
    );

    let report = store.report(&signature.report_id)?;
    let req = requirements(report.standard);
    if report.status == ReportStatus::Completed
        && count_valid(store, &report.id)? < req.required_signatures
    {
        store.set_report_status(&report.id, ReportStatus::PendingReview)?;
        tracing::info!(report = %report.id, "report demoted to pending review");
    }
    Ok(())
}

fn count_valid(store: &dyn ReportStore, report_id: &String) -> Result<u32> {
    Ok(store
        .signatures(report_id)?
        .iter()
        .filter(|s| s.status == SignatureStatus::Valid)
        .count() as u32)
}

fn signature_id(report_id: &str, signer: &str, now: u64) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(report_id.as_bytes());
    hasher.update(signer.as_bytes());
    hasher.update(&now.to_le_bytes());
    hex::encode(&hasher.finalize().as_bytes()[..16])
}
