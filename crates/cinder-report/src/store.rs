//! Report store collaborator trait.

use cinder_types::{
    Report, ReportId, ReportStatus, Signature, SignatureId, SignatureStatus, StoreError,
};

/// Read/write access to reports and their signatures.
pub trait ReportStore {
    fn save_report(&self, report: &Report) -> Result<(), StoreError>;

    fn report(&self, id: &ReportId) -> Result<Report, StoreError>;

    fn set_report_status(&self, id: &ReportId, status: ReportStatus) -> Result<(), StoreError>;

    fn save_signature(&self, signature: &Signature) -> Result<(), StoreError>;

    fn signature(&self, id: &SignatureId) -> Result<Signature, StoreError>;

    /// All signatures over a report, any order.
    fn signatures(&self, report_id: &ReportId) -> Result<Vec<Signature>, StoreError>;

    fn set_signature_status(
        &self,
        id: &SignatureId,
        status: SignatureStatus,
    ) -> Result<(), StoreError>;
}
