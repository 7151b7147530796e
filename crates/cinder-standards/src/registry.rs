//! Per-standard requirement records.
//!
//! Field names are the bit-exact compatibility surface with the
//! regulatory templates; report payloads key on them verbatim.

use cinder_types::{Scope, SignerRole, StandardId};

use crate::{Result, StandardError};

/// Sections common to every standard's report.
pub const BASE_SECTIONS: [&str; 4] = ["organization", "boundaries", "emissions", "methodology"];

/// Requirement record for one standard. Immutable reference data.
#[derive(Clone, Copy, Debug)]
pub struct StandardRequirements {
    pub required_fields: &'static [&'static str],
    pub optional_fields: &'static [&'static str],
    /// Fields that appear in no other standard's field sets.
    pub unique_fields: &'static [&'static str],
    /// Base sections plus standard-specific ones, in report order.
    pub sections: &'static [&'static str],
    pub supported_scopes: &'static [Scope],
    pub signature_required: bool,
    /// Roles allowed to sign; checked only when `signature_required`.
    pub authorized_roles: &'static [SignerRole],
    /// Valid signatures needed before a report completes.
    pub required_signatures: u32,
}

static CBAM: StandardRequirements = StandardRequirements {
    required_fields: &[
        "organization_name",
        "reporting_period",
        "installation_id",
        "goods_category",
        "cn_code",
        "production_quantity",
        "direct_emissions",
        "indirect_emissions",
        "precursor_emissions",
        "country_of_origin",
    ],
    optional_fields: &["carbon_price_paid", "verifier_reference"],
    unique_fields: &[
        "installation_id",
        "goods_category",
        "cn_code",
        "direct_emissions",
        "indirect_emissions",
        "precursor_emissions",
        "country_of_origin",
        "carbon_price_paid",
        "verifier_reference",
    ],
    sections: &[
        "organization",
        "boundaries",
        "emissions",
        "methodology",
        "goods",
        "precursors",
        "carbon_price",
    ],
    supported_scopes: &[Scope::Scope1, Scope::Scope2],
    signature_required: true,
    authorized_roles: &[SignerRole::Executive, SignerRole::SustainabilityOfficer],
    required_signatures: 1,
};

static GHG_PROTOCOL: StandardRequirements = StandardRequirements {
    required_fields: &[
        "organization_name",
        "reporting_period",
        "consolidation_approach",
        "scope1_emissions",
        "scope2_emissions",
        "scope3_emissions",
        "total_emissions",
    ],
    optional_fields: &["intensity_metric", "base_year", "scope3_categories"],
    unique_fields: &["consolidation_approach", "base_year", "scope3_categories"],
    sections: &[
        "organization",
        "boundaries",
        "emissions",
        "methodology",
        "scope3_detail",
        "base_year",
    ],
    supported_scopes: &[Scope::Scope1, Scope::Scope2, Scope::Scope3],
    signature_required: false,
    authorized_roles: &[],
    required_signatures: 1,
};

static ISO_14064: StandardRequirements = StandardRequirements {
    required_fields: &[
        "organization_name",
        "reporting_period",
        "scope1_emissions",
        "scope2_emissions",
        "scope3_emissions",
        "total_emissions",
        "inventory_boundary",
        "uncertainty_assessment",
    ],
    optional_fields: &["intensity_metric", "exclusions_justification"],
    unique_fields: &[
        "inventory_boundary",
        "uncertainty_assessment",
        "exclusions_justification",
    ],
    sections: &[
        "organization",
        "boundaries",
        "emissions",
        "methodology",
        "uncertainty",
        "verification",
    ],
    supported_scopes: &[Scope::Scope1, Scope::Scope2, Scope::Scope3],
    signature_required: true,
    authorized_roles: &[SignerRole::Auditor, SignerRole::Executive],
    required_signatures: 2,
};

static ISO_14067: StandardRequirements = StandardRequirements {
    required_fields: &[
        "product_name",
        "functional_unit",
        "reporting_period",
        "production_quantity",
        "total_emissions",
        "product_intensity",
        "system_boundary",
    ],
    optional_fields: &["use_stage_emissions", "end_of_life_emissions"],
    unique_fields: &[
        "product_name",
        "functional_unit",
        "product_intensity",
        "system_boundary",
        "use_stage_emissions",
        "end_of_life_emissions",
    ],
    sections: &[
        "organization",
        "boundaries",
        "emissions",
        "methodology",
        "product_lifecycle",
        "allocation",
    ],
    supported_scopes: &[Scope::Scope1, Scope::Scope2, Scope::Scope3],
    signature_required: true,
    authorized_roles: &[SignerRole::Auditor, SignerRole::SustainabilityOfficer],
    required_signatures: 1,
};

static CSRD_ESRS: StandardRequirements = StandardRequirements {
    required_fields: &[
        "organization_name",
        "reporting_period",
        "scope1_emissions",
        "scope2_emissions",
        "scope3_emissions",
        "total_emissions",
        "transition_plan",
        "reduction_targets",
    ],
    optional_fields: &["intensity_metric", "internal_carbon_price"],
    unique_fields: &["transition_plan", "reduction_targets", "internal_carbon_price"],
    sections: &[
        "organization",
        "boundaries",
        "emissions",
        "methodology",
        "targets_and_transition",
        "eu_taxonomy",
    ],
    supported_scopes: &[Scope::Scope1, Scope::Scope2, Scope::Scope3],
    signature_required: true,
    authorized_roles: &[SignerRole::Executive],
    required_signatures: 2,
};

static K_ESG: StandardRequirements = StandardRequirements {
    required_fields: &[
        "organization_name",
        "reporting_period",
        "scope1_emissions",
        "scope2_emissions",
        "total_emissions",
        "energy_consumption",
    ],
    optional_fields: &["scope3_emissions", "ghg_intensity", "esg_grade"],
    unique_fields: &["energy_consumption", "ghg_intensity", "esg_grade"],
    sections: &[
        "organization",
        "boundaries",
        "emissions",
        "methodology",
        "energy",
        "governance",
    ],
    supported_scopes: &[Scope::Scope1, Scope::Scope2],
    signature_required: true,
    authorized_roles: &[
        SignerRole::Executive,
        SignerRole::SustainabilityOfficer,
        SignerRole::SiteManager,
    ],
    required_signatures: 1,
};

/// The requirement record for a standard.
pub fn requirements(id: StandardId) -> &'static StandardRequirements {
    match id {
        StandardId::Cbam => &CBAM,
        StandardId::GhgProtocol => &GHG_PROTOCOL,
        StandardId::Iso14064 => &ISO_14064,
        StandardId::Iso14067 => &ISO_14067,
        StandardId::CsrdEsrs => &CSRD_ESRS,
        StandardId::KEsg => &K_ESG,
    }
}

/// Parse a standard id at the string boundary.
///
/// # Errors
///
/// - [`StandardError::Unknown`] for an unrecognized id
pub fn parse_standard(s: &str) -> Result<StandardId> {
    StandardId::parse(s).ok_or_else(|| StandardError::Unknown(s.to_string()))
}
