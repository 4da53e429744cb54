use serde::{Deserialize, Serialize};

/// Early termination reasons raised by the pre-gating questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    NotRegisteredResident,
    NotLivingInArea,
    MarriedApplyDirectly,
    SpouseNotResident,
}

/// Identifies which ranked rule produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathId {
    SecurityForcesBase,
    SecurityForcesFarBase,
    SelfEmployedPremises,
    SelfEmployedHomeOnly,
    EmployeeNearby,
    OwnerWithUtilities,
    RenterWithUtilities,
    EmployeeTravelReimbursed,
    EmployeeFar,
    NoQualifyingPath,
}

impl PathId {
    /// Every path in rule-chain order, the fallback last.
    pub const fn ordered() -> [Self; 10] {
        [
            Self::SecurityForcesBase,
            Self::SecurityForcesFarBase,
            Self::SelfEmployedPremises,
            Self::SelfEmployedHomeOnly,
            Self::EmployeeNearby,
            Self::OwnerWithUtilities,
            Self::RenterWithUtilities,
            Self::EmployeeTravelReimbursed,
            Self::EmployeeFar,
            Self::NoQualifyingPath,
        ]
    }
}

/// Supporting documents an applicant may be asked to bring, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredDocument {
    IdentityCard,
    RentReceipts,
    RentalContract,
    ArnonaBill,
    WaterBill,
    ParentsArnonaBill,
    ParentsResidenceDeclaration,
    ServiceCertificate,
    ClosedBaseConfirmation,
    BusinessRegistration,
    BusinessArnonaBill,
    AnnualTaxReturn,
    TaxResidencyAppendix,
    SalarySlips,
    EmployerLocationAttestation,
    TravelReimbursementApproval,
}

/// Result of a questionnaire run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityOutcome {
    NotApplicable {
        reason: FailReason,
    },
    ReferToAuthority {
        path: PathId,
        required_documents: Vec<RequiredDocument>,
    },
    NotEligible {
        path: PathId,
    },
    Eligible {
        path: PathId,
        required_documents: Vec<RequiredDocument>,
    },
}

impl EligibilityOutcome {
    pub fn path(&self) -> Option<PathId> {
        match self {
            Self::NotApplicable { .. } => None,
            Self::ReferToAuthority { path, .. }
            | Self::NotEligible { path }
            | Self::Eligible { path, .. } => Some(*path),
        }
    }

    pub fn required_documents(&self) -> &[RequiredDocument] {
        match self {
            Self::ReferToAuthority {
                required_documents, ..
            }
            | Self::Eligible {
                required_documents, ..
            } => required_documents,
            Self::NotApplicable { .. } | Self::NotEligible { .. } => &[],
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }

    /// Short English summary for logs and the CLI.
    pub fn summary(&self) -> String {
        match self {
            Self::NotApplicable { reason } => format!("not applicable ({reason:?})"),
            Self::ReferToAuthority {
                path,
                required_documents,
            } => format!(
                "refer to tax authority via {path:?} ({} document(s))",
                required_documents.len()
            ),
            Self::NotEligible { path } => format!("not eligible ({path:?})"),
            Self::Eligible {
                path,
                required_documents,
            } => format!(
                "eligible via {path:?} ({} document(s))",
                required_documents.len()
            ),
        }
    }
}
