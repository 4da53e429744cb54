use super::domain::answers::*;
use super::domain::{AnswerSet, QuestionId};
use super::outcome::{EligibilityOutcome, PathId, RequiredDocument};

/// One link of the priority chain: when `matches` holds, `build` produces the outcome.
#[derive(Debug)]
pub(crate) struct RankedRule {
    pub path: PathId,
    pub matches: fn(&AnswerSet) -> bool,
    pub build: fn(PathId, &AnswerSet) -> EligibilityOutcome,
}

/// Evaluated top to bottom; the first matching rule wins.
pub(crate) static RANKED_RULES: [RankedRule; 9] = [
    RankedRule {
        path: PathId::SecurityForcesBase,
        matches: security_forces_on_closed_or_nearby_base,
        build: security_forces_base_documents,
    },
    RankedRule {
        path: PathId::SecurityForcesFarBase,
        matches: security_forces_on_far_base,
        build: not_eligible,
    },
    RankedRule {
        path: PathId::SelfEmployedPremises,
        matches: self_employed_with_premises,
        build: self_employed_premises_documents,
    },
    RankedRule {
        path: PathId::SelfEmployedHomeOnly,
        matches: self_employed_from_home,
        build: self_employed_home_referral,
    },
    RankedRule {
        path: PathId::EmployeeNearby,
        matches: employee_working_nearby,
        build: employee_nearby_documents,
    },
    RankedRule {
        path: PathId::OwnerWithUtilities,
        matches: owner_paying_utilities,
        build: housing_with_utilities_documents,
    },
    RankedRule {
        path: PathId::RenterWithUtilities,
        matches: renter_paying_utilities,
        build: housing_with_utilities_documents,
    },
    RankedRule {
        path: PathId::EmployeeTravelReimbursed,
        matches: employee_far_with_reimbursement,
        build: travel_reimbursement_documents,
    },
    RankedRule {
        path: PathId::EmployeeFar,
        matches: employee_working_far,
        build: employee_far_referral,
    },
];

/// Generic first-match reducer over an ordered rule list.
pub(crate) fn first_match<'r, R>(
    rules: &'r [R],
    mut matches: impl FnMut(&R) -> bool,
) -> Option<&'r R> {
    rules.iter().find(|rule| matches(*rule))
}

pub(crate) fn evaluate_rules(rules: &[RankedRule], answers: &AnswerSet) -> EligibilityOutcome {
    match first_match(rules, |rule| (rule.matches)(answers)) {
        Some(rule) => (rule.build)(rule.path, answers),
        None => EligibilityOutcome::NotEligible {
            path: PathId::NoQualifyingPath,
        },
    }
}

/// Housing proofs shared by every path that asks for them.
pub(crate) fn housing_documents(answers: &AnswerSet) -> Vec<RequiredDocument> {
    match answers.get(QuestionId::LivingArrangement) {
        Some(RENTAL) => vec![RequiredDocument::RentReceipts, RequiredDocument::RentalContract],
        Some(OWNED) => vec![RequiredDocument::ArnonaBill, RequiredDocument::WaterBill],
        Some(PARENTS) => vec![
            RequiredDocument::ParentsArnonaBill,
            RequiredDocument::ParentsResidenceDeclaration,
        ],
        _ => Vec::new(),
    }
}

fn employment(answers: &AnswerSet, value: &str) -> bool {
    answers.is(QuestionId::EmploymentType, value)
}

fn security_forces_on_closed_or_nearby_base(answers: &AnswerSet) -> bool {
    employment(answers, SECURITY_FORCES)
        && (answers.is(QuestionId::BaseType, CLOSED) || answers.is(QuestionId::BaseType, NEARBY))
}

fn security_forces_on_far_base(answers: &AnswerSet) -> bool {
    employment(answers, SECURITY_FORCES) && answers.is(QuestionId::BaseType, FAR)
}

fn self_employed_with_premises(answers: &AnswerSet) -> bool {
    employment(answers, SELF_EMPLOYED) && answers.is(QuestionId::WorkMode, PHYSICAL_PREMISES)
}

fn self_employed_from_home(answers: &AnswerSet) -> bool {
    employment(answers, SELF_EMPLOYED) && answers.is(QuestionId::WorkMode, HOME_ONLY)
}

fn employee_working_nearby(answers: &AnswerSet) -> bool {
    employment(answers, EMPLOYEE) && answers.is(QuestionId::WorkLocation, NEARBY)
}

fn owner_paying_utilities(answers: &AnswerSet) -> bool {
    answers.is(QuestionId::LivingArrangement, OWNED)
        && answers.is(QuestionId::HasUtilityPayments, YES)
}

fn renter_paying_utilities(answers: &AnswerSet) -> bool {
    answers.is(QuestionId::LivingArrangement, RENTAL)
        && answers.is(QuestionId::HasUtilityPayments, YES)
}

fn employee_far_with_reimbursement(answers: &AnswerSet) -> bool {
    employee_working_far(answers) && answers.is(QuestionId::HasTravelReimbursement, YES)
}

fn employee_working_far(answers: &AnswerSet) -> bool {
    employment(answers, EMPLOYEE) && answers.is(QuestionId::WorkLocation, FAR)
}

fn eligible(path: PathId, required_documents: Vec<RequiredDocument>) -> EligibilityOutcome {
    EligibilityOutcome::Eligible {
        path,
        required_documents,
    }
}

fn not_eligible(path: PathId, _answers: &AnswerSet) -> EligibilityOutcome {
    EligibilityOutcome::NotEligible { path }
}

fn identity_and_housing(answers: &AnswerSet) -> Vec<RequiredDocument> {
    let mut documents = vec![RequiredDocument::IdentityCard];
    documents.extend(housing_documents(answers));
    documents
}

fn security_forces_base_documents(path: PathId, answers: &AnswerSet) -> EligibilityOutcome {
    let mut documents = identity_and_housing(answers);
    documents.push(RequiredDocument::ServiceCertificate);
    if answers.is(QuestionId::BaseType, CLOSED) {
        documents.push(RequiredDocument::ClosedBaseConfirmation);
    }
    eligible(path, documents)
}

fn self_employed_premises_documents(path: PathId, answers: &AnswerSet) -> EligibilityOutcome {
    let mut documents = identity_and_housing(answers);
    documents.extend([
        RequiredDocument::BusinessRegistration,
        RequiredDocument::BusinessArnonaBill,
    ]);
    eligible(path, documents)
}

fn self_employed_home_referral(path: PathId, _answers: &AnswerSet) -> EligibilityOutcome {
    EligibilityOutcome::ReferToAuthority {
        path,
        required_documents: vec![
            RequiredDocument::IdentityCard,
            RequiredDocument::AnnualTaxReturn,
            RequiredDocument::TaxResidencyAppendix,
        ],
    }
}

fn employee_nearby_documents(path: PathId, answers: &AnswerSet) -> EligibilityOutcome {
    let mut documents = identity_and_housing(answers);
    documents.push(RequiredDocument::EmployerLocationAttestation);
    eligible(path, documents)
}

fn housing_with_utilities_documents(path: PathId, answers: &AnswerSet) -> EligibilityOutcome {
    let mut documents = identity_and_housing(answers);
    if employment(answers, EMPLOYEE) {
        documents.push(RequiredDocument::EmployerLocationAttestation);
    }
    eligible(path, documents)
}

fn travel_reimbursement_documents(path: PathId, answers: &AnswerSet) -> EligibilityOutcome {
    let mut documents = identity_and_housing(answers);
    documents.push(RequiredDocument::TravelReimbursementApproval);
    eligible(path, documents)
}

fn employee_far_referral(path: PathId, _answers: &AnswerSet) -> EligibilityOutcome {
    EligibilityOutcome::ReferToAuthority {
        path,
        required_documents: vec![
            RequiredDocument::IdentityCard,
            RequiredDocument::SalarySlips,
            RequiredDocument::TaxResidencyAppendix,
            RequiredDocument::EmployerLocationAttestation,
        ],
    }
}
