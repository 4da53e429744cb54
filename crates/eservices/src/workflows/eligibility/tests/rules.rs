use super::common::*;
use crate::workflows::eligibility::answers::*;
use crate::workflows::eligibility::rules::{first_match, housing_documents, RANKED_RULES};
use crate::workflows::eligibility::{EligibilityOutcome, PathId, QuestionId, RequiredDocument};

fn security(base: &'static str, housing: &'static str) -> EligibilityOutcome {
    let mut answers = with_answers(single_resident(), &[(QuestionId::LivingArrangement, housing)]);
    if housing != PARENTS {
        answers.push((QuestionId::HasUtilityPayments, YES));
    }
    answers.extend([
        (QuestionId::EmploymentType, SECURITY_FORCES),
        (QuestionId::BaseType, base),
    ]);
    finished(&answers).1
}

#[test]
fn employee_working_nearby_is_eligible_regardless_of_utilities() {
    for utilities in [YES, NO] {
        let (_, outcome) = finished(&with_answers(
            single_resident(),
            &[
                (QuestionId::LivingArrangement, OWNED),
                (QuestionId::HasUtilityPayments, utilities),
                (QuestionId::EmploymentType, EMPLOYEE),
                (QuestionId::WorkLocation, NEARBY),
            ],
        ));

        assert_eq!(
            outcome,
            EligibilityOutcome::Eligible {
                path: PathId::EmployeeNearby,
                required_documents: vec![
                    RequiredDocument::IdentityCard,
                    RequiredDocument::ArnonaBill,
                    RequiredDocument::WaterBill,
                    RequiredDocument::EmployerLocationAttestation,
                ],
            }
        );
    }
}

#[test]
fn closed_base_adds_confirmation_after_housing_documents() {
    let outcome = security(CLOSED, RENTAL);

    assert_eq!(
        outcome,
        EligibilityOutcome::Eligible {
            path: PathId::SecurityForcesBase,
            required_documents: vec![
                RequiredDocument::IdentityCard,
                RequiredDocument::RentReceipts,
                RequiredDocument::RentalContract,
                RequiredDocument::ServiceCertificate,
                RequiredDocument::ClosedBaseConfirmation,
            ],
        }
    );
}

#[test]
fn nearby_base_skips_closed_base_confirmation() {
    let outcome = security(NEARBY, OWNED);

    assert!(outcome.is_eligible());
    assert!(!outcome
        .required_documents()
        .contains(&RequiredDocument::ClosedBaseConfirmation));
}

#[test]
fn far_base_is_not_eligible_even_when_utilities_are_paid() {
    for housing in [OWNED, RENTAL, PARENTS] {
        assert_eq!(
            security(FAR, housing),
            EligibilityOutcome::NotEligible {
                path: PathId::SecurityForcesFarBase,
            }
        );
    }
}

#[test]
fn self_employed_paths_split_on_work_mode() {
    let premises = finished(&with_answers(
        single_resident(),
        &[
            (QuestionId::LivingArrangement, PARENTS),
            (QuestionId::EmploymentType, SELF_EMPLOYED),
            (QuestionId::WorkMode, PHYSICAL_PREMISES),
        ],
    ))
    .1;
    assert_eq!(premises.path(), Some(PathId::SelfEmployedPremises));
    assert_eq!(
        premises.required_documents(),
        &[
            RequiredDocument::IdentityCard,
            RequiredDocument::ParentsArnonaBill,
            RequiredDocument::ParentsResidenceDeclaration,
            RequiredDocument::BusinessRegistration,
            RequiredDocument::BusinessArnonaBill,
        ]
    );

    let home = finished(&with_answers(
        single_resident(),
        &[
            (QuestionId::LivingArrangement, OWNED),
            (QuestionId::HasUtilityPayments, YES),
            (QuestionId::EmploymentType, SELF_EMPLOYED),
            (QuestionId::WorkMode, HOME_ONLY),
        ],
    ))
    .1;
    assert!(matches!(
        home,
        EligibilityOutcome::ReferToAuthority {
            path: PathId::SelfEmployedHomeOnly,
            ..
        }
    ));
}

#[test]
fn renters_paying_utilities_qualify_without_employment_ties() {
    let (_, outcome) = finished(&with_answers(
        single_resident(),
        &[
            (QuestionId::LivingArrangement, RENTAL),
            (QuestionId::HasUtilityPayments, YES),
            (QuestionId::EmploymentType, OTHER),
        ],
    ));

    assert_eq!(
        outcome,
        EligibilityOutcome::Eligible {
            path: PathId::RenterWithUtilities,
            required_documents: vec![
                RequiredDocument::IdentityCard,
                RequiredDocument::RentReceipts,
                RequiredDocument::RentalContract,
            ],
        }
    );
}

#[test]
fn remote_employee_owner_adds_employer_attestation() {
    let (_, outcome) = finished(&with_answers(
        single_resident(),
        &[
            (QuestionId::LivingArrangement, OWNED),
            (QuestionId::HasUtilityPayments, YES),
            (QuestionId::EmploymentType, EMPLOYEE),
            (QuestionId::WorkLocation, FAR),
            (QuestionId::HasTravelReimbursement, NO),
        ],
    ));

    assert_eq!(outcome.path(), Some(PathId::OwnerWithUtilities));
    assert_eq!(
        outcome.required_documents().last(),
        Some(&RequiredDocument::EmployerLocationAttestation)
    );
}

#[test]
fn far_employee_paths_depend_on_reimbursement() {
    let base = with_answers(
        single_resident(),
        &[
            (QuestionId::LivingArrangement, PARENTS),
            (QuestionId::EmploymentType, EMPLOYEE),
            (QuestionId::WorkLocation, FAR),
        ],
    );

    let reimbursed = finished(&with_answers(
        base.clone(),
        &[(QuestionId::HasTravelReimbursement, YES)],
    ))
    .1;
    assert_eq!(reimbursed.path(), Some(PathId::EmployeeTravelReimbursed));
    assert_eq!(
        reimbursed.required_documents().last(),
        Some(&RequiredDocument::TravelReimbursementApproval)
    );

    let referred = finished(&with_answers(base, &[(QuestionId::HasTravelReimbursement, NO)])).1;
    assert!(matches!(
        referred,
        EligibilityOutcome::ReferToAuthority {
            path: PathId::EmployeeFar,
            ..
        }
    ));
}

#[test]
fn living_with_parents_never_reaches_utility_rules() {
    let (answers, outcome) = finished(&with_answers(
        single_resident(),
        &[
            (QuestionId::LivingArrangement, PARENTS),
            (QuestionId::EmploymentType, OTHER),
        ],
    ));

    assert!(!answers.contains(QuestionId::HasUtilityPayments));
    assert_eq!(
        outcome,
        EligibilityOutcome::NotEligible {
            path: PathId::NoQualifyingPath,
        }
    );
}

#[test]
fn document_lists_are_identical_across_evaluations() {
    let answers = with_answers(
        single_resident(),
        &[
            (QuestionId::LivingArrangement, RENTAL),
            (QuestionId::HasUtilityPayments, NO),
            (QuestionId::EmploymentType, SECURITY_FORCES),
            (QuestionId::BaseType, CLOSED),
        ],
    );

    let first = serde_json::to_vec(&finished(&answers).1).expect("serializes");
    for _ in 0..5 {
        let again = serde_json::to_vec(&finished(&answers).1).expect("serializes");
        assert_eq!(first, again);
    }
}

#[test]
fn first_match_prefers_earlier_rules() {
    let numbers = [3, 8, 12, 20];
    assert_eq!(first_match(&numbers, |n| *n > 5), Some(&8));
    assert_eq!(first_match(&numbers, |n| *n > 50), None);
}

#[test]
fn rule_chain_is_ordered_like_path_ids() {
    let chain: Vec<PathId> = RANKED_RULES.iter().map(|rule| rule.path).collect();
    let ordered = PathId::ordered();
    assert_eq!(chain.as_slice(), &ordered[..RANKED_RULES.len()]);
}

#[test]
fn housing_helper_is_empty_without_housing_answer() {
    assert!(housing_documents(&crate::workflows::eligibility::AnswerSet::new()).is_empty());
}
