use super::domain::answers::*;
use super::domain::{AnswerSet, ImmediateFail, Question, QuestionId};
use super::outcome::FailReason;

const YES_NO: &[&str] = &[YES, NO];

/// The residency questionnaire in presentation order. Visibility predicates only look at
/// questions that appear earlier in this table.
pub static QUESTIONS: [Question; 11] = [
    Question {
        id: QuestionId::IsResident,
        options: YES_NO,
        visible_when: None,
        immediate_fail: &[ImmediateFail {
            value: NO,
            reason: FailReason::NotRegisteredResident,
        }],
    },
    Question {
        id: QuestionId::LivesInHusniyya,
        options: YES_NO,
        visible_when: None,
        immediate_fail: &[ImmediateFail {
            value: NO,
            reason: FailReason::NotLivingInArea,
        }],
    },
    Question {
        id: QuestionId::MaritalStatus,
        options: &[SINGLE, MARRIED, DIVORCED, WIDOWED],
        visible_when: None,
        immediate_fail: &[],
    },
    Question {
        id: QuestionId::SpouseInHusniyya,
        options: YES_NO,
        visible_when: Some(is_married),
        immediate_fail: &[
            ImmediateFail {
                value: NO,
                reason: FailReason::SpouseNotResident,
            },
            ImmediateFail {
                value: YES,
                reason: FailReason::MarriedApplyDirectly,
            },
        ],
    },
    Question {
        id: QuestionId::LivingArrangement,
        options: &[OWNED, RENTAL, PARENTS],
        visible_when: None,
        immediate_fail: &[],
    },
    Question {
        id: QuestionId::HasUtilityPayments,
        options: YES_NO,
        visible_when: Some(pays_own_housing),
        immediate_fail: &[],
    },
    Question {
        id: QuestionId::EmploymentType,
        options: &[EMPLOYEE, SELF_EMPLOYED, SECURITY_FORCES, OTHER],
        visible_when: None,
        immediate_fail: &[],
    },
    Question {
        id: QuestionId::WorkLocation,
        options: &[NEARBY, FAR],
        visible_when: Some(is_employee),
        immediate_fail: &[],
    },
    Question {
        id: QuestionId::HasTravelReimbursement,
        options: YES_NO,
        visible_when: Some(is_employee_working_far),
        immediate_fail: &[],
    },
    Question {
        id: QuestionId::WorkMode,
        options: &[PHYSICAL_PREMISES, HOME_ONLY],
        visible_when: Some(is_self_employed),
        immediate_fail: &[],
    },
    Question {
        id: QuestionId::BaseType,
        options: &[CLOSED, NEARBY, FAR],
        visible_when: Some(is_security_forces),
        immediate_fail: &[],
    },
];

/// Rows are laid out in `QuestionId` declaration order.
#[cfg(test)]
pub(crate) fn question(id: QuestionId) -> &'static Question {
    &QUESTIONS[id as usize]
}

fn is_married(answers: &AnswerSet) -> bool {
    answers.is(QuestionId::MaritalStatus, MARRIED)
}

fn pays_own_housing(answers: &AnswerSet) -> bool {
    answers.is(QuestionId::LivingArrangement, OWNED)
        || answers.is(QuestionId::LivingArrangement, RENTAL)
}

fn is_employee(answers: &AnswerSet) -> bool {
    answers.is(QuestionId::EmploymentType, EMPLOYEE)
}

fn is_employee_working_far(answers: &AnswerSet) -> bool {
    is_employee(answers) && answers.is(QuestionId::WorkLocation, FAR)
}

fn is_self_employed(answers: &AnswerSet) -> bool {
    answers.is(QuestionId::EmploymentType, SELF_EMPLOYED)
}

fn is_security_forces(answers: &AnswerSet) -> bool {
    answers.is(QuestionId::EmploymentType, SECURITY_FORCES)
}
