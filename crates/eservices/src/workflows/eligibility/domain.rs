use serde::{Deserialize, Serialize};

use super::outcome::FailReason;

/// Identifier for every question the residency questionnaire can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionId {
    IsResident,
    LivesInHusniyya,
    MaritalStatus,
    SpouseInHusniyya,
    LivingArrangement,
    HasUtilityPayments,
    EmploymentType,
    WorkLocation,
    HasTravelReimbursement,
    WorkMode,
    BaseType,
}

impl QuestionId {
    pub const ALL: [Self; 11] = [
        Self::IsResident,
        Self::LivesInHusniyya,
        Self::MaritalStatus,
        Self::SpouseInHusniyya,
        Self::LivingArrangement,
        Self::HasUtilityPayments,
        Self::EmploymentType,
        Self::WorkLocation,
        Self::HasTravelReimbursement,
        Self::WorkMode,
        Self::BaseType,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::IsResident => "isResident",
            Self::LivesInHusniyya => "livesInHusniyya",
            Self::MaritalStatus => "maritalStatus",
            Self::SpouseInHusniyya => "spouseInHusniyya",
            Self::LivingArrangement => "livingArrangement",
            Self::HasUtilityPayments => "hasUtilityPayments",
            Self::EmploymentType => "employmentType",
            Self::WorkLocation => "workLocation",
            Self::HasTravelReimbursement => "hasTravelReimbursement",
            Self::WorkMode => "workMode",
            Self::BaseType => "baseType",
        }
    }
}

/// Answer tokens accepted by the question table.
pub mod answers {
    pub const YES: &str = "yes";
    pub const NO: &str = "no";

    pub const SINGLE: &str = "single";
    pub const MARRIED: &str = "married";
    pub const DIVORCED: &str = "divorced";
    pub const WIDOWED: &str = "widowed";

    pub const OWNED: &str = "owned";
    pub const RENTAL: &str = "rental";
    pub const PARENTS: &str = "parents";

    pub const EMPLOYEE: &str = "employee";
    pub const SELF_EMPLOYED: &str = "self_employed";
    pub const SECURITY_FORCES: &str = "security_forces";
    pub const OTHER: &str = "other";

    pub const NEARBY: &str = "nearby";
    pub const FAR: &str = "far";
    pub const CLOSED: &str = "closed";

    pub const PHYSICAL_PREMISES: &str = "physical_premises";
    pub const HOME_ONLY: &str = "home_only";
}

/// Answer value that ends the questionnaire as soon as it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImmediateFail {
    pub value: &'static str,
    pub reason: FailReason,
}

/// One entry of the static question table.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: QuestionId,
    pub options: &'static [&'static str],
    pub visible_when: Option<fn(&AnswerSet) -> bool>,
    pub immediate_fail: &'static [ImmediateFail],
}

impl Question {
    pub fn is_visible(&self, answers: &AnswerSet) -> bool {
        self.visible_when
            .map(|predicate| predicate(answers))
            .unwrap_or(true)
    }

    pub fn permits(&self, value: &str) -> bool {
        self.options.contains(&value)
    }

    pub fn fail_reason_for(&self, value: &str) -> Option<FailReason> {
        self.immediate_fail
            .iter()
            .find(|arm| arm.value == value)
            .map(|arm| arm.reason)
    }
}

// Rows are identified by their id alone.
impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Question {}

/// Single recorded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question: QuestionId,
    pub value: String,
}

/// Insertion-ordered answers collected during one questionnaire run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    entries: Vec<Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question: QuestionId) -> Option<&str> {
        self.entries
            .iter()
            .find(|answer| answer.question == question)
            .map(|answer| answer.value.as_str())
    }

    pub fn is(&self, question: QuestionId, value: &str) -> bool {
        self.get(question) == Some(value)
    }

    pub fn contains(&self, question: QuestionId) -> bool {
        self.get(question).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.entries.iter()
    }

    pub(crate) fn with(mut self, question: QuestionId, value: &str) -> Self {
        self.entries.push(Answer {
            question,
            value: value.to_string(),
        });
        self
    }
}
