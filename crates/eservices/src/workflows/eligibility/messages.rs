//! Bilingual copy for the questionnaire, kept apart from the rule chain.

use serde::{Deserialize, Serialize};

use super::domain::answers::*;
use super::domain::{Question, QuestionId};
use super::outcome::{EligibilityOutcome, FailReason, PathId, RequiredDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "he")]
    Hebrew,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "he" | "heb" | "hebrew" => Some(Self::Hebrew),
            "ar" | "ara" | "arabic" => Some(Self::Arabic),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Hebrew => "he",
            Self::Arabic => "ar",
        }
    }

    const fn pick(self, hebrew: &'static str, arabic: &'static str) -> &'static str {
        match self {
            Self::Hebrew => hebrew,
            Self::Arabic => arabic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Question ready to be rendered by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedQuestion {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub options: Vec<LocalizedOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedDocument {
    pub document: RequiredDocument,
    pub label: &'static str,
}

/// Outcome plus the message and document labels shown to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedOutcome {
    pub language: Language,
    pub outcome: EligibilityOutcome,
    pub message: &'static str,
    pub documents: Vec<LocalizedDocument>,
}

/// Lookup of display text keyed by question, answer, outcome path and language.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCatalog;

impl MessageCatalog {
    pub fn question(&self, question: &Question, language: Language) -> LocalizedQuestion {
        LocalizedQuestion {
            id: question.id,
            prompt: self.prompt(question.id, language),
            options: question
                .options
                .iter()
                .map(|value| LocalizedOption {
                    value: *value,
                    label: self.option_label(value, language),
                })
                .collect(),
        }
    }

    pub fn outcome(&self, outcome: &EligibilityOutcome, language: Language) -> LocalizedOutcome {
        let message = match outcome {
            EligibilityOutcome::NotApplicable { reason } => self.fail_message(*reason, language),
            EligibilityOutcome::ReferToAuthority { .. } => language.pick(
                "אין באפשרות המועצה להנפיק את האישור. יש לפנות לרשות המסים ולצרף את המסמכים הבאים לדוח השנתי:",
                "لا يمكن للمجلس إصدار الشهادة. يجب التوجه إلى سلطة الضرائب وإرفاق المستندات التالية بالتقرير السنوي:",
            ),
            EligibilityOutcome::NotEligible { path } => self.not_eligible_message(*path, language),
            EligibilityOutcome::Eligible { .. } => language.pick(
                "הנך זכאי/ת לאישור תושבות. יש להגיש את המסמכים הבאים:",
                "أنت مستحق لشهادة الإقامة. يرجى تقديم المستندات التالية:",
            ),
        };

        LocalizedOutcome {
            language,
            outcome: outcome.clone(),
            message,
            documents: outcome
                .required_documents()
                .iter()
                .map(|document| LocalizedDocument {
                    document: *document,
                    label: self.document_label(*document, language),
                })
                .collect(),
        }
    }

    pub fn prompt(&self, id: QuestionId, language: Language) -> &'static str {
        match id {
            QuestionId::IsResident => language.pick(
                "האם את/ה רשום/ה כתושב/ת הישוב במרשם האוכלוסין?",
                "هل أنت مسجل كمقيم في البلدة في سجل السكان؟",
            ),
            QuestionId::LivesInHusniyya => language.pick(
                "האם את/ה מתגורר/ת בפועל בחוסנייה?",
                "هل تسكن فعلياً في الحسينية؟",
            ),
            QuestionId::MaritalStatus => {
                language.pick("מהו מצבך המשפחתי?", "ما هي حالتك الاجتماعية؟")
            }
            QuestionId::SpouseInHusniyya => language.pick(
                "האם בן/בת הזוג רשום/ה ומתגורר/ת בחוסנייה?",
                "هل الزوج/الزوجة مسجل ويسكن في الحسينية؟",
            ),
            QuestionId::LivingArrangement => {
                language.pick("מהו סוג המגורים שלך?", "ما هو نوع سكنك؟")
            }
            QuestionId::HasUtilityPayments => language.pick(
                "האם חשבונות הארנונה והמים משולמים על שמך?",
                "هل فواتير الأرنونا والمياه مدفوعة باسمك؟",
            ),
            QuestionId::EmploymentType => {
                language.pick("מהו מעמדך התעסוקתי?", "ما هو وضعك الوظيفي؟")
            }
            QuestionId::WorkLocation => {
                language.pick("היכן ממוקם מקום העבודה?", "أين يقع مكان العمل؟")
            }
            QuestionId::HasTravelReimbursement => language.pick(
                "האם את/ה מקבל/ת החזר הוצאות נסיעה מהמעסיק?",
                "هل تحصل على بدل سفر من صاحب العمل؟",
            ),
            QuestionId::WorkMode => {
                language.pick("כיצד מתנהל העסק שלך?", "كيف تدير عملك الحر؟")
            }
            QuestionId::BaseType => language.pick(
                "באיזה סוג בסיס את/ה משרת/ת?",
                "في أي نوع من القواعد تخدم؟",
            ),
        }
    }

    pub fn option_label(&self, value: &str, language: Language) -> &'static str {
        match value {
            YES => language.pick("כן", "نعم"),
            NO => language.pick("לא", "لا"),
            SINGLE => language.pick("רווק/ה", "أعزب/عزباء"),
            MARRIED => language.pick("נשוי/אה", "متزوج/ة"),
            DIVORCED => language.pick("גרוש/ה", "مطلق/ة"),
            WIDOWED => language.pick("אלמן/ה", "أرمل/ة"),
            OWNED => language.pick("דירה בבעלותי", "شقة ملكي"),
            RENTAL => language.pick("דירה שכורה", "شقة مستأجرة"),
            PARENTS => language.pick("מתגורר/ת עם ההורים", "أسكن مع الوالدين"),
            EMPLOYEE => language.pick("שכיר/ה", "موظف/ة"),
            SELF_EMPLOYED => language.pick("עצמאי/ת", "مستقل/ة"),
            SECURITY_FORCES => language.pick("משרת/ת בכוחות הביטחון", "أخدم في قوات الأمن"),
            OTHER => language.pick("אחר", "آخر"),
            NEARBY => language.pick("בישוב או בסמוך לו", "في البلدة أو بالقرب منها"),
            FAR => language.pick("רחוק מהישוב", "بعيد عن البلدة"),
            CLOSED => language.pick("בסיס סגור", "قاعدة مغلقة"),
            PHYSICAL_PREMISES => {
                language.pick("ממקום עסק פיזי בישוב", "من مقر عمل فعلي في البلدة")
            }
            HOME_ONLY => language.pick("מהבית בלבד", "من المنزل فقط"),
            _ => "",
        }
    }

    pub fn fail_message(&self, reason: FailReason, language: Language) -> &'static str {
        match reason {
            FailReason::NotRegisteredResident => language.pick(
                "השירות מיועד לתושבים הרשומים בישוב בלבד.",
                "الخدمة مخصصة للسكان المسجلين في البلدة فقط.",
            ),
            FailReason::NotLivingInArea => language.pick(
                "אישור תושבות ניתן רק למי שמתגורר/ת בפועל בישוב.",
                "تُمنح شهادة الإقامة فقط لمن يسكن فعلياً في البلدة.",
            ),
            FailReason::MarriedApplyDirectly => language.pick(
                "מסלול זה מיועד למבקשים שאינם נשואים. זוגות נשואים מתבקשים לפנות ישירות למחלקת הגבייה.",
                "هذا المسار مخصص لغير المتزوجين. على المتزوجين التوجه مباشرة إلى قسم الجباية.",
            ),
            FailReason::SpouseNotResident => language.pick(
                "לא ניתן להנפיק אישור כאשר בן/בת הזוג אינם רשומים ומתגוררים בישוב.",
                "لا يمكن إصدار الشهادة إذا لم يكن الزوج/الزوجة مسجلاً ومقيماً في البلدة.",
            ),
        }
    }

    fn not_eligible_message(&self, path: PathId, language: Language) -> &'static str {
        match path {
            PathId::SecurityForcesFarBase => language.pick(
                "משרתי כוחות הביטחון בבסיס מרוחק אינם זכאים לאישור תושבות במסלול זה.",
                "أفراد قوات الأمن في قاعدة بعيدة غير مستحقين لشهادة الإقامة في هذا المسار.",
            ),
            _ => language.pick(
                "לפי התשובות שמסרת אינך עומד/ת בתנאי הזכאות לאישור תושבות.",
                "وفقاً لإجاباتك، لا تستوفي شروط الاستحقاق لشهادة الإقامة.",
            ),
        }
    }

    pub fn document_label(&self, document: RequiredDocument, language: Language) -> &'static str {
        match document {
            RequiredDocument::IdentityCard => {
                language.pick("צילום תעודת זהות כולל ספח", "صورة بطاقة الهوية مع الملحق")
            }
            RequiredDocument::RentReceipts => {
                language.pick("קבלות על תשלום שכר דירה", "إيصالات دفع الإيجار")
            }
            RequiredDocument::RentalContract => {
                language.pick("חוזה שכירות בתוקף", "عقد إيجار ساري المفعول")
            }
            RequiredDocument::ArnonaBill => language.pick("חשבון ארנונה אחרון", "آخر فاتورة أرنونا"),
            RequiredDocument::WaterBill => language.pick("חשבון מים אחרון", "آخر فاتورة مياه"),
            RequiredDocument::ParentsArnonaBill => {
                language.pick("חשבון ארנונה של ההורים", "فاتورة أرنونا الوالدين")
            }
            RequiredDocument::ParentsResidenceDeclaration => {
                language.pick("תצהיר מגורים בבית ההורים", "تصريح سكن في بيت الوالدين")
            }
            RequiredDocument::ServiceCertificate => {
                language.pick("אישור שירות מכוחות הביטחון", "شهادة خدمة من قوات الأمن")
            }
            RequiredDocument::ClosedBaseConfirmation => {
                language.pick("אישור שירות בבסיס סגור", "تأكيد الخدمة في قاعدة مغلقة")
            }
            RequiredDocument::BusinessRegistration => {
                language.pick("תעודת עוסק מורשה או פטור", "شهادة مشتغل مرخص أو معفى")
            }
            RequiredDocument::BusinessArnonaBill => {
                language.pick("חשבון ארנונה של בית העסק", "فاتورة أرنونا لمكان العمل")
            }
            RequiredDocument::AnnualTaxReturn => {
                language.pick("דוח שנתי לרשות המסים", "التقرير السنوي لسلطة الضرائب")
            }
            RequiredDocument::TaxResidencyAppendix => language.pick(
                "טופס 1312א - נספח תושבות לדוח השנתי",
                "نموذج 1312أ - ملحق الإقامة للتقرير السنوي",
            ),
            RequiredDocument::SalarySlips => language.pick(
                "תלושי שכר משלושת החודשים האחרונים",
                "قسائم الراتب لآخر ثلاثة أشهر",
            ),
            RequiredDocument::EmployerLocationAttestation => language.pick(
                "אישור מעסיק על מקום העבודה",
                "تأكيد صاحب العمل على مكان العمل",
            ),
            RequiredDocument::TravelReimbursementApproval => language.pick(
                "אישור מעסיק על החזר הוצאות נסיעה",
                "تأكيد صاحب العمل على بدل السفر",
            ),
        }
    }
}
