pub mod certificates;
pub mod eligibility;
