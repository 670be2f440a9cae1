pub mod payment;
pub mod profile;
pub mod ratios;
pub mod risk;
pub mod snapshot;

pub use payment::compute_monthly_payment;
pub use profile::FinancialProfile;
pub use ratios::{compute_ratios, LoanRatios};
pub use risk::{classify_risk, RiskAssessment, RiskCategory, RiskPolicy};
pub use snapshot::{compute_snapshot, MetricsSnapshot};
