//! Public-procurement financial calculations.
//!
//! Independent calculators over plain numbers and dates:
//! - `threshold`: statistical threshold value (sınır değer) from competing bids
//! - `discount`: direct-cost ratio band for catering bids
//! - `deadline`: appeal due dates with weekend roll-forward
//! - `fee`: appeal fee lookup by estimated cost
//! - `guarantee`, `assessment`, `severance`: bid guarantees, own-bid check
//!   against the threshold, and termination payments
//!
//! Statutory figures come from year-tagged tables in `tariffs`.

pub mod assessment;
pub mod deadline;
pub mod discount;
pub mod error;
pub mod fee;
pub mod guarantee;
pub mod math;
pub mod severance;
pub mod tariffs;
pub mod threshold;
pub mod tracking;

pub use assessment::{assess_bid, BidAssessment, CostComponents};
pub use deadline::{compute_deadline, compute_deadline_now, AppealType, DeadlineInput, DeadlineResult};
pub use discount::{validate_discount, validate_discount_with, ExcessiveDiscountResult};
pub use error::{CalcError, CalcResult};
pub use fee::{lookup_fee, lookup_fee_with, FeeResult};
pub use guarantee::{compute_guarantees, compute_guarantees_with, GuaranteeBreakdown};
pub use severance::{compute_severance, SeveranceInput, SeveranceResult, TerminationReason};
pub use tariffs::{Tariff, TariffBook};
pub use threshold::{
    classify_bids, compute_threshold, compute_threshold_detailed, Bid, BidSet, ThresholdBreakdown,
    ThresholdResult,
};
pub use tracking::TrackingUpdate;
