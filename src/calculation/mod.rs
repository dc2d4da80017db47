//! Calculation logic for the salary advisor.
//!
//! This module contains the adjustment rules applied to a model prediction:
//! tier selection, promotion uplift, performance adjustment, team size bump
//! and budget/market bounding, plus the parity analysis run on the result.

mod adjustment;
mod arithmetic;
mod bounding;
mod parity;
mod performance;
mod promotion;
mod team_size;
mod tier_selection;

pub use adjustment::adjust_salary;
pub use bounding::{
    BoundingResult, INVERTED_BOUNDS_WARNING, bound_recommendation, high_factor, low_factor,
};
pub use parity::{analyze_parity, bias_threshold, neutral_score};
pub use performance::{
    NEUTRAL_RATING, PerformanceResult, apply_performance_adjustment, performance_multiplier,
    performance_step,
};
pub use promotion::{PromotionResult, apply_promotion_uplift, promotion_multiplier};
pub use team_size::{
    LARGE_TEAM_THRESHOLD, TeamSizeResult, apply_team_size_bump, team_size_multiplier,
};
pub use tier_selection::{TierSelectionResult, fresher_experience_limit, select_base_salary};
