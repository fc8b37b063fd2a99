use async_trait::async_trait;

use crate::error::ScheduleError;
use crate::optimizer::model;
use crate::optimizer::request::OptimizeRequest;
use crate::optimizer::result::OptimizationResult;

/// A scheduling strategy turns one request into one optimal schedule.
///
/// Implementations must be stateless across requests; each call builds its
/// own model so concurrent requests do not interfere.
#[async_trait]
pub trait SchedulingStrategy: Send + Sync {
    async fn optimize(&self, request: &OptimizeRequest)
        -> Result<OptimizationResult, ScheduleError>;
}

/// Exact MILP strategy backed by good_lp's default solver.
///
/// The computation itself is synchronous (build, solve, extract); the async
/// signature only exists so callers can slot it behind the strategy trait.
#[derive(Debug, Default)]
pub struct MilpScheduler;

#[async_trait]
impl SchedulingStrategy for MilpScheduler {
    async fn optimize(
        &self,
        request: &OptimizeRequest,
    ) -> Result<OptimizationResult, ScheduleError> {
        model::solve(request)
    }
}

/// Entry point wrapping a pluggable strategy.
pub struct CommunityScheduler {
    strategy: Box<dyn SchedulingStrategy>,
}

impl CommunityScheduler {
    pub fn new(strategy: Box<dyn SchedulingStrategy>) -> Self {
        Self { strategy }
    }

    pub async fn optimize(
        &self,
        request: &OptimizeRequest,
    ) -> Result<OptimizationResult, ScheduleError> {
        self.strategy.optimize(request).await
    }
}

impl Default for CommunityScheduler {
    fn default() -> Self {
        Self::new(Box::new(MilpScheduler))
    }
}
