/// Simulation state: the stored volume carried from one day to the next.
use super::run::BalanceContext;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub volume: f64,
}

impl State {
    /// Starting state for a run.
    ///
    /// An initial volume above capacity is clamped down to capacity.
    pub fn initialize(context: &BalanceContext) -> Self {
        let volume = if context.initial_volume > context.capacity_volume {
            log::warn!(
                "initial volume {} exceeds capacity {}; starting full",
                context.initial_volume,
                context.capacity_volume
            );
            context.capacity_volume
        } else {
            context.initial_volume
        };
        Self { volume }
    }
}
