use crate::balance::output::RunOutput;
use crate::balance::run::{self, BalanceContext};
use crate::balance::state::State;
use crate::balance::terms::{BalanceTerms, DayRecord};
use crate::error::Result;
use crate::forcing::{DailyForcing, ForcingSeries};

/// Core trait for impoundment water balance models.
///
/// A model only decides how its configuration becomes a run context; the
/// remaining methods have shared defaults.
pub trait ReservoirModel {
    /// Human-readable model name, used in log messages.
    const NAME: &'static str;
    type Config;

    /// Validate the configuration and derive the run-constant context.
    fn prepare(config: &Self::Config) -> Result<BalanceContext>;

    /// Starting state; the initial volume clamped to capacity.
    fn initialize_state(context: &BalanceContext) -> State {
        State::initialize(context)
    }

    /// Execute one day: return the new state, the reported record and the
    /// unclamped terms.
    fn step(
        state: &State,
        forcing: &DailyForcing,
        context: &BalanceContext,
        day: usize,
    ) -> Result<(State, DayRecord, BalanceTerms)> {
        run::step_day(state, forcing, context, day)
    }

    /// Run the model over a forcing series.
    ///
    /// Default implementation: prepare the context, then fold the daily
    /// step over every day, aborting on the first error.
    fn run(config: &Self::Config, forcing: &ForcingSeries) -> Result<RunOutput> {
        let context = Self::prepare(config)?;
        run::simulate::<Self>(&context, forcing)
    }
}
