/// Daily balance orchestration.
///
/// - `step()`: balance terms for one day from a given volume
/// - `step_day()`: one driver transition, including clamping → (State, DayRecord)
/// - `simulate()`: fold a model's step over a forcing series → RunOutput
use super::output::RunOutput;
use super::processes::{self, Clamp};
use super::state::State;
use super::terms::{BalanceTerms, DayRecord};
use crate::config::{check_reduction_pct, BasinConfig, LakeConfig, LakeOptions};
use crate::error::{BalanceError, Result};
use crate::forcing::{DailyForcing, ForcingSeries};
use crate::geometry::BasinGeometry;
use crate::traits::ReservoirModel;

/// Run-constant inputs derived from a validated configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceContext {
    pub geometry: BasinGeometry,
    pub capacity_volume: f64,
    pub initial_volume: f64,
    pub options: LakeOptions,
}

impl BalanceContext {
    pub fn new(config: &BasinConfig, options: LakeOptions) -> Result<Self> {
        config.validate()?;
        options.validate()?;
        Ok(Self {
            geometry: config.geometry()?,
            capacity_volume: config.capacity_volume,
            initial_volume: config.initial_volume,
            options,
        })
    }
}

/// Compute one day's balance terms from the start-of-day `volume`.
///
/// Nothing is clamped here; `next_volume` may fall outside the storage bounds.
/// A non-finite flux or next volume fails with `MalformedForcing` at row 0;
/// the driver re-tags it with the day index.
pub fn step(
    volume: f64,
    forcing: &DailyForcing,
    geometry: &BasinGeometry,
    options: &LakeOptions,
) -> Result<BalanceTerms> {
    check_reduction_pct(options.evaporation_reduction_pct)?;

    // Step 1: Water level and surface from the start-of-day volume
    let depth = geometry.depth(volume)?;
    let surface_area = geometry.surface_area(depth)?;

    // Step 2: Surface fluxes
    let evaporation = processes::evaporation_volume(
        surface_area,
        forcing.evaporation_depth,
        options.evaporation_reduction_pct,
    );
    let direct_rain = processes::direct_rain_volume(surface_area, forcing.rainfall_depth);

    // Step 3: Seepage over the wetted area
    let seepage = processes::seepage_volume(geometry.wetted_area(depth)?, options.leaky);

    // Step 4: Unclamped balance
    let next_volume = processes::next_volume(
        volume,
        evaporation,
        forcing.outflow_volume,
        forcing.inflow_volume,
        direct_rain,
        seepage,
    );

    // Step 5: Reject overflowed terms
    for (name, value) in [
        ("evaporation", evaporation),
        ("direct_rain", direct_rain),
        ("seepage", seepage),
        ("next_volume", next_volume),
    ] {
        if !value.is_finite() {
            return Err(BalanceError::MalformedForcing {
                row: 0,
                reason: format!("balance produced a non-finite {name} ({value})"),
            });
        }
    }

    Ok(BalanceTerms {
        depth,
        surface_area,
        evaporation,
        inflow: forcing.inflow_volume,
        outflow: forcing.outflow_volume,
        direct_rain,
        seepage,
        next_volume,
    })
}

/// Advance the driver by one day.
///
/// Depth and area in the record are start-of-day values, except on a day
/// that ends empty (forced to exactly zero) or full (recomputed at capacity).
pub fn step_day(
    state: &State,
    forcing: &DailyForcing,
    context: &BalanceContext,
    day: usize,
) -> Result<(State, DayRecord, BalanceTerms)> {
    let start_volume = state.volume;
    let terms = step(start_volume, forcing, &context.geometry, &context.options).map_err(
        |err| match err {
            BalanceError::MalformedForcing { reason, .. } => {
                BalanceError::MalformedForcing { row: day, reason }
            }
            other => other,
        },
    )?;

    let (end_volume, depth, surface_area) =
        match processes::classify(terms.next_volume, context.capacity_volume) {
            Clamp::Empty => {
                log::trace!(
                    "day {day}: ran dry, shortfall {}",
                    processes::shortfall_volume(terms.next_volume)
                );
                (0.0, 0.0, 0.0)
            }
            Clamp::Full => {
                log::trace!(
                    "day {day}: full, spill {}",
                    processes::spill_volume(terms.next_volume, context.capacity_volume)
                );
                let depth = context.geometry.depth(context.capacity_volume)?;
                (
                    context.capacity_volume,
                    depth,
                    context.geometry.surface_area(depth)?,
                )
            }
            Clamp::Within => (terms.next_volume, terms.depth, terms.surface_area),
        };

    let record = DayRecord {
        day,
        start_volume,
        end_volume,
        depth,
        surface_area,
        inflow: terms.inflow,
        evaporation: terms.evaporation,
        outflow: terms.outflow,
    };

    Ok((State { volume: end_volume }, record, terms))
}

/// Fold `M`'s daily step over `forcing`, starting from the context's initial volume.
///
/// The first error aborts the run; no partial output is returned.
pub fn simulate<M: ReservoirModel + ?Sized>(
    context: &BalanceContext,
    forcing: &ForcingSeries,
) -> Result<RunOutput> {
    let initial = M::initialize_state(context);
    log::debug!(
        "{}: simulating {} days from volume {}",
        M::NAME,
        forcing.len(),
        initial.volume
    );

    let mut output = RunOutput::with_capacity(forcing.len(), initial.volume, context.capacity_volume);
    let final_state = forcing
        .iter()
        .enumerate()
        .try_fold(initial, |state, (day, f)| {
            let (next, record, terms) = M::step(&state, f, context, day)?;
            output.push(record, &terms);
            Ok::<_, BalanceError>(next)
        })?;

    log::debug!("{}: finished with volume {}", M::NAME, final_state.volume);
    Ok(output)
}

/// Farm dam: no seepage, no evaporation reduction.
pub struct FarmDam;

impl ReservoirModel for FarmDam {
    const NAME: &'static str = "farm dam";
    type Config = BasinConfig;

    fn prepare(config: &Self::Config) -> Result<BalanceContext> {
        BalanceContext::new(config, LakeOptions::default())
    }
}

/// Lake: optional seepage and evaporation reduction.
pub struct Lake;

impl ReservoirModel for Lake {
    const NAME: &'static str = "lake";
    type Config = LakeConfig;

    fn prepare(config: &Self::Config) -> Result<BalanceContext> {
        BalanceContext::new(&config.basin(), config.options())
    }
}

/// Run the farm dam balance over `forcing`.
pub fn run_dam(config: &BasinConfig, forcing: &ForcingSeries) -> Result<RunOutput> {
    FarmDam::run(config, forcing)
}

/// Run the lake balance over `forcing`.
pub fn run_lake(config: &LakeConfig, forcing: &ForcingSeries) -> Result<RunOutput> {
    Lake::run(config, forcing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::constants::SEEPAGE_RATE;
    use crate::geometry::{self, FractionMode};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn unit_pyramid(capacity: f64, initial: f64) -> BasinConfig {
        BasinConfig::new(capacity, initial, 1.0, 0.0)
    }

    fn one_day(rain: f64, evap: f64, inflow: f64, outflow: f64) -> ForcingSeries {
        ForcingSeries::new(vec![DailyForcing::new(rain, evap, inflow, outflow)]).unwrap()
    }

    fn dam_context() -> BalanceContext {
        BalanceContext::new(&BasinConfig::new(10_000.0, 2_000.0, 2.0, 10.0), LakeOptions::default())
            .unwrap()
    }

    // -- Worked scenarios --

    #[test]
    fn scenario_no_clamp_keeps_volume() {
        let out = run_dam(&unit_pyramid(1000.0, 1.333333), &one_day(0.0, 0.0, 0.0, 0.0)).unwrap();
        let r = out.records[0];
        assert_eq!(r.day, 0);
        assert_eq!(r.start_volume, 1.333333);
        assert_eq!(r.end_volume, 1.333333);
        assert_abs_diff_eq!(r.depth, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(r.surface_area, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn scenario_overdraw_empties_basin() {
        let out = run_dam(&unit_pyramid(1000.0, 5.0), &one_day(0.0, 0.0, 0.0, 1000.0)).unwrap();
        let r = out.records[0];
        assert_eq!(r.end_volume, 0.0);
        assert_eq!(r.depth, 0.0);
        assert_eq!(r.surface_area, 0.0);
        assert_eq!(r.outflow, 1000.0);
    }

    #[test]
    fn scenario_flood_fills_to_capacity() {
        let out = run_dam(&unit_pyramid(10.0, 9.0), &one_day(0.0, 0.0, 1000.0, 0.0)).unwrap();
        let r = out.records[0];
        let depth_at_capacity = geometry::solve_depth(0.0, 1.0, 10.0).unwrap();
        assert_eq!(r.end_volume, 10.0);
        assert_eq!(r.depth, depth_at_capacity);
        assert_eq!(
            r.surface_area,
            geometry::surface_area(0.0, 1.0, depth_at_capacity).unwrap()
        );
        assert_relative_eq!(out.terms.next_volume[0], 1009.0);
    }

    // -- step() tests --

    #[test]
    fn step_conserves_mass_without_leak() {
        let ctx = dam_context();
        let f = DailyForcing::new(0.01, 0.006, 150.0, 40.0);
        let t = step(2_000.0, &f, &ctx.geometry, &ctx.options).unwrap();
        assert_eq!(t.seepage, 0.0);
        assert_eq!(
            t.next_volume,
            2_000.0 - t.evaporation - t.outflow + t.inflow + t.direct_rain
        );
    }

    #[test]
    fn step_fluxes_scale_with_surface_area() {
        let ctx = dam_context();
        let f = DailyForcing::new(0.01, 0.006, 0.0, 0.0);
        let t = step(2_000.0, &f, &ctx.geometry, &ctx.options).unwrap();
        assert_relative_eq!(t.direct_rain, t.surface_area * 0.01);
        assert_relative_eq!(t.evaporation, t.surface_area * 0.006);
    }

    #[test]
    fn step_leak_uses_wetted_area() {
        let ctx = dam_context();
        let options = LakeOptions::new(true, 0.0);
        let f = DailyForcing::default();
        let t = step(2_000.0, &f, &ctx.geometry, &options).unwrap();
        let wetted = geometry::wetted_surface_area(10.0, 2.0, t.depth).unwrap();
        assert_relative_eq!(t.seepage, SEEPAGE_RATE * wetted);
        assert_relative_eq!(t.next_volume, 2_000.0 - t.seepage);
    }

    #[test]
    fn step_evaporation_reduction() {
        let ctx = dam_context();
        let f = DailyForcing::new(0.0, 0.008, 0.0, 0.0);
        let base = step(2_000.0, &f, &ctx.geometry, &LakeOptions::new(false, 0.0)).unwrap();
        let half = step(2_000.0, &f, &ctx.geometry, &LakeOptions::new(false, 50.0)).unwrap();
        let none = step(2_000.0, &f, &ctx.geometry, &LakeOptions::new(false, 100.0)).unwrap();
        assert_relative_eq!(half.evaporation, 0.5 * base.evaporation);
        assert_eq!(none.evaporation, 0.0);
    }

    #[test]
    fn step_rejects_bad_reduction_pct() {
        let ctx = dam_context();
        let err = step(10.0, &DailyForcing::default(), &ctx.geometry, &LakeOptions::new(false, 120.0))
            .unwrap_err();
        assert!(matches!(err, BalanceError::InvalidConfig(_)));
    }

    #[test]
    fn step_rejects_overflowing_balance() {
        let g = BasinGeometry::new(10.0, 2.0).unwrap();
        let f = DailyForcing::new(0.0, 0.0, f64::MAX, 0.0);
        let err = step(f64::MAX, &f, &g, &LakeOptions::default()).unwrap_err();
        assert!(matches!(err, BalanceError::MalformedForcing { row: 0, .. }));
        assert!(err.to_string().contains("next_volume"));
    }

    #[test]
    fn step_rejects_overflowing_evaporation() {
        let g = BasinGeometry::new(10.0, 2.0).unwrap();
        let f = DailyForcing::new(0.0, f64::MAX, 0.0, 0.0);
        let err = step(1e6, &f, &g, &LakeOptions::default()).unwrap_err();
        assert!(err.to_string().contains("evaporation"));
    }

    #[test]
    fn step_rejects_negative_volume() {
        let ctx = dam_context();
        let err = step(-1.0, &DailyForcing::default(), &ctx.geometry, &ctx.options).unwrap_err();
        assert!(matches!(err, BalanceError::InvalidVolume { .. }));
    }

    // -- step_day() tests --

    #[test]
    fn within_bounds_reports_start_of_day_level() {
        let ctx = dam_context();
        let state = State { volume: 2_000.0 };
        let f = DailyForcing::new(0.0, 0.0, 500.0, 0.0);
        let (next, record, terms) = step_day(&state, &f, &ctx, 3).unwrap();

        assert_eq!(record.day, 3);
        assert_eq!(next.volume, 2_500.0);
        assert_eq!(record.end_volume, 2_500.0);
        assert_eq!(record.depth, ctx.geometry.depth(2_000.0).unwrap());
        assert_eq!(record.depth, terms.depth);
        assert!(record.depth < ctx.geometry.depth(2_500.0).unwrap());
    }

    #[test]
    fn step_day_does_not_mutate_input_state() {
        let ctx = dam_context();
        let state = State { volume: 2_000.0 };
        let _ = step_day(&state, &DailyForcing::new(0.0, 0.0, 100.0, 0.0), &ctx, 0).unwrap();
        assert_eq!(state.volume, 2_000.0);
    }

    #[test]
    fn empty_clamp_ignores_geometry() {
        // Deep wide basin; an empty day still reports exact zeros
        let config = BasinConfig::new(1e6, 50.0, 4.0, 100.0);
        let ctx = BalanceContext::new(&config, LakeOptions::default()).unwrap();
        let (next, record, _) =
            step_day(&State { volume: 50.0 }, &DailyForcing::new(0.0, 0.0, 0.0, 51.0), &ctx, 0).unwrap();
        assert_eq!(next.volume, 0.0);
        assert_eq!((record.depth, record.surface_area), (0.0, 0.0));
    }

    // -- simulate() tests --

    #[test]
    fn run_output_length_matches_input() {
        let days = vec![DailyForcing::new(0.002, 0.004, 30.0, 10.0); 12];
        let forcing = ForcingSeries::new(days).unwrap();
        let out = run_dam(&BasinConfig::new(10_000.0, 2_000.0, 2.0, 10.0), &forcing).unwrap();
        assert_eq!(out.len(), 12);
        assert_eq!(out.terms.len(), 12);
    }

    #[test]
    fn run_chains_end_to_start_volume() {
        let days = vec![
            DailyForcing::new(0.0, 0.005, 0.0, 600.0),
            DailyForcing::new(0.02, 0.0, 9_000.0, 0.0),
            DailyForcing::new(0.0, 0.01, 0.0, 20_000.0),
            DailyForcing::new(0.01, 0.003, 250.0, 25.0),
        ];
        let forcing = ForcingSeries::new(days).unwrap();
        let out = run_dam(&BasinConfig::new(10_000.0, 2_000.0, 2.0, 10.0), &forcing).unwrap();

        assert_eq!(out.records[0].start_volume, 2_000.0);
        for pair in out.records.windows(2) {
            assert_eq!(pair[1].start_volume, pair[0].end_volume);
        }
        assert_eq!(out.records[1].end_volume, 10_000.0);
        assert_eq!(out.records[2].end_volume, 0.0);
        for r in &out.records {
            assert!((0.0..=10_000.0).contains(&r.end_volume));
        }
    }

    #[test]
    fn trait_step_matches_step_day() {
        let ctx = dam_context();
        let state = Lake::initialize_state(&ctx);
        assert_eq!(state.volume, 2_000.0);
        let f = DailyForcing::new(0.004, 0.006, 120.0, 30.0);
        assert_eq!(
            FarmDam::step(&state, &f, &ctx, 5).unwrap(),
            step_day(&state, &f, &ctx, 5).unwrap()
        );
    }

    #[test]
    fn run_empty_series() {
        let out = run_dam(&unit_pyramid(10.0, 4.0), &ForcingSeries::default()).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.final_volume(), 4.0);
    }

    #[test]
    fn run_clamps_initial_volume_to_capacity() {
        let out = run_dam(&unit_pyramid(10.0, 25.0), &one_day(0.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(out.initial_volume, 10.0);
        assert_eq!(out.records[0].start_volume, 10.0);
    }

    #[test]
    fn run_rejects_invalid_config() {
        let err = run_dam(&BasinConfig::new(-5.0, 1.0, 1.0, 0.0), &one_day(0.0, 0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, BalanceError::InvalidConfig(_)));

        let err = run_dam(&BasinConfig::new(10.0, 1.0, 0.0, 0.0), &one_day(0.0, 0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, BalanceError::InvalidGeometry { .. }));
    }

    #[test]
    fn run_aborts_on_overflowing_day() {
        let days = vec![
            DailyForcing::new(0.0, 0.0, 1.0, 0.0),
            DailyForcing::new(0.0, 0.0, f64::MAX, 0.0),
            DailyForcing::new(0.0, 0.0, f64::MAX, 0.0),
        ];
        let forcing = ForcingSeries::new(days).unwrap();
        let err = run_dam(&unit_pyramid(f64::MAX, 0.0), &forcing).unwrap_err();
        assert!(matches!(err, BalanceError::MalformedForcing { row: 2, .. }));
    }

    // -- Lake vs dam --

    #[test]
    fn lake_without_options_matches_dam() {
        let days = vec![DailyForcing::new(0.004, 0.006, 80.0, 35.0); 30];
        let forcing = ForcingSeries::new(days).unwrap();
        let basin = BasinConfig::new(10_000.0, 3_000.0, 2.5, 12.0);
        let dam = run_dam(&basin, &forcing).unwrap();
        let lake = run_lake(&LakeConfig::new(basin, LakeOptions::default()), &forcing).unwrap();
        assert_eq!(dam.records, lake.records);
    }

    #[test]
    fn leaky_lake_loses_more_water() {
        let days = vec![DailyForcing::new(0.0, 0.004, 20.0, 10.0); 30];
        let forcing = ForcingSeries::new(days).unwrap();
        let basin = BasinConfig::new(10_000.0, 3_000.0, 2.5, 12.0);
        let tight = run_lake(&LakeConfig::new(basin, LakeOptions::new(false, 0.0)), &forcing).unwrap();
        let leaky = run_lake(&LakeConfig::new(basin, LakeOptions::new(true, 0.0)), &forcing).unwrap();
        assert!(leaky.final_volume() < tight.final_volume());
        assert!(leaky.terms.seepage.iter().all(|&s| s > 0.0));
        assert!(tight.terms.seepage.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn exact_fractions_stay_close_to_legacy() {
        let days = vec![DailyForcing::new(0.003, 0.005, 60.0, 20.0); 60];
        let forcing = ForcingSeries::new(days).unwrap();
        let basin = BasinConfig::new(10_000.0, 3_000.0, 2.5, 12.0);
        let legacy = run_dam(&basin, &forcing).unwrap();
        let exact = run_dam(&basin.with_fractions(FractionMode::Exact), &forcing).unwrap();
        assert_relative_eq!(
            legacy.final_volume(),
            exact.final_volume(),
            max_relative = 1e-6
        );
    }
}
