#![forbid(unsafe_code)]

use std::ops::ControlFlow;

use log::debug;
use log::info;

use omega_automata::Lasso;
use omega_automata::OmegaAutomaton;
use omega_automata::StateIndex;
use omega_utilities::Timing;
use omega_utilities::debug_trace;

use crate::AdjacencyIndex;
use crate::DirectSimulation;
use crate::IdentitySimulation;
use crate::Simulation;
use crate::SimulationOracle;
use crate::is_direct_simulation;
use crate::period_antichain;
use crate::prefix_antichain;
use crate::reconstruct;
use crate::relation_dominates;
use crate::set_dominates;

/// Decides the language inclusion `L(A) ⊆ L(B)` of two Büchi automata over a
/// common alphabet by computing, for every accepting state `f` of `A`, the
/// congruence classes of the prefixes leading to `f` and of the periods from
/// `f` back to itself, represented by antichains.
///
/// The simulation is only used to prune redundant work, the identity
/// simulation gives the same answers.
pub struct CongruenceInclusion<S = IdentitySimulation> {
    a: AdjacencyIndex,
    b: AdjacencyIndex,
    simulation: S,

    counterexample: Option<Lasso>,
}

impl CongruenceInclusion<IdentitySimulation> {
    pub fn new(a: &impl OmegaAutomaton, b: &impl OmegaAutomaton) -> Self {
        Self::with_simulation(a, b, IdentitySimulation)
    }
}

impl<S: Simulation> CongruenceInclusion<S> {
    /// Uses the given direct simulation over the disjoint union of `a` and `b`
    /// for pruning, see [Simulation].
    pub fn with_simulation(a: &impl OmegaAutomaton, b: &impl OmegaAutomaton, simulation: S) -> Self {
        assert_eq!(
            a.num_of_letters(),
            b.num_of_letters(),
            "Both automata must share the alphabet"
        );
        debug_assert!(
            is_direct_simulation(a, b, &simulation),
            "The simulation must be a direct simulation over both automata"
        );

        Self {
            a: AdjacencyIndex::new(a),
            b: AdjacencyIndex::new(b),
            simulation,
            counterexample: None,
        }
    }

    /// Returns true iff every word accepted by `A` is accepted by `B`.
    /// Otherwise a lasso that `A` accepts and `B` rejects is available from
    /// [CongruenceInclusion::counterexample].
    pub fn is_included(&mut self, timing: &mut Timing) -> bool {
        self.counterexample = None;

        let oracle = SimulationOracle::new(&self.simulation, self.a.num_of_states());
        if oracle.b_simulates_a(self.b.initial_state(), self.a.initial_state()) {
            info!("The initial state of B simulates the initial state of A");
            return true;
        }

        let reachable = self.a.forward_reachable([self.a.initial_state()]);
        for f in (0..self.a.num_of_states()).map(StateIndex::new) {
            if !self.a.is_final(f) || !reachable[f.value()] {
                continue;
            }

            let successors = self
                .a
                .enabled_letters(f)
                .iter()
                .flat_map(|letter| self.a.successors(f, *letter).iter().copied());
            if !self.a.forward_reachable(successors)[f.value()] {
                debug!("Accepting state {f} does not lie on a cycle");
                continue;
            }

            info!("Checking accepting state {f}...");
            if let ControlFlow::Break(lasso) = self.check_accepting_state(f, &oracle, timing) {
                info!("Found a counterexample for accepting state {f}");
                self.counterexample = Some(lasso);
                return false;
            }
        }

        true
    }

    /// Returns the counterexample of the last call to
    /// [CongruenceInclusion::is_included] that returned false.
    pub fn counterexample(&self) -> Option<&Lasso> {
        self.counterexample.as_ref()
    }

    /// Searches for a lasso through the accepting state `f` that `B` rejects.
    fn check_accepting_state(
        &self,
        f: StateIndex,
        oracle: &SimulationOracle<'_, S>,
        timing: &mut Timing,
    ) -> ControlFlow<Lasso> {
        let necessary = self.a.states_between([self.a.initial_state()], f);

        let mut timer = timing.start("prefix");
        let prefix_result = prefix_antichain(&self.a, &self.b, oracle, &necessary);
        timer.finish();

        let prefixes = match prefix_result {
            ControlFlow::Continue(prefixes) => prefixes,
            ControlFlow::Break(violation) => {
                return ControlFlow::Break(reconstruct(violation, &self.a, f, &[]));
            }
        };
        prefixes.log_statistics("Prefix");
        debug_trace!("Prefix antichain: {prefixes:?}");
        debug_assert!(prefixes.is_antichain(|x, y| set_dominates(oracle, x, y)));

        let at_final = prefixes.get(&f);
        if at_final.is_empty() {
            debug!("All prefixes to {f} are simulated by B");
            return ControlFlow::Continue(());
        }

        let period_states = self.a.states_between([f], f);

        let mut timer = timing.start("period");
        let period_result = period_antichain(&self.a, &self.b, oracle, f, at_final, &period_states);
        timer.finish();

        match period_result {
            ControlFlow::Continue(periods) => {
                periods.log_statistics("Period");
                debug_trace!("Period antichain: {periods:?}");
                debug_assert!(periods.is_antichain(|x, y| relation_dominates(oracle, x, y)));
                ControlFlow::Continue(())
            }
            ControlFlow::Break(violation) => ControlFlow::Break(reconstruct(violation, &self.a, f, at_final)),
        }
    }
}

/// The simulation used to prune the inclusion check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SimulationType {
    /// No pruning.
    #[default]
    Identity,
    /// Prune using the greatest direct simulation.
    Direct,
}

/// Decides `L(A) ⊆ L(B)`, returns a lasso that `A` accepts and `B` rejects
/// when inclusion does not hold.
pub fn check_inclusion(
    a: &impl OmegaAutomaton,
    b: &impl OmegaAutomaton,
    simulation: SimulationType,
    timing: &mut Timing,
) -> Option<Lasso> {
    match simulation {
        SimulationType::Identity => {
            let mut inclusion = CongruenceInclusion::new(a, b);
            if inclusion.is_included(timing) {
                None
            } else {
                inclusion.counterexample
            }
        }
        SimulationType::Direct => {
            let mut timer = timing.start("simulation");
            let simulation = DirectSimulation::compute(a, b);
            timer.finish();

            let mut inclusion = CongruenceInclusion::with_simulation(a, b, simulation);
            if inclusion.is_included(timing) {
                None
            } else {
                inclusion.counterexample
            }
        }
    }
}
