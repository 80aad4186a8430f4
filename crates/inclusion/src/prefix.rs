#![forbid(unsafe_code)]

use std::ops::ControlFlow;

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use log::trace;

use omega_automata::StateIndex;
use omega_automata::Word;
use omega_collections::VecSet;
use omega_collections::vecset;
use omega_utilities::debug_trace;

use crate::AdjacencyIndex;
use crate::Antichain;
use crate::Simulation;
use crate::SimulationOracle;
use crate::Violation;
use crate::Witnessed;
use crate::worklist::Worklist;

/// A set of states of `B`.
pub type StateSet = VecSet<StateIndex>;

/// Returns true iff `set` makes `update` redundant: every state of `set` is
/// simulated by some state of `update`, in particular when `set` is a subset.
pub(crate) fn set_dominates<S: Simulation>(oracle: &SimulationOracle<'_, S>, set: &StateSet, update: &StateSet) -> bool {
    set.is_subset(update) || set.iter().all(|p| update.iter().any(|q| oracle.b_simulates_b(*q, *p)))
}

/// Computes for every state `t` of `A` in `necessary` the antichain of the
/// sets of states that `B` reaches by reading a word that leads `A` from its
/// initial state to `t`.
///
/// Returns a violation as soon as some word leaves `B` without any run.
/// Updates that contain a state of `B` simulating the target in `A` are
/// discarded, since every continuation from there is accepted by `B`.
pub fn prefix_antichain<S: Simulation>(
    a: &AdjacencyIndex,
    b: &AdjacencyIndex,
    oracle: &SimulationOracle<'_, S>,
    necessary: &BitVec<usize, Lsb0>,
) -> ControlFlow<Violation, Antichain<StateIndex, StateSet>> {
    let dominates = |set: &StateSet, update: &StateSet| set_dominates(oracle, set, update);

    let mut antichain = Antichain::new();
    antichain.insert(
        a.initial_state(),
        Witnessed::new(vecset![b.initial_state()], Word::new()),
        dominates,
    );

    let mut worklist = Worklist::new(a.num_of_states());
    worklist.push(a.initial_state());

    while let Some(state) = worklist.pop() {
        // Insertions below may evict elements of this state itself.
        let snapshot = antichain.get(&state).to_vec();
        trace!("Prefix step from {state} with {} sets", snapshot.len());

        for letter in a.enabled_letters(state) {
            for target in a.successors(state, *letter) {
                if !necessary[target.value()] {
                    continue;
                }

                for current in &snapshot {
                    let update: StateSet = current
                        .element
                        .iter()
                        .flat_map(|p| b.successors(*p, *letter))
                        .copied()
                        .collect();

                    if update.is_empty() {
                        debug_trace!("No run of B on {:?} reaching {target}", current.word);
                        return ControlFlow::Break(Violation::EmptyPrefixStep {
                            word: current.word.clone(),
                            letter: *letter,
                            target: *target,
                        });
                    }

                    if update.iter().any(|q| oracle.b_simulates_a(*q, *target)) {
                        continue;
                    }

                    let mut word = current.word.clone();
                    word.push(*letter);
                    if antichain.insert(*target, Witnessed::new(update, word), dominates) {
                        worklist.push(*target);
                    }
                }
            }
        }
    }

    debug_assert!(
        antichain.is_antichain(dominates),
        "Prefix antichain invariant violated: {antichain:?}"
    );
    ControlFlow::Continue(antichain)
}
