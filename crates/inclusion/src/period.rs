#![forbid(unsafe_code)]

use std::ops::ControlFlow;

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use log::trace;

use omega_automata::LetterIndex;
use omega_automata::StateIndex;
use omega_automata::Word;
use omega_utilities::debug_trace;

use crate::AdjacencyIndex;
use crate::Antichain;
use crate::Relation;
use crate::Simulation;
use crate::SimulationOracle;
use crate::StateSet;
use crate::Violation;
use crate::Witnessed;
use crate::decide_acceptance;
use crate::worklist::Worklist;

/// Returns true iff `relation` makes `update` redundant, see [Relation::is_covered_by].
pub(crate) fn relation_dominates<S: Simulation>(
    oracle: &SimulationOracle<'_, S>,
    relation: &Relation,
    update: &Relation,
) -> bool {
    relation.is_covered_by(update, |q, p| q == p || oracle.b_simulates_b(q, p))
}

/// Computes for every state `t` of `A` in `period_states` the antichain of
/// the relations of `B` induced by the non-empty words that lead `A` from the
/// accepting state `f` to `t`.
///
/// The relations start in the states of `B` that are reachable from the
/// `prefixes` at `f`. Every relation that is added for `f` itself is checked
/// against all prefixes immediately, so that the computation stops at the
/// first lasso that `B` rejects.
pub fn period_antichain<S: Simulation>(
    a: &AdjacencyIndex,
    b: &AdjacencyIndex,
    oracle: &SimulationOracle<'_, S>,
    f: StateIndex,
    prefixes: &[Witnessed<StateSet>],
    period_states: &BitVec<usize, Lsb0>,
) -> ControlFlow<Violation, Antichain<StateIndex, Relation>> {
    let dominates = |relation: &Relation, update: &Relation| relation_dominates(oracle, relation, update);

    // Every state of B that can occur at the start of some iteration of the period.
    let seed = b.forward_reachable(prefixes.iter().flat_map(|prefix| prefix.element.iter().copied()));
    trace!("Period seed contains {} states of B", seed.count_ones());

    let mut antichain = Antichain::new();
    let mut worklist = Worklist::new(a.num_of_states());

    for letter in a.enabled_letters(f) {
        for target in a.successors(f, *letter) {
            if !period_states[target.value()] {
                continue;
            }

            let mut relation = Relation::new();
            for p in seed.iter_ones().map(StateIndex::new) {
                for q in b.successors(p, *letter) {
                    relation.insert(p, *q, b.is_final(p) || b.is_final(*q));
                }
            }

            if relation.is_empty() {
                return ControlFlow::Break(Violation::EmptyPeriodStep {
                    word: Word::new(),
                    letter: *letter,
                    target: *target,
                });
            }

            insert_relation(
                &mut antichain,
                &mut worklist,
                (f, prefixes),
                *target,
                Witnessed::new(relation, vec![*letter]),
                dominates,
            )?;
        }
    }

    while let Some(state) = worklist.pop() {
        // Insertions below may evict elements of this state itself.
        let snapshot = antichain.get(&state).to_vec();
        trace!("Period step from {state} with {} relations", snapshot.len());

        for letter in a.enabled_letters(state) {
            for target in a.successors(state, *letter) {
                if !period_states[target.value()] {
                    continue;
                }

                for current in &snapshot {
                    let update = extend(b, &current.element, *letter);

                    if update.is_empty() {
                        debug_trace!("No run of B on period {:?} reaching {target}", current.word);
                        return ControlFlow::Break(Violation::EmptyPeriodStep {
                            word: current.word.clone(),
                            letter: *letter,
                            target: *target,
                        });
                    }

                    let mut word = current.word.clone();
                    word.push(*letter);
                    insert_relation(
                        &mut antichain,
                        &mut worklist,
                        (f, prefixes),
                        *target,
                        Witnessed::new(update, word),
                        dominates,
                    )?;
                }
            }
        }
    }

    debug_assert!(
        antichain.is_antichain(dominates),
        "Period antichain invariant violated: {antichain:?}"
    );
    ControlFlow::Continue(antichain)
}

/// Inserts the relation of a word leading `A` from `f` to `target`. When the
/// word returns to `f` it is first checked against all prefixes.
fn insert_relation<F>(
    antichain: &mut Antichain<StateIndex, Relation>,
    worklist: &mut Worklist,
    (f, prefixes): (StateIndex, &[Witnessed<StateSet>]),
    target: StateIndex,
    candidate: Witnessed<Relation>,
    dominates: F,
) -> ControlFlow<Violation>
where
    F: Fn(&Relation, &Relation) -> bool,
{
    if target == f {
        check_against_prefixes(prefixes, &candidate)?;
    }

    if antichain.insert(target, candidate, dominates) {
        worklist.push(target);
    }
    ControlFlow::Continue(())
}

/// Extends every triple `(p, q, acc)` by one step `q -letter-> r` to `(p, r, acc || final(r))`.
fn extend(b: &AdjacencyIndex, relation: &Relation, letter: LetterIndex) -> Relation {
    let mut result = Relation::new();
    for (p, q, acc) in relation.iter() {
        for r in b.successors(q, letter) {
            result.insert(p, *r, acc || b.is_final(*r));
        }
    }
    result
}

/// Checks a relation for a word from `f` back to `f` against every prefix at `f`.
fn check_against_prefixes(prefixes: &[Witnessed<StateSet>], period: &Witnessed<Relation>) -> ControlFlow<Violation> {
    for prefix in prefixes {
        if !decide_acceptance(&prefix.element, &period.element) {
            debug_trace!("B rejects {:?} ({:?})^ω", prefix.word, period.word);
            return ControlFlow::Break(Violation::Rejected {
                prefix: prefix.word.clone(),
                period: period.word.clone(),
            });
        }
    }

    ControlFlow::Continue(())
}
