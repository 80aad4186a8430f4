#![forbid(unsafe_code)]

use bitvec::bitvec;
use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
use log::debug;

use omega_automata::LetterIndex;
use omega_automata::OmegaAutomaton;
use omega_automata::StateIndex;
use omega_utilities::TagIndex;

/// A unique type for the states of the disjoint union of two automata.
pub struct UnionTag;

/// A state of the disjoint union of automata `A` and `B`: state `i` of `A` is
/// `i` and state `j` of `B` is `num_of_states(A) + j`.
pub type UnionStateIndex = TagIndex<usize, UnionTag>;

/// A direct forward simulation over the disjoint union of two automata.
///
/// Whenever `x` simulates `y`, the state `x` must be accepting if `y` is, and
/// every move `y -a-> y'` must be matched by a move `x -a-> x'` such that `x'`
/// simulates `y'`. Any such relation may be supplied, including the identity
/// and the [DirectSimulation].
///
/// Language inclusion of the states (`L(y) ⊆ L(x)`) is not sufficient. The
/// period relations continue reading from the simulating state, which is only
/// sound when it matches every single step. Debug builds reject relations
/// that violate the transfer condition, see [is_direct_simulation].
pub trait Simulation {
    /// Returns true iff `x` simulates `y`.
    fn simulates(&self, x: UnionStateIndex, y: UnionStateIndex) -> bool;
}

/// The identity relation, which disables all simulation based pruning.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentitySimulation;

impl Simulation for IdentitySimulation {
    fn simulates(&self, x: UnionStateIndex, y: UnionStateIndex) -> bool {
        x == y
    }
}

/// The greatest direct (forward) simulation over the disjoint union of two
/// automata: `x` simulates `y` iff `y` accepting implies `x` accepting and
/// every move `y -a-> y'` is matched by a move `x -a-> x'` such that `x'`
/// simulates `y'`.
pub struct DirectSimulation {
    relation: BitVec<usize, Lsb0>,
    num_of_states: usize,
}

impl DirectSimulation {
    /// Computes the greatest direct simulation by refining the relation until
    /// no pair violates the transfer condition anymore.
    pub fn compute(a: &impl OmegaAutomaton, b: &impl OmegaAutomaton) -> Self {
        assert_eq!(
            a.num_of_letters(),
            b.num_of_letters(),
            "Both automata must share the alphabet"
        );

        let union = UnionView { a, b };
        let num_of_states = a.num_of_states() + b.num_of_states();
        let mut relation = bitvec![usize, Lsb0; 0; num_of_states * num_of_states];

        for x in 0..num_of_states {
            for y in 0..num_of_states {
                relation.set(x * num_of_states + y, !union.is_final(y) || union.is_final(x));
            }
        }

        let mut iterations = 0;
        let mut changed = true;
        while changed {
            changed = false;
            iterations += 1;

            for x in 0..num_of_states {
                for y in 0..num_of_states {
                    if !relation[x * num_of_states + y] {
                        continue;
                    }

                    let matched = (0..a.num_of_letters()).all(|letter| {
                        let letter = LetterIndex::new(letter);
                        union.successors(y, letter).iter().all(|y_next| {
                            union
                                .successors(x, letter)
                                .iter()
                                .any(|x_next| relation[x_next * num_of_states + y_next])
                        })
                    });

                    if !matched {
                        relation.set(x * num_of_states + y, false);
                        changed = true;
                    }
                }
            }
        }

        debug!(
            "Computed direct simulation with {} pairs in {iterations} iterations",
            relation.count_ones()
        );
        Self { relation, num_of_states }
    }
}

impl Simulation for DirectSimulation {
    fn simulates(&self, x: UnionStateIndex, y: UnionStateIndex) -> bool {
        self.relation[x.value() * self.num_of_states + y.value()]
    }
}

/// Returns true iff every pair related by `simulation` satisfies the
/// conditions of a direct simulation over the disjoint union of `a` and `b`,
/// see [Simulation].
pub fn is_direct_simulation<S: Simulation>(a: &impl OmegaAutomaton, b: &impl OmegaAutomaton, simulation: &S) -> bool {
    let union = UnionView { a, b };
    let num_of_states = a.num_of_states() + b.num_of_states();
    let simulates = |x: usize, y: usize| simulation.simulates(UnionStateIndex::new(x), UnionStateIndex::new(y));

    (0..num_of_states).all(|x| {
        (0..num_of_states).all(|y| {
            if !simulates(x, y) {
                return true;
            }

            if union.is_final(y) && !union.is_final(x) {
                debug!("State {x} simulates the accepting state {y} but is not accepting");
                return false;
            }

            (0..a.num_of_letters()).all(|letter| {
                let letter = LetterIndex::new(letter);
                let x_successors = union.successors(x, letter);
                union.successors(y, letter).iter().all(|y_next| {
                    let matched = x_successors.iter().any(|x_next| simulates(*x_next, *y_next));
                    if !matched {
                        debug!("State {x} simulates {y} but cannot match its move to {y_next}");
                    }
                    matched
                })
            })
        })
    })
}

/// Queries both automata through union indices.
struct UnionView<'a, A, B> {
    a: &'a A,
    b: &'a B,
}

impl<A: OmegaAutomaton, B: OmegaAutomaton> UnionView<'_, A, B> {
    fn is_final(&self, state: usize) -> bool {
        if state < self.a.num_of_states() {
            self.a.is_final(StateIndex::new(state))
        } else {
            self.b.is_final(StateIndex::new(state - self.a.num_of_states()))
        }
    }

    fn successors(&self, state: usize, letter: LetterIndex) -> Vec<usize> {
        let offset = self.a.num_of_states();
        if state < offset {
            self.a
                .successors(StateIndex::new(state), letter)
                .map(|to| to.value())
                .collect()
        } else {
            self.b
                .successors(StateIndex::new(state - offset), letter)
                .map(|to| to.value() + offset)
                .collect()
        }
    }
}

/// Answers simulation queries between the states of `A` and `B` by mapping
/// them into the disjoint union.
pub struct SimulationOracle<'a, S> {
    simulation: &'a S,
    num_of_states_a: usize,
}

impl<'a, S: Simulation> SimulationOracle<'a, S> {
    pub fn new(simulation: &'a S, num_of_states_a: usize) -> Self {
        Self {
            simulation,
            num_of_states_a,
        }
    }

    /// Returns true iff state `q` of `B` simulates state `t` of `A`.
    pub fn b_simulates_a(&self, q: StateIndex, t: StateIndex) -> bool {
        self.simulation.simulates(self.b(q), UnionStateIndex::new(t.value()))
    }

    /// Returns true iff state `q` of `B` simulates state `p` of `B`.
    pub fn b_simulates_b(&self, q: StateIndex, p: StateIndex) -> bool {
        self.simulation.simulates(self.b(q), self.b(p))
    }

    fn b(&self, state: StateIndex) -> UnionStateIndex {
        UnionStateIndex::new(self.num_of_states_a + state.value())
    }
}
