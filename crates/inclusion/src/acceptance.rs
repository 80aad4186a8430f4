#![forbid(unsafe_code)]

use std::collections::VecDeque;

use omega_automata::StateIndex;
use omega_utilities::debug_trace;
use rustc_hash::FxHashSet;

use crate::Relation;
use crate::StateSet;

/// Decides whether `B` has an accepting run on `u · v^ω`, where `prefix` is
/// the set of states that `B` reaches by reading `u` and `period` relates the
/// states of `B` by reading `v`.
///
/// # Details
///
/// The period is closed under composition, restricted to the states that are
/// reachable from the prefix, until a triple `(q, q, true)` appears. Such a
/// triple is a cycle of `B` over `v^k` that visits an accepting state, which
/// can be repeated forever.
pub fn decide_acceptance(prefix: &StateSet, period: &Relation) -> bool {
    // The states that B can be in at the start of some iteration of the period.
    let mut reachable: FxHashSet<StateIndex> = prefix.iter().copied().collect();
    let mut queue: VecDeque<StateIndex> = prefix.iter().copied().collect();
    while let Some(p) = queue.pop_front() {
        for (q, _) in period.successors(p) {
            if reachable.insert(q) {
                queue.push_back(q);
            }
        }
    }

    let mut closure: Relation = period.iter().filter(|(p, _, _)| reachable.contains(p)).collect();
    loop {
        if closure.iter().any(|(p, q, acc)| acc && p == q) {
            debug_trace!("Found accepting cycle in {closure:?}");
            return true;
        }

        let next = closure.compose(period);
        if !closure.extend(&next) {
            return false;
        }
    }
}
