#![forbid(unsafe_code)]

use std::collections::VecDeque;
use std::fmt;

use bitvec::bitvec;
use bitvec::order::Lsb0;

use crate::Alphabet;
use crate::OmegaAutomaton;
use crate::StateIndex;
use crate::Word;

/// An ultimately periodic word `prefix · period^ω`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Lasso {
    pub prefix: Word,
    pub period: Word,
}

impl Lasso {
    pub fn new(prefix: Word, period: Word) -> Self {
        Self { prefix, period }
    }

    /// Returns a printable form `prefix (period)^ω` using the letter names of the alphabet.
    pub fn display<'a>(&'a self, alphabet: &'a Alphabet) -> impl fmt::Display + 'a {
        DisplayLasso { lasso: self, alphabet }
    }
}

struct DisplayLasso<'a> {
    lasso: &'a Lasso,
    alphabet: &'a Alphabet,
}

impl fmt::Display for DisplayLasso<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})^ω",
            self.alphabet.format_word(&self.lasso.prefix),
            self.alphabet.format_word(&self.lasso.period)
        )
    }
}

/// Returns true iff the automaton accepts `prefix · period^ω`. A lasso with an
/// empty period denotes no infinite word and is never accepted.
///
/// # Details
///
/// Explores the product of the automaton with the positions in the period,
/// starting from the states reached after the prefix. The word is accepted iff
/// a reachable product node with an accepting state lies on a cycle.
pub fn accepts_lasso(automaton: &impl OmegaAutomaton, lasso: &Lasso) -> bool {
    if lasso.period.is_empty() {
        return false;
    }

    // The set of states reached after reading the prefix.
    let mut current = bitvec![usize, Lsb0; 0; automaton.num_of_states()];
    current.set(automaton.initial_state().value(), true);
    for letter in &lasso.prefix {
        let mut next = bitvec![usize, Lsb0; 0; automaton.num_of_states()];
        for state in current.iter_ones() {
            for to in automaton.successors(StateIndex::new(state), *letter) {
                next.set(to.value(), true);
            }
        }
        current = next;
    }

    let period_length = lasso.period.len();
    let node = move |state: StateIndex, position: usize| state.value() * period_length + position;

    // Product successors of (state, position).
    let successors = move |state: StateIndex, position: usize| {
        let next_position = (position + 1) % period_length;
        automaton
            .successors(state, lasso.period[position])
            .map(move |to| (to, next_position))
    };

    let mut reachable = bitvec![usize, Lsb0; 0; automaton.num_of_states() * period_length];
    let mut queue = VecDeque::new();
    for state in current.iter_ones() {
        let state = StateIndex::new(state);
        reachable.set(node(state, 0), true);
        queue.push_back((state, 0));
    }

    let mut candidates = Vec::new();
    while let Some((state, position)) = queue.pop_front() {
        if automaton.is_final(state) {
            candidates.push((state, position));
        }

        for (to, next_position) in successors(state, position) {
            if !reachable[node(to, next_position)] {
                reachable.set(node(to, next_position), true);
                queue.push_back((to, next_position));
            }
        }
    }

    // An accepting node lies on a cycle iff it can reach itself in at least one step.
    candidates.into_iter().any(|(start_state, start_position)| {
        let mut visited = bitvec![usize, Lsb0; 0; automaton.num_of_states() * period_length];
        let mut queue: VecDeque<(StateIndex, usize)> = successors(start_state, start_position).collect();

        while let Some((state, position)) = queue.pop_front() {
            if state == start_state && position == start_position {
                return true;
            }

            if visited[node(state, position)] {
                continue;
            }
            visited.set(node(state, position), true);
            queue.extend(successors(state, position));
        }

        false
    })
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::read_ba;

    /// Accepts the words with infinitely many b's.
    const INFINITELY_MANY_B: &str = indoc! {"
        [0]
        a,[0]->[0]
        b,[0]->[1]
        a,[1]->[0]
        b,[1]->[1]
        [1]
    "};

    #[test]
    fn test_accepts_lasso() {
        let mut alphabet = Alphabet::new();
        let automaton = read_ba(INFINITELY_MANY_B.as_bytes(), &mut alphabet).unwrap();
        let word = |input: &str| alphabet.parse_word(input).unwrap();

        assert!(accepts_lasso(&automaton, &Lasso::new(word("aaa"), word("ab"))));
        assert!(accepts_lasso(&automaton, &Lasso::new(word(""), word("b"))));
        assert!(!accepts_lasso(&automaton, &Lasso::new(word("bbb"), word("a"))));
        assert!(!accepts_lasso(&automaton, &Lasso::new(word("b"), word(""))));
    }

    #[test]
    fn test_accepts_lasso_partial() {
        let mut alphabet = Alphabet::new();
        let automaton = read_ba("[0]\na,[0]->[1]\nb,[1]->[1]\n[1]".as_bytes(), &mut alphabet).unwrap();
        let word = |input: &str| alphabet.parse_word(input).unwrap();

        assert!(accepts_lasso(&automaton, &Lasso::new(word("a"), word("b"))));
        assert!(accepts_lasso(&automaton, &Lasso::new(word("ab"), word("bb"))));
        assert!(!accepts_lasso(&automaton, &Lasso::new(word("a"), word("a"))));
        assert!(!accepts_lasso(&automaton, &Lasso::new(word("b"), word("b"))));
    }

    #[test]
    fn test_lasso_display() {
        let alphabet = Alphabet::from_letters(["a", "b"]);
        let lasso = Lasso::new(alphabet.parse_word("ab").unwrap(), alphabet.parse_word("b").unwrap());

        assert_eq!(lasso.display(&alphabet).to_string(), "a b (b)^ω");
    }
}
