use indoc::indoc;
use test_case::test_case;

use omega_automata::Alphabet;
use omega_automata::BuchiAutomaton;
use omega_automata::Lasso;
use omega_automata::accepts_lasso;
use omega_automata::read_ba;
use omega_inclusion::CongruenceInclusion;
use omega_inclusion::Simulation;
use omega_inclusion::SimulationType;
use omega_inclusion::UnionStateIndex;
use omega_inclusion::check_inclusion;
use omega_utilities::Timing;
use omega_utilities::test_logger;

/// Reads both automata over one shared alphabet.
fn read_pair(a: &str, b: &str) -> (BuchiAutomaton, BuchiAutomaton, Alphabet) {
    let mut alphabet = Alphabet::new();
    let mut a = read_ba(a.as_bytes(), &mut alphabet).unwrap();
    let b = read_ba(b.as_bytes(), &mut alphabet).unwrap();
    a.widen_alphabet(&alphabet);

    (a, b, alphabet)
}

#[test_case(include_str!("input/single_a.ba"), include_str!("input/single_a.ba"), true, None ; "identical automata")]
#[test_case(include_str!("input/only_a.ba"), include_str!("input/only_b.ba"), false, Some(("", "a")) ; "disjoint languages")]
#[test_case(include_str!("input/only_a.ba"), include_str!("input/universal.ba"), true, None ; "subset language")]
#[test_case(include_str!("input/universal.ba"), include_str!("input/single_a.ba"), false, Some(("b", "a")) ; "missing letter in b")]
#[test_case(include_str!("input/eventually_b.ba"), include_str!("input/infinitely_many_b.ba"), true, None ; "eventually b")]
#[test_case(include_str!("input/infinitely_many_b.ba"), include_str!("input/eventually_b.ba"), false, None ; "infinitely many b")]
#[test_case(include_str!("input/universal.ba"), include_str!("input/infinitely_many_b.ba"), false, None ; "universal")]
fn test_inclusion(a: &str, b: &str, included: bool, expected: Option<(&str, &str)>) {
    test_logger();
    let (a, b, alphabet) = read_pair(a, b);

    let mut timing = Timing::new();
    let mut inclusion = CongruenceInclusion::new(&a, &b);
    assert_eq!(inclusion.is_included(&mut timing), included);

    match inclusion.counterexample() {
        Some(lasso) => {
            assert!(!included, "A counterexample is only available when inclusion fails");
            assert!(accepts_lasso(&a, lasso), "A must accept {}", lasso.display(&alphabet));
            assert!(!accepts_lasso(&b, lasso), "B must reject {}", lasso.display(&alphabet));

            if let Some((prefix, period)) = expected {
                assert_eq!(
                    *lasso,
                    Lasso::new(
                        alphabet.parse_word(prefix).unwrap(),
                        alphabet.parse_word(period).unwrap()
                    )
                );
            }
        }
        None => assert!(included, "Non-inclusion must come with a counterexample"),
    }

    // The pruned check agrees, but may find another counterexample.
    let counterexample = check_inclusion(&a, &b, SimulationType::Direct, &mut timing);
    assert_eq!(counterexample.is_none(), included);
    if let Some(lasso) = counterexample {
        assert!(accepts_lasso(&a, &lasso) && !accepts_lasso(&b, &lasso));
    }
}

#[test]
fn test_inclusion_is_repeatable() {
    test_logger();
    let (a, b, _) = read_pair(
        include_str!("input/infinitely_many_b.ba"),
        include_str!("input/eventually_b.ba"),
    );

    let mut timing = Timing::new();
    let mut inclusion = CongruenceInclusion::new(&a, &b);
    assert!(!inclusion.is_included(&mut timing));
    let first = inclusion.counterexample().cloned();

    assert!(!inclusion.is_included(&mut timing));
    assert_eq!(inclusion.counterexample().cloned(), first);
    assert!(timing.total("prefix") >= 0.0);
}

#[test]
fn test_inclusion_shortcut_by_simulation() {
    test_logger();
    let (a, b, _) = read_pair(include_str!("input/only_a.ba"), include_str!("input/universal.ba"));

    // The initial state of B simulates the initial state of A, so no fixpoint is computed.
    let mut timing = Timing::new();
    assert_eq!(check_inclusion(&a, &b, SimulationType::Direct, &mut timing), None);
    assert_eq!(timing.total("prefix"), 0.0);
}

#[test]
fn test_inclusion_missing_letter_stops_in_prefix_phase() {
    test_logger();
    let (a, b, alphabet) = read_pair(include_str!("input/universal.ba"), include_str!("input/single_a.ba"));

    // B has no run on b, so the prefix fixpoint already finds the counterexample.
    let mut timing = Timing::new();
    let mut inclusion = CongruenceInclusion::new(&a, &b);
    assert!(!inclusion.is_included(&mut timing));
    assert_eq!(timing.total("period"), 0.0, "The period fixpoint must not run");

    let word = |input: &str| alphabet.parse_word(input).unwrap();
    assert_eq!(inclusion.counterexample(), Some(&Lasso::new(word("b"), word("a"))));
}

/// Relates the non-accepting state 0 of B to its accepting state 2. Both
/// accept exactly b^ω, but state 0 cannot match the acceptance of state 2.
struct SameLanguage;

impl Simulation for SameLanguage {
    fn simulates(&self, x: UnionStateIndex, y: UnionStateIndex) -> bool {
        // State j of B is 1 + j in the union.
        x == y || (x.value() == 1 && y.value() == 3)
    }
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "direct simulation")]
fn test_inclusion_rejects_language_preorder() {
    let (a, b, _) = read_pair(
        "[0]\nb,[0]->[0]\n[0]",
        indoc! {"
            [0]
            b,[0]->[1]
            b,[1]->[1]
            b,[2]->[2]
            [1]
            [2]
        "},
    );

    let _ = CongruenceInclusion::with_simulation(&a, &b, SameLanguage);
}
