use itertools::Itertools;
use rand::Rng;

use omega_automata::BuchiAutomaton;
use omega_automata::Lasso;
use omega_automata::LetterIndex;
use omega_automata::Word;
use omega_automata::accepts_lasso;
use omega_automata::random_buchi;
use omega_automata::random_total_buchi;
use omega_automata::write_ba;
use omega_inclusion::CongruenceInclusion;
use omega_inclusion::SimulationType;
use omega_inclusion::check_inclusion;
use omega_utilities::DumpFiles;
use omega_utilities::Timing;
use omega_utilities::random_test;

/// All words over the first `num_of_letters` letters of the given length.
fn words(num_of_letters: usize, length: usize) -> Vec<Word> {
    (0..length)
        .map(|_| (0..num_of_letters).map(LetterIndex::new))
        .multi_cartesian_product()
        .collect()
}

/// All lassos with a prefix of at most two letters and a period of at most three letters.
fn small_lassos(num_of_letters: usize) -> Vec<Lasso> {
    let prefixes = (0..=2).flat_map(|length| words(num_of_letters, length)).collect_vec();
    let periods = (1..=3).flat_map(|length| words(num_of_letters, length)).collect_vec();

    prefixes
        .iter()
        .cartesian_product(periods.iter())
        .map(|(prefix, period)| Lasso::new(prefix.clone(), period.clone()))
        .collect()
}

/// Checks the answer of the inclusion check against the reference lasso acceptance.
fn check_answer(a: &BuchiAutomaton, b: &BuchiAutomaton, counterexample: Option<&Lasso>, lassos: &[Lasso]) {
    match counterexample {
        Some(lasso) => {
            assert!(
                accepts_lasso(a, lasso),
                "A must accept the counterexample {}",
                lasso.display(a.alphabet())
            );
            assert!(
                !accepts_lasso(b, lasso),
                "B must reject the counterexample {}",
                lasso.display(a.alphabet())
            );
        }
        None => {
            for lasso in lassos {
                assert!(
                    !accepts_lasso(a, lasso) || accepts_lasso(b, lasso),
                    "B must accept {} since it is accepted by A",
                    lasso.display(a.alphabet())
                );
            }
        }
    }
}

fn dump_pair(files: &mut DumpFiles, a: &BuchiAutomaton, b: &BuchiAutomaton) {
    files.dump("a.ba", |w| write_ba(w, a)).unwrap();
    files.dump("b.ba", |w| write_ba(w, b)).unwrap();
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_random_total_inclusion() {
    let lassos = small_lassos(2);

    random_test(100, |rng| {
        let mut files = DumpFiles::new("test_random_total_inclusion");

        let num_of_states_a = rng.random_range(1..5);
        let num_of_states_b = rng.random_range(1..4);
        let a = random_total_buchi(rng, num_of_states_a, 2, 2);
        let b = random_total_buchi(rng, num_of_states_b, 2, 2);
        dump_pair(&mut files, &a, &b);

        let mut inclusion = CongruenceInclusion::new(&a, &b);
        let included = inclusion.is_included(&mut Timing::new());
        assert_eq!(included, inclusion.counterexample().is_none());

        check_answer(&a, &b, inclusion.counterexample(), &lassos);
    })
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_random_partial_inclusion() {
    let lassos = small_lassos(2);

    random_test(100, |rng| {
        let mut files = DumpFiles::new("test_random_partial_inclusion");

        let a = random_buchi(rng, 4, 2, 5);
        let b = random_buchi(rng, 3, 2, 5);
        dump_pair(&mut files, &a, &b);

        let counterexample = check_inclusion(&a, &b, SimulationType::Identity, &mut Timing::new());
        check_answer(&a, &b, counterexample.as_ref(), &lassos);
    })
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_random_simulation_agrees() {
    let lassos = small_lassos(2);

    random_test(100, |rng| {
        let mut files = DumpFiles::new("test_random_simulation_agrees");

        let a = random_total_buchi(rng, 4, 2, 2);
        let b = random_total_buchi(rng, 3, 2, 2);
        dump_pair(&mut files, &a, &b);

        let mut timing = Timing::new();
        let identity = check_inclusion(&a, &b, SimulationType::Identity, &mut timing);
        let direct = check_inclusion(&a, &b, SimulationType::Direct, &mut timing);

        assert_eq!(identity.is_none(), direct.is_none(), "Pruning must not change the answer");
        check_answer(&a, &b, direct.as_ref(), &lassos);
    })
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_random_self_inclusion() {
    random_test(100, |rng| {
        let a = random_buchi(rng, 6, 3, 4);

        let mut inclusion = CongruenceInclusion::new(&a, &a);
        assert!(inclusion.is_included(&mut Timing::new()), "Every language includes itself");
    })
}
