use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::info;
use log::warn;

/// Collects the durations of named phases of a computation, for instance the
/// prefix and period fixpoints of an inclusion check.
#[derive(Default)]
pub struct Timing {
    results: Rc<RefCell<Vec<(String, f32)>>>,
}

/// Measures the time from its creation until [Timer::finish] is called.
/// Dropping an unfinished timer records nothing and logs a warning.
pub struct Timer {
    name: String,
    start: Instant,
    results: Rc<RefCell<Vec<(String, f32)>>>,
    registered: bool,
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new timer for the phase with the given name.
    pub fn start(&mut self, name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            results: self.results.clone(),
            registered: false,
        }
    }

    /// Returns the total time in seconds recorded under the given name.
    pub fn total(&self, name: &str) -> f32 {
        self.results
            .borrow()
            .iter()
            .filter(|(phase, _)| phase == name)
            .map(|(_, time)| time)
            .sum()
    }

    /// Prints all finished timers to stderr, phases that ran several times are
    /// accumulated.
    pub fn print(&self) {
        for (name, time) in self.accumulated() {
            eprintln!("Time {name}: {time:.3}s");
        }
    }

    /// Sums the results per phase, in order of first occurrence.
    fn accumulated(&self) -> Vec<(String, f32)> {
        let mut result: Vec<(String, f32)> = Vec::new();
        for (name, time) in self.results.borrow().iter() {
            match result.iter_mut().find(|(phase, _)| phase == name) {
                Some((_, total)) => *total += time,
                None => result.push((name.clone(), *time)),
            }
        }
        result
    }
}

impl Timer {
    /// Stops the timer and registers the elapsed time.
    pub fn finish(&mut self) {
        let time = self.start.elapsed().as_secs_f64();
        info!("Time {}: {:.3}s", self.name, time);

        self.results.borrow_mut().push((self.name.clone(), time as f32));
        self.registered = true;
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.registered {
            warn!("Timer {} was dropped before 'finish()'", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_timing_accumulates_phases() {
        let mut timing = Timing::new();
        for _ in 0..3 {
            let mut timer = timing.start("prefix");
            timer.finish();
        }
        let mut timer = timing.start("period");
        timer.finish();

        let phases: Vec<String> = timing.accumulated().into_iter().map(|(name, _)| name).collect();
        assert_eq!(phases, vec!["prefix".to_string(), "period".to_string()]);
        assert!(timing.total("prefix") >= timing.results.borrow()[0].1);
        assert_eq!(timing.total("missing"), 0.0);
    }
}
