use log::Level;
use surrox_core::Observer;

use crate::traits::{HasObjective, HasPoint};

/// Logs every event through the `log` facade.
///
/// Successful evaluations are logged at the configured level and failures at
/// [`Level::Warn`]. The observer never steers the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogObserver {
    level: Level,
    evaluations: usize,
    failures: usize,
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl LogObserver {
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            evaluations: 0,
            failures: 0,
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the number of successful evaluations seen.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Returns the number of failed evaluations seen.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl<E: HasPoint + HasObjective, A> Observer<E, A> for LogObserver {
    fn observe(&mut self, event: &E) -> Option<A> {
        let objective = event.objective();
        if objective.is_nan() {
            self.failures += 1;
            log::warn!("evaluation failed at x = {:?}", event.point());
        } else {
            self.evaluations += 1;
            log::log!(
                self.level,
                "eval {}: x = {:?}, objective = {objective}",
                self.evaluations,
                event.point()
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        x: Vec<f64>,
        objective: f64,
    }

    impl HasPoint for Probe {
        fn point(&self) -> &[f64] {
            &self.x
        }
    }

    impl HasObjective for Probe {
        fn objective(&self) -> f64 {
            self.objective
        }
    }

    #[test]
    fn counts_evaluations_and_failures() {
        let mut observer = LogObserver::new(Level::Info);
        let events = [
            Probe {
                x: vec![0.0],
                objective: 1.0,
            },
            Probe {
                x: vec![0.5],
                objective: f64::NAN,
            },
            Probe {
                x: vec![1.0],
                objective: 0.25,
            },
        ];

        for event in &events {
            let action: Option<()> = observer.observe(event);
            assert_eq!(action, None);
        }

        assert_eq!(observer.evaluations(), 2);
        assert_eq!(observer.failures(), 1);
        assert_eq!(observer.level(), Level::Info);
    }
}
