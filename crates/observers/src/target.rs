use surrox_core::{Goal, Observer};

use crate::traits::{CanStopEarly, HasObjective};

/// Stops the solver once an objective reaches `target`.
///
/// For [`Goal::Minimize`] an objective at or below the target stops the
/// solver; for [`Goal::Maximize`], at or above. Failed evaluations never do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopAtTarget {
    target: f64,
    goal: Goal,
}

impl StopAtTarget {
    #[must_use]
    pub fn new(target: f64, goal: Goal) -> Self {
        Self { target, goal }
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Returns `true` if `objective` is at least as good as the target.
    #[must_use]
    pub fn is_reached(&self, objective: f64) -> bool {
        !objective.is_nan() && !self.goal.is_better(self.target, objective)
    }
}

impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for StopAtTarget {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.is_reached(event.objective()).then(A::stop_early)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Objective(f64);

    impl HasObjective for Objective {
        fn objective(&self) -> f64 {
            self.0
        }
    }

    #[derive(Debug, PartialEq)]
    struct Stop;

    impl CanStopEarly for Stop {
        fn stop_early() -> Self {
            Stop
        }
    }

    fn check(mut observer: StopAtTarget, objective: f64) -> Option<Stop> {
        observer.observe(&Objective(objective))
    }

    #[test]
    fn minimize_stops_at_or_below_target() {
        let observer = StopAtTarget::new(1.0, Goal::Minimize);

        assert_eq!(check(observer, 1.5), None);
        assert_eq!(check(observer, 1.0), Some(Stop));
        assert_eq!(check(observer, -3.0), Some(Stop));
    }

    #[test]
    fn maximize_stops_at_or_above_target() {
        let observer = StopAtTarget::new(1.4, Goal::Maximize);

        assert_eq!(check(observer, 1.0), None);
        assert_eq!(check(observer, 1.45), Some(Stop));
    }

    #[test]
    fn failures_never_stop() {
        let observer = StopAtTarget::new(0.0, Goal::Maximize);

        assert_eq!(check(observer, f64::NAN), None);
    }
}
