/// Receives solver events and optionally steers the solver.
///
/// Solvers call [`Observer::observe`] once per event. Returning `Some(action)`
/// asks the solver to act on it; returning `None` lets the solver continue.
///
/// Closures `FnMut(&E) -> Option<A>` are observers, and `()` is the no-op
/// observer used by the `*_unobserved` solver entry points.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<O: Observer<u32, &'static str>>(mut observer: O, events: &[u32]) -> Option<&'static str> {
        events.iter().find_map(|e| observer.observe(e))
    }

    #[test]
    fn closure_observer_can_act() {
        let action = drive(|e: &u32| (*e > 2).then_some("stop"), &[1, 2, 3, 4]);

        assert_eq!(action, Some("stop"));
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), &[1, 2, 3]), None);
    }
}
