use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Periodic work driven by the [`Scheduler`](crate::Scheduler).
///
/// Units sharing a priority run in a freshly shuffled order every interval,
/// so an implementation must not depend on its position within its bucket.
pub trait Schedulable {
    /// Called once per interval, or once after the last interval for
    /// run-at-end registrations, with the interval index.
    fn execute(&mut self, step: u64);
}

/// A unit that shares its state with other code can be registered through
/// an `Rc<RefCell<_>>` handle and inspected after the run.
impl<T: Schedulable + ?Sized> Schedulable for Rc<RefCell<T>> {
    fn execute(&mut self, step: u64) {
        self.borrow_mut().execute(step);
    }
}

/// Receives interval and time-step boundary callbacks.
///
/// Notifications carry no priority. Implementors are typically shared with
/// other readers, so the callbacks take `&self`; use interior mutability for
/// any state they update.
pub trait Notifiable {
    /// A new interval is starting.
    fn notify_interval(&self, interval: u64);

    /// A new time step is starting.
    fn notify_time_step(&self, step: u64);
}

impl<T: Notifiable + ?Sized> Notifiable for Rc<T> {
    fn notify_interval(&self, interval: u64) {
        (**self).notify_interval(interval);
    }

    fn notify_time_step(&self, step: u64) {
        (**self).notify_time_step(step);
    }
}

impl<T: Notifiable + ?Sized> Notifiable for Arc<T> {
    fn notify_interval(&self, interval: u64) {
        (**self).notify_interval(interval);
    }

    fn notify_time_step(&self, step: u64) {
        (**self).notify_time_step(step);
    }
}
