use std::cell::RefCell;
use std::time::Duration;

use leptos::leptos_dom::helpers::TimeoutHandle;

/// Cancellable one-shot timers.
pub trait Scheduler {
    type Handle;

    /// Run `task` after `delay`. `None` when the timer could not be set.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<Self::Handle>;

    fn cancel(&self, handle: Self::Handle);
}

/// `setTimeout` through leptos.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = TimeoutHandle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TimeoutHandle> {
        match leptos::set_timeout_with_handle(task, delay) {
            Ok(handle) => Some(handle),
            Err(e) => {
                leptos::logging::warn!("Portfolio tracking: setTimeout failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&self, handle: TimeoutHandle) {
        handle.clear();
    }
}

/// Runs only the last task of a burst: every trigger cancels the pending
/// timer and schedules a new one.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay: Duration,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            pending: RefCell::new(None),
        }
    }

    pub fn trigger(&self, task: impl FnOnce() + 'static) {
        let Ok(mut pending) = self.pending.try_borrow_mut() else {
            return;
        };
        if let Some(handle) = pending.take() {
            self.scheduler.cancel(handle);
        }
        *pending = self.scheduler.schedule(self.delay, Box::new(task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Timers that only run when the test says so.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        next_id: Rc<Cell<u32>>,
        queued: Rc<RefCell<Vec<(u32, Duration, Box<dyn FnOnce()>)>>>,
    }

    impl ManualScheduler {
        fn run_all(&self) {
            let tasks: Vec<_> = self.queued.borrow_mut().drain(..).collect();
            for (_, _, task) in tasks {
                task();
            }
        }

        fn queued_len(&self) -> usize {
            self.queued.borrow().len()
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = u32;

        fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<u32> {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.queued.borrow_mut().push((id, delay, task));
            Some(id)
        }

        fn cancel(&self, handle: u32) {
            self.queued.borrow_mut().retain(|(id, _, _)| *id != handle);
        }
    }

    #[test]
    fn test_only_last_trigger_runs() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), Duration::from_millis(100));
        let runs = Rc::new(RefCell::new(Vec::new()));

        for i in 0..5 {
            let runs = runs.clone();
            debouncer.trigger(move || runs.borrow_mut().push(i));
        }
        assert_eq!(scheduler.queued_len(), 1);
        scheduler.run_all();
        assert_eq!(*runs.borrow(), vec![4]);
    }

    #[test]
    fn test_uses_configured_delay() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), Duration::from_millis(250));
        debouncer.trigger(|| {});
        assert_eq!(scheduler.queued.borrow()[0].1, Duration::from_millis(250));
    }

    #[test]
    fn test_separate_bursts_each_run() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), Duration::from_millis(100));
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        debouncer.trigger(move || c.set(c.get() + 1));
        scheduler.run_all();
        let c = count.clone();
        debouncer.trigger(move || c.set(c.get() + 1));
        scheduler.run_all();
        assert_eq!(count.get(), 2);
    }
}
