use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use dioxus::prelude::*;
use futures::future::{AbortHandle, Abortable, Aborted};

/// Abort handles for the fetches a component has in flight.
///
/// Every tracked future is wrapped in [`Abortable`]; once aborted it resolves
/// without running any further, so a late response cannot write into state
/// that belongs to a dish the user already left. A future that finishes
/// drops its own handle.
#[derive(Clone, Default)]
pub struct TaskGroup {
    handles: Rc<RefCell<Handles>>,
}

#[derive(Default)]
struct Handles {
    next_id: u64,
    live: Vec<(u64, AbortHandle)>,
}

impl TaskGroup {
    pub fn track<F: Future>(
        &self,
        future: F,
    ) -> impl Future<Output = Result<F::Output, Aborted>> {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut handles = self.handles.borrow_mut();
            let id = handles.next_id;
            handles.next_id += 1;
            handles.live.push((id, handle));
            id
        };

        let group = self.clone();
        async move {
            let outcome = Abortable::new(future, registration).await;
            group.release(id);
            outcome
        }
    }

    /// Aborts everything in flight, then tracks `future`.
    pub fn restart<F: Future>(
        &self,
        future: F,
    ) -> impl Future<Output = Result<F::Output, Aborted>> {
        self.cancel_all();
        self.track(future)
    }

    pub fn cancel_all(&self) {
        let drained: Vec<_> = self.handles.borrow_mut().live.drain(..).collect();
        for (_, handle) in drained {
            handle.abort();
        }
    }

    pub fn spawn(&self, future: impl Future<Output = ()> + 'static) {
        run(self.track(future));
    }

    pub fn respawn(&self, future: impl Future<Output = ()> + 'static) {
        run(self.restart(future));
    }

    fn release(&self, id: u64) {
        self.handles.borrow_mut().live.retain(|(live, _)| *live != id);
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.handles.borrow().live.len()
    }
}

fn run(task: impl Future<Output = Result<(), Aborted>> + 'static) {
    spawn(async move {
        if task.await.is_err() {
            tracing::trace!("fetch task aborted");
        }
    });
}

/// A [`TaskGroup`] that is cancelled when the component unmounts.
pub fn use_task_group() -> TaskGroup {
    let group = use_hook(TaskGroup::default);

    use_drop({
        let group = group.clone();
        move || group.cancel_all()
    });

    group
}
