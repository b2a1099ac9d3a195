use crate::domain::chart::FrameScheduler;
use gloo::render::{AnimationFrame, request_animation_frame};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Scheduler driven by hand: tasks run only when `run_pending` is called.
/// Used off the browser and in tests to step the event loop one tick at a time.
#[derive(Default)]
pub struct ManualFrameScheduler {
    queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every task queued before this call. Tasks scheduled while running
    /// wait for the next tick. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let tasks: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn schedule(&self, task: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push_back(task);
    }
}

#[derive(Default)]
struct FrameQueue {
    tasks: RefCell<Vec<Box<dyn FnOnce()>>>,
    armed: Cell<bool>,
    frame: RefCell<Option<AnimationFrame>>,
    spent: RefCell<Option<AnimationFrame>>,
}

impl FrameQueue {
    fn run(&self) {
        self.armed.set(false);
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for task in tasks {
            task();
        }
    }
}

/// Browser scheduler: tasks run on the next `requestAnimationFrame`.
///
/// All tasks scheduled before a frame fires share that frame. Dropping the
/// scheduler cancels a pending frame.
#[derive(Default)]
pub struct AnimationFrameScheduler {
    queue: Rc<FrameQueue>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn schedule(&self, task: Box<dyn FnOnce()>) {
        self.queue.tasks.borrow_mut().push(task);
        if self.queue.armed.replace(true) {
            return;
        }
        let queue: Weak<FrameQueue> = Rc::downgrade(&self.queue);
        let frame = request_animation_frame(move |_timestamp| {
            if let Some(queue) = queue.upgrade() {
                queue.run();
            }
        });
        // the previous frame has fired but may still be on the stack when a
        // task reschedules, so it is kept until the next replacement
        let fired = self.queue.frame.replace(Some(frame));
        *self.queue.spent.borrow_mut() = fired;
    }
}
