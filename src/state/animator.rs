//! Persistent per-frame loop that drives the map's drift.
//!
//! The loop owns its pending frame request. `start` is a no-op while the loop
//! is already running, `stop` cancels the outstanding request, and dropping
//! the loop stops it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Source of frame callbacks. `schedule` must not invoke `tick` synchronously.
pub trait FrameScheduler {
    fn schedule(&mut self, tick: &Rc<dyn Fn()>) -> Option<i32>;
    fn cancel(&mut self, id: i32);
}

/// `requestAnimationFrame` on the browser window.
pub struct RafScheduler {
    window: web_sys::Window,
    callback: Option<Closure<dyn FnMut()>>,
}

impl RafScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&mut self, tick: &Rc<dyn Fn()>) -> Option<i32> {
        let callback = self.callback.get_or_insert_with(|| {
            let tick = tick.clone();
            Closure::wrap(Box::new(move || tick()) as Box<dyn FnMut()>)
        });
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel(&mut self, id: i32) {
        let _ = self.window.cancel_animation_frame(id);
    }
}

struct LoopState<S> {
    scheduler: S,
    pending: Option<i32>,
    running: bool,
    frame: Box<dyn FnMut()>,
    tick: Option<Rc<dyn Fn()>>,
}

impl<S: FrameScheduler> LoopState<S> {
    fn schedule_next(&mut self) {
        if let Some(tick) = self.tick.clone() {
            self.pending = self.scheduler.schedule(&tick);
            if self.pending.is_none() {
                log::warn!("frame request refused, animation loop halted");
                self.running = false;
            }
        }
    }
}

pub struct AnimationLoop<S: FrameScheduler + 'static> {
    shared: Rc<RefCell<LoopState<S>>>,
}

impl<S: FrameScheduler + 'static> AnimationLoop<S> {
    pub fn new(scheduler: S, frame: impl FnMut() + 'static) -> Self {
        let shared = Rc::new(RefCell::new(LoopState {
            scheduler,
            pending: None,
            running: false,
            frame: Box::new(frame),
            tick: None,
        }));
        let weak: Weak<RefCell<LoopState<S>>> = Rc::downgrade(&shared);
        let tick: Rc<dyn Fn()> = Rc::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let mut st = shared.borrow_mut();
            st.pending = None;
            if !st.running {
                return;
            }
            (st.frame)();
            st.schedule_next();
        });
        shared.borrow_mut().tick = Some(tick);
        Self { shared }
    }

    pub fn start(&self) {
        let mut st = self.shared.borrow_mut();
        if st.running {
            return;
        }
        st.running = true;
        if st.pending.is_none() {
            st.schedule_next();
        }
    }

    pub fn stop(&self) {
        let mut st = self.shared.borrow_mut();
        st.running = false;
        if let Some(id) = st.pending.take() {
            st.scheduler.cancel(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().running
    }

    pub fn pending_frames(&self) -> usize {
        usize::from(self.shared.borrow().pending.is_some())
    }
}

impl<S: FrameScheduler + 'static> Drop for AnimationLoop<S> {
    fn drop(&mut self) {
        self.stop();
        // break the tick -> scheduler callback -> tick chain
        if let Ok(mut st) = self.shared.try_borrow_mut() {
            st.tick = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Queues requested frames until the test flushes them.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        queue: Rc<RefCell<Vec<(i32, Rc<dyn Fn()>)>>>,
        next_id: Rc<Cell<i32>>,
        cancelled: Rc<Cell<usize>>,
    }

    impl ManualScheduler {
        fn queued(&self) -> usize {
            self.queue.borrow().len()
        }

        fn run_frame(&self) {
            let batch: Vec<_> = self.queue.borrow_mut().drain(..).collect();
            for (_, tick) in batch {
                tick();
            }
        }
    }

    impl FrameScheduler for ManualScheduler {
        fn schedule(&mut self, tick: &Rc<dyn Fn()>) -> Option<i32> {
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            self.queue.borrow_mut().push((id, tick.clone()));
            Some(id)
        }

        fn cancel(&mut self, id: i32) {
            self.queue.borrow_mut().retain(|(queued, _)| *queued != id);
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }

    fn counting_loop(sched: &ManualScheduler) -> (AnimationLoop<ManualScheduler>, Rc<Cell<u32>>) {
        let frames = Rc::new(Cell::new(0));
        let counter = frames.clone();
        let lp = AnimationLoop::new(sched.clone(), move || counter.set(counter.get() + 1));
        (lp, frames)
    }

    #[test]
    fn runs_one_frame_per_tick_and_reschedules() {
        let sched = ManualScheduler::default();
        let (lp, frames) = counting_loop(&sched);
        lp.start();
        assert_eq!(sched.queued(), 1);
        for _ in 0..3 {
            sched.run_frame();
        }
        assert_eq!(frames.get(), 3);
        assert_eq!(sched.queued(), 1);
        assert_eq!(lp.pending_frames(), 1);
    }

    #[test]
    fn double_start_does_not_double_schedule() {
        let sched = ManualScheduler::default();
        let (lp, frames) = counting_loop(&sched);
        lp.start();
        lp.start();
        lp.start();
        assert_eq!(sched.queued(), 1);
        sched.run_frame();
        assert_eq!(frames.get(), 1);
        assert_eq!(sched.queued(), 1);
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let sched = ManualScheduler::default();
        let (lp, frames) = counting_loop(&sched);
        lp.start();
        sched.run_frame();
        lp.stop();
        assert_eq!(lp.pending_frames(), 0);
        assert_eq!(sched.queued(), 0);
        assert_eq!(sched.cancelled.get(), 1);
        sched.run_frame();
        assert_eq!(frames.get(), 1);
        assert!(!lp.is_running());
    }

    #[test]
    fn restart_after_stop_resumes() {
        let sched = ManualScheduler::default();
        let (lp, frames) = counting_loop(&sched);
        lp.start();
        lp.stop();
        lp.start();
        assert_eq!(sched.queued(), 1);
        sched.run_frame();
        assert_eq!(frames.get(), 1);
    }

    #[test]
    fn dropping_the_loop_leaves_no_frames_behind() {
        let sched = ManualScheduler::default();
        let frames = {
            let (lp, frames) = counting_loop(&sched);
            lp.start();
            sched.run_frame();
            frames
        };
        assert_eq!(sched.queued(), 0);
        sched.run_frame();
        assert_eq!(frames.get(), 1);
    }

    #[test]
    fn stale_tick_after_drop_is_harmless() {
        let sched = ManualScheduler::default();
        let (lp, frames) = counting_loop(&sched);
        lp.start();
        let stale = sched.queue.borrow()[0].1.clone();
        drop(lp);
        stale();
        assert_eq!(frames.get(), 0);
    }
}
