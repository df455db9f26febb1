//! Host test helpers: a recording sink and a minimal executor.

extern crate std;

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::vec::Vec;

use stick_core::{KeyCode, Modifiers};

use crate::output::{OutputError, PointerSink};

/// Everything a sink was asked to do, except pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Move(i32, i32),
    /// Vertical, horizontal.
    Scroll(i32, i32),
    Buttons([bool; 3]),
    Press(KeyCode),
    Release(KeyCode),
    Tap(KeyCode, Modifiers),
}

pub struct MockSink {
    events: Vec<Event>,
    pauses: Vec<u32>,
    fail_with: Option<OutputError>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            pauses: Vec::new(),
            fail_with: None,
        }
    }

    /// A sink whose every report fails.
    pub fn failing(err: OutputError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::new()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.clone()
    }

    pub fn moves(&self) -> Vec<(i32, i32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Move(dx, dy) => Some((*dx, *dy)),
                _ => None,
            })
            .collect()
    }

    pub fn pauses(&self) -> Vec<u32> {
        self.pauses.clone()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.pauses.clear();
    }

    fn record(&mut self, event: Event) -> core::future::Ready<Result<(), OutputError>> {
        let result = match self.fail_with {
            Some(err) => Err(err),
            None => {
                self.events.push(event);
                Ok(())
            }
        };
        core::future::ready(result)
    }
}

impl PointerSink for MockSink {
    fn move_pointer(&mut self, dx: i32, dy: i32) -> impl Future<Output = Result<(), OutputError>> {
        self.record(Event::Move(dx, dy))
    }

    fn scroll(
        &mut self,
        vertical: i32,
        horizontal: i32,
    ) -> impl Future<Output = Result<(), OutputError>> {
        self.record(Event::Scroll(vertical, horizontal))
    }

    fn set_buttons(&mut self, buttons: [bool; 3]) -> impl Future<Output = Result<(), OutputError>> {
        self.record(Event::Buttons(buttons))
    }

    fn press_key(&mut self, key: KeyCode) -> impl Future<Output = Result<(), OutputError>> {
        self.record(Event::Press(key))
    }

    fn release_key(&mut self, key: KeyCode) -> impl Future<Output = Result<(), OutputError>> {
        self.record(Event::Release(key))
    }

    fn tap_key(
        &mut self,
        key: KeyCode,
        mods: Modifiers,
    ) -> impl Future<Output = Result<(), OutputError>> {
        self.record(Event::Tap(key, mods))
    }

    fn settle(&mut self, ms: u32) -> impl Future<Output = ()> {
        self.pauses.push(ms);
        core::future::ready(())
    }

    fn is_ready(&self) -> bool {
        self.fail_with.is_none()
    }
}

/// Run a future to completion (simple blocking executor).
pub fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {
                panic!("Mock future returned Pending unexpectedly");
            }
        }
    }
}
