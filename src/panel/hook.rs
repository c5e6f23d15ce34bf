//! Panic-hook filter that holds back a worker's panic report.
//!
//! The default hook prints as soon as a thread panics, which would land on
//! top of a live panel. A thread running under [`run_held`] has its reports
//! collected instead, so they can be printed once the panel is gone. Other
//! threads keep the previously installed hook.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::thread;

static INSTALL: Once = Once::new();

thread_local! {
    static HELD: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// A panic caught by [`run_held`], with the report the hook would have printed.
pub(crate) struct HeldPanic {
    pub(crate) payload: Box<dyn Any + Send>,
    pub(crate) reports: Vec<String>,
}

fn install() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let held = HELD.with(|slot| match slot.try_borrow_mut() {
                Ok(mut slot) => match slot.as_mut() {
                    Some(reports) => {
                        let name = thread::current().name().unwrap_or("<unnamed>").to_string();
                        reports.push(format!("thread '{name}' {info}"));
                        true
                    }
                    None => false,
                },
                Err(_) => false,
            });
            if !held {
                previous(info);
            }
        }));
    });
}

/// Run `task`, catching a panic and keeping its hook report.
pub(crate) fn run_held<T>(task: impl FnOnce() -> T) -> Result<T, HeldPanic> {
    install();
    HELD.with(|slot| *slot.borrow_mut() = Some(Vec::new()));
    let result = panic::catch_unwind(AssertUnwindSafe(task));
    let reports = HELD.with(|slot| slot.borrow_mut().take()).unwrap_or_default();
    result.map_err(|payload| HeldPanic { payload, reports })
}
