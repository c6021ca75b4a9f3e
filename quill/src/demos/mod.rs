//! Demo suites
//!
//! Each demo is isolated: a failure is reported to the output sink and the
//! suite continues with the next demo.

pub mod chat;
pub mod multimodal;
pub mod reasoning;
pub mod timed;

use crate::console::Console;

/// Report a demo result, writing the error without aborting the suite
pub fn report(console: &mut Console, demo: &str, result: anyhow::Result<()>) {
    if let Err(e) = result {
        console.line(format!("error in {demo}: {e}"));
    }
    console.blank();
}
