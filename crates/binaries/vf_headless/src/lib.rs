/*
    ViceFront

    Copyright 2022-2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    vf_headless::lib.rs
*/

//! ViceFront headless front-end main library component.
//!
//! Runs the status and dispatch core against a simulated machine, printing every status update.
//! Commands come from the `[headless] script` table of the configuration file.

#![forbid(unsafe_code)]

pub mod console;
pub mod emulator;
pub mod sim_machine;

use anyhow::Context;

use crate::emulator::Emulator;

pub const DEFAULT_CONFIG_FILE: &str = "./vicefront.toml";

pub fn run() -> anyhow::Result<()> {
    // Resolve the configuration first; the log level comes from it.
    let config = vf_config::read_config_file(DEFAULT_CONFIG_FILE).context("Failed to read configuration")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.emulator.log_level)).init();

    let mut emulator = Emulator::new(config)?;
    let summary = emulator.run()?;

    println!(
        "Ran {} ticks: {} commands handled ({} scripted), {} dropped{}",
        summary.ticks,
        summary.processed,
        summary.script_sent,
        summary.dropped,
        if summary.exited { ", exited" } else { "" }
    );
    Ok(())
}
