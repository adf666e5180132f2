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

    vf_headless::emulator::mod.rs

    Definition of the headless [Emulator], which ties the simulated machine
    to the dispatcher and runs the frame loop.
*/

pub mod machine;
pub mod script;

use std::{
    cell::RefCell,
    rc::Rc,
    sync::{Arc, RwLock},
    thread,
    time::Duration,
};

use anyhow::Result;
use vf_config::ConfigFileParams;
use vf_frontend_common::{
    trap::{trap_channel, CoreRequest, TrapReceiver},
    Dispatcher,
    DispatcherBuilder,
    ResourceStore,
    SurfaceRef,
    TickResult,
};

use crate::{
    console::{ConsoleSurface, ConsoleUi},
    sim_machine::{SimCore, SimMachine},
};
use machine::{machine_resources, machine_tables, SimMachineHandler, RES_WARP_MODE};
use script::ScriptFeeder;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u32,
    pub processed: usize,
    pub dropped: usize,
    pub script_sent: usize,
    pub exited: bool,
}

impl RunSummary {
    fn add(&mut self, result: TickResult) {
        self.processed += result.processed;
        self.dropped += result.dropped;
        self.exited |= result.exit;
    }
}

pub struct Emulator {
    pub config: ConfigFileParams,
    pub dispatcher: Dispatcher,
    pub machine: Rc<RefCell<SimMachine>>,
    traps: TrapReceiver,
    surface: Arc<RwLock<ConsoleSurface>>,
    tick: u32,
}

impl Emulator {
    pub fn new(config: ConfigFileParams) -> Result<Self> {
        let class = config.machine.class;
        let machine_name = config.machine.machine_name();
        log::info!("Emulator::new(): {} ({}) in {}", machine_name, class, config.emulator.basedir.display());

        let machine = Rc::new(RefCell::new(SimMachine::new(class)));
        let (trap_queue, traps) = trap_channel();
        let ui_defaults = config.ui.resource_defaults();

        let mut dispatcher = DispatcherBuilder::new()
            .with_core(Box::new(SimCore(machine.clone())))
            .with_ui(Box::new(ConsoleUi::new(config.headless.auto_confirm)))
            .with_trap_scheduler(Box::new(trap_queue))
            .with_resources(Box::new(machine_resources(class, &ui_defaults)))
            .with_machine_handler(Box::new(SimMachineHandler::new(machine.clone())))
            .with_tables(machine_tables(class))
            .with_machine(class, &machine_name)
            .with_base_dir(config.emulator.basedir.clone())
            .with_queue(config.ui.queue_capacity, config.ui.overflow_policy)
            .with_pause_poll(config.ui.pause_poll())
            .with_ui_defaults(ui_defaults)
            .build()?;

        machine.borrow_mut().set_sender(dispatcher.sender());

        let surface = Arc::new(RwLock::new(ConsoleSurface::new(&machine_name)));
        let surface_ref: SurfaceRef = surface.clone();
        dispatcher.register_surface(&surface_ref);

        for spec in &config.machine.attach {
            log::debug!("Emulator::new(): attaching {:?}", spec);
            dispatcher.enqueue(spec.command());
        }

        Ok(Self {
            config,
            dispatcher,
            machine,
            traps,
            surface,
            tick: 0,
        })
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// The number of status lines printed so far.
    pub fn status_lines(&self) -> usize {
        self.surface.read().map(|s| s.lines()).unwrap_or(0)
    }

    /// Run pending traps, as the emulation core would at the next instruction boundary.
    fn run_traps(&mut self) {
        for request in self.traps.drain() {
            match request {
                CoreRequest::Trap(trap) => self.dispatcher.run_trap(trap),
                CoreRequest::SuspendSpeedEval => log::debug!("run_traps(): speed evaluation suspended"),
            }
        }
    }

    /// Run one frame, then one dispatch tick.
    pub fn step(&mut self) -> TickResult {
        self.tick += 1;
        self.machine.borrow_mut().run_frame();
        self.run_traps();

        let result = self.dispatcher.dispatch_tick();
        let warp = self
            .dispatcher
            .resources()
            .get_int(RES_WARP_MODE)
            .is_ok_and(|v| v != 0);
        self.machine.borrow_mut().set_warp(warp);
        result
    }

    /// Run for the configured number of ticks, or until exit is requested. Scripted commands are
    /// fed in from a separate thread. Commands still pending when the ticks run out are handled
    /// before returning.
    pub fn run(&mut self) -> Result<RunSummary> {
        let tick_len = Duration::from_millis(self.config.headless.tick_ms);
        let script = std::mem::take(&mut self.config.headless.script);
        let feeder = ScriptFeeder::spawn(script, self.dispatcher.sender(), tick_len);

        let mut summary = RunSummary::default();
        while self.tick < self.config.headless.ticks && !summary.exited {
            summary.add(self.step());
            if !tick_len.is_zero() {
                thread::sleep(tick_len);
            }
        }

        if summary.exited {
            summary.script_sent = feeder.stop();
        }
        else {
            summary.script_sent = feeder.finish();
            summary.add(self.dispatcher.dispatch_tick());
            self.run_traps();
        }
        summary.ticks = self.tick;

        log::info!(
            "run(): {} ticks, {} commands handled, {} dropped",
            summary.ticks,
            summary.processed,
            summary.dropped
        );
        Ok(summary)
    }
}
