use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use busbench_core::bus::BusPort;
use busbench_core::config::{BenchConfig, ShaderConfig};
use busbench_core::shader::PeripheralProfile;
use busbench_core::signal::{SignalBit, SimTime};
use busbench_core::soc::Testbench;
use busbench_core::uart::SerialFrame;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// A UART testbench out of reset with RX idle high.
pub fn uart_bench() -> Testbench {
    init_tracing();
    let mut tb = Testbench::uart(&BenchConfig::default()).unwrap();
    tb.reset(0x80).unwrap();
    tb
}

/// A shader testbench hosting `profile`, out of reset.
pub fn shader_bench(profile: PeripheralProfile) -> Testbench {
    init_tracing();
    let shader = ShaderConfig {
        profile,
        ..ShaderConfig::default()
    };
    let mut tb = Testbench::shader(&BenchConfig::default(), &shader).unwrap();
    tb.reset(0).unwrap();
    tb
}

/// Simulated time shared between a test and its wires.
#[derive(Clone, Debug, Default)]
pub struct VirtualClock(Rc<Cell<Duration>>);

impl SimTime for VirtualClock {
    fn wait(&mut self, duration: Duration) {
        self.0.set(self.0.get() + duration);
    }

    fn now(&self) -> Duration {
        self.0.get()
    }
}

/// A line replaying a fixed sequence of bit-period levels from time zero.
///
/// Levels past the end, and before `start`, read as idle (high).
pub struct Waveform {
    clock: VirtualClock,
    start: Duration,
    period: Duration,
    levels: Vec<bool>,
}

impl Waveform {
    /// The frame for `byte` starting at the clock's current time.
    pub fn frame(clock: &VirtualClock, byte: u8, period: Duration) -> Self {
        Self {
            clock: clock.clone(),
            start: clock.now(),
            period,
            levels: SerialFrame::new(byte).levels().collect(),
        }
    }

    /// Overrides the level of slot `slot` (0 is the start bit).
    pub fn with_level(mut self, slot: usize, level: bool) -> Self {
        self.levels[slot] = level;
        self
    }
}

impl SignalBit for Waveform {
    fn get(&self) -> bool {
        let now = self.clock.now();
        if now < self.start {
            return true;
        }
        let slot = ((now - self.start).as_nanos() / self.period.as_nanos()) as usize;
        self.levels.get(slot).copied().unwrap_or(true)
    }

    fn set(&self, _level: bool) {}
}

/// A line that records every level driven onto it, with the time.
pub struct Probe {
    clock: VirtualClock,
    level: Cell<bool>,
    driven: RefCell<Vec<(Duration, bool)>>,
}

impl Probe {
    pub fn new(clock: &VirtualClock) -> Self {
        Self {
            clock: clock.clone(),
            level: Cell::new(true),
            driven: RefCell::new(Vec::new()),
        }
    }

    /// Driven levels in order.
    pub fn levels(&self) -> Vec<bool> {
        self.driven.borrow().iter().map(|&(_, level)| level).collect()
    }

    /// Times at which levels were driven.
    pub fn times(&self) -> Vec<Duration> {
        self.driven.borrow().iter().map(|&(at, _)| at).collect()
    }
}

impl SignalBit for Probe {
    fn get(&self) -> bool {
        self.level.get()
    }

    fn set(&self, level: bool) {
        self.level.set(level);
        self.driven.borrow_mut().push((self.clock.now(), level));
    }
}

/// An RTS line whose level is a function of simulated time.
pub struct RtsScript {
    clock: VirtualClock,
    level_at: Box<dyn Fn(Duration) -> bool>,
}

impl RtsScript {
    pub fn new(clock: &VirtualClock, level_at: impl Fn(Duration) -> bool + 'static) -> Self {
        Self {
            clock: clock.clone(),
            level_at: Box::new(level_at),
        }
    }

    /// RTS stuck at `level`.
    pub fn constant(clock: &VirtualClock, level: bool) -> Self {
        Self::new(clock, move |_| level)
    }
}

impl SignalBit for RtsScript {
    fn get(&self) -> bool {
        (self.level_at)(self.clock.now())
    }

    fn set(&self, _level: bool) {}
}
