//! Mock socket and protocol driver for lifecycle tests.
//!
//! `MockSocket` scripts reservation failures and records every primitive
//! call in a shared event log; it panics on double release so resource
//! pairing bugs fail loudly. `MockDriver` stands in for the protocol
//! driver. Teardown-ordering events capture whether the removal guard was
//! already set when they happened.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use pccard_api::{
    CardSocket, ConfigRequest, DriverError, InterruptHandler, IoPortRange, IoRequest, IrqLine,
    IrqRequest, IrqStatus, MmioRegion, WindowHandle, WindowRequest,
};

use crate::driver::{PeriodicTimer, TokenRingDriver};
use crate::state::AdapterState;

/// One recorded socket or driver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RequestIo(u16),
    RequestIrq,
    RequestWindow { size: u64 },
    MapMemPage { window: u8, card_offset: u32, page: u8 },
    RequestConfiguration { index: u8 },
    MapMmio { base: u64 },
    UnmapMmio { base: u64, removing: bool },
    ReleaseWindow { window: u8, removing: bool },
    Disable { removing: bool },
    IoWrite { port: u16, value: u8 },
    Probe,
    Reprobe,
    Interrupt(u8),
    Unregister { removing: bool },
    TimerCancelled { removing: bool },
    SetScheduling(bool),
}

/// Event log shared between mock socket, mock driver, and test body.
#[derive(Clone, Default)]
pub struct SharedLog(Arc<Mutex<Vec<Event>>>);

impl SharedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    /// Index of the first event matching `pred`, panicking if absent.
    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events()
            .iter()
            .position(pred)
            .expect("expected event not recorded")
    }
}

/// Outstanding reservations tracked for balance checking.
#[derive(Default)]
struct Outstanding {
    io: bool,
    irq: bool,
    config: bool,
    windows: Vec<u8>,
    mapped: Vec<u64>,
}

/// Scriptable mock of the per-slot socket services.
pub struct MockSocket {
    log: SharedLog,
    fail_io_bases: Mutex<Vec<u16>>,
    fail_irq: AtomicBool,
    fail_window_at: Mutex<Option<usize>>,
    fail_map_page: AtomicBool,
    fail_configuration: AtomicBool,
    irq_line: u8,
    window_requests: Mutex<usize>,
    next_window: Mutex<u8>,
    handler: Mutex<Option<Arc<dyn InterruptHandler>>>,
    outstanding: Mutex<Outstanding>,
    adapter: Mutex<Option<Arc<AdapterState>>>,
}

/// Host-physical base assigned to the first mock window.
const WINDOW_BASE: u64 = 0x5000_0000;
/// Offset between consecutive mock window bases.
const WINDOW_STRIDE: u64 = 0x10_0000;
/// High-half offset standing in for the host mapping of a physical range.
const VIRT_OFFSET: u64 = 0xffff_8000_0000_0000;

impl MockSocket {
    pub fn new(log: SharedLog) -> Self {
        Self {
            log,
            fail_io_bases: Mutex::new(Vec::new()),
            fail_irq: AtomicBool::new(false),
            fail_window_at: Mutex::new(None),
            fail_map_page: AtomicBool::new(false),
            fail_configuration: AtomicBool::new(false),
            irq_line: 11,
            window_requests: Mutex::new(0),
            next_window: Mutex::new(0),
            handler: Mutex::new(None),
            outstanding: Mutex::new(Outstanding::default()),
            adapter: Mutex::new(None),
        }
    }

    /// Scripts contention for I/O requests at `base`.
    pub fn fail_io_at(&self, base: u16) {
        self.fail_io_bases.lock().unwrap().push(base);
    }

    pub fn fail_irq(&self) {
        self.fail_irq.store(true, Ordering::Relaxed);
    }

    /// Scripts failure of the `n`-th window request (0-based).
    pub fn fail_window_request(&self, n: usize) {
        *self.fail_window_at.lock().unwrap() = Some(n);
    }

    pub fn fail_map_page(&self) {
        self.fail_map_page.store(true, Ordering::Relaxed);
    }

    pub fn fail_configuration(&self) {
        self.fail_configuration.store(true, Ordering::Relaxed);
    }

    /// Binds the adapter whose removal guard teardown events observe.
    pub fn observe_guard(&self, adapter: Arc<AdapterState>) {
        *self.adapter.lock().unwrap() = Some(adapter);
    }

    /// Delivers an interrupt to the registered handler.
    pub fn raise_irq(&self) -> IrqStatus {
        let handler = self.handler.lock().unwrap().clone();
        match handler {
            Some(handler) => handler.handle_interrupt(IrqLine(self.irq_line)),
            None => IrqStatus::NotHandled,
        }
    }

    /// Panics if any reservation is still outstanding.
    pub fn assert_balanced(&self) {
        let outstanding = self.outstanding.lock().unwrap();
        assert!(!outstanding.io, "I/O range still reserved");
        assert!(!outstanding.irq, "IRQ still reserved");
        assert!(!outstanding.config, "configuration still enabled");
        assert!(
            outstanding.windows.is_empty(),
            "windows still reserved: {:?}",
            outstanding.windows
        );
        assert!(
            outstanding.mapped.is_empty(),
            "mappings still live: {:x?}",
            outstanding.mapped
        );
        assert!(
            self.handler.lock().unwrap().is_none(),
            "interrupt handler still bound"
        );
    }

    fn removing(&self) -> bool {
        self.adapter
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|a| a.is_removing())
    }
}

impl CardSocket for MockSocket {
    fn request_io(&self, req: &IoRequest) -> Result<IoPortRange, DriverError> {
        self.log.push(Event::RequestIo(req.base));
        if self.fail_io_bases.lock().unwrap().contains(&req.base) {
            return Err(DriverError::ResourceUnavailable);
        }
        self.outstanding.lock().unwrap().io = true;
        Ok(IoPortRange {
            base: req.base,
            len: req.len,
        })
    }

    fn request_irq(
        &self,
        _req: &IrqRequest,
        handler: Arc<dyn InterruptHandler>,
    ) -> Result<IrqLine, DriverError> {
        self.log.push(Event::RequestIrq);
        if self.fail_irq.load(Ordering::Relaxed) {
            return Err(DriverError::ResourceUnavailable);
        }
        *self.handler.lock().unwrap() = Some(handler);
        self.outstanding.lock().unwrap().irq = true;
        Ok(IrqLine(self.irq_line))
    }

    fn request_window(&self, req: &WindowRequest) -> Result<WindowHandle, DriverError> {
        self.log.push(Event::RequestWindow { size: req.size });
        let mut count = self.window_requests.lock().unwrap();
        let this = *count;
        *count += 1;
        if (*self.fail_window_at.lock().unwrap()).is_some_and(|n| n == this) {
            return Err(DriverError::ResourceUnavailable);
        }
        let mut next = self.next_window.lock().unwrap();
        let index = *next;
        *next += 1;
        self.outstanding.lock().unwrap().windows.push(index);
        Ok(WindowHandle {
            index,
            base: WINDOW_BASE + u64::from(index) * WINDOW_STRIDE,
            size: req.size,
        })
    }

    fn map_mem_page(
        &self,
        window: &WindowHandle,
        card_offset: u32,
        page: u8,
    ) -> Result<(), DriverError> {
        self.log.push(Event::MapMemPage {
            window: window.index,
            card_offset,
            page,
        });
        if self.fail_map_page.load(Ordering::Relaxed) {
            return Err(DriverError::ResourceUnavailable);
        }
        Ok(())
    }

    fn request_configuration(&self, req: &ConfigRequest) -> Result<(), DriverError> {
        self.log.push(Event::RequestConfiguration { index: req.index });
        if self.fail_configuration.load(Ordering::Relaxed) {
            return Err(DriverError::ResourceUnavailable);
        }
        self.outstanding.lock().unwrap().config = true;
        Ok(())
    }

    fn map_mmio(&self, base: u64, size: u64) -> Result<MmioRegion, DriverError> {
        self.log.push(Event::MapMmio { base });
        let virt = VIRT_OFFSET | base;
        self.outstanding.lock().unwrap().mapped.push(virt);
        Ok(MmioRegion { base: virt, size })
    }

    fn unmap_mmio(&self, region: MmioRegion) {
        self.log.push(Event::UnmapMmio {
            base: region.base,
            removing: self.removing(),
        });
        let mut outstanding = self.outstanding.lock().unwrap();
        let pos = outstanding
            .mapped
            .iter()
            .position(|&m| m == region.base)
            .expect("unmap of region that is not mapped");
        outstanding.mapped.remove(pos);
    }

    fn release_window(&self, window: WindowHandle) {
        self.log.push(Event::ReleaseWindow {
            window: window.index,
            removing: self.removing(),
        });
        let mut outstanding = self.outstanding.lock().unwrap();
        let pos = outstanding
            .windows
            .iter()
            .position(|&w| w == window.index)
            .expect("release of window that is not reserved");
        outstanding.windows.remove(pos);
    }

    fn disable(&self) {
        self.log.push(Event::Disable {
            removing: self.removing(),
        });
        let mut outstanding = self.outstanding.lock().unwrap();
        outstanding.io = false;
        outstanding.irq = false;
        outstanding.config = false;
        outstanding.windows.clear();
        drop(outstanding);
        // No delivery after the line is gone.
        *self.handler.lock().unwrap() = None;
    }

    fn write_io(&self, port: u16, value: u8) {
        self.log.push(Event::IoWrite { port, value });
    }
}

/// Timer installed by the mock driver during probe.
struct MockTimer {
    log: SharedLog,
    adapter: Arc<AdapterState>,
}

impl PeriodicTimer for MockTimer {
    fn cancel_sync(&mut self) {
        self.log.push(Event::TimerCancelled {
            removing: self.adapter.is_removing(),
        });
    }
}

/// Scriptable mock of the external protocol driver.
pub struct MockDriver {
    log: SharedLog,
    fail_probe: AtomicBool,
    open: AtomicBool,
}

impl MockDriver {
    pub fn new(log: SharedLog) -> Self {
        Self {
            log,
            fail_probe: AtomicBool::new(false),
            open: AtomicBool::new(false),
        }
    }

    pub fn fail_probe(&self) {
        self.fail_probe.store(true, Ordering::Relaxed);
    }

    pub fn set_open(&self, open: bool) {
        self.open.store(open, Ordering::Relaxed);
    }
}

impl TokenRingDriver for MockDriver {
    fn probe_device(&self, adapter: &Arc<AdapterState>) -> Result<String, DriverError> {
        self.log.push(Event::Probe);
        if self.fail_probe.load(Ordering::Relaxed) {
            return Err(DriverError::ProbeFailed);
        }
        adapter.set_timer(Box::new(MockTimer {
            log: self.log.clone(),
            adapter: Arc::clone(adapter),
        }));
        Ok("tr0".to_string())
    }

    fn probe(&self, _adapter: &AdapterState) -> Result<(), DriverError> {
        self.log.push(Event::Reprobe);
        Ok(())
    }

    fn handle_interrupt(&self, line: IrqLine, _adapter: &AdapterState) -> IrqStatus {
        self.log.push(Event::Interrupt(line.0));
        IrqStatus::Handled
    }

    fn unregister(&self, adapter: &AdapterState) {
        self.log.push(Event::Unregister {
            removing: adapter.is_removing(),
        });
    }

    fn is_open(&self, _adapter: &AdapterState) -> bool {
        self.open.load(Ordering::Relaxed)
    }

    fn set_scheduling(&self, _adapter: &AdapterState, active: bool) {
        self.log.push(Event::SetScheduling(active));
    }
}
