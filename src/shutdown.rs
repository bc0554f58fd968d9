// Graceful shutdown: signal trapping and draining of in-flight lead mail

use anyhow::Result;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared shutdown state across the server
#[derive(Clone, Debug)]
pub struct ShutdownState {
    shutdown_requested: Arc<AtomicBool>,
    /// Lead notifications handed to the blocking pool but not yet finished
    pending_deliveries: Arc<AtomicUsize>,
}

/// Marks one notification dispatch as in flight until dropped
#[derive(Debug)]
pub struct DeliveryGuard {
    pending: Arc<AtomicUsize>,
}

impl Drop for DeliveryGuard {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ShutdownState {
    pub fn new() -> Self {
        Self {
            shutdown_requested: Arc::new(AtomicBool::new(false)),
            pending_deliveries: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        log::info!("Shutdown requested");
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    pub fn begin_delivery(&self) -> DeliveryGuard {
        self.pending_deliveries.fetch_add(1, Ordering::SeqCst);
        DeliveryGuard {
            pending: Arc::clone(&self.pending_deliveries),
        }
    }

    pub fn pending_deliveries(&self) -> usize {
        self.pending_deliveries.load(Ordering::SeqCst)
    }

    /// Wait until all in-flight deliveries finish or `timeout` passes.
    /// Returns the number still pending.
    pub async fn drain_deliveries(&self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        loop {
            let pending = self.pending_deliveries();
            if pending == 0 {
                return 0;
            }
            if Instant::now() >= deadline {
                log::warn!("Shutting down with {} lead notification(s) undelivered", pending);
                return pending;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }
}

impl Default for ShutdownState {
    fn default() -> Self {
        Self::new()
    }
}

/// Register signal handlers for graceful shutdown
/// This sets up handlers for SIGINT (Ctrl+C), SIGTERM, and SIGHUP
#[cfg(unix)]
pub fn register_signal_handlers(state: ShutdownState) -> Result<()> {
    use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::thread;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])
        .map_err(|e| anyhow::anyhow!("Failed to register signal handlers: {}", e))?;

    thread::spawn(move || {
        for signal in signals.forever() {
            let name = match signal {
                SIGINT => "SIGINT (Ctrl+C)",
                SIGTERM => "SIGTERM",
                SIGHUP => "SIGHUP",
                _ => continue,
            };
            log::info!("Received {}", name);
            state.request_shutdown();
        }
    });

    log::info!("Signal handlers registered (SIGINT, SIGTERM, SIGHUP)");
    Ok(())
}

/// Register signal handlers for Windows
#[cfg(windows)]
pub fn register_signal_handlers(state: ShutdownState) -> Result<()> {
    ctrlc::set_handler(move || {
        log::info!("Received Ctrl+C");
        state.request_shutdown();
    })
    .map_err(|e| anyhow::anyhow!("Failed to register Ctrl+C handler: {}", e))?;

    log::info!("Signal handler registered (Ctrl+C)");
    Ok(())
}
