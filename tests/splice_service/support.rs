//! Shared fixtures for the splice service tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use splice_store::{
    Cable, InMemoryStore, Mode, NewCable, NewCircuit, Partitions, ServiceConfig, SpliceService,
};

/// Route service logs through the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// In-memory service whose save clock moves forward one second per save,
/// so `created_at` ordering always matches creation order.
pub fn service() -> SpliceService<InMemoryStore> {
    service_with(ServiceConfig::default())
}

pub fn service_with(config: ServiceConfig) -> SpliceService<InMemoryStore> {
    init_tracing();
    let tick = Arc::new(AtomicI64::new(0));
    SpliceService::new(Partitions::in_memory(), config).with_clock(move || {
        let n = tick.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(1_700_000_000 + n, 0).unwrap()
    })
}

pub fn trunk<S: splice_store::RecordStore>(
    service: &SpliceService<S>,
    name: &str,
    mode: Mode,
) -> Cable {
    service
        .create_cable(NewCable::new(name, "trunk"), mode)
        .unwrap()
}

pub fn circuit_at(cable_id: &str, position: i64) -> NewCircuit {
    let fiber = position.max(1) as u32;
    NewCircuit::new(cable_id, position, fiber, fiber)
}
