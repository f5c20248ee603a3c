//! Cache Simulator Tests.
//!
//! Verifies the per-access state machine: first-touch misses, hits, the
//! capacity/conflict split via the shadow cache, write-back counting, and the
//! counters it accumulates. Scenario tests are followed by property tests over
//! random traces.

use cachesim_core::config::{CacheConfig, ReplacementPolicy};
use cachesim_core::sim::{AccessRecord, CacheSimulator, Classification};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::harness::{classify, init_logging, loads, simulator};

use Classification::{Capacity, Compulsory, Conflict, Hit};

// ══════════════════════════════════════════════════════════
// 1. Basic classification
// ══════════════════════════════════════════════════════════

/// Two lines in different sets of a 1 KiB direct-mapped cache, then a re-read.
#[test]
fn distinct_sets_then_hit() {
    init_logging();
    let mut sim = simulator(1024, 1, 32, ReplacementPolicy::Fifo);
    assert_eq!(
        classify(&mut sim, &loads(&[0x0, 0x20, 0x0])),
        vec![Compulsory, Compulsory, Hit]
    );
}

/// Every byte of a line hits once the line is resident.
#[test]
fn same_line_different_offsets_hit() {
    let mut sim = simulator(1024, 1, 32, ReplacementPolicy::Fifo);
    assert_eq!(
        classify(&mut sim, &loads(&[0x40, 0x44, 0x5F])),
        vec![Compulsory, Hit, Hit]
    );
}

/// 0x0 and 0x400 share set 0 of a 1 KiB direct-mapped cache; the shadow can
/// hold both, so the re-read is a conflict miss.
#[test]
fn direct_mapped_ping_pong_is_conflict() {
    let mut sim = simulator(1024, 1, 32, ReplacementPolicy::Fifo);
    assert_eq!(
        classify(&mut sim, &loads(&[0x0, 0x400, 0x0, 0x400])),
        vec![Compulsory, Compulsory, Conflict, Conflict]
    );
    assert_eq!(sim.stats().conflict_misses, 2);
}

/// Three lines cycle through a two-line cache: the shadow loses them too.
#[test]
fn working_set_larger_than_cache_is_capacity() {
    let mut sim = simulator(64, 1, 32, ReplacementPolicy::Fifo);
    assert_eq!(
        classify(&mut sim, &loads(&[0x0, 0x20, 0x40, 0x0])),
        vec![Compulsory, Compulsory, Compulsory, Capacity]
    );
}

/// With one set the real cache and the shadow evolve identically.
#[test]
fn fully_associative_never_conflicts() {
    let mut sim = simulator(128, 4, 32, ReplacementPolicy::Fifo);
    let trace = loads(&[0x0, 0x20, 0x40, 0x60, 0x80, 0x0, 0x20, 0xA0, 0x40, 0x0]);
    let labels = classify(&mut sim, &trace);

    assert!(!labels.contains(&Conflict));
    assert_eq!(sim.stats().conflict_misses, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Replacement policies
// ══════════════════════════════════════════════════════════

// 128 bytes, 2-way, 32-byte lines: 2 sets. A, B, C all map to set 0.
const A: u32 = 0x0;
const B: u32 = 0x40;
const C: u32 = 0x80;

/// FIFO evicts A (installed first) even though A was just hit.
#[test]
fn fifo_replaces_oldest() {
    let mut sim = simulator(128, 2, 32, ReplacementPolicy::Fifo);
    assert_eq!(
        classify(&mut sim, &loads(&[A, B, A, C])),
        vec![Compulsory, Compulsory, Hit, Compulsory]
    );
    assert!(!sim.cache().contains(A));
    assert!(sim.cache().contains(B));
    assert!(sim.cache().contains(C));

    let outcome = sim.access(AccessRecord::load(A));
    assert_eq!(outcome.classification, Conflict);
    assert_eq!(outcome.way, 1);
}

/// LRU keeps A after the hit, so C replaces B in way 1.
#[test]
fn lru_replaces_least_recent() {
    let mut sim = simulator(128, 2, 32, ReplacementPolicy::Lru);
    let _ = classify(&mut sim, &loads(&[A, B, A]));

    let c = sim.access(AccessRecord::load(C));
    assert_eq!(c.classification, Compulsory);
    assert_eq!((c.set, c.way), (0, 1));
    assert!(sim.cache().contains(A));
    assert!(!sim.cache().contains(B));

    // B now evicts A (way 0), and the shadow still holds B.
    let b = sim.access(AccessRecord::load(B));
    assert_eq!(b.classification, Conflict);
    assert_eq!(b.way, 0);
}

// ══════════════════════════════════════════════════════════
// 3. Dirty lines and write-backs
// ══════════════════════════════════════════════════════════

/// Evicting a stored-to line costs one write-back; clean evictions cost none.
#[test]
fn dirty_eviction_writes_back() {
    let mut sim = simulator(1024, 1, 32, ReplacementPolicy::Fifo);

    let _ = sim.access(AccessRecord::store(0x0));
    let evict = sim.access(AccessRecord::load(0x400));
    assert!(evict.wrote_back);
    assert_eq!(sim.stats().write_backs, 1);

    // 0x400 was only loaded, so bringing 0x0 back is free.
    assert!(!sim.access(AccessRecord::load(0x0)).wrote_back);

    // A store hit dirties the resident line again.
    assert_eq!(sim.access(AccessRecord::store(0x0)).classification, Hit);
    assert!(sim.access(AccessRecord::load(0x400)).wrote_back);
    assert_eq!(sim.stats().write_backs, 2);
}

/// A store miss installs the line dirty.
#[test]
fn store_miss_installs_dirty() {
    let mut sim = simulator(1024, 1, 32, ReplacementPolicy::Fifo);
    let outcome = sim.access(AccessRecord::store(0x20));

    let line = sim.cache().line(outcome.set, outcome.way).unwrap();
    assert!(line.valid);
    assert!(line.dirty);
}

/// A compulsory miss into a full set still evicts, and still writes back.
#[test]
fn compulsory_miss_can_write_back() {
    let mut sim = simulator(1024, 1, 32, ReplacementPolicy::Fifo);
    let _ = sim.access(AccessRecord::store(0x0));
    let outcome = sim.access(AccessRecord::store(0x800));

    assert_eq!(outcome.classification, Compulsory);
    assert!(outcome.wrote_back);
}

// ══════════════════════════════════════════════════════════
// 4. Counters and construction
// ══════════════════════════════════════════════════════════

#[test]
fn stats_track_every_access() {
    let mut sim = simulator(1024, 1, 32, ReplacementPolicy::Fifo);
    let trace = [
        AccessRecord::load(0x0),
        AccessRecord::store(0x400),
        AccessRecord::load(0x0),
        AccessRecord::store(0x0),
    ];
    let _ = classify(&mut sim, &trace);
    let stats = sim.stats();

    assert_eq!(stats.accesses(), 4);
    assert_eq!((stats.loads, stats.stores), (2, 2));
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.compulsory_misses, 2);
    assert_eq!(stats.conflict_misses, 1);
    assert_eq!(stats.capacity_misses, 0);
    // Bringing 0x0 back evicted the dirty 0x400.
    assert_eq!(stats.write_backs, 1);
    assert_eq!(sim.distinct_lines(), 2);
}

#[test]
fn from_config_validates_geometry() {
    let mut config = CacheConfig::default();
    config.ways = 3;
    assert!(CacheSimulator::from_config(&config).is_err());

    config.ways = 2;
    config.policy = ReplacementPolicy::Lru;
    let sim = CacheSimulator::from_config(&config).unwrap();
    assert_eq!(sim.geometry().sets(), 512);
    assert_eq!(sim.policy(), ReplacementPolicy::Lru);
    assert_eq!(sim.shadow().capacity(), 1024);
}

#[test]
fn classification_labels() {
    assert_eq!(Hit.to_string(), "hit");
    assert_eq!(Compulsory.as_str(), "compulsory");
    assert_eq!(Capacity.as_str(), "capacity");
    assert_eq!(Conflict.as_str(), "conflict");
    assert!(!Hit.is_miss());
    assert!(Capacity.is_miss());
}

// ══════════════════════════════════════════════════════════
// 5. Properties
// ══════════════════════════════════════════════════════════

fn policy_strategy() -> impl Strategy<Value = ReplacementPolicy> {
    prop_oneof![Just(ReplacementPolicy::Fifo), Just(ReplacementPolicy::Lru)]
}

/// Traces over a small address range so lines are reused and sets collide.
fn trace_strategy() -> impl Strategy<Value = Vec<AccessRecord>> {
    prop::collection::vec(
        (any::<bool>(), 0u32..0x800).prop_map(|(store, address)| {
            if store {
                AccessRecord::store(address)
            } else {
                AccessRecord::load(address)
            }
        }),
        0..200,
    )
}

proptest! {
    #[test]
    fn counters_are_consistent(
        trace in trace_strategy(),
        ways_log in 0u32..3,
        policy in policy_strategy(),
    ) {
        let mut sim = simulator(256, 1 << ways_log, 32, policy);
        let labels = classify(&mut sim, &trace);
        let stats = sim.stats();

        prop_assert_eq!(stats.accesses(), trace.len() as u64);
        prop_assert_eq!(stats.hits + stats.misses, trace.len() as u64);
        prop_assert_eq!(
            stats.misses,
            stats.compulsory_misses + stats.capacity_misses + stats.conflict_misses
        );
        prop_assert_eq!(stats.compulsory_misses, sim.distinct_lines() as u64);
        prop_assert!(stats.write_backs <= stats.misses);
        prop_assert_eq!(labels.iter().filter(|c| c.is_miss()).count() as u64, stats.misses);
        prop_assert!(sim.cache().valid_lines() <= sim.geometry().total_lines());
    }

    #[test]
    fn first_touch_compulsory_and_repeat_hits(
        trace in trace_strategy(),
        policy in policy_strategy(),
    ) {
        let mut sim = simulator(256, 2, 32, policy);
        let mut seen = std::collections::HashSet::new();
        for record in trace {
            let label = sim.access(record).classification;
            let first = seen.insert(record.address >> 5);
            prop_assert_eq!(label == Compulsory, first);

            // Touching the same line again straight away always hits.
            prop_assert_eq!(sim.access(AccessRecord::load(record.address)).classification, Hit);
        }
    }

    #[test]
    fn fully_associative_has_no_conflicts(
        trace in trace_strategy(),
        policy in policy_strategy(),
    ) {
        let mut sim = simulator(256, 8, 32, policy);
        let _ = classify(&mut sim, &trace);
        prop_assert_eq!(sim.stats().conflict_misses, 0);
    }
}
