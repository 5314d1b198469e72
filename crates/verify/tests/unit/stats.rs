use busbench_core::stats::BusStats;

#[test]
fn transactions_include_timeouts() {
    let stats = BusStats {
        word_reads: 3,
        word_writes: 2,
        byte_reads: 1,
        byte_writes: 4,
        async_writes: 1,
        timeouts: 1,
        ..BusStats::default()
    };
    assert_eq!(stats.transactions(), 11);
}

#[test]
fn summary_lists_every_counter() {
    let stats = BusStats {
        cycles: 1234,
        byte_writes: 5,
        async_writes: 2,
        resets: 1,
        ..BusStats::default()
    };
    let text = stats.to_string();
    assert!(text.contains("BUS STATISTICS"));
    assert!(text.contains("sim_cycles             1234"));
    assert!(text.contains("byte.writes            5 (2 async)"));
    assert!(text.contains("resets                 1"));
}

#[test]
fn default_is_zeroed() {
    assert_eq!(BusStats::default().transactions(), 0);
}
