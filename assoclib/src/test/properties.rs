use proptest::prelude::*;
use crate::config::{CacheConfig, ReplacementPolicyConfig};
use crate::model::{CacheModel, Outcome};

fn policy(choice: usize) -> ReplacementPolicyConfig {
    match choice {
        0 => ReplacementPolicyConfig::LeastRecentlyUsed,
        1 => ReplacementPolicyConfig::FirstInFirstOut,
        _ => ReplacementPolicyConfig::Random,
    }
}

proptest! {
    #[test]
    fn every_access_is_a_hit_or_a_miss(
        addresses in proptest::collection::vec(0u64..(1 << 16), 0..300),
        choice in 0usize..3,
        ways_log in 0u32..4,
    ) {
        let config = CacheConfig::new(1024, 32, 1 << ways_log, policy(choice)).with_seed(7);
        let mut model = CacheModel::new(config).unwrap();
        let simulation = model.simulate(addresses.iter().copied());
        let stats = model.stats();
        prop_assert_eq!(stats.hits + stats.misses, addresses.len() as u64);
        prop_assert_eq!(simulation.records.len(), addresses.len());
        let misses = simulation.records.iter().filter(|r| r.outcome == Outcome::Miss).count() as u64;
        prop_assert_eq!(misses, stats.misses);
    }

    #[test]
    fn sets_never_exceed_their_ways(
        addresses in proptest::collection::vec(any::<u32>(), 1..300),
        choice in 0usize..3,
        ways_log in 0u32..4,
    ) {
        let ways = 1u64 << ways_log;
        let config = CacheConfig::new(512, 16, ways, policy(choice)).with_seed(11);
        let mut model = CacheModel::new(config).unwrap();
        for address in addresses {
            let record = model.access(address as u64).unwrap();
            prop_assert!(record.outcome == Outcome::Miss || record.evicted.is_none());
            for set in model.snapshot() {
                prop_assert!(set.tags.len() as u64 <= ways);
                let mut unique = set.tags.clone();
                unique.sort_unstable();
                unique.dedup();
                prop_assert_eq!(unique.len(), set.tags.len());
            }
        }
    }
}
