use rand::{SeedableRng, rngs::StdRng, seq::index::sample};

/// Chooses which registered nodes hold a new block.
pub trait SelectionPolicy: Send {
    /// Returns `count` distinct ids out of `candidates`, primary first.
    /// `count` must not exceed `candidates.len()`.
    fn select(&mut self, candidates: &[u64], count: usize) -> Vec<u64>;
}

/// Uniform choice without replacement from an injected rng.
pub struct RandomSelectionPolicy {
    rng: StdRng,
}

impl RandomSelectionPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl SelectionPolicy for RandomSelectionPolicy {
    fn select(&mut self, candidates: &[u64], count: usize) -> Vec<u64> {
        let count = count.min(candidates.len());
        sample(&mut self.rng, candidates.len(), count)
            .into_iter()
            .map(|idx| candidates[idx])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn never_repeats_a_node() {
        let mut policy = RandomSelectionPolicy::new(Some(7));
        let candidates: Vec<u64> = (0..6).collect();
        for count in 0..=candidates.len() {
            for _ in 0..50 {
                let chosen = policy.select(&candidates, count);
                assert_eq!(chosen.len(), count);
                let distinct: HashSet<_> = chosen.iter().collect();
                assert_eq!(distinct.len(), count);
                assert!(chosen.iter().all(|id| candidates.contains(id)));
            }
        }
    }

    #[test]
    fn same_seed_same_placement() {
        let candidates = [3, 5, 8, 13];
        let mut first = RandomSelectionPolicy::new(Some(42));
        let mut second = RandomSelectionPolicy::new(Some(42));
        for _ in 0..20 {
            assert_eq!(first.select(&candidates, 2), second.select(&candidates, 2));
        }
    }

    #[test]
    fn every_node_gets_to_be_primary() {
        let mut policy = RandomSelectionPolicy::new(Some(1));
        let candidates = [0, 1, 2];
        let primaries: HashSet<u64> = (0..200).map(|_| policy.select(&candidates, 2)[0]).collect();
        assert_eq!(primaries.len(), 3);
    }

    #[test]
    fn count_is_capped_by_candidates() {
        let mut policy = RandomSelectionPolicy::new(None);
        assert_eq!(policy.select(&[9], 3), vec![9]);
        assert!(policy.select(&[], 2).is_empty());
    }
}
