use rand::Rng;
use rand::seq::SliceRandom;

/// Reusable pool of population indices for donor selection.
///
/// Owns one permutation buffer over `[0, npop)`. Before every individual
/// update the buffer is reshuffled in full and the first `count` entries are
/// consumed as donor indices. With `exclude_self` the parent's own index is
/// skipped during the scan; otherwise a donor may coincide with the parent.
pub(crate) struct DonorPool {
    indices: Vec<usize>,
    picked: Vec<usize>,
    exclude_self: bool,
}

impl DonorPool {
    pub(crate) fn new(npop: usize, exclude_self: bool) -> Self {
        Self { indices: (0..npop).collect(), picked: Vec::with_capacity(8), exclude_self }
    }

    /// Reshuffle the buffer and pick `count` donors for the update of
    /// individual `target`. Pool feasibility is validated up front by the
    /// driver, so the scan always yields `count` entries.
    pub(crate) fn pick<R: Rng + ?Sized>(
        &mut self,
        target: usize,
        count: usize,
        rng: &mut R,
    ) -> &[usize] {
        self.indices.shuffle(rng);
        self.picked.clear();
        for &ix in &self.indices {
            if self.exclude_self && ix == target {
                continue;
            }
            self.picked.push(ix);
            if self.picked.len() == count {
                break;
            }
        }
        &self.picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pick_is_prefix_of_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = DonorPool::new(10, false);
        for target in 0..10 {
            let picked = pool.pick(target, 5, &mut rng).to_vec();
            assert_eq!(picked.len(), 5);
            let mut sorted = picked.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 5, "donors must be distinct: {:?}", picked);
            assert!(picked.iter().all(|&ix| ix < 10));
        }
    }

    #[test]
    fn test_exclude_self_skips_target() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut pool = DonorPool::new(6, true);
        for _ in 0..200 {
            for target in 0..6 {
                let picked = pool.pick(target, 5, &mut rng);
                assert!(!picked.contains(&target));
                assert_eq!(picked.len(), 5);
            }
        }
    }

    #[test]
    fn test_self_donation_allowed_by_default() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut pool = DonorPool::new(3, false);
        let mut saw_self = false;
        for _ in 0..100 {
            if pool.pick(0, 3, &mut rng).contains(&0) {
                saw_self = true;
                break;
            }
        }
        // With N=3 and k=3, the parent index is always in the picked prefix.
        assert!(saw_self);
    }
}
