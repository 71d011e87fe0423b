//! Fixed-universe block allocator for the filesystem simulator.
//!
//! Sixty-four 512-byte blocks.  Allocation is first-fit and all-or-nothing:
//! either every requested block is reserved or the free set is untouched.

/// Simulated storage block size in bytes.
pub const BLOCK_SIZE: u64 = 512;
/// Total number of blocks in the simulated disk.
pub const TOTAL_BLOCKS: usize = 64;

/// Blocks needed to hold `size` bytes.
pub fn blocks_for(size: u64) -> usize {
    size.div_ceil(BLOCK_SIZE) as usize
}

/// Set of currently-used block indices over the `0..TOTAL_BLOCKS` universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAllocator {
    used: [bool; TOTAL_BLOCKS],
}

impl BlockAllocator {
    /// All blocks free.
    pub fn new() -> Self {
        Self {
            used: [false; TOTAL_BLOCKS],
        }
    }

    pub fn is_used(&self, index: usize) -> bool {
        index < TOTAL_BLOCKS && self.used[index]
    }

    pub fn used_count(&self) -> usize {
        self.used.iter().filter(|&&u| u).count()
    }

    pub fn free_count(&self) -> usize {
        TOTAL_BLOCKS - self.used_count()
    }

    /// Reserve the first-fit `count` free blocks and return their indices.
    /// Returns `None` (and reserves nothing) when fewer than `count` blocks
    /// are free.
    pub fn allocate(&mut self, count: usize) -> Option<Vec<usize>> {
        if count > self.free_count() {
            return None;
        }
        let mut picked = Vec::with_capacity(count);
        for (i, used) in self.used.iter_mut().enumerate() {
            if picked.len() == count {
                break;
            }
            if !*used {
                *used = true;
                picked.push(i);
            }
        }
        debug_assert_eq!(picked.len(), count);
        Some(picked)
    }

    /// Return blocks to the free set.
    pub fn release(&mut self, blocks: &[usize]) {
        for &b in blocks {
            if b < TOTAL_BLOCKS {
                self.used[b] = false;
            }
        }
    }

    /// Mark specific blocks as used.  Used only when seeding the initial
    /// disk layout.
    pub fn reserve(&mut self, blocks: &[usize]) {
        for &b in blocks {
            if b < TOTAL_BLOCKS {
                self.used[b] = true;
            }
        }
    }
}

impl Default for BlockAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_for_rounds_up() {
        assert_eq!(blocks_for(0), 0);
        assert_eq!(blocks_for(1), 1);
        assert_eq!(blocks_for(512), 1);
        assert_eq!(blocks_for(513), 2);
        assert_eq!(blocks_for(2048), 4);
    }

    #[test]
    fn allocate_is_first_fit() {
        let mut a = BlockAllocator::new();
        a.reserve(&[0, 2]);
        let got = a.allocate(3).unwrap();
        assert_eq!(got, vec![1, 3, 4]);
        assert_eq!(a.used_count(), 5);
    }

    #[test]
    fn allocate_is_all_or_nothing() {
        let mut a = BlockAllocator::new();
        let all: Vec<usize> = (0..TOTAL_BLOCKS - 2).collect();
        a.reserve(&all);
        let before = a.clone();
        assert!(a.allocate(3).is_none());
        assert_eq!(a, before);
        assert_eq!(a.allocate(2).unwrap().len(), 2);
        assert_eq!(a.free_count(), 0);
    }

    #[test]
    fn release_round_trips() {
        let mut a = BlockAllocator::new();
        let got = a.allocate(4).unwrap();
        a.release(&got);
        assert_eq!(a, BlockAllocator::new());
    }
}
