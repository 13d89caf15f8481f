//! Cache line storage.
//!
//! `CacheStore` owns every line of the cache in one flat arena. Set `i`
//! occupies the window `i * E .. (i + 1) * E`; a line is addressed by its set
//! index and its way (position within that window). Ways carry identity only,
//! never recency order.
//!
//! # Recency
//!
//! Each line carries an age counter rather than the cache keeping a usage
//! stack. Every access to a set ages its lines by one and resets the touched
//! line to zero, so the largest age in a set is always its least recently
//! used line.
//!
//! When several lines share the largest age, the lowest way wins. Victim
//! selection scans left to right and only replaces its candidate on a
//! strictly greater age. Replays are compared line-for-line against reference
//! output, so this rule must not change.

/// One cache line. Holds no data, only residency and age.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,
    /// Tag of the resident block; meaningless when `valid` is false.
    pub tag: u64,
    /// Accesses to this set since the line was last touched (0 = most recent).
    pub recency: u64,
}

/// Fixed-shape storage for `S` sets of `E` lines.
#[derive(Clone, Debug)]
pub struct CacheStore {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
}

impl CacheStore {
    /// Allocates `num_sets * ways` lines, all invalid with recency 0.
    pub fn new(num_sets: usize, ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); num_sets * ways],
            num_sets,
            ways,
        }
    }

    /// Number of sets (`S`).
    #[inline(always)]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Lines per set (`E`).
    #[inline(always)]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// The lines of one set, in way order.
    ///
    /// # Panics
    ///
    /// If `set_index >= num_sets()`. Indices produced by the address layout
    /// the store was sized from are always in range.
    #[inline]
    pub fn set(&self, set_index: usize) -> &[CacheLine] {
        let base = set_index * self.ways;
        &self.lines[base..base + self.ways]
    }

    #[inline]
    fn set_mut(&mut self, set_index: usize) -> &mut [CacheLine] {
        let base = set_index * self.ways;
        &mut self.lines[base..base + self.ways]
    }

    /// A single line, if `set_index` and `way` are in range.
    pub fn line(&self, set_index: usize, way: usize) -> Option<&CacheLine> {
        if set_index >= self.num_sets || way >= self.ways {
            return None;
        }
        self.lines.get(set_index * self.ways + way)
    }

    /// Way of the valid line holding `tag`, if any.
    ///
    /// At most one valid line per set can match, so the first match is the
    /// only match.
    #[inline]
    pub fn find(&self, set_index: usize, tag: u64) -> Option<usize> {
        self.set(set_index)
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Whether `tag` is resident in the set.
    #[inline]
    pub fn contains(&self, set_index: usize, tag: u64) -> bool {
        self.find(set_index, tag).is_some()
    }

    /// Lowest-numbered invalid way, if the set has one.
    #[inline]
    pub fn find_free(&self, set_index: usize) -> Option<usize> {
        self.set(set_index).iter().position(|line| !line.valid)
    }

    /// Way with the strictly largest recency; ties go to the lowest way.
    pub fn find_lru(&self, set_index: usize) -> usize {
        let mut victim = 0;
        let mut oldest = 0;
        for (way, line) in self.set(set_index).iter().enumerate() {
            if line.recency > oldest {
                oldest = line.recency;
                victim = way;
            }
        }
        victim
    }

    /// Marks `way` most recently used: its recency becomes 0 and every other
    /// line in the set ages by one.
    pub fn touch(&mut self, set_index: usize, way: usize) {
        for (i, line) in self.set_mut(set_index).iter_mut().enumerate() {
            if i == way {
                line.recency = 0;
            } else {
                line.recency = line.recency.saturating_add(1);
            }
        }
    }

    /// Ages every line in the set by one.
    pub fn age(&mut self, set_index: usize) {
        for line in self.set_mut(set_index) {
            line.recency = line.recency.saturating_add(1);
        }
    }

    /// Places `tag` in `way` as a valid, most recently used line.
    pub fn install(&mut self, set_index: usize, way: usize, tag: u64) {
        self.set_mut(set_index)[way] = CacheLine {
            valid: true,
            tag,
            recency: 0,
        };
    }

    /// Number of valid lines in the set.
    pub fn occupancy(&self, set_index: usize) -> usize {
        self.set(set_index).iter().filter(|line| line.valid).count()
    }
}
