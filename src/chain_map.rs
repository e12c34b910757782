//! ChainMap: byte-keyed hash map over explicit bucket chains in a slotmap
//! arena, with load-factor-driven growth.

use crate::hash::rolling;
use core::mem;
use slotmap::{DefaultKey, SlotMap};

/// Bucket count a map starts with unless configured otherwise.
pub const DEFAULT_BUCKETS: usize = 32;
/// Entries-per-bucket ratio at which the bucket array grows.
pub const DEFAULT_MAX_LOAD: usize = 2;
/// Multiplier applied to the bucket count on growth.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;
/// Bucket count the map never grows beyond.
pub const DEFAULT_MAX_BUCKETS: usize = usize::MAX;

/// Construction-time growth policy for a [`ChainMap`].
///
/// `Default` yields the standard geometry (32 buckets, grow at 2 entries
/// per bucket, double on growth, no cap); individual fields can be
/// overridden with struct-update syntax.
#[derive(Clone, Copy, Debug)]
pub struct MapConfig {
    /// Length of the initial bucket array. Must be positive.
    pub initial_buckets: usize,
    /// Load factor (entries / buckets) that triggers growth. Must be positive.
    pub max_load: usize,
    /// Bucket-count multiplier on growth. Must be at least 2.
    pub growth_factor: usize,
    /// Hard ceiling on the bucket count; growth past it is skipped.
    pub max_buckets: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_BUCKETS,
            max_load: DEFAULT_MAX_LOAD,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            max_buckets: DEFAULT_MAX_BUCKETS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// Keys are non-empty byte strings; the empty key is rejected outright
    /// rather than absorbed.
    EmptyKey,
}

#[derive(Debug)]
struct Entry<V> {
    key: Box<[u8]>,
    hash: u64, // cached at insert; growth re-buckets from this, never from key bytes
    value: V,
    next: Option<DefaultKey>, // same-bucket successor
}

/// Hash map from byte-string keys to owned `V` values, built the classic
/// way: an array of bucket heads, each the start of a singly-linked chain
/// of entries whose keys hash to that slot.
///
/// Entries live in a slotmap arena and chains link them by arena key, so a
/// stale link is unrepresentable and an entry's key and value drop together
/// exactly when it leaves the arena. The bucket index is
/// `rolling(key) % bucket_count`; when the load factor reaches the
/// configured maximum after a fresh insert, the bucket array is rebuilt at
/// `growth_factor` times its size and every entry is relinked from its
/// cached hash. Values never move or clone during growth.
///
/// Key parameters are `impl AsRef<[u8]>`, so `&str`, `String`, and byte
/// slices all work; the map stores its own copy of the key bytes.
pub struct ChainMap<V> {
    buckets: Vec<Option<DefaultKey>>, // chain heads, one per bucket
    slots: SlotMap<DefaultKey, Entry<V>>, // entry storage using generational keys
    config: MapConfig,
}

impl<V> ChainMap<V> {
    /// Empty map with the default geometry ([`DEFAULT_BUCKETS`] buckets).
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    /// Empty map with `initial_buckets` buckets and default growth policy.
    ///
    /// Panics if `initial_buckets` is zero; a map with no buckets is a
    /// contract violation, not a runtime condition.
    pub fn with_buckets(initial_buckets: usize) -> Self {
        Self::with_config(MapConfig {
            initial_buckets,
            ..MapConfig::default()
        })
    }

    /// Empty map with an explicit growth policy.
    ///
    /// Panics on degenerate configurations: zero buckets, a zero load
    /// factor, or a growth factor that would not actually grow the table.
    pub fn with_config(config: MapConfig) -> Self {
        assert!(config.initial_buckets > 0, "initial_buckets must be positive");
        assert!(config.max_load > 0, "max_load must be positive");
        assert!(config.growth_factor >= 2, "growth_factor must be at least 2");
        Self {
            buckets: vec![None; config.initial_buckets],
            slots: SlotMap::with_key(),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    /// Current length of the bucket array. Starts at the configured size
    /// and only ever grows.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Walks one bucket's chain for an exact key match, comparing the
    /// cached hash before the key bytes.
    fn find_entry(&self, key: &[u8], hash: u64) -> Option<DefaultKey> {
        let mut cursor = self.buckets[self.bucket_of(hash)];
        while let Some(k) = cursor {
            let entry = self
                .slots
                .get(k)
                .expect("chain links only reference live entries");
            if entry.hash == hash && &*entry.key == key {
                return Some(k);
            }
            cursor = entry.next;
        }
        None
    }

    /// Inserts `value` under `key`, or replaces the value of an existing
    /// entry with an equal key.
    ///
    /// A fresh insert returns `Ok(None)` and counts toward the load factor;
    /// replacing returns `Ok(Some(old))`, handing the superseded value back
    /// to the caller (discarding the result drops it on the spot). The
    /// empty key is rejected with [`InsertError::EmptyKey`] and no side
    /// effects. Growth, when the load factor is reached, happens inside
    /// this call; when the bucket count is already at its cap the insert
    /// still succeeds and the map stays at its current size.
    pub fn insert(&mut self, key: impl AsRef<[u8]>, value: V) -> Result<Option<V>, InsertError> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(InsertError::EmptyKey);
        }
        let hash = rolling(key);
        let bucket = self.bucket_of(hash);

        // One walk serves both cases: replace on a key match, otherwise
        // remember the tail so the new entry can be linked after it.
        let mut tail = None;
        let mut cursor = self.buckets[bucket];
        while let Some(k) = cursor {
            let entry = self
                .slots
                .get_mut(k)
                .expect("chain links only reference live entries");
            if entry.hash == hash && &*entry.key == key {
                return Ok(Some(mem::replace(&mut entry.value, value)));
            }
            tail = Some(k);
            cursor = entry.next;
        }

        let fresh = self.slots.insert(Entry {
            key: Box::from(key),
            hash,
            value,
            next: None,
        });
        match tail {
            Some(t) => {
                self.slots
                    .get_mut(t)
                    .expect("chain tails reference live entries")
                    .next = Some(fresh);
            }
            None => self.buckets[bucket] = Some(fresh),
        }

        // Replacements never reach this point, so only fresh inserts can
        // change the geometry.
        if self.slots.len() / self.buckets.len() >= self.config.max_load {
            self.grow();
        }
        Ok(None)
    }

    /// Value stored under `key`, if any. The empty key is never stored, so
    /// it simply misses.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        let key = key.as_ref();
        let k = self.find_entry(key, rolling(key))?;
        self.slots.get(k).map(|e| &e.value)
    }

    /// Mutable companion to [`get`](Self::get); touches the value only,
    /// never the structure.
    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut V> {
        let key = key.as_ref();
        let k = self.find_entry(key, rolling(key))?;
        self.slots.get_mut(k).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        let key = key.as_ref();
        self.find_entry(key, rolling(key)).is_some()
    }

    /// Unlinks the entry with an equal key from its chain and hands its
    /// value back; `None` if the key is absent. The entry and its key copy
    /// are released here, the value when the caller drops the return.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        let key = key.as_ref();
        let hash = rolling(key);
        let bucket = self.bucket_of(hash);

        let mut prev = None;
        let mut cursor = self.buckets[bucket];
        while let Some(k) = cursor {
            let entry = self
                .slots
                .get(k)
                .expect("chain links only reference live entries");
            if entry.hash == hash && &*entry.key == key {
                let next = entry.next;
                match prev {
                    Some(p) => {
                        self.slots
                            .get_mut(p)
                            .expect("chain predecessors reference live entries")
                            .next = next;
                    }
                    None => self.buckets[bucket] = next,
                }
                let entry = self
                    .slots
                    .remove(k)
                    .expect("unlinked entries leave the arena exactly once");
                return Some(entry.value);
            }
            prev = Some(k);
            cursor = entry.next;
        }
        None
    }

    /// Merges `src` into `self`: every entry of `src` is inserted with a
    /// clone of its value, so overlapping keys end up with `src`'s value
    /// (the superseded one is dropped) and keys only in `self` keep theirs.
    ///
    /// Cloning is the whole sharing story: plain values are duplicated and
    /// the two maps stay fully independent, while `Rc<T>` values make the
    /// clone a refcount bump, giving both maps the same underlying storage
    /// safely under any drop order.
    pub fn copy_from(&mut self, src: &ChainMap<V>)
    where
        V: Clone,
    {
        for (key, value) in src.iter() {
            self.insert(key, value.clone())
                .expect("stored keys are never empty");
        }
    }

    /// Iterates entries as `(&key_bytes, &value)` in bucket order, then
    /// chain order within each bucket. The order is deterministic for a
    /// given insertion history and geometry.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            map: self,
            bucket: 0,
            cursor: None,
        }
    }

    /// Rebuilds the bucket array `growth_factor` times larger and relinks
    /// every entry by its cached hash. Old buckets are drained in index
    /// order, each chain head to tail, and entries are appended to the new
    /// chain tails, so entries that collide again keep their relative
    /// order. Values are not touched; only `next` links change.
    ///
    /// Skipped silently when the new size would overflow `usize` or exceed
    /// `max_buckets`; the map then stays at its current size for good.
    fn grow(&mut self) {
        let new_size = match self.buckets.len().checked_mul(self.config.growth_factor) {
            Some(n) if n <= self.config.max_buckets => n,
            _ => return,
        };

        let mut heads: Vec<Option<DefaultKey>> = vec![None; new_size];
        let mut tails: Vec<Option<DefaultKey>> = vec![None; new_size];
        let mut relinked = 0usize;

        for mut cursor in mem::take(&mut self.buckets) {
            while let Some(k) = cursor {
                let entry = self
                    .slots
                    .get_mut(k)
                    .expect("chain links only reference live entries");
                cursor = entry.next.take();
                let bucket = (entry.hash % new_size as u64) as usize;
                match tails[bucket] {
                    Some(t) => {
                        self.slots
                            .get_mut(t)
                            .expect("chain tails reference live entries")
                            .next = Some(k);
                    }
                    None => heads[bucket] = Some(k),
                }
                tails[bucket] = Some(k);
                relinked += 1;
            }
        }
        debug_assert_eq!(relinked, self.slots.len(), "growth must relink every live entry");

        self.buckets = heads;
    }
}

impl<V> Default for ChainMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a map's entries in bucket-then-chain order.
pub struct Iter<'a, V> {
    map: &'a ChainMap<V>,
    bucket: usize,              // next bucket to scan once the chain runs out
    cursor: Option<DefaultKey>, // next entry within the current chain
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cursor {
                let entry = self
                    .map
                    .slots
                    .get(k)
                    .expect("chain links only reference live entries");
                self.cursor = entry.next;
                return Some((&entry.key, &entry.value));
            }
            if self.bucket >= self.map.buckets.len() {
                return None;
            }
            self.cursor = self.map.buckets[self.bucket];
            self.bucket += 1;
        }
    }
}
