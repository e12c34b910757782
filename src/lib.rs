//! chainmap: a byte-string-keyed hash map built from explicit bucket
//! chains, with load-factor growth, plus a companion singly-linked
//! integer list with a compact JSON codec.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep every structural decision of a chained hash table — hashing,
//!   bucket selection, collision chains, growth — visible and independently
//!   testable instead of delegating them to a ready-made table.
//! - Layers:
//!   - hash::rolling(bytes) -> u64: deterministic shift-and-accumulate
//!     byte hash; the sole input to bucket placement.
//!   - ChainMap<V>: bucket-head array over a slotmap arena of chain
//!     entries. Each entry owns a copy of its key, caches its hash, and
//!     links to its same-bucket successor by arena key.
//!   - IntList: singly-linked i32 list on Box links with positional
//!     operations, slice/map/filter/reduce, and the JSON codec. Standalone;
//!     it exercises the unique-ownership link pattern that complements the
//!     map's arena-index chains.
//!
//! Constraints
//! - Single-threaded: no interior mutability anywhere, so `&mut` gates
//!   every mutation and `Send`/`Sync` fall out of the value type.
//! - The bucket count is always positive and only ever grows; growth
//!   multiplies it by the configured factor (default: double).
//! - `len()` equals the number of distinct live keys; no two entries in
//!   the map share equal key bytes.
//! - Keys are non-empty byte strings, copied once at insert. Each entry
//!   stores a precomputed `u64` hash and growth re-buckets from the stored
//!   hash; key bytes are never re-read after insertion.
//! - Values are plainly owned by the map. Operations that displace one
//!   (replacement, removal) hand it back to the caller instead of dropping
//!   it silently; growth relinks entries and never touches values.
//!
//! Why this split?
//! - Localize invariants: the hash is a pure function pinned by fixed
//!   vectors; the map owns the structural invariants; the growth policy is
//!   plain data (`MapConfig`) validated once at construction.
//! - Chain links are generational arena keys, so a stale link is
//!   unrepresentable and unlink-then-remove is the single point where an
//!   entry's key and value drop.
//! - The list keeps the same lifecycle discipline with `Option<Box>` links
//!   and shows the head-identity variant: any operation that changes
//!   position zero swaps the head link in place.
//!
//! Growth semantics
//! - The load factor is checked only after a fresh insert (replacements
//!   never change the geometry). When `len / bucket_count` reaches
//!   `max_load`, the bucket array is rebuilt `growth_factor` times larger
//!   and entries are relinked from their cached hashes, preserving
//!   relative chain order. Growth that would overflow `usize` or exceed
//!   `max_buckets` is skipped; the insert still succeeds and the map stays
//!   at its current size.
//!
//! Copy semantics
//! - `copy_from` inserts a clone of every source value, so the source wins
//!   on overlapping keys and the two maps stay independent. Callers who
//!   want shared storage across maps store `Rc<T>` values: the clone
//!   becomes a refcount bump and both maps drop safely in any order.
//!
//! Notes and non-goals
//! - No thread-safety machinery, no persistence, no entry API, no
//!   `clear()`/`drain()`.
//! - `rolling` is deliberately trivial: collisions and weak avalanche are
//!   acceptable, and nothing here is cryptographic.
//! - The only serialized format is the list's flat JSON integer array;
//!   anything else (nesting, non-integers, the empty array) is rejected
//!   whole with nothing partial left behind.

pub mod chain_map;
pub mod hash;
pub mod int_list;

mod chain_map_proptest;

// Public surface
pub use chain_map::{
    ChainMap, InsertError, MapConfig, DEFAULT_BUCKETS, DEFAULT_GROWTH_FACTOR, DEFAULT_MAX_BUCKETS,
    DEFAULT_MAX_LOAD,
};
pub use int_list::IntList;
