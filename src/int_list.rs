//! IntList: singly-linked list of integers with positional operations and a
//! compact JSON codec.

use core::fmt;

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    value: i32,
    next: Link,
}

/// Singly-linked list of `i32`.
///
/// Every node exclusively owns its successor, so the chain is a straight
/// line of `Box`es hanging off the head link. Positional arguments are
/// `isize`: negative positions count back from the tail (-1 is the last
/// element), resolved once against the current length and then subject to
/// each operation's own range policy.
pub struct IntList {
    head: Link,
}

/// Maps a tail-relative position onto the forward axis. Callers decide what
/// a still-negative or past-the-end result means for them.
fn resolve(pos: isize, len: usize) -> isize {
    if pos < 0 {
        pos + len as isize
    } else {
        pos
    }
}

impl IntList {
    pub fn new() -> Self {
        IntList { head: None }
    }

    /// Single-element list; the canonical way a chain comes into being.
    pub fn of(value: i32) -> Self {
        IntList {
            head: Some(Box::new(Node { value, next: None })),
        }
    }

    pub fn from_slice(items: &[i32]) -> Self {
        items.iter().copied().collect()
    }

    /// Walks the chain; O(n) by construction, nothing is cached.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends at the tail of a non-empty list and reports true. The empty
    /// list refuses with false: a chain only starts through its head cell,
    /// which `of`, `insert`, or the constructors provide.
    pub fn append(&mut self, value: i32) -> bool {
        if self.head.is_none() {
            return false;
        }
        let mut cur = &mut self.head;
        while let Some(node) = cur {
            cur = &mut node.next;
        }
        *cur = Some(Box::new(Node { value, next: None }));
        true
    }

    /// Value at `pos`, or None when the resolved position falls outside the
    /// list.
    pub fn get(&self, pos: isize) -> Option<i32> {
        let len = self.len();
        let pos = resolve(pos, len);
        if pos < 0 || pos as usize >= len {
            return None;
        }
        self.iter().nth(pos as usize)
    }

    /// Position of the first element equal to `value`.
    pub fn find(&self, value: i32) -> Option<usize> {
        self.iter().position(|v| v == value)
    }

    /// Inserts `value` before the resolved position. Out-of-range positions
    /// degrade instead of failing: anything still negative inserts at the
    /// head, anything past the tail appends. Inserting into the empty list
    /// creates the head cell.
    pub fn insert(&mut self, pos: isize, value: i32) {
        let len = self.len();
        let pos = resolve(pos, len).max(0) as usize;

        let mut cur = &mut self.head;
        for _ in 0..pos {
            match cur {
                Some(node) => cur = &mut node.next,
                None => break,
            }
        }
        let next = cur.take();
        *cur = Some(Box::new(Node { value, next }));
    }

    /// Unlinks the element at the resolved position and hands its value
    /// back. Out of range leaves the list untouched and returns None.
    pub fn remove(&mut self, pos: isize) -> Option<i32> {
        let len = self.len();
        let pos = resolve(pos, len);
        if pos < 0 || pos as usize >= len {
            return None;
        }

        let mut cur = &mut self.head;
        for _ in 0..pos as usize {
            match cur {
                Some(node) => cur = &mut node.next,
                None => return None,
            }
        }
        let mut node = cur.take()?;
        *cur = node.next.take();
        Some(node.value)
    }

    /// Copies the half-open range `[start, end)` into a fresh list. Bounds
    /// resolve like any other position; a reversed or exhausted range yields
    /// the empty list, and bounds beyond either end clamp to the list.
    pub fn slice(&self, start: isize, end: isize) -> IntList {
        let len = self.len();
        let start = resolve(start, len);
        let end = resolve(end, len);
        if end <= start {
            return IntList::new();
        }
        let start = start.max(0);
        self.iter()
            .skip(start as usize)
            .take((end - start).max(0) as usize)
            .collect()
    }

    /// New list with `f` applied to every element, order preserved.
    pub fn map<F>(&self, f: F) -> IntList
    where
        F: FnMut(i32) -> i32,
    {
        self.iter().map(f).collect()
    }

    /// New list keeping only the elements `pred` accepts, order preserved.
    pub fn filter<F>(&self, mut pred: F) -> IntList
    where
        F: FnMut(i32) -> bool,
    {
        self.iter().filter(|&v| pred(v)).collect()
    }

    /// Left fold over the elements with accumulator starting at 0.
    pub fn reduce<F>(&self, f: F) -> i32
    where
        F: FnMut(i32, i32) -> i32,
    {
        self.iter().fold(0, f)
    }

    /// Compact JSON array, e.g. `[]` or `[1,-2,3]`.
    pub fn to_json(&self) -> String {
        let mut out = String::from("[");
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&value.to_string());
        }
        out.push(']');
        out
    }

    /// Parses a flat JSON array of integers. Whitespace between tokens and
    /// an optional `+`/`-` sign are fine; text after the closing bracket is
    /// ignored. Everything else rejects: no brackets, nested values,
    /// non-integer elements, elements outside `i32`, or an empty `[]` (a
    /// list without a head cell cannot exist). Rejection returns None with
    /// nothing partial left behind.
    pub fn from_json(text: &str) -> Option<IntList> {
        let bytes = text.as_bytes();
        let mut i = 0;

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'[') {
            return None;
        }
        i += 1;

        let mut values = Vec::new();
        loop {
            // An integer is required here. A ']' in element position covers
            // both the empty "[]" and a trailing comma; both are malformed.
            let (value, next) = scan_int(bytes, i)?;
            values.push(value);
            i = next;

            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i) {
                Some(b',') => i += 1,
                Some(b']') => break,
                _ => return None,
            }
        }
        Some(values.into_iter().collect())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            cursor: self.head.as_deref(),
        }
    }
}

/// Scans one decimal integer starting at `i`, skipping leading whitespace,
/// and returns the value with the index one past its last digit. Rejects a
/// missing digit run and anything outside `i32`.
fn scan_int(bytes: &[u8], mut i: usize) -> Option<(i32, usize)> {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let negative = match bytes.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };
    let start = i;
    let mut magnitude: i64 = 0;
    while let Some(&b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        magnitude = magnitude * 10 + i64::from(b - b'0');
        // One past i32::MAX is still needed for i32::MIN; beyond that the
        // run cannot come back in range.
        if magnitude > i64::from(i32::MAX) + 1 {
            return None;
        }
        i += 1;
    }
    if i == start {
        return None;
    }
    let value = if negative { -magnitude } else { magnitude };
    if value < i64::from(i32::MIN) || value > i64::from(i32::MAX) {
        return None;
    }
    Some((value as i32, i))
}

pub struct Iter<'a> {
    cursor: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = i32;

    #[inline]
    fn next(&mut self) -> Option<i32> {
        let node = self.cursor?;
        self.cursor = node.next.as_deref();
        Some(node.value)
    }
}

impl<'a> IntoIterator for &'a IntList {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl FromIterator<i32> for IntList {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut values: Vec<i32> = iter.into_iter().collect();
        // Build back to front so each node is born owning its successor.
        let mut head: Link = None;
        while let Some(value) = values.pop() {
            head = Some(Box::new(Node { value, next: head }));
        }
        IntList { head }
    }
}

impl Default for IntList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for IntList {
    fn clone(&self) -> Self {
        self.iter().collect()
    }
}

// Comparison and formatting go through the iterator rather than derives so
// deep chains cannot recurse node by node.
impl PartialEq for IntList {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for IntList {}

impl fmt::Debug for IntList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Derived drop would release the chain recursively, one stack frame per
// node. Unlink front to back instead.
impl Drop for IntList {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: construction fixes the first cell; `of` and `from_slice`
    /// agree on order and length.
    #[test]
    fn construction_basics() {
        let single = IntList::of(7);
        assert_eq!(single.len(), 1);
        assert_eq!(single.get(0), Some(7));

        let built = IntList::from_slice(&[1, 2, 3]);
        assert_eq!(built.len(), 3);
        assert_eq!(built.iter().collect::<Vec<_>>(), vec![1, 2, 3]);

        let empty = IntList::new();
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
    }

    /// Invariant: `append` extends the tail of a non-empty list and refuses
    /// the empty list without creating a cell.
    #[test]
    fn append_contract() {
        let mut list = IntList::of(1);
        assert!(list.append(2));
        assert!(list.append(3));
        assert_eq!(list, IntList::from_slice(&[1, 2, 3]));

        let mut empty = IntList::new();
        assert!(!empty.append(1));
        assert!(empty.is_empty());
    }

    /// Invariant: negative positions resolve against the tail; anything
    /// outside the resolved range misses.
    #[test]
    fn get_with_negative_positions() {
        let list = IntList::from_slice(&[10, 20, 30]);
        assert_eq!(list.get(0), Some(10));
        assert_eq!(list.get(2), Some(30));
        assert_eq!(list.get(-1), Some(30));
        assert_eq!(list.get(-3), Some(10));
        assert_eq!(list.get(3), None);
        assert_eq!(list.get(-4), None);
        assert_eq!(IntList::new().get(0), None);
    }

    /// Invariant: insert degrades at the edges (head below zero, tail past
    /// the end) and creates the head cell in an empty list.
    #[test]
    fn insert_clamps_and_appends() {
        let mut list = IntList::from_slice(&[1, 3]);
        list.insert(1, 2);
        assert_eq!(list, IntList::from_slice(&[1, 2, 3]));

        list.insert(0, 0);
        assert_eq!(list, IntList::from_slice(&[0, 1, 2, 3]));

        list.insert(-100, -1);
        assert_eq!(list, IntList::from_slice(&[-1, 0, 1, 2, 3]));

        list.insert(100, 4);
        assert_eq!(list, IntList::from_slice(&[-1, 0, 1, 2, 3, 4]));

        list.insert(-1, 99); // before the last element
        assert_eq!(list, IntList::from_slice(&[-1, 0, 1, 2, 3, 99, 4]));

        let mut empty = IntList::new();
        empty.insert(5, 42);
        assert_eq!(empty, IntList::of(42));
    }

    /// Invariant: remove unlinks exactly the resolved position, adjusting
    /// the head when position zero goes; a miss changes nothing.
    #[test]
    fn remove_positions() {
        let mut list = IntList::from_slice(&[1, 2, 3, 4]);
        assert_eq!(list.remove(1), Some(2));
        assert_eq!(list, IntList::from_slice(&[1, 3, 4]));

        assert_eq!(list.remove(0), Some(1));
        assert_eq!(list, IntList::from_slice(&[3, 4]));

        assert_eq!(list.remove(-1), Some(4));
        assert_eq!(list, IntList::from_slice(&[3]));

        assert_eq!(list.remove(5), None);
        assert_eq!(list.remove(-5), None);
        assert_eq!(list, IntList::from_slice(&[3]));

        assert_eq!(list.remove(0), Some(3));
        assert!(list.is_empty());
        assert_eq!(list.remove(0), None);
    }

    /// Invariant: find reports the first match in forward order.
    #[test]
    fn find_first_match() {
        let list = IntList::from_slice(&[5, 7, 5, 9]);
        assert_eq!(list.find(5), Some(0));
        assert_eq!(list.find(9), Some(3));
        assert_eq!(list.find(8), None);
        assert_eq!(IntList::new().find(5), None);
    }

    /// Invariant: slice takes `[start, end)` after resolution, clamping both
    /// ends and yielding empty for reversed or fully out-of-range bounds.
    #[test]
    fn slice_ranges() {
        let list = IntList::from_slice(&[0, 1, 2, 3, 4]);
        assert_eq!(list.slice(0, 5), list);
        assert_eq!(list.slice(1, 3), IntList::from_slice(&[1, 2]));
        assert_eq!(list.slice(-2, 5), IntList::from_slice(&[3, 4]));
        assert_eq!(list.slice(0, -1), IntList::from_slice(&[0, 1, 2, 3]));
        assert_eq!(list.slice(2, 100), IntList::from_slice(&[2, 3, 4]));
        assert_eq!(list.slice(-100, 2), IntList::from_slice(&[0, 1]));
        assert!(list.slice(3, 3).is_empty());
        assert!(list.slice(4, 2).is_empty());
        assert!(list.slice(-100, -50).is_empty());
        assert!(IntList::new().slice(0, 1).is_empty());
    }

    /// Invariant: map and filter preserve order; reduce folds from 0.
    #[test]
    fn higher_order_ops() {
        let list = IntList::from_slice(&[1, 2, 3, 4]);
        assert_eq!(list.map(|v| v * 2), IntList::from_slice(&[2, 4, 6, 8]));
        assert_eq!(list.filter(|v| v % 2 == 0), IntList::from_slice(&[2, 4]));
        assert!(list.filter(|_| false).is_empty());
        assert_eq!(list.reduce(|acc, v| acc + v), 10);
        assert_eq!(IntList::new().reduce(|acc, v| acc + v), 0);
        assert_eq!(list.reduce(|acc, v| acc.wrapping_sub(v)), -10);
    }

    /// Invariant: serialization is compact with no spaces; the empty list is
    /// exactly "[]".
    #[test]
    fn to_json_format() {
        assert_eq!(IntList::new().to_json(), "[]");
        assert_eq!(IntList::of(1).to_json(), "[1]");
        assert_eq!(IntList::from_slice(&[0, -1, 2]).to_json(), "[0,-1,2]");
        assert_eq!(
            IntList::from_slice(&[i32::MIN, i32::MAX]).to_json(),
            "[-2147483648,2147483647]"
        );
    }

    /// Invariant: the parser accepts exactly flat integer arrays, tolerating
    /// whitespace, signs, and trailing text after the bracket.
    #[test]
    fn from_json_accepts() {
        assert_eq!(
            IntList::from_json("[1,2,3]"),
            Some(IntList::from_slice(&[1, 2, 3]))
        );
        assert_eq!(
            IntList::from_json("\n[\n  1,\n  -1\n] "),
            Some(IntList::from_slice(&[1, -1]))
        );
        assert_eq!(IntList::from_json("[+5]"), Some(IntList::of(5)));
        assert_eq!(IntList::from_json("[007]"), Some(IntList::of(7)));
        assert_eq!(
            IntList::from_json("[ -2147483648 , 2147483647 ]"),
            Some(IntList::from_slice(&[i32::MIN, i32::MAX]))
        );
        // The scan stops at the closing bracket; the rest is not its problem.
        assert_eq!(
            IntList::from_json("[1,2] trailing junk"),
            Some(IntList::from_slice(&[1, 2]))
        );
    }

    /// Invariant: anything that is not a flat non-empty integer array is
    /// rejected whole; no partial list escapes.
    #[test]
    fn from_json_rejects() {
        for text in [
            "",
            "   ",
            "{}",
            "[]",
            "[ ]",
            "[[1,2], [3,4]]",
            "[0, 1, {}]",
            "[1,]",
            "[,1]",
            "[1 2]",
            "[1,,2]",
            "[abc]",
            "[1.5]",
            "[- 1]",
            "x[1]",
            "[1",
            "[",
            "[2147483648]",
            "[-2147483649]",
            "[99999999999999999999]",
        ] {
            assert_eq!(IntList::from_json(text), None, "input: {text:?}");
        }
    }

    /// Invariant: encode-then-parse restores the exact sequence.
    #[test]
    fn json_round_trip() {
        let list = IntList::from_slice(&[3, -14, 159, 0, i32::MAX, i32::MIN]);
        assert_eq!(IntList::from_json(&list.to_json()), Some(list));
    }

    /// Invariant: dropping a long chain releases it iteratively without
    /// exhausting the stack.
    #[test]
    fn long_chain_drops_flat() {
        let list: IntList = (0..200_000).map(|v| v as i32).collect();
        assert_eq!(list.get(-1), Some(199_999));
        drop(list);
    }

    /// Invariant: equality and Debug read through the values, not the
    /// structure addresses.
    #[test]
    fn equality_and_debug() {
        let a = IntList::from_slice(&[1, 2]);
        let b: IntList = [1, 2].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, IntList::from_slice(&[1, 2, 3]));
        assert_ne!(a, IntList::new());
        assert_eq!(format!("{:?}", a), "[1, 2]");
        assert_eq!(format!("{:?}", IntList::new()), "[]");
    }
}
