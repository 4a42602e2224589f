use crate::call_code::CallCode;

const BITS: usize = u64::BITS as usize;

/// A fixed-capacity bitset over sample indices, used both to represent a
/// sample distribution pattern (SDP) and, transiently, a per-SNP minor-allele
/// membership set.
///
/// Bit `i` is set iff sample `i` is a member. `capacity` is the number of
/// samples the bitset was built for; indices `>= capacity` are never set and
/// are masked out of every operation so that trailing bits in the final word
/// never leak into popcount/subset/disjoint results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sdp {
    words: Vec<u64>,
    capacity: usize,
}

impl Sdp {
    #[must_use]
    pub fn empty(capacity: usize) -> Self {
        Self { words: vec![0u64; capacity.div_ceil(BITS).max(1)], capacity }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn tail_mask(&self) -> u64 {
        let used_bits_in_last_word = self.capacity % BITS;
        if used_bits_in_last_word == 0 { u64::MAX } else { (1u64 << used_bits_in_last_word) - 1 }
    }

    fn mask_tail(&mut self) {
        let mask = self.tail_mask();
        if let Some(last) = self.words.last_mut() {
            *last &= mask;
        }
    }

    #[must_use]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.capacity, "sample index {i} out of bounds ({} samples)", self.capacity);
        (self.words[i / BITS] >> (i % BITS)) & 1 == 1
    }

    pub fn set(&mut self, i: usize, member: bool) {
        assert!(i < self.capacity, "sample index {i} out of bounds ({} samples)", self.capacity);
        let word = &mut self.words[i / BITS];
        if member {
            *word |= 1u64 << (i % BITS);
        } else {
            *word &= !(1u64 << (i % BITS));
        }
    }

    #[must_use]
    pub fn popcount(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Bitwise complement, restricted to `capacity` bits.
    #[must_use]
    pub fn complement(&self) -> Self {
        let mut out = Self { words: self.words.iter().map(|w| !w).collect(), capacity: self.capacity };
        out.mask_tail();
        out
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        assert_eq!(self.capacity, other.capacity);
        Self { words: self.words.iter().zip(&other.words).map(|(a, b)| a | b).collect(), capacity: self.capacity }
    }

    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        assert_eq!(self.capacity, other.capacity);
        Self { words: self.words.iter().zip(&other.words).map(|(a, b)| a & b).collect(), capacity: self.capacity }
    }

    /// `self` set-minus `other` (`self & !other`).
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        assert_eq!(self.capacity, other.capacity);
        Self { words: self.words.iter().zip(&other.words).map(|(a, b)| a & !b).collect(), capacity: self.capacity }
    }

    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.difference(other).is_empty()
    }

    #[must_use]
    pub fn is_disjoint_from(&self, other: &Self) -> bool {
        self.intersection(other).is_empty()
    }

    /// Normalize so the set bits are the minority (`popcount <= capacity / 2`).
    /// On an exact tie, the representation with bit 0 clear is kept — this
    /// makes normalization a deterministic, side-agnostic canonical form.
    #[must_use]
    pub fn normalize_minority(self) -> Self {
        let half = self.capacity as u32;
        if self.popcount() * 2 > half {
            return self.complement();
        }
        if self.popcount() * 2 == half && self.get(0) {
            return self.complement();
        }
        self
    }
}

/// Build the minor-allele membership bitset for one SNP row: bit `i` is set
/// iff `calls[i]` carries the allele that is in the minority among the
/// biallelic (`A`/`B`) calls in the row. Heterozygous/no-call samples are
/// never set. The result is already minority-normalized.
#[must_use]
pub fn sdp_from_calls(calls: &[CallCode]) -> Sdp {
    let mut raw = Sdp::empty(calls.len());
    for (i, &c) in calls.iter().enumerate() {
        if c == CallCode::B {
            raw.set(i, true);
        }
    }
    raw.normalize_minority()
}

/// Four-gamete compatibility test between two SNP rows, restricted to
/// samples that are biallelic (`A`/`B`) at both sites. Two sites are
/// compatible iff all four gametes `AA`, `AB`, `BA`, `BB` are not
/// simultaneously observed.
#[must_use]
pub fn four_gamete_compatible(row_a: &[CallCode], row_b: &[CallCode]) -> bool {
    assert_eq!(row_a.len(), row_b.len());
    let (mut aa, mut ab, mut ba, mut bb) = (false, false, false, false);
    for (&ca, &cb) in row_a.iter().zip(row_b) {
        if !ca.is_biallelic() || !cb.is_biallelic() {
            continue;
        }
        match (ca, cb) {
            (CallCode::A, CallCode::A) => aa = true,
            (CallCode::A, CallCode::B) => ab = true,
            (CallCode::B, CallCode::A) => ba = true,
            (CallCode::B, CallCode::B) => bb = true,
            _ => unreachable!("is_biallelic guarantees A or B"),
        }
        if aa && ab && ba && bb {
            return false;
        }
    }
    true
}

/// Equivalent compatibility test expressed directly on two SDP bitsets built
/// over the *same* sample universe: compatible iff one is a subset of the
/// other, or they are disjoint, or their union is the full universe.
///
/// This is the bitset-level restatement of [`four_gamete_compatible`] and
/// must agree with it whenever both rows have no no-call/heterozygous
/// entries; debug builds assert this in [`sdp_compatible_matches_four_gamete`].
#[must_use]
pub fn sdp_compatible(a: &Sdp, b: &Sdp) -> bool {
    assert_eq!(a.capacity, b.capacity);
    a.is_subset_of(b) || b.is_subset_of(a) || a.is_disjoint_from(b) || a.union(b).popcount() as usize == a.capacity
}

/// Debug-only cross-check that the raw four-gamete test and the bitset
/// subset/disjoint test agree, for rows containing only `A`/`B` calls.
#[cfg(debug_assertions)]
#[must_use]
pub fn sdp_compatible_matches_four_gamete(row_a: &[CallCode], row_b: &[CallCode]) -> bool {
    let sdp_a = sdp_from_calls(row_a);
    let sdp_b = sdp_from_calls(row_b);
    let via_bitset = sdp_compatible(&sdp_a, &sdp_b);
    let via_gametes = four_gamete_compatible(row_a, row_b);
    debug_assert_eq!(
        via_bitset, via_gametes,
        "sdp bitset compatibility test disagreed with raw four-gamete test"
    );
    via_bitset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(codes: &[i8]) -> Vec<CallCode> {
        codes
            .iter()
            .map(|&c| match c {
                1 => CallCode::A,
                2 => CallCode::B,
                3 => CallCode::H,
                _ => CallCode::N,
            })
            .collect()
    }

    #[test]
    fn set_get_popcount() {
        let mut s = Sdp::empty(10);
        s.set(0, true);
        s.set(9, true);
        assert!(s.get(0));
        assert!(!s.get(1));
        assert!(s.get(9));
        assert_eq!(s.popcount(), 2);
    }

    #[test]
    fn complement_masks_tail_bits() {
        let s = Sdp::empty(5);
        let c = s.complement();
        assert_eq!(c.popcount(), 5);
        for i in 0..5 {
            assert!(c.get(i));
        }
    }

    #[test]
    fn subset_and_disjoint() {
        let mut a = Sdp::empty(8);
        a.set(0, true);
        a.set(1, true);
        let mut b = Sdp::empty(8);
        b.set(0, true);
        b.set(1, true);
        b.set(2, true);
        assert!(a.is_subset_of(&b));
        assert!(!b.is_subset_of(&a));

        let mut c = Sdp::empty(8);
        c.set(5, true);
        assert!(a.is_disjoint_from(&c));
        assert!(!a.is_disjoint_from(&b));
    }

    #[test]
    fn normalize_picks_minority() {
        let mut majority_set = Sdp::empty(10);
        for i in 0..8 {
            majority_set.set(i, true);
        }
        let normalized = majority_set.normalize_minority();
        assert_eq!(normalized.popcount(), 2);
    }

    #[test]
    fn normalize_tie_break_keeps_bit_zero_clear() {
        let mut half = Sdp::empty(4);
        half.set(2, true);
        half.set(3, true);
        let normalized = half.normalize_minority();
        assert!(!normalized.get(0));
        assert_eq!(normalized.popcount(), 2);

        let mut other_half = Sdp::empty(4);
        other_half.set(0, true);
        other_half.set(1, true);
        let normalized = other_half.normalize_minority();
        assert!(!normalized.get(0));
        assert_eq!(normalized.popcount(), 2);
    }

    #[test]
    fn sdp_from_calls_exact_tie_matches_raw_allele_split() {
        // calls = [A, A, B, B]: an exact n/2 tie. The canonical SDP must
        // reflect the A/B split itself (bits {2,3} set), not its complement.
        let calls = [CallCode::A, CallCode::A, CallCode::B, CallCode::B];
        let sdp = sdp_from_calls(&calls);
        assert!(!sdp.get(0));
        assert!(!sdp.get(1));
        assert!(sdp.get(2));
        assert!(sdp.get(3));
    }

    #[test]
    fn four_gamete_incompatible_when_all_four_observed() {
        let a = row(&[1, 1, 2, 2]);
        let b = row(&[1, 2, 1, 2]);
        assert!(!four_gamete_compatible(&a, &b));
    }

    #[test]
    fn four_gamete_compatible_nested_pattern() {
        let a = row(&[1, 1, 1, 2, 2]);
        let b = row(&[1, 1, 2, 2, 2]);
        assert!(four_gamete_compatible(&a, &b));
    }

    #[test]
    fn four_gamete_ignores_non_biallelic_entries() {
        let a = row(&[1, 1, 2, 2, 3]);
        let b = row(&[1, 2, 1, 2, 0]);
        // ignoring the H/N pair at index 4, AA,AB,BA,BB all observed among the rest.
        assert!(!four_gamete_compatible(&a, &b));
    }

    #[test]
    fn bitset_and_gamete_tests_agree() {
        let a = row(&[1, 1, 1, 2, 2]);
        let b = row(&[1, 1, 2, 2, 2]);
        assert!(sdp_compatible_matches_four_gamete(&a, &b));

        let c = row(&[1, 1, 2, 2]);
        let d = row(&[1, 2, 1, 2]);
        assert!(!sdp_compatible_matches_four_gamete(&c, &d));
    }
}
