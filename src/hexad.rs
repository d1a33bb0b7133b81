//! # Duads, synthemes and synthematic totals
//!
//! Combinatorics of a six-point set `0..6`:
//!
//! - a [`Duad`] is an unordered pair of points,
//! - a [`Syntheme`] is a partition of the six points into three duads,
//! - a synthematic total is a set of five synthemes that together use all fifteen
//!   duads exactly once. There are six totals, and `S6` permutes them. A
//!   transposition of points acts on the totals as a product of three disjoint
//!   transpositions; this exchange of cycle types is the outer automorphism.
//!
//! Every total is stored as a [`Pentad`]: a pentagon of five corners and a hub.
//! The syntheme through corner `v` is the spoke `{hub, v}` together with the two
//! chords of the pentagon perpendicular to it.
//!
//! The hub is always point [`HUB`] (index 5) in the six canonical layouts [`TOTALS`].
//!
//! [`CorrespondenceTable::outer`] holds, for every duad of positions, the permutation
//! its transposition induces on the six totals. It is written out by hand in
//! [`OUTER_TABLE`] and is checked against [`CorrespondenceTable::derive`] in the tests.

use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::permutation::{Key, Permutation};

/// Number of points, structural positions and totals.
pub const POINTS: usize = 6;

/// Index of the hub in every pentad layout.
pub const HUB: usize = 5;

/// Display labels of the six totals.
pub const TOTAL_LABELS: [&str; POINTS] = ["a", "b", "c", "d", "e", "f"];

/// An unordered pair, stored in canonical (ascending) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Duad(usize, usize);

impl Duad {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Duad(a, b)
        } else {
            Duad(b, a)
        }
    }

    pub fn lo(&self) -> usize {
        self.0
    }

    pub fn hi(&self) -> usize {
        self.1
    }

    pub fn contains(&self, x: usize) -> bool {
        self.0 == x || self.1 == x
    }

    /// The other member, if `x` is one of the pair.
    pub fn other(&self, x: usize) -> Option<usize> {
        if self.0 == x {
            Some(self.1)
        } else if self.1 == x {
            Some(self.0)
        } else {
            None
        }
    }

    pub fn map(&self, perm: &Permutation) -> Duad {
        Duad::new(perm.map_index(self.0), perm.map_index(self.1))
    }

    pub fn transposition(&self) -> Permutation {
        Permutation::transposition(self.0, self.1)
    }

    /// All fifteen duads of `0..POINTS`, in lexicographic order.
    pub fn all() -> impl Iterator<Item = Duad> + Clone {
        (0..POINTS)
            .tuple_combinations()
            .map(|(a, b)| Duad::new(a, b))
    }
}

impl fmt::Display for Duad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0 + 1, self.1 + 1)
    }
}

/// Three disjoint duads covering all six points, kept sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Syntheme([Duad; 3]);

impl Syntheme {
    pub fn new(a: Duad, b: Duad, c: Duad) -> Self {
        let mut duads = [a, b, c];
        duads.sort();
        Syntheme(duads)
    }

    pub fn duads(&self) -> &[Duad; 3] {
        &self.0
    }

    pub fn contains(&self, duad: Duad) -> bool {
        self.0.contains(&duad)
    }

    pub fn map(&self, perm: &Permutation) -> Syntheme {
        let [a, b, c] = self.0;
        Syntheme::new(a.map(perm), b.map(perm), c.map(perm))
    }

    /// The product of the syntheme's three transpositions, on `0..POINTS`.
    pub fn as_permutation(&self) -> Permutation {
        self.0
            .iter()
            .fold(Permutation::identity(POINTS), |acc, d| {
                acc.compose(&d.transposition())
            })
    }
}

impl fmt::Display for Syntheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}.{b}.{c}")
    }
}

/// A synthematic total drawn as a pentagon with a hub.
///
/// Vertex `v < 5` is corner `v` of the pentagon, vertex [`HUB`] is the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pentad {
    pub corners: [usize; 5],
    pub hub: usize,
}

/// Canonical layouts of the six totals over points `0..6`.
pub const TOTALS: [Pentad; POINTS] = [
    Pentad::new([0, 1, 2, 3, 4], HUB),
    Pentad::new([0, 1, 2, 4, 3], HUB),
    Pentad::new([0, 1, 3, 2, 4], HUB),
    Pentad::new([0, 1, 3, 4, 2], HUB),
    Pentad::new([0, 1, 4, 2, 3], HUB),
    Pentad::new([0, 1, 4, 3, 2], HUB),
];

impl Pentad {
    pub const fn new(corners: [usize; 5], hub: usize) -> Self {
        Pentad { corners, hub }
    }

    /// The point drawn at `vertex`.
    pub fn point_at(&self, vertex: usize) -> usize {
        if vertex < 5 {
            self.corners[vertex]
        } else {
            self.hub
        }
    }

    /// The vertex showing `point`. Points that are not on a corner sit at the hub.
    pub fn vertex_of(&self, point: usize) -> usize {
        self.corners
            .iter()
            .position(|&c| c == point)
            .unwrap_or(HUB)
    }

    /// The syntheme through corner `v`: the spoke to `v` and the two chords
    /// perpendicular to it.
    pub fn syntheme(&self, v: usize) -> Syntheme {
        let c = |k: usize| self.corners[(v + k) % 5];
        Syntheme::new(
            Duad::new(self.hub, c(0)),
            Duad::new(c(4), c(1)),
            Duad::new(c(3), c(2)),
        )
    }

    pub fn synthemes(&self) -> [Syntheme; 5] {
        [0, 1, 2, 3, 4].map(|v| self.syntheme(v))
    }

    /// Index of the syntheme containing `duad`, used as its colour.
    pub fn syntheme_of(&self, duad: Duad) -> Option<usize> {
        (0..5).find(|&v| self.syntheme(v).contains(duad))
    }

    /// The same drawing with every point relabelled by `perm`.
    pub fn map(&self, perm: &Permutation) -> Pentad {
        Pentad {
            corners: self.corners.map(|c| perm.map_index(c)),
            hub: perm.map_index(self.hub),
        }
    }

    /// Whether both drawings show the same total, whatever their layout.
    pub fn same_total(&self, other: &Pentad) -> bool {
        let mut a = self.synthemes();
        let mut b = other.synthemes();
        a.sort();
        b.sort();
        a == b
    }
}

/// Hand-computed outer automorphism: each position duad with the syntheme of
/// slots its transposition induces on [`TOTALS`].
pub const OUTER_TABLE: [((usize, usize), [(usize, usize); 3]); 15] = [
    ((0, 1), [(0, 5), (1, 3), (2, 4)]),
    ((0, 2), [(0, 1), (2, 5), (3, 4)]),
    ((0, 3), [(0, 4), (1, 5), (2, 3)]),
    ((0, 4), [(0, 3), (1, 2), (4, 5)]),
    ((0, 5), [(0, 2), (1, 4), (3, 5)]),
    ((1, 2), [(0, 4), (1, 2), (3, 5)]),
    ((1, 3), [(0, 3), (1, 4), (2, 5)]),
    ((1, 4), [(0, 2), (1, 5), (3, 4)]),
    ((1, 5), [(0, 1), (2, 3), (4, 5)]),
    ((2, 3), [(0, 2), (1, 3), (4, 5)]),
    ((2, 4), [(0, 5), (1, 4), (2, 3)]),
    ((2, 5), [(0, 3), (1, 5), (2, 4)]),
    ((3, 4), [(0, 1), (2, 4), (3, 5)]),
    ((3, 5), [(0, 5), (1, 2), (3, 4)]),
    ((4, 5), [(0, 4), (1, 3), (2, 5)]),
];

/// Lookup from a transposition of structural positions, keyed by its canonical
/// duad, to the permutation it induces on the secondary (total/slot) domain.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrespondenceTable {
    images: IndexMap<Duad, Permutation>,
}

impl CorrespondenceTable {
    /// The fixed table [`OUTER_TABLE`], with images labelled by [`TOTAL_LABELS`].
    pub fn outer() -> Self {
        Self::from_entries(OUTER_TABLE.iter().map(|&((a, b), [x, y, z])| {
            let syntheme = Syntheme::new(
                Duad::new(x.0, x.1),
                Duad::new(y.0, y.1),
                Duad::new(z.0, z.1),
            );
            (Duad::new(a, b), total_labelled(syntheme.as_permutation()))
        }))
    }

    /// A table with exactly the given entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (Duad, Permutation)>) -> Self {
        CorrespondenceTable {
            images: entries.into_iter().collect(),
        }
    }

    /// Recomputes the table from the layouts: slot `s` goes to the slot whose total is
    /// the image of `totals[s]` under the transposition.
    ///
    /// Returns `None` if some image is not among `totals`.
    pub fn derive(totals: &[Pentad]) -> Option<Self> {
        let mut images = IndexMap::new();
        for duad in Duad::all() {
            let swap = duad.transposition();
            let slots = totals
                .iter()
                .map(|total| {
                    let moved = total.map(&swap);
                    totals.iter().position(|t| t.same_total(&moved))
                })
                .collect::<Option<Vec<_>>>()?;
            let perm = Permutation::from_array(&slots).ok()?;
            images.insert(duad, total_labelled(perm));
        }
        Some(CorrespondenceTable { images })
    }

    pub fn get(&self, duad: Duad) -> Option<&Permutation> {
        self.images.get(&duad)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Duad, &Permutation)> {
        self.images.iter()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Attaches the total labels to a permutation of slots.
pub fn total_labelled(perm: Permutation) -> Permutation {
    perm.with_labels(
        TOTAL_LABELS
            .iter()
            .enumerate()
            .map(|(i, l)| (Key::Index(i), *l)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn fifteen_duads() {
        let duads: Vec<_> = Duad::all().collect();
        assert_eq!(duads.len(), 15);
        assert_eq!(duads[0], Duad::new(1, 0));
        assert_eq!(duads[14], Duad::new(4, 5));
        assert_eq!(Duad::new(4, 2).to_string(), "35");
    }

    #[test]
    fn every_layout_is_a_total() {
        for total in TOTALS {
            let duads: AHashSet<Duad> = total
                .synthemes()
                .iter()
                .flat_map(|s| s.duads().iter().copied())
                .collect();
            assert_eq!(duads.len(), 15);
        }
    }

    #[test]
    fn totals_are_distinct_and_share_one_syntheme_pairwise() {
        for (i, j) in (0..POINTS).tuple_combinations() {
            assert!(!TOTALS[i].same_total(&TOTALS[j]));
            let shared = TOTALS[i]
                .synthemes()
                .iter()
                .filter(|s| TOTALS[j].synthemes().contains(s))
                .count();
            assert_eq!(shared, 1, "totals {i} and {j}");
        }
    }

    #[test]
    fn pentagon_and_pentagram_are_the_same_total() {
        let star = Pentad::new([0, 2, 4, 1, 3], HUB);
        assert!(TOTALS[0].same_total(&star));
    }

    #[test]
    fn vertex_lookup() {
        let p = TOTALS[3];
        assert_eq!(p.vertex_of(4), 3);
        assert_eq!(p.vertex_of(HUB), HUB);
        for v in 0..POINTS {
            assert_eq!(p.vertex_of(p.point_at(v)), v);
        }
        assert_eq!(p.syntheme_of(Duad::new(5, 4)), Some(3));
    }

    #[test]
    fn outer_table_matches_derivation() {
        let derived = CorrespondenceTable::derive(&TOTALS).unwrap();
        let table = CorrespondenceTable::outer();
        assert_eq!(table.len(), 15);
        for (duad, image) in table.iter() {
            assert_eq!(derived.get(*duad), Some(image), "duad {duad}");
        }
    }

    #[test]
    fn images_are_fixed_point_free_involutions() {
        let table = CorrespondenceTable::outer();
        let images: AHashSet<String> = table
            .iter()
            .map(|(_, image)| {
                assert!(image.compose(image).is_identity());
                assert_eq!(image.cycles().len(), 3);
                image.cycle_notation().to_string()
            })
            .collect();
        assert_eq!(images.len(), 15);
    }

    #[test]
    fn documented_entry_for_two_and_four() {
        let table = CorrespondenceTable::outer();
        let image = table.get(Duad::new(4, 2)).unwrap();
        assert_eq!(
            image,
            &Permutation::from_array(&[5, 4, 3, 2, 1, 0]).unwrap()
        );
        assert_eq!(image.cycle_notation(), "(a f)(b e)(c d)");
    }

    #[test]
    fn table_respects_commutation() {
        // disjoint transpositions commute, so their images must too
        let table = CorrespondenceTable::outer();
        for (a, b) in Duad::all().tuple_combinations() {
            if a.contains(b.lo()) || a.contains(b.hi()) {
                continue;
            }
            let (x, y) = (table.get(a).unwrap(), table.get(b).unwrap());
            assert_eq!(x.compose(y), y.compose(x), "{a} and {b}");
        }
    }
}
