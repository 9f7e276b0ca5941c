use rand::RngCore;
use rand_pcg::Pcg64;
use std::fmt;

/// Smallest roster that can be deranged. One participant cannot avoid
/// themselves and two can only swap, so the surrounding system leaves
/// rosters below this size unpaired instead of calling the generator.
pub const MIN_PARTICIPANTS: usize = 3;

/// Fixed PCG stream selector. Changing it changes every pairing, so it is
/// part of the output contract alongside the seed.
const STREAM: u128 = 0x5A47A;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerangementError {
    RosterTooSmall { size: usize },
}

impl fmt::Display for DerangementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerangementError::RosterTooSmall { size } => write!(
                f,
                "cannot derange a roster of {size} participant(s), minimum is {MIN_PARTICIPANTS}"
            ),
        }
    }
}

impl std::error::Error for DerangementError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derangement(pub Vec<usize>);

impl Derangement {
    /// Produces a fixed-point-free permutation of `[0, n)` from an operator
    /// seed. The same `(n, seed)` pair always yields the same permutation:
    /// the stream is PCG-64 on a fixed stream selector with draws reduced
    /// by multiply-high, so output is stable across restarts, platforms,
    /// and library upgrades, and reproducible from the raw PCG-64 output
    /// sequence alone.
    pub fn generate(n: usize, seed: i64) -> Result<Self, DerangementError> {
        if n < MIN_PARTICIPANTS {
            return Err(DerangementError::RosterTooSmall { size: n });
        }
        let mut rng = Pcg64::new(u128::from(seed as u64), STREAM);
        let seats = swap_construction(n, &mut rng);
        Ok(Derangement(rotate_resort(&seats, &mut rng)))
    }
}

pub fn derangement(n: usize, seed: i64) -> Result<Vec<usize>, DerangementError> {
    Derangement::generate(n, seed).map(|derangement| derangement.0)
}

/// Uniform draw from `[0, bound)` by multiply-high reduction of one raw
/// 64-bit output. The stream-to-draw mapping is fixed here because rand's
/// own range sampling does not promise identical draw sequences across
/// releases, and the seed contract requires them.
fn draw(rng: &mut impl RngCore, bound: usize) -> usize {
    ((u128::from(rng.next_u64()) * bound as u128) >> 64) as usize
}

/// First pass: build a permutation by swapping each index with a random
/// partner drawn from `[1, n)`. Index 0 is excluded from the draw and kept
/// as the fallback partner when the drawn swap would pin a value in place.
/// The repeated fallback skews low indices toward their neighbours, which
/// `rotate_resort` undoes.
pub fn swap_construction(n: usize, rng: &mut impl RngCore) -> Vec<usize> {
    assert!(n >= MIN_PARTICIPANTS, "swap construction requires n >= {MIN_PARTICIPANTS}");
    let mut seats: Vec<usize> = (0..n).collect();
    for i in 0..n {
        let mut candidate = draw(rng, n - 1) + 1;
        if seats[candidate] == i || seats[i] == candidate {
            candidate = 0;
        }
        seats.swap(candidate, i);
    }
    seats
}

/// Second pass: rotate a copy of the permutation left by a nonzero offset,
/// then reorder the rotated copy using the original values as sort keys.
/// The result is the original permutation conjugated with a rotation, so no
/// value can land on its own index no matter what the first pass produced,
/// and final positions stop reflecting the swap order.
pub fn rotate_resort(seats: &[usize], rng: &mut impl RngCore) -> Vec<usize> {
    let n = seats.len();
    assert!(n >= MIN_PARTICIPANTS, "rotate_resort requires n >= {MIN_PARTICIPANTS}");
    let offset = draw(rng, n - 2) + 1;
    let mut pairs: Vec<(usize, usize)> = (0..n)
        .map(|i| (seats[i], seats[(i + offset) % n]))
        .collect();
    // seats holds each value exactly once, so sorting by it re-indexes the
    // rotated copy by value
    pairs.sort_by_key(|&(seat, _)| seat);
    pairs.into_iter().map(|(_, target)| target).collect()
}
