// Hunt/target shot selection for the automated opponent.
// Reads only the opponent's public state: busy cells and unresolved hits.

use alloc::vec::Vec;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::board::TargetView;
use crate::common::Coordinate;
use crate::ship::Orientation;

/// Orthogonal neighbour offsets.
const NEIGHBOURS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Mode of the hunt/target search, derived from the unresolved hit chain on
/// every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetingMode {
    /// No unresolved hits; search at random.
    Hunt,
    /// A single unresolved hit; orientation unknown.
    SingleHit(Coordinate),
    /// Two or more hits on a line; extend from either end.
    Line {
        orientation: Orientation,
        head: Coordinate,
        tail: Coordinate,
    },
}

impl TargetingMode {
    /// Classify the unresolved hit chain.
    ///
    /// The orientation follows from the first and last hit: equal `x` means
    /// the ship runs along `y`. The ends are the extreme hits on that axis,
    /// so a chain that was extended at both ends is still handled.
    pub fn from_chain(chain: &[Coordinate]) -> Self {
        match chain {
            [] => TargetingMode::Hunt,
            [only] => TargetingMode::SingleHit(*only),
            [first, .., last] => {
                let orientation = if first.x == last.x {
                    Orientation::Vertical
                } else {
                    Orientation::Horizontal
                };
                let along = |c: &&Coordinate| match orientation {
                    Orientation::Vertical => c.y,
                    Orientation::Horizontal => c.x,
                };
                let head = chain.iter().min_by_key(along).copied().unwrap_or(*first);
                let tail = chain.iter().max_by_key(along).copied().unwrap_or(*last);
                TargetingMode::Line {
                    orientation,
                    head,
                    tail,
                }
            }
        }
    }

    /// Cells worth shooting next in this mode, excluding busy and
    /// off-board cells. Empty in `Hunt`.
    pub fn candidates(&self, view: &TargetView<'_>) -> Vec<Coordinate> {
        let mut out = Vec::new();
        match *self {
            TargetingMode::Hunt => {}
            TargetingMode::SingleHit(hit) => {
                for (dx, dy) in NEIGHBOURS {
                    push_open(&mut out, view, hit.offset(dx, dy));
                }
            }
            TargetingMode::Line {
                orientation,
                head,
                tail,
            } => {
                let (dx, dy) = orientation.step();
                for end in [head, tail] {
                    push_open(&mut out, view, end.offset(dx, dy));
                    push_open(&mut out, view, end.offset(-dx, -dy));
                }
            }
        }
        out
    }
}

fn push_open(out: &mut Vec<Coordinate>, view: &TargetView<'_>, c: Coordinate) {
    if view.is_open(c) && !out.contains(&c) {
        out.push(c);
    }
}

/// Pick a random open cell. Draws at random first and falls back to a scan
/// when the board is nearly full. Returns `None` only if every cell is busy.
pub fn hunt<R: Rng + ?Sized>(view: &TargetView<'_>, rng: &mut R) -> Option<Coordinate> {
    let n = view.size();
    if n == 0 {
        return None;
    }
    for _ in 0..n * n * 4 {
        let c = Coordinate::new(rng.random_range(0..n as i32), rng.random_range(0..n as i32));
        if view.is_open(c) {
            return Some(c);
        }
    }
    let open: Vec<Coordinate> = (0..n as i32)
        .flat_map(|x| (0..n as i32).map(move |y| Coordinate::new(x, y)))
        .filter(|c| view.is_open(*c))
        .collect();
    open.choose(rng).copied()
}

/// Choose the next shot against the board described by `view`.
///
/// With unresolved hits the shot is drawn uniformly from the open cells
/// that extend them; otherwise, or if none are open, the search hunts.
pub fn select_target<R: Rng + ?Sized>(view: &TargetView<'_>, rng: &mut R) -> Option<Coordinate> {
    let mode = TargetingMode::from_chain(view.last_hit_chain());
    let candidates = mode.candidates(view);
    if let Some(c) = candidates.choose(rng) {
        return Some(*c);
    }
    if mode != TargetingMode::Hunt {
        log::warn!("no open cell extends {:?}, hunting instead", mode);
    }
    hunt(view, rng)
}
