use crate::coords::Coordinate;
use crate::world::World;
use std::collections::HashSet;

/// Why an ant wants to step somewhere
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepPurpose {
    /// Looking for food: visible enemies block the tile
    Explore,
    /// Walking food home: enemy tiles are accepted
    Return,
}

/// Occupancy for one planning pass.
///
/// `pending` holds the tiles of ants that have not been planned yet,
/// `claimed` the destinations already handed out this pass.
#[derive(Debug, Default)]
pub struct Occupancy {
    pending: HashSet<Coordinate>,
    claimed: HashSet<Coordinate>,
}

impl Occupancy {
    /// Snapshot the positions of every ant about to be planned
    pub fn new<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        Self {
            pending: positions.into_iter().collect(),
            claimed: HashSet::new(),
        }
    }

    /// Obstruction rule for a normalised destination
    pub fn is_free(&self, world: &World, dest: Coordinate, purpose: StepPurpose) -> bool {
        if world.is_wall(dest) || self.pending.contains(&dest) || self.claimed.contains(&dest) {
            return false;
        }
        match purpose {
            StepPurpose::Explore => !world.has_enemy(dest),
            StepPurpose::Return => true,
        }
    }

    /// Finalise an ant's move: vacate `from`, claim `to`.
    /// Staying put is `from == to`.
    pub fn commit(&mut self, from: Coordinate, to: Coordinate) {
        self.pending.remove(&from);
        let fresh = self.claimed.insert(to);
        debug_assert!(fresh, "destination {} claimed twice", to);
    }

    #[inline]
    pub fn is_claimed(&self, c: Coordinate) -> bool {
        self.claimed.contains(&c)
    }

    /// Ants still waiting for a move
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
