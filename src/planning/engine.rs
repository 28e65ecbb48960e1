use crate::ant::Ant;
use crate::coords::Coordinate;
use crate::direction::Direction;
use crate::planning::collision::{Occupancy, StepPurpose};
use crate::world::World;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Chance that an exploring ant keeps its last heading
pub const DEFAULT_PERSISTENCE: f64 = 0.5;

/// One move that goes into the outbound batch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedMove {
    pub from: Coordinate,
    pub to: Coordinate,
    pub direction: Direction,
}

/// Result of one planning pass
#[derive(Clone, Debug, Default)]
pub struct TurnPlan {
    /// Ants that were given a real move, in planning order
    pub moves: Vec<PlannedMove>,
    /// Carrying ants blocked on their way home
    pub stalled: usize,
    /// Exploring ants with no free neighbour
    pub stuck: usize,
    /// Ants that stepped onto food this turn
    pub pickups: usize,
    /// Ants that reached home with their food this turn
    pub deliveries: usize,
}

impl TurnPlan {
    /// No ant was given a real move
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// One-step-ahead planner: retrace home with food, grab adjacent food,
/// otherwise wander.
#[derive(Clone, Copy, Debug)]
pub struct MovePlanner {
    persistence: f64,
}

impl Default for MovePlanner {
    fn default() -> Self {
        Self::new(DEFAULT_PERSISTENCE)
    }
}

/// Outcome of a single ant's decision, before it is committed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Decision {
    Return { delivered: bool },
    Stall,
    PickUp,
    Explore,
    Stuck,
}

impl MovePlanner {
    /// `persistence` is clamped to `[0, 1]`
    pub fn new(persistence: f64) -> Self {
        Self {
            persistence: persistence.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn persistence(&self) -> f64 {
        self.persistence
    }

    /// Decide a move for every ant and re-key the registry by destination.
    ///
    /// Must run after `World::end_round`.
    pub fn plan(&self, world: &mut World, rng: &mut fastrand::Rng) -> TurnPlan {
        let ants = world.take_ants();
        let mut occupancy = Occupancy::new(ants.keys().copied());
        let mut placed: BTreeMap<Coordinate, Ant> = BTreeMap::new();
        let mut plan = TurnPlan::default();

        for (pos, mut ant) in ants {
            // food is banked at any own hill
            if ant.is_carrying_food() && world.is_home(pos) {
                plan.deliveries += 1;
            }
            let (dir, decision) = self.decide(world, &occupancy, pos, &mut ant, rng);
            let dest = world.step(pos, dir);
            occupancy.commit(pos, dest);
            ant.set_current_move(dir);

            match decision {
                Decision::Return { delivered: true } => plan.deliveries += 1,
                Decision::Stall => plan.stalled += 1,
                Decision::PickUp => plan.pickups += 1,
                Decision::Stuck => plan.stuck += 1,
                Decision::Return { .. } | Decision::Explore => {}
            }
            trace!(from = %pos, to = %dest, dir = %dir, ?decision, "ant planned");

            if dir.is_defined() {
                plan.moves.push(PlannedMove {
                    from: pos,
                    to: dest,
                    direction: dir,
                });
            }
            placed.insert(dest, ant);
        }

        world.restore_ants(placed);
        plan
    }

    fn decide(
        &self,
        world: &World,
        occupancy: &Occupancy,
        pos: Coordinate,
        ant: &mut Ant,
        rng: &mut fastrand::Rng,
    ) -> (Direction, Decision) {
        if ant.is_carrying_food() {
            if !world.is_home(pos) {
                if let Some(back) = ant.take_return_step() {
                    let dest = world.step(pos, back);
                    if !occupancy.is_free(world, dest, StepPurpose::Return) {
                        ant.undo_return_step(back);
                        return (Direction::Undefined, Decision::Stall);
                    }
                    let delivered = ant.history().is_empty();
                    if delivered {
                        ant.deliver();
                    }
                    return (back, Decision::Return { delivered });
                }
                if let Some((home, dist)) = world.nearest_home(pos) {
                    debug!(pos = %pos, home = %home, dist, "lost the way home, dropping food");
                }
            }
            ant.drop_food();
        }

        for dir in Direction::ALL {
            let dest = world.step(pos, dir);
            if world.has_food(dest) && occupancy.is_free(world, dest, StepPurpose::Explore) {
                ant.pick_up_food(dir);
                return (dir, Decision::PickUp);
            }
        }

        let mut remaining = Direction::ALL.to_vec();
        let first = match ant.last_move() {
            Some(last) if rng.f64() < self.persistence => last,
            _ => remaining[rng.usize(..remaining.len())],
        };
        remaining.retain(|&d| d != first);

        let mut candidate = first;
        loop {
            let dest = world.step(pos, candidate);
            if occupancy.is_free(world, dest, StepPurpose::Explore) {
                ant.record_step(candidate);
                return (candidate, Decision::Explore);
            }
            if remaining.is_empty() {
                return (Direction::Undefined, Decision::Stuck);
            }
            candidate = remaining.swap_remove(rng.usize(..remaining.len()));
        }
    }
}
