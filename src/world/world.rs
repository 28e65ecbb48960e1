use crate::ant::Ant;
use crate::coords::Coordinate;
use crate::direction::Direction;
use crate::error::{BotError, Result};
use crate::world::parser::{GameObject, ObjectKind};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, trace};

/// Local belief state for one game on a `width` x `height` torus.
///
/// Walls and homes accumulate for the whole game. Food and enemies only hold
/// what the latest `gamestate` reported. Ants are keyed by position; the
/// ordered map keeps planning order stable for a given seed.
#[derive(Clone, Debug)]
pub struct World {
    width: i32,
    height: i32,
    homes: BTreeSet<Coordinate>,
    walls: HashSet<Coordinate>,
    food: HashSet<Coordinate>,
    enemies: HashSet<Coordinate>,
    ants: BTreeMap<Coordinate, Ant>,
    round: u64,
}

impl World {
    /// Create an empty world
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(BotError::InvalidMap(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            homes: BTreeSet::new(),
            walls: HashSet::new(),
            food: HashSet::new(),
            enemies: HashSet::new(),
            ants: BTreeMap::new(),
            round: 0,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Rounds started since the game began
    #[inline]
    pub fn round(&self) -> u64 {
        self.round
    }

    #[inline]
    pub fn normalize(&self, c: Coordinate) -> Coordinate {
        c.normalize(self.width, self.height)
    }

    /// Neighbour of `c` in `dir`, wrapped onto the map
    #[inline]
    pub fn step(&self, c: Coordinate, dir: Direction) -> Coordinate {
        self.normalize(c.apply_direction(dir))
    }

    /// Start processing a new `gamestate`
    pub fn begin_round(&mut self) {
        self.round += 1;
        self.food.clear();
        self.enemies.clear();
        for ant in self.ants.values_mut() {
            ant.set_confirmed(false);
        }
    }

    pub fn report_wall(&mut self, c: Coordinate) {
        let c = self.normalize(c);
        self.walls.insert(c);
    }

    pub fn report_food(&mut self, c: Coordinate) {
        let c = self.normalize(c);
        self.food.insert(c);
    }

    pub fn report_enemy(&mut self, c: Coordinate) {
        let c = self.normalize(c);
        self.enemies.insert(c);
    }

    pub fn report_home(&mut self, c: Coordinate) {
        let c = self.normalize(c);
        self.homes.insert(c);
    }

    /// Register a new ant at `c`, or confirm the one already there
    pub fn report_living_ant(&mut self, c: Coordinate) {
        let c = self.normalize(c);
        self.ants
            .entry(c)
            .and_modify(|ant| ant.set_confirmed(true))
            .or_insert_with(|| {
                trace!(pos = %c, "new ant registered");
                Ant::new()
            });
    }

    pub fn report_dead_ant(&mut self, c: Coordinate) {
        let c = self.normalize(c);
        if self.ants.remove(&c).is_some() {
            debug!(pos = %c, "ant died");
        }
    }

    /// Drop every ant the round did not confirm; returns how many went missing
    pub fn end_round(&mut self) -> usize {
        let before = self.ants.len();
        self.ants.retain(|_, ant| ant.is_confirmed());
        before - self.ants.len()
    }

    /// Route one decoded game object to the matching report
    pub fn apply(&mut self, obj: &GameObject) {
        match obj.kind {
            ObjectKind::LivingAnt if obj.is_mine() => self.report_living_ant(obj.pos),
            ObjectKind::LivingAnt => self.report_enemy(obj.pos),
            ObjectKind::DeadAnt if obj.is_mine() => self.report_dead_ant(obj.pos),
            ObjectKind::Hill if obj.is_mine() => self.report_home(obj.pos),
            ObjectKind::DeadAnt | ObjectKind::Hill => {}
            ObjectKind::Wall => self.report_wall(obj.pos),
            ObjectKind::Food => self.report_food(obj.pos),
        }
    }

    #[inline]
    pub fn is_home(&self, c: Coordinate) -> bool {
        self.homes.contains(&c)
    }

    #[inline]
    pub fn is_wall(&self, c: Coordinate) -> bool {
        self.walls.contains(&c)
    }

    #[inline]
    pub fn has_food(&self, c: Coordinate) -> bool {
        self.food.contains(&c)
    }

    #[inline]
    pub fn has_enemy(&self, c: Coordinate) -> bool {
        self.enemies.contains(&c)
    }

    pub fn homes(&self) -> &BTreeSet<Coordinate> {
        &self.homes
    }

    pub fn walls(&self) -> &HashSet<Coordinate> {
        &self.walls
    }

    pub fn food(&self) -> &HashSet<Coordinate> {
        &self.food
    }

    pub fn enemies(&self) -> &HashSet<Coordinate> {
        &self.enemies
    }

    pub fn ant(&self, c: Coordinate) -> Option<&Ant> {
        self.ants.get(&c)
    }

    pub fn ants(&self) -> impl Iterator<Item = (&Coordinate, &Ant)> {
        self.ants.iter()
    }

    pub fn ant_count(&self) -> usize {
        self.ants.len()
    }

    /// Closest home tile to `c` and its Manhattan distance; ties go to the
    /// smallest coordinate
    pub fn nearest_home(&self, c: Coordinate) -> Option<(Coordinate, u32)> {
        let home = c.closest(&self.homes)?;
        Some((home, c.manhattan(home)))
    }

    /// Move the registry out for planning; pair with `restore_ants`
    pub(crate) fn take_ants(&mut self) -> BTreeMap<Coordinate, Ant> {
        std::mem::take(&mut self.ants)
    }

    /// Put the registry back, keyed by planned destinations
    pub(crate) fn restore_ants(&mut self, ants: BTreeMap<Coordinate, Ant>) {
        debug_assert!(self.ants.is_empty());
        self.ants = ants;
    }
}
