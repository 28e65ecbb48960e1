use crate::direction::Direction;

/// Where an ant is in its carry cycle.
///
/// ```text
/// Idle --explore--> Exploring --food adjacent--> Carrying --pop--> Returning
///   ^                                                                  |
///   +-------------- history empty on arrival / dropped at home --------+
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AntState {
    #[default]
    Idle,
    Exploring,
    Carrying,
    Returning,
}

/// One of our living ants. The position is the key it is stored under in the world.
#[derive(Clone, Debug)]
pub struct Ant {
    state: AntState,
    history: Vec<Direction>,
    confirmed: bool,
    current_move: Direction,
}

impl Default for Ant {
    fn default() -> Self {
        Self::new()
    }
}

impl Ant {
    /// A freshly reported ant, confirmed for the current round
    pub fn new() -> Self {
        Self {
            state: AntState::Idle,
            history: Vec::new(),
            confirmed: true,
            current_move: Direction::Undefined,
        }
    }

    #[inline]
    pub fn state(&self) -> AntState {
        self.state
    }

    #[inline]
    pub fn is_carrying_food(&self) -> bool {
        matches!(self.state, AntState::Carrying | AntState::Returning)
    }

    /// Moves taken since leaving home, oldest first
    #[inline]
    pub fn history(&self) -> &[Direction] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Direction> {
        self.history.last().copied()
    }

    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    #[inline]
    pub fn set_confirmed(&mut self, confirmed: bool) {
        self.confirmed = confirmed;
    }

    /// Move planned for the current turn
    #[inline]
    pub fn current_move(&self) -> Direction {
        self.current_move
    }

    #[inline]
    pub fn set_current_move(&mut self, dir: Direction) {
        self.current_move = dir;
    }

    /// Record an exploration step away from home
    pub fn record_step(&mut self, dir: Direction) {
        debug_assert!(dir.is_defined());
        debug_assert!(!self.is_carrying_food());
        self.history.push(dir);
        self.state = AntState::Exploring;
    }

    /// Step onto adjacent food; the step itself is the first one to retrace
    pub fn pick_up_food(&mut self, dir: Direction) {
        debug_assert!(dir.is_defined());
        self.history.push(dir);
        self.state = AntState::Carrying;
    }

    /// Pop the most recent step and return the move that undoes it
    pub fn take_return_step(&mut self) -> Option<Direction> {
        if !self.is_carrying_food() {
            return None;
        }
        let step = self.history.pop()?;
        self.state = AntState::Returning;
        Some(step.reverse())
    }

    /// Put back a return step that could not be taken this turn
    pub fn undo_return_step(&mut self, back: Direction) {
        self.history.push(back.reverse());
    }

    /// The last return step was taken: the ant is home with its food
    pub fn deliver(&mut self) {
        debug_assert!(self.history.is_empty());
        self.state = AntState::Idle;
    }

    /// Give up the current carry cycle and start over
    pub fn drop_food(&mut self) {
        self.history.clear();
        self.state = AntState::Idle;
    }
}
