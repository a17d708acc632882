use std::fmt;

use macroquad::prelude::{debug, info};
use rand::Rng;

use crate::config::PuzzleParams;
use crate::error::PuzzleError;
use crate::layout::generate_layout;
use crate::model::Tube;

/// One executed pour: `count` drops went from tube `from` to tube `to`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: usize,
    pub to: usize,
    pub count: usize,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.count)
    }
}

/// Game state of one session: the tubes and every move made on them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleEngine {
    tube_count: usize,
    capacity: usize,
    color_count: usize,
    tubes: Vec<Tube>,
    history: Vec<MoveRecord>,
}

impl PuzzleEngine {
    /// Builds `tube_count` tubes and deals a shuffled layout using the thread RNG.
    pub fn new(tube_count: usize, capacity: usize, color_count: usize) -> Result<Self, PuzzleError> {
        Self::with_rng(tube_count, capacity, color_count, &mut rand::rng())
    }

    pub fn from_params(params: PuzzleParams) -> Result<Self, PuzzleError> {
        Self::new(params.tube_count, params.capacity, params.color_count)
    }

    pub fn with_rng<R: Rng + ?Sized>(
        tube_count: usize,
        capacity: usize,
        color_count: usize,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        PuzzleParams::new(tube_count, capacity, color_count).validate()?;
        let tubes = generate_layout(tube_count, capacity, color_count, rng);
        info!(
            "New puzzle: {} tubes of {} with {} colors",
            tube_count, capacity, color_count
        );
        Ok(Self {
            tube_count,
            capacity,
            color_count,
            tubes,
            history: Vec::new(),
        })
    }

    /// Starts from a given arrangement. Tubes must share one capacity and hold
    /// exactly `capacity` drops of every color in `1..=color_count`.
    pub fn from_tubes(color_count: usize, tubes: Vec<Tube>) -> Result<Self, PuzzleError> {
        let tube_count = tubes.len();
        let capacity = tubes.first().map_or(0, Tube::capacity);
        PuzzleParams::new(tube_count, capacity, color_count).validate()?;

        let mut totals = vec![0usize; color_count + 1];
        for (index, tube) in tubes.iter().enumerate() {
            if tube.capacity() != capacity {
                return Err(PuzzleError::CapacityMismatch {
                    index,
                    expected: capacity,
                    found: tube.capacity(),
                });
            }
            for color in tube.slots().iter().filter_map(|s| s.color()) {
                if color > color_count {
                    return Err(PuzzleError::UnknownColor { color, color_count });
                }
                totals[color] += 1;
            }
        }
        if let Some((color, &found)) = totals
            .iter()
            .enumerate()
            .skip(1)
            .find(|&(_, &n)| n != capacity)
        {
            return Err(PuzzleError::ColorCountMismatch {
                color,
                expected: capacity,
                found,
            });
        }

        Ok(Self {
            tube_count,
            capacity,
            color_count,
            tubes,
            history: Vec::new(),
        })
    }

    pub fn tube_count(&self) -> usize {
        self.tube_count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn color_count(&self) -> usize {
        self.color_count
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Per-tube slot codes in tube order, for renderers.
    pub fn state(&self) -> Vec<Vec<usize>> {
        self.tubes.iter().map(Tube::snapshot).collect()
    }

    pub fn can_move(&self, from: usize, to: usize) -> bool {
        if from == to || from >= self.tube_count || to >= self.tube_count {
            return false;
        }
        match self.tubes[from].top_color() {
            Some(color) => self.tubes[to].can_receive(color),
            None => false,
        }
    }

    /// Pours the whole top run of `from` into `to`, or as much as fits.
    /// Returns the recorded move, or `None` when the move is not legal.
    pub fn apply_move(&mut self, from: usize, to: usize) -> Option<MoveRecord> {
        if !self.can_move(from, to) {
            return None;
        }
        let run = self.tubes[from].count_top_run();
        let color = self.tubes[from].top_color()?;

        let mut count = 0;
        while count < run && self.tubes[to].can_receive(color) {
            self.tubes[from].pour_out();
            self.tubes[to].pour_in(color);
            count += 1;
        }

        let record = MoveRecord { from, to, count };
        debug!("Move {}: {}", self.history.len() + 1, record);
        self.history.push(record);
        Some(record)
    }

    /// Reverts the last move. Returns it, or `None` with an empty history.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        let colors = self.tubes[record.to].pop_run(record.count);
        for color in colors {
            self.tubes[record.from].pour_in(color);
        }
        debug!("Undo: {}", record);
        Some(record)
    }

    /// Undoes every move, back to the dealt layout.
    pub fn reset(&mut self) {
        while self.undo().is_some() {}
    }

    /// Every tube is empty or monochrome, with exactly `color_count` monochrome ones.
    pub fn is_win(&self) -> bool {
        let mut mono_count = 0;
        let mut empty_count = 0;
        for tube in &self.tubes {
            if tube.is_empty() {
                empty_count += 1;
            } else if tube.is_monochrome() {
                mono_count += 1;
            } else {
                return false;
            }
        }
        mono_count == self.color_count && empty_count == self.tube_count - self.color_count
    }
}

impl fmt::Display for PuzzleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tube) in self.tubes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{tube}")?;
        }
        Ok(())
    }
}
