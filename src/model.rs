use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;

/// Integer code of an empty slot in tube snapshots.
pub const EMPTY: usize = 0;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Slot {
    #[default]
    Empty,
    Drop { color: usize },
}
impl Slot {
    /// Builds a slot from its integer code, `0` being empty.
    pub fn from_code(code: usize) -> Self {
        if code == EMPTY {
            Slot::Empty
        } else {
            Slot::Drop { color: code }
        }
    }

    pub fn code(&self) -> usize {
        match self {
            Slot::Empty => EMPTY,
            Slot::Drop { color } => *color,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn color(&self) -> Option<usize> {
        match self {
            Slot::Drop { color } => Some(*color),
            Slot::Empty => None,
        }
    }

    /// Parses a label such as "A", "Z" or "AA" (Excel-style, A = color 1).
    /// "." is an empty slot.
    pub fn from_label(label: &str) -> Option<Self> {
        let s = label.trim();
        if s == "." {
            return Some(Slot::Empty);
        }
        let mut acc: usize = 0;
        for ch in s.chars() {
            if !ch.is_ascii_alphabetic() {
                return None;
            }
            let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
            acc = acc.checked_mul(26)?.checked_add(digit)?;
        }
        if acc == 0 {
            return None;
        }
        Some(Slot::Drop { color: acc })
    }

    pub fn label(&self) -> String {
        let mut id = match self {
            Slot::Empty => return ".".to_string(),
            Slot::Drop { color } => *color,
        };
        let mut chars = Vec::new();
        while id > 0 {
            chars.push((b'A' + ((id - 1) % 26) as u8) as char);
            id = (id - 1) / 26;
        }
        chars.iter().rev().collect()
    }
}

/// One container of fixed capacity. Index 0 is the bottom slot; filled slots
/// always form a contiguous run from the bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tube {
    slots: Vec<Slot>,
}
impl Tube {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; capacity],
        }
    }

    /// Builds a tube from bottom-first color codes, `0` meaning empty.
    /// Rejects codes that would leave a drop above an empty slot.
    pub fn from_codes(codes: &[usize]) -> Result<Self, PuzzleError> {
        let slots: Vec<Slot> = codes.iter().map(|&c| Slot::from_code(c)).collect();
        Self::from_slots(slots, || format!("{codes:?}"))
    }

    fn from_slots(slots: Vec<Slot>, input: impl FnOnce() -> String) -> Result<Self, PuzzleError> {
        let filled = slots.iter().take_while(|s| !s.is_empty()).count();
        if slots[filled..].iter().any(|s| !s.is_empty()) {
            return Err(PuzzleError::ParseTube {
                input: input(),
                reason: "drop above an empty slot".to_string(),
            });
        }
        Ok(Self { slots })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_empty())
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| !s.is_empty())
    }

    pub fn filled_amount(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    pub fn free_space(&self) -> usize {
        self.capacity() - self.filled_amount()
    }

    /// Index of the highest drop, `None` when empty.
    pub fn top_index(&self) -> Option<usize> {
        self.slots.iter().rposition(|s| !s.is_empty())
    }

    pub fn top_color(&self) -> Option<usize> {
        self.top_index().and_then(|i| self.slots[i].color())
    }

    /// Lowest empty slot, `None` when full.
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_empty())
    }

    /// A drop may land on an empty tube or on a matching top color, never on a full tube.
    pub fn can_receive(&self, color: usize) -> bool {
        if self.is_full() {
            return false;
        }
        match self.top_color() {
            None => true,
            Some(top) => top == color,
        }
    }

    /// Removes the top drop and returns its color.
    pub fn pour_out(&mut self) -> Option<usize> {
        let idx = self.top_index()?;
        let color = self.slots[idx].color();
        self.slots[idx] = Slot::Empty;
        color
    }

    /// Places a drop into the lowest empty slot. Returns false when full
    /// or when `color` is the empty code.
    pub fn pour_in(&mut self, color: usize) -> bool {
        if color == EMPTY {
            return false;
        }
        match self.first_empty_slot() {
            Some(idx) => {
                self.slots[idx] = Slot::Drop { color };
                true
            }
            None => false,
        }
    }

    /// Number of same-colored drops at the top. `[A, B, B, B]` gives 3.
    pub fn count_top_run(&self) -> usize {
        let Some(top) = self.top_index() else {
            return 0;
        };
        let color = self.slots[top];
        self.slots[..=top]
            .iter()
            .rev()
            .take_while(|s| **s == color)
            .count()
    }

    /// Removes up to `count` drops from the top, in pop order.
    pub fn pop_run(&mut self, count: usize) -> Vec<usize> {
        let mut popped = Vec::with_capacity(count);
        for _ in 0..count {
            match self.pour_out() {
                Some(color) => popped.push(color),
                None => break,
            }
        }
        popped
    }

    /// Pours up to `count` drops of `color`, returning how many fit.
    pub fn push_run(&mut self, color: usize, count: usize) -> usize {
        let mut moved = 0;
        while moved < count && self.pour_in(color) {
            moved += 1;
        }
        moved
    }

    /// Non-empty and every slot holds the same color.
    pub fn is_monochrome(&self) -> bool {
        match self.slots.first() {
            Some(Slot::Drop { color }) => self
                .slots
                .iter()
                .all(|s| s.color() == Some(*color)),
            _ => false,
        }
    }

    /// Bottom-first integer codes, independent of the tube.
    pub fn snapshot(&self) -> Vec<usize> {
        self.slots.iter().map(Slot::code).collect()
    }
}

impl fmt::Display for Tube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.slots.iter().map(Slot::label).collect();
        let separator = if labels.iter().any(|l| l.len() > 1) { "," } else { "" };
        write!(f, "{}", labels.join(separator))
    }
}

impl FromStr for Tube {
    type Err = PuzzleError;

    /// Bottom-first labels: "AB.." or "AA,B,.,." when labels exceed one letter.
    fn from_str(repr: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<String> = if repr.contains(',') {
            repr.split(',').map(str::to_string).collect()
        } else {
            repr.trim().chars().map(|c| c.to_string()).collect()
        };
        let mut slots = Vec::with_capacity(tokens.len());
        for token in &tokens {
            let slot = Slot::from_label(token).ok_or_else(|| PuzzleError::ParseTube {
                input: repr.to_string(),
                reason: format!("unknown label {:?}", token.trim()),
            })?;
            slots.push(slot);
        }
        Self::from_slots(slots, || repr.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tube(codes: &[usize]) -> Tube {
        Tube::from_codes(codes).unwrap()
    }

    #[test]
    fn new_tube_is_empty() {
        let t = Tube::new(4);
        assert!(t.is_empty());
        assert!(!t.is_full());
        assert_eq!(t.top_index(), None);
        assert_eq!(t.top_color(), None);
        assert_eq!(t.first_empty_slot(), Some(0));
        assert_eq!(t.snapshot(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn zero_capacity_is_both_empty_and_full() {
        let mut t = Tube::new(0);
        assert!(t.is_empty());
        assert!(t.is_full());
        assert!(!t.can_receive(1));
        assert!(!t.pour_in(1));
        assert_eq!(t.pour_out(), None);
        assert_eq!(t.count_top_run(), 0);
        assert!(!t.is_monochrome());
    }

    #[test]
    fn top_run_counts_matching_drops() {
        assert_eq!(tube(&[2, 1, 1, 1]).count_top_run(), 3);
        assert_eq!(tube(&[2, 2, 0, 0]).count_top_run(), 2);
        assert_eq!(tube(&[1, 2, 1, 0]).count_top_run(), 1);
        assert_eq!(Tube::new(3).count_top_run(), 0);
    }

    #[test]
    fn can_receive_rules() {
        assert!(Tube::new(2).can_receive(5));
        assert!(tube(&[1, 0]).can_receive(1));
        assert!(!tube(&[1, 0]).can_receive(2));
        assert!(!tube(&[1, 1]).can_receive(1));
    }

    #[test]
    fn pour_in_and_out_keep_gravity() {
        let mut t = Tube::new(3);
        assert!(t.pour_in(2));
        assert!(t.pour_in(3));
        assert_eq!(t.snapshot(), vec![2, 3, 0]);
        assert_eq!(t.pour_out(), Some(3));
        assert_eq!(t.snapshot(), vec![2, 0, 0]);
        assert!(t.pour_in(1));
        assert!(t.pour_in(1));
        assert!(!t.pour_in(1));
        assert_eq!(t.snapshot(), vec![2, 1, 1]);
    }

    #[test]
    fn pour_in_rejects_empty_code() {
        let mut t = Tube::new(2);
        assert!(!t.pour_in(EMPTY));
        assert!(t.is_empty());
    }

    #[test]
    fn pop_run_stops_when_empty() {
        let mut t = tube(&[3, 1, 1, 1]);
        assert_eq!(t.pop_run(2), vec![1, 1]);
        assert_eq!(t.snapshot(), vec![3, 1, 0, 0]);
        assert_eq!(t.pop_run(5), vec![1, 3]);
        assert!(t.is_empty());
    }

    #[test]
    fn push_run_stops_when_full() {
        let mut t = tube(&[4, 0, 0]);
        assert_eq!(t.push_run(4, 5), 2);
        assert_eq!(t.snapshot(), vec![4, 4, 4]);
        assert_eq!(t.push_run(4, 1), 0);
    }

    #[test]
    fn monochrome_requires_every_slot() {
        assert!(tube(&[2, 2, 2]).is_monochrome());
        assert!(!tube(&[2, 2, 0]).is_monochrome());
        assert!(!tube(&[2, 1, 2]).is_monochrome());
        assert!(!Tube::new(3).is_monochrome());
    }

    #[test]
    fn snapshot_is_independent() {
        let mut t = tube(&[1, 0]);
        let snap = t.snapshot();
        t.pour_in(1);
        assert_eq!(snap, vec![1, 0]);
    }

    #[test]
    fn from_codes_rejects_floating_drops() {
        assert!(Tube::from_codes(&[0, 1]).is_err());
        assert!(Tube::from_codes(&[1, 0, 2]).is_err());
    }

    #[test]
    fn labels_are_excel_style() {
        assert_eq!(Slot::Drop { color: 1 }.label(), "A");
        assert_eq!(Slot::Drop { color: 26 }.label(), "Z");
        assert_eq!(Slot::Drop { color: 27 }.label(), "AA");
        assert_eq!(Slot::Empty.label(), ".");
        assert_eq!(Slot::from_label("ab"), Some(Slot::Drop { color: 28 }));
        assert_eq!(Slot::from_label("?"), None);
        assert_eq!(Slot::from_label(""), None);
    }

    #[test]
    fn text_form_parses_and_prints() {
        let t: Tube = "AAB.".parse().unwrap();
        assert_eq!(t.snapshot(), vec![1, 1, 2, 0]);
        assert_eq!(t.to_string(), "AAB.");

        let wide = Tube::from_codes(&[27, 1, 0]).unwrap();
        assert_eq!(wide.to_string(), "AA,A,.");
        assert_eq!("AA,A,.".parse::<Tube>().unwrap(), wide);
    }

    #[test]
    fn text_form_rejects_bad_input() {
        assert!(matches!(
            "A.A".parse::<Tube>(),
            Err(PuzzleError::ParseTube { .. })
        ));
        assert!("A1".parse::<Tube>().is_err());
    }
}
