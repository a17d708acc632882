use crate::error::PuzzleError;

/// Upper bounds of the new-game form. Three rows of seven tubes fit the window.
pub const MAX_TUBES: usize = 21;
pub const MAX_CAPACITY: usize = 8;
pub const MAX_COLORS: usize = 19;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamField {
    Tubes,
    Capacity,
    Colors,
}

/// Construction parameters of a puzzle: N tubes of capacity V holding M colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PuzzleParams {
    pub tube_count: usize,
    pub capacity: usize,
    pub color_count: usize,
}

impl Default for PuzzleParams {
    fn default() -> Self {
        Self {
            tube_count: 5,
            capacity: 4,
            color_count: 3,
        }
    }
}

impl PuzzleParams {
    pub fn new(tube_count: usize, capacity: usize, color_count: usize) -> Self {
        Self {
            tube_count,
            capacity,
            color_count,
        }
    }

    /// Requires at least 2 tubes, capacity of at least 1 and `1 <= colors < tubes`.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        let ok = self.tube_count >= 2
            && self.capacity >= 1
            && self.color_count >= 1
            && self.color_count < self.tube_count;
        if ok {
            Ok(())
        } else {
            Err(PuzzleError::InvalidParameters {
                tube_count: self.tube_count,
                capacity: self.capacity,
                color_count: self.color_count,
            })
        }
    }

    pub fn get(&self, field: ParamField) -> usize {
        match field {
            ParamField::Tubes => self.tube_count,
            ParamField::Capacity => self.capacity,
            ParamField::Colors => self.color_count,
        }
    }

    /// Steps one field by `delta`, clamped to `1..=max` for that field.
    /// Does not validate the combination.
    pub fn adjust(&mut self, field: ParamField, delta: isize) {
        let (value, max) = match field {
            ParamField::Tubes => (&mut self.tube_count, MAX_TUBES),
            ParamField::Capacity => (&mut self.capacity, MAX_CAPACITY),
            ParamField::Colors => (&mut self.color_count, MAX_COLORS),
        };
        *value = value.saturating_add_signed(delta).clamp(1, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PuzzleParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        assert!(PuzzleParams::new(1, 4, 1).validate().is_err());
        assert!(PuzzleParams::new(3, 0, 1).validate().is_err());
        assert!(PuzzleParams::new(3, 2, 0).validate().is_err());
        assert!(PuzzleParams::new(3, 2, 3).validate().is_err());
        assert!(PuzzleParams::new(2, 1, 1).validate().is_ok());
    }

    #[test]
    fn invalid_parameters_carry_values() {
        let err = PuzzleParams::new(4, 2, 4).validate().unwrap_err();
        assert_eq!(
            err,
            PuzzleError::InvalidParameters {
                tube_count: 4,
                capacity: 2,
                color_count: 4
            }
        );
    }

    #[test]
    fn adjust_clamps_to_form_bounds() {
        let mut params = PuzzleParams::default();
        params.adjust(ParamField::Capacity, -10);
        assert_eq!(params.capacity, 1);
        params.adjust(ParamField::Tubes, 100);
        assert_eq!(params.tube_count, MAX_TUBES);
        params.adjust(ParamField::Colors, 1);
        assert_eq!(params.get(ParamField::Colors), 4);
    }
}
