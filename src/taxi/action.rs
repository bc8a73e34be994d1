//! Action catalog and per-stage action subsets

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::{ACTION_COUNT, ActionMask},
};

/// The set of actions available in the taxi world.
///
/// The declaration order is the catalog order; legality masks and path letters
/// (`A` for [`Action::South`] through `F` for [`Action::DropOff`]) follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    South,
    North,
    East,
    West,
    PickUp,
    DropOff,
}

impl Action {
    /// All actions in catalog order.
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::South,
        Action::North,
        Action::East,
        Action::West,
        Action::PickUp,
        Action::DropOff,
    ];

    /// Position of the action in the catalog.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up an action by catalog position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidActionIndex`] if `index >= 6`.
    pub fn from_index(index: usize) -> Result<Action> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidActionIndex { index })
    }

    /// Path letter of the action.
    pub fn to_letter(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Convert a path letter back into an action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidActionLetter`] if the letter is not between `A` and `F`.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxi_driver::taxi::Action;
    ///
    /// assert_eq!(Action::from_letter('E').unwrap(), Action::PickUp);
    /// assert!(Action::from_letter('G').is_err());
    /// ```
    pub fn from_letter(letter: char) -> Result<Action> {
        match letter {
            'A'..='F' => Action::from_index(letter as usize - 'A' as usize),
            _ => Err(Error::InvalidActionLetter { letter }),
        }
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Action::South => "SOUTH",
            Action::North => "NORTH",
            Action::East => "EAST",
            Action::West => "WEST",
            Action::PickUp => "PICK_UP",
            Action::DropOff => "DROP_OFF",
        }
    }

    /// Whether the action moves the taxi on the grid.
    pub fn is_move(self) -> bool {
        !matches!(self, Action::PickUp | Action::DropOff)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidActionName {
                name: s.to_string(),
                expected: "SOUTH, NORTH, EAST, WEST, PICK_UP, DROP_OFF".to_string(),
            })
    }
}

impl From<Action> for usize {
    fn from(action: Action) -> Self {
        action.index()
    }
}

/// The fixed action enumeration and the restrictions the search stages apply to it.
pub struct ActionCatalog;

impl ActionCatalog {
    /// Actions used while looking for the passenger (everything but drop-off).
    pub const PICKUP_STAGE: [Action; 5] = [
        Action::South,
        Action::North,
        Action::East,
        Action::West,
        Action::PickUp,
    ];

    /// Actions used while carrying the passenger (everything but pick-up).
    pub const DROP_STAGE: [Action; 5] = [
        Action::South,
        Action::North,
        Action::East,
        Action::West,
        Action::DropOff,
    ];

    /// The full catalog.
    pub fn all() -> &'static [Action] {
        &Action::ALL
    }

    pub fn pickup_actions() -> &'static [Action] {
        &Self::PICKUP_STAGE
    }

    pub fn drop_actions() -> &'static [Action] {
        &Self::DROP_STAGE
    }

    /// Legal catalog actions for a mask, in catalog order.
    pub fn legal_actions(mask: &ActionMask) -> Vec<Action> {
        mask.legal_actions()
    }

    /// Legal members of a stage subset.
    pub fn legal_members(subset: &[Action], mask: &ActionMask) -> Vec<Action> {
        mask.filter(subset)
    }

    /// Parse the actions out of a serialized node path such as `"1C2A3E"`.
    ///
    /// Depth digits are skipped; every other character must be an action letter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidActionLetter`] for any non-digit character outside `A..=F`.
    pub fn parse_path(path: &str) -> Result<Vec<Action>> {
        path.chars()
            .filter(|c| !c.is_ascii_digit())
            .map(Action::from_letter)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_follow_catalog_order() {
        let letters: String = Action::ALL.iter().map(|a| a.to_letter()).collect();
        assert_eq!(letters, "ABCDEF");
        for action in Action::ALL {
            assert_eq!(Action::from_letter(action.to_letter()).unwrap(), action);
        }
    }

    #[test]
    fn test_invalid_letter_rejected() {
        assert!(matches!(
            Action::from_letter('a'),
            Err(Error::InvalidActionLetter { letter: 'a' })
        ));
        assert!(Action::from_letter('Z').is_err());
    }

    #[test]
    fn test_human_readable_names() {
        assert_eq!("PICK_UP".parse::<Action>().unwrap(), Action::PickUp);
        assert_eq!("drop_off".parse::<Action>().unwrap(), Action::DropOff);
        assert_eq!(Action::West.to_string(), "WEST");
        assert!("JUMP".parse::<Action>().is_err());
    }

    #[test]
    fn test_stage_subsets_exclude_opposite_engagement() {
        assert!(!ActionCatalog::pickup_actions().contains(&Action::DropOff));
        assert!(ActionCatalog::pickup_actions().contains(&Action::PickUp));
        assert!(!ActionCatalog::drop_actions().contains(&Action::PickUp));
        assert!(ActionCatalog::drop_actions().contains(&Action::DropOff));
        assert_eq!(ActionCatalog::pickup_actions().len(), 5);
        assert_eq!(ActionCatalog::drop_actions().len(), 5);
    }

    #[test]
    fn test_legal_members_is_positional_filter() {
        let mask = ActionMask::from_bits([0, 1, 1, 0, 1, 0]);
        assert_eq!(
            ActionCatalog::legal_actions(&mask),
            vec![Action::North, Action::East, Action::PickUp]
        );
        assert_eq!(
            ActionCatalog::legal_members(ActionCatalog::drop_actions(), &mask),
            vec![Action::North, Action::East]
        );
    }

    #[test]
    fn test_parse_path_skips_depth_digits() {
        let actions = ActionCatalog::parse_path("1C2A3E").unwrap();
        assert_eq!(actions, vec![Action::East, Action::South, Action::PickUp]);
        let deep = ActionCatalog::parse_path("9B10D").unwrap();
        assert_eq!(deep, vec![Action::North, Action::West]);
        assert!(ActionCatalog::parse_path("").unwrap().is_empty());
        assert!(ActionCatalog::parse_path("1X").is_err());
    }
}
