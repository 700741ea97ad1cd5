//! Ordered level list with a menu scene and a progression cursor

use serde::{Deserialize, Serialize};

/// Scene a transition will end in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Level scene and its index in the sequence
    Level { name: String, index: usize },
    Menu(String),
}

impl Destination {
    pub fn scene_name(&self) -> &str {
        match self {
            Destination::Level { name, .. } => name,
            Destination::Menu(name) => name,
        }
    }
}

/// Level progression. The cursor only moves forward, except when the run
/// goes back to the menu, which rewinds it to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSequence {
    levels: Vec<String>,
    menu: String,
    next_level_index: usize,
}

impl LevelSequence {
    pub fn new(levels: Vec<String>, menu: impl Into<String>) -> Self {
        Self {
            levels,
            menu: menu.into(),
            next_level_index: 0,
        }
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn menu(&self) -> &str {
        &self.menu
    }

    pub fn next_level_index(&self) -> usize {
        self.next_level_index
    }

    /// True once every level has been handed out
    pub fn is_exhausted(&self) -> bool {
        self.next_level_index >= self.levels.len()
    }

    pub fn is_menu(&self, scene: &str) -> bool {
        scene == self.menu
    }

    /// True for scenes listed as playable levels
    pub fn is_level(&self, scene: &str) -> bool {
        self.levels.iter().any(|level| level == scene)
    }

    /// Where the next advance would go, without moving the cursor
    pub fn peek_next(&self) -> Destination {
        match self.levels.get(self.next_level_index) {
            Some(name) => Destination::Level {
                name: name.clone(),
                index: self.next_level_index,
            },
            None => Destination::Menu(self.menu.clone()),
        }
    }

    /// Hand out the next level and move the cursor past it, or route to the
    /// menu when the levels are exhausted
    pub fn advance(&mut self) -> Destination {
        let next = self.peek_next();
        match next {
            Destination::Level { .. } => self.next_level_index += 1,
            Destination::Menu(_) => self.next_level_index = 0,
        }
        next
    }

    /// Route to the menu and rewind the cursor
    pub fn to_menu(&mut self) -> Destination {
        self.next_level_index = 0;
        Destination::Menu(self.menu.clone())
    }
}
