//! Action oracle
//!
//! Raw device polling lives outside the core. The controller only asks
//! whether a named action is held, or was pressed this frame.

use serde::{Deserialize, Serialize};

/// Named gameplay actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Dash,
    /// Fall through one-way platforms while held
    Drop,
    Restart,
    Skip,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Dash,
        Action::Drop,
        Action::Restart,
        Action::Skip,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeft => "MoveLeft",
            Action::MoveRight => "MoveRight",
            Action::Jump => "Jump",
            Action::Dash => "Dash",
            Action::Drop => "Drop",
            Action::Restart => "Restart",
            Action::Skip => "Skip",
        }
    }
}

/// Read-only view of player input for one tick
pub trait InputOracle {
    /// Action is currently held
    fn is_pressed(&self, action: Action) -> bool;
    /// Action went down this frame
    fn just_pressed(&self, action: Action) -> bool;
}

/// Held/pressed action sets fed by whatever polls the device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: u8,
    pressed: u8,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an action as down. Registers an edge only if it was up.
    pub fn press(&mut self, action: Action) {
        if self.held & action.bit() == 0 {
            self.pressed |= action.bit();
        }
        self.held |= action.bit();
    }

    pub fn release(&mut self, action: Action) {
        self.held &= !action.bit();
    }

    /// Replace the held set wholesale, deriving edges from the previous one
    pub fn set_held(&mut self, actions: &[Action]) {
        let next = actions.iter().fold(0u8, |acc, a| acc | a.bit());
        self.pressed |= next & !self.held;
        self.held = next;
    }

    /// Clear one-shot presses after the frame has consumed them
    pub fn end_frame(&mut self) {
        self.pressed = 0;
    }

    /// Copy held state from another oracle, keeping presses not yet consumed
    pub fn latch<I: InputOracle + ?Sized>(&mut self, source: &I) {
        for action in Action::ALL {
            if source.is_pressed(action) {
                self.held |= action.bit();
            } else {
                self.held &= !action.bit();
            }
            if source.just_pressed(action) {
                self.pressed |= action.bit();
            }
        }
    }
}

impl InputOracle for InputState {
    fn is_pressed(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    fn just_pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }
}
