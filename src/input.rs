use winit::keyboard::KeyCode;

use crate::config::Config;
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RotateLeft,
    RotateRight,
    MoveForward,
    MoveBackward,
}

/// Maps discrete key presses to fixed-size player steps.
#[derive(Debug, Clone)]
pub struct InputController {
    bindings: [(KeyCode, Command); 4],
    rotate_step: f32,
    move_step: f32,
}

impl InputController {
    pub fn new(config: &Config) -> Self {
        Self {
            bindings: [
                (KeyCode::KeyA, Command::RotateLeft),
                (KeyCode::KeyD, Command::RotateRight),
                (KeyCode::KeyW, Command::MoveForward),
                (KeyCode::KeyS, Command::MoveBackward),
            ],
            rotate_step: config.rotate_step,
            move_step: config.move_step,
        }
    }

    pub fn command_for(&self, key: KeyCode) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|&(_, command)| command)
    }

    pub fn apply(&self, player: &mut Player, command: Command) {
        match command {
            Command::RotateLeft => player.rotate(-self.rotate_step),
            Command::RotateRight => player.rotate(self.rotate_step),
            Command::MoveForward => player.advance(self.move_step),
            Command::MoveBackward => player.advance(-self.move_step),
        }
    }

    /// Returns true when the key changed the player and a redraw is due.
    pub fn on_key_press(&self, player: &mut Player, key: KeyCode) -> bool {
        let Some(command) = self.command_for(key) else {
            return false;
        };
        log::debug!("{key:?} -> {command:?}");
        self.apply(player, command);
        true
    }
}
