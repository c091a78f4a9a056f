use raylib::prelude::*;

/// What a key press asks the slideshow to do.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    Next,
    Previous,
    TogglePause,
    ToggleFullscreen,
    Quit,
}

pub fn command_for(key: KeyboardKey) -> Option<Command> {
    match key {
        KeyboardKey::KEY_RIGHT | KeyboardKey::KEY_SPACE => Some(Command::Next),
        KeyboardKey::KEY_LEFT => Some(Command::Previous),
        KeyboardKey::KEY_P => Some(Command::TogglePause),
        KeyboardKey::KEY_F => Some(Command::ToggleFullscreen),
        KeyboardKey::KEY_ESCAPE | KeyboardKey::KEY_Q => Some(Command::Quit),
        _ => None,
    }
}

/// Command for a raw key code; codes raylib has no key for map to nothing.
pub fn command_for_code(code: u32) -> Option<Command> {
    i32::try_from(code).ok().and_then(key_from_i32).and_then(command_for)
}

/// Commands for a frame's key codes, in press order.
pub fn commands_from_codes(codes: impl IntoIterator<Item = u32>) -> Vec<Command> {
    codes.into_iter().filter_map(command_for_code).collect()
}

/// Drain this frame's key presses into commands, in press order.
pub fn poll_commands(rl: &mut RaylibHandle) -> Vec<Command> {
    commands_from_codes(std::iter::from_fn(|| rl.get_key_pressed_number()))
}
