//! Keyboard input translation
//!
//! Event handling never mutates demo state directly: raw GLFW key events are
//! mapped to [`DemoCommand`] intents here, and the main loop applies them.
//! This keeps all mutable state owned by the loop.

use glfw::{Action, Key};

use crate::window::DisplayMode;

/// Intent produced by a key event, applied by the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoCommand {
    /// Flag the window to close, ending the run.
    RequestClose,
    /// Recreate the display in the given mode on the next loop iteration.
    SwitchMode(DisplayMode),
    /// Flip the cursor between normal and captured.
    ToggleCursor,
}

/// Translate one key event into a command.
///
/// Only key releases act, so a held key does not retrigger. F and W are
/// filtered against the current display mode so the display is never
/// recreated into the mode it is already in. The mapping is exhaustive:
///
/// | key    | precondition   | command                   |
/// |--------|----------------|---------------------------|
/// | Escape | —              | `RequestClose`            |
/// | F      | windowed       | `SwitchMode(Fullscreen)`  |
/// | W      | fullscreen     | `SwitchMode(Windowed)`    |
/// | G      | —              | `ToggleCursor`            |
pub fn translate_key_event(key: Key, action: Action, current: DisplayMode) -> Option<DemoCommand> {
    if action != Action::Release {
        return None;
    }

    match key {
        Key::Escape => Some(DemoCommand::RequestClose),
        Key::F if current == DisplayMode::Windowed => {
            Some(DemoCommand::SwitchMode(DisplayMode::Fullscreen))
        }
        Key::W if current == DisplayMode::Fullscreen => {
            Some(DemoCommand::SwitchMode(DisplayMode::Windowed))
        }
        Key::G => Some(DemoCommand::ToggleCursor),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_requests_close_in_both_modes() {
        for mode in [DisplayMode::Windowed, DisplayMode::Fullscreen] {
            assert_eq!(
                translate_key_event(Key::Escape, Action::Release, mode),
                Some(DemoCommand::RequestClose)
            );
        }
    }

    #[test]
    fn test_press_and_repeat_are_ignored() {
        for action in [Action::Press, Action::Repeat] {
            assert_eq!(
                translate_key_event(Key::Escape, action, DisplayMode::Windowed),
                None
            );
            assert_eq!(
                translate_key_event(Key::F, action, DisplayMode::Windowed),
                None
            );
            assert_eq!(
                translate_key_event(Key::G, action, DisplayMode::Windowed),
                None
            );
        }
    }

    #[test]
    fn test_f_switches_to_fullscreen_only_from_windowed() {
        assert_eq!(
            translate_key_event(Key::F, Action::Release, DisplayMode::Windowed),
            Some(DemoCommand::SwitchMode(DisplayMode::Fullscreen))
        );
        // Already fullscreen: no redundant recreation.
        assert_eq!(
            translate_key_event(Key::F, Action::Release, DisplayMode::Fullscreen),
            None
        );
    }

    #[test]
    fn test_w_switches_to_windowed_only_from_fullscreen() {
        assert_eq!(
            translate_key_event(Key::W, Action::Release, DisplayMode::Fullscreen),
            Some(DemoCommand::SwitchMode(DisplayMode::Windowed))
        );
        assert_eq!(
            translate_key_event(Key::W, Action::Release, DisplayMode::Windowed),
            None
        );
    }

    #[test]
    fn test_g_toggles_cursor_in_both_modes() {
        for mode in [DisplayMode::Windowed, DisplayMode::Fullscreen] {
            assert_eq!(
                translate_key_event(Key::G, Action::Release, mode),
                Some(DemoCommand::ToggleCursor)
            );
        }
    }

    #[test]
    fn test_unmapped_keys_have_no_effect() {
        for key in [Key::A, Key::Space, Key::Enter, Key::Up, Key::LeftShift] {
            for mode in [DisplayMode::Windowed, DisplayMode::Fullscreen] {
                assert_eq!(translate_key_event(key, Action::Release, mode), None);
            }
        }
    }
}
