use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use dreamroster_core::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    Dismiss,
    Draw(Role),
    Skip,
    Click { column: u16, row: u16 },
    Reset,
    PlayFullRoster,
    PlayShowcase,
    ClearUpgrades,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => InputAction::Quit,
            _ => InputAction::None,
        };
    }
    match key.code {
        KeyCode::Esc => InputAction::Dismiss,
        KeyCode::Enter | KeyCode::Char(' ') => InputAction::Skip,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('r') => InputAction::Reset,
        KeyCode::Char('e') => InputAction::PlayFullRoster,
        KeyCode::Char('n') => InputAction::PlayShowcase,
        KeyCode::Char('c') => InputAction::ClearUpgrades,
        KeyCode::Char(ch) => Role::from_draw_key(ch)
            .map(InputAction::Draw)
            .unwrap_or(InputAction::None),
        _ => InputAction::None,
    }
}

/// Left clicks carry their cell so an empty slot can be drawn; other buttons skip.
pub fn map_mouse(mouse: MouseEvent) -> InputAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => InputAction::Click {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::Down(_) => InputAction::Skip,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(ch: char) -> InputAction {
        map_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
    }

    macro_rules! key_case {
        ($name:ident, $ch:expr, $expected:expr) => {
            #[test]
            fn $name() {
                assert_eq!(press($ch), $expected);
            }
        };
    }

    key_case!(a_draws_top, 'a', InputAction::Draw(Role::Top));
    key_case!(s_draws_jungle, 's', InputAction::Draw(Role::Jungle));
    key_case!(d_draws_mid, 'd', InputAction::Draw(Role::Mid));
    key_case!(f_draws_adc, 'f', InputAction::Draw(Role::Adc));
    key_case!(g_draws_support, 'g', InputAction::Draw(Role::Support));
    key_case!(r_resets, 'r', InputAction::Reset);
    key_case!(space_skips, ' ', InputAction::Skip);
    key_case!(e_plays_full_roster, 'e', InputAction::PlayFullRoster);
    key_case!(unbound_key_is_ignored, 'x', InputAction::None);

    #[test]
    fn ctrl_c_quits_and_other_chords_do_nothing() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            InputAction::None
        );
    }

    #[test]
    fn mouse_presses_click_or_skip_but_movement_does_not() {
        let event = |kind| MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            map_mouse(event(MouseEventKind::Down(MouseButton::Left))),
            InputAction::Click { column: 3, row: 4 }
        );
        assert_eq!(
            map_mouse(event(MouseEventKind::Down(MouseButton::Right))),
            InputAction::Skip
        );
        assert_eq!(map_mouse(event(MouseEventKind::Moved)), InputAction::None);
    }
}
