use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::Dismiss => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.skip();
            }
        }
        InputAction::Draw(role) => app.draw(role),
        InputAction::Skip => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.skip();
            }
        }
        InputAction::Click { column, row } => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.click(column, row);
            }
        }
        InputAction::Reset => app.reset(),
        InputAction::PlayFullRoster => app.play_full_roster(),
        InputAction::PlayShowcase => app.play_next_showcase(),
        InputAction::ClearUpgrades => app.clear_upgrades(),
    }
}
