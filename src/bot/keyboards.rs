use crate::game::session::{CANCEL_DATA, FINISH_DATA, START_GAME_DATA};
use crate::game::{GameAction, GameState, Menu, Move};
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardButtonKind, InlineKeyboardMarkup, KeyboardButton,
    KeyboardMarkup,
};

pub const BUILD_ROSE_BUTTON: &str = "🌬️ Построить розу ветров";

/// Persistent reply keyboard of the wind-rose bot.
pub fn wind_start_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(BUILD_ROSE_BUTTON)]]).resize_keyboard()
}

pub fn game_menu(menu: Menu) -> Option<InlineKeyboardMarkup> {
    let rows = match menu {
        Menu::Start => vec![vec![InlineKeyboardButton::callback(
            "🎲 Начать игру",
            START_GAME_DATA,
        )]],
        Menu::MoveSelection => vec![
            vec![move_button(Move::Rock), move_button(Move::Scissors)],
            vec![
                move_button(Move::Paper),
                InlineKeyboardButton::callback("❌ Отмена", CANCEL_DATA),
            ],
        ],
        Menu::PlayAgain => vec![vec![
            InlineKeyboardButton::callback("🔄 Начать сначала", START_GAME_DATA),
            InlineKeyboardButton::callback("🏁 Завершить", FINISH_DATA),
        ]],
        Menu::None => return None,
    };
    Some(InlineKeyboardMarkup::new(rows))
}

/// Game state shown by a message's inline keyboard: a round is open while
/// its move buttons are on screen.
pub fn state_of_menu(markup: Option<&InlineKeyboardMarkup>) -> GameState {
    let shows_moves = markup.is_some_and(|markup| {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .any(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => matches!(
                    GameAction::from_callback_data(data),
                    Some(GameAction::Play(_))
                ),
                _ => false,
            })
    });

    if shows_moves {
        GameState::AwaitingMove
    } else {
        GameState::Idle
    }
}

fn move_button(mv: Move) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(mv.label(), mv.callback_data())
}
