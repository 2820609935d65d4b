use crate::game::rules::{determine_winner, Move};

pub const START_GAME_DATA: &str = "start_game";
pub const CANCEL_DATA: &str = "cancel";
pub const FINISH_DATA: &str = "finish";

/// A button press, decoded from its callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    StartGame,
    Play(Move),
    Cancel,
    Finish,
}

impl GameAction {
    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            START_GAME_DATA => Some(GameAction::StartGame),
            CANCEL_DATA => Some(GameAction::Cancel),
            FINISH_DATA => Some(GameAction::Finish),
            other => Move::from_callback_data(other).map(GameAction::Play),
        }
    }
}

/// Which inline menu accompanies a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    /// Single "start game" button sent with /start.
    Start,
    /// Three moves plus cancel.
    MoveSelection,
    /// Restart or finish after a round.
    PlayAgain,
    None,
}

/// Conversation state of one chat.
///
/// Nothing is stored between updates. The bot reads the state back from the
/// menu attached to the message whose button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Idle,
    AwaitingMove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReply {
    pub state: GameState,
    pub text: String,
    pub menu: Menu,
}

impl GameState {
    /// Apply a button press. `bot_move` is only consulted for `Play`.
    ///
    /// A move or cancel pressed while no round is open is answered with a
    /// prompt to start a new game.
    pub fn apply(self, action: GameAction, bot_move: Move) -> GameReply {
        match (self, action) {
            (_, GameAction::StartGame) => GameReply {
                state: GameState::AwaitingMove,
                text: "Выберите ваш ход:".to_string(),
                menu: Menu::MoveSelection,
            },
            (GameState::AwaitingMove, GameAction::Play(user_move)) => {
                let outcome = determine_winner(user_move, bot_move);
                GameReply {
                    state: GameState::Idle,
                    text: format!(
                        "Ваш выбор: {}\nМой выбор: {}\n\nРезультат: {}",
                        user_move.label(),
                        bot_move.label(),
                        outcome.message()
                    ),
                    menu: Menu::PlayAgain,
                }
            }
            (GameState::AwaitingMove, GameAction::Cancel) => GameReply {
                state: GameState::Idle,
                text: "Игра отменена. Используйте /start для новой игры.".to_string(),
                menu: Menu::None,
            },
            (GameState::Idle, GameAction::Play(_) | GameAction::Cancel) => GameReply {
                state: GameState::Idle,
                text: "Этот раунд уже закончен. Начните новую игру!".to_string(),
                menu: Menu::Start,
            },
            (_, GameAction::Finish) => GameReply {
                state: GameState::Idle,
                text: "Игра завершена!\nЧтобы сыграть снова, используйте /start".to_string(),
                menu: Menu::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_callback_data() {
        assert_eq!(
            GameAction::from_callback_data("start_game"),
            Some(GameAction::StartGame)
        );
        assert_eq!(
            GameAction::from_callback_data("paper"),
            Some(GameAction::Play(Move::Paper))
        );
        assert_eq!(GameAction::from_callback_data("cancel"), Some(GameAction::Cancel));
        assert_eq!(GameAction::from_callback_data("finish"), Some(GameAction::Finish));
        assert_eq!(GameAction::from_callback_data("sessions_switch:1"), None);
    }

    #[test]
    fn test_stale_buttons_offer_new_game() {
        for action in [GameAction::Play(Move::Rock), GameAction::Cancel] {
            let reply = GameState::Idle.apply(action, Move::Paper);
            assert_eq!(reply.state, GameState::Idle);
            assert_eq!(reply.menu, Menu::Start);
            assert!(!reply.text.contains("Результат"));
        }
    }

    #[test]
    fn test_start_and_finish_from_any_state() {
        for state in [GameState::Idle, GameState::AwaitingMove] {
            assert_eq!(
                state.apply(GameAction::StartGame, Move::Rock).menu,
                Menu::MoveSelection
            );
            assert_eq!(state.apply(GameAction::Finish, Move::Rock).state, GameState::Idle);
        }
    }

    #[test]
    fn test_start_moves_to_awaiting_move() {
        let reply = GameState::Idle.apply(GameAction::StartGame, Move::Rock);
        assert_eq!(reply.state, GameState::AwaitingMove);
        assert_eq!(reply.menu, Menu::MoveSelection);
    }

    #[test]
    fn test_play_reports_result() {
        let reply = GameState::AwaitingMove.apply(GameAction::Play(Move::Rock), Move::Scissors);
        assert_eq!(reply.state, GameState::Idle);
        assert_eq!(reply.menu, Menu::PlayAgain);
        assert_eq!(
            reply.text,
            "Ваш выбор: 🗿 Камень\nМой выбор: ✂️ Ножницы\n\nРезультат: Вы победили! 🎉"
        );
    }

    #[test]
    fn test_cancel_and_finish_return_to_idle() {
        for action in [GameAction::Cancel, GameAction::Finish] {
            let reply = GameState::AwaitingMove.apply(action, Move::Paper);
            assert_eq!(reply.state, GameState::Idle);
            assert_eq!(reply.menu, Menu::None);
            assert!(reply.text.contains("/start"));
        }
    }
}
