use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move this one defeats.
    pub fn beats(&self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Scissors => Move::Paper,
            Move::Paper => Move::Rock,
        }
    }

    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "rock" => Some(Move::Rock),
            "paper" => Some(Move::Paper),
            "scissors" => Some(Move::Scissors),
            _ => None,
        }
    }

    pub fn callback_data(&self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Move::Rock => "🗿 Камень",
            Move::Paper => "📄 Бумага",
            Move::Scissors => "✂️ Ножницы",
        }
    }

    /// Uniformly random move.
    pub fn random<R: Rng>(rng: &mut R) -> Move {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Draw,
    UserWins,
    BotWins,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Draw => "Ничья! 😐",
            Outcome::UserWins => "Вы победили! 🎉",
            Outcome::BotWins => "Я победил! 🤖",
        }
    }

    /// Same round seen from the other player's side.
    pub fn reversed(&self) -> Outcome {
        match self {
            Outcome::Draw => Outcome::Draw,
            Outcome::UserWins => Outcome::BotWins,
            Outcome::BotWins => Outcome::UserWins,
        }
    }
}

pub fn determine_winner(user: Move, bot: Move) -> Outcome {
    if user == bot {
        Outcome::Draw
    } else if user.beats() == bot {
        Outcome::UserWins
    } else {
        Outcome::BotWins
    }
}
