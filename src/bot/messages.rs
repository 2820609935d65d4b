use crate::error::ProcessingError;
use crate::processors::WindRoseSummary;

pub const WIND_GREETING: &str = "Привет! Я бот для построения розы ветров по данным с RP5.ru.\n\
     Отправьте мне CSV-файл с данными о ветре, и я построю розу ветров.";

pub const WIND_HELP: &str = "Отправьте мне CSV-файл с данными о ветре с сайта RP5.ru для аэропорта Храброво.\n\
     Я построю розу ветров и отправлю вам изображение.\n\n\
     Файл должен содержать столбцы DD (направление ветра) и Ff (скорость ветра).";

pub const SEND_FILE_PROMPT: &str =
    "Пожалуйста, отправьте мне CSV-файл с данными о ветре с сайта RP5.ru";

pub const FILE_RECEIVED: &str = "Получил ваш файл. Обрабатываю данные...";

pub const GAME_GREETING: &str = "Привет! Я бот для игры в 'Камень, ножницы, бумага'.\n\
     Нажми кнопку ниже, чтобы начать игру!";

pub const GAME_RULES: &str = "Правила игры:\n\
     - Камень побеждает ножницы\n\
     - Ножницы побеждают бумагу\n\
     - Бумага побеждает камень\n\n\
     Используйте команду /start для начала игры!";

/// Status line sent after the chart.
pub fn success_reply(summary: &WindRoseSummary) -> String {
    let mut text = format!("Роза ветров построена по {} записям.", summary.records);
    if let Some(direction) = summary.dominant_direction {
        text.push_str(&format!("\nПреобладающее направление: {}", direction));
    }
    if let Some(mean) = summary.mean_speed {
        text.push_str(&format!("\nСредняя скорость: {:.1} м/с", mean));
    }
    text
}

/// Photo caption: chart title followed by the speed range of each colour,
/// slowest first.
pub fn chart_caption(title: &str, legend: &[String]) -> String {
    let mut text = title.to_string();
    if !legend.is_empty() {
        text.push_str("\n\nСкорость ветра, м/с:");
        for label in legend {
            text.push_str(&format!("\n■ {} м/с", label));
        }
    }
    text
}

/// User-facing explanation of a failed upload.
pub fn error_reply(error: &ProcessingError) -> String {
    match error {
        ProcessingError::UnsupportedExtension { .. } => {
            "Пожалуйста, отправьте файл в формате CSV.".to_string()
        }
        ProcessingError::MissingColumns { direction, speed } => format!(
            "В файле не найдены необходимые столбцы {} (направление) и {} (скорость ветра).",
            direction, speed
        ),
        ProcessingError::EmptyResult { .. } => {
            "После обработки данных не осталось корректных записей.".to_string()
        }
        other => format!("Произошла ошибка при обработке файла: {}", other),
    }
}
