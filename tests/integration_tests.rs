use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::{Builder, TempDir};
use windrose_bot::error::ErrorKind;
use windrose_bot::game::{determine_winner, GameAction, GameState, Menu, Move, Outcome};
use windrose_bot::models::CompassPoint;
use windrose_bot::processors::UploadProcessor;
use windrose_bot::readers::WindCsvReader;
use windrose_bot::utils::{Settings, TempDownload};
use windrose_bot::writers::RasterRoseRenderer;

const RP5_EXPORT: &str = "\
# Метеостанция Москва (ВДНХ)
# Интервал: 01.06.2024 - 02.06.2024
# Кодировка: UTF-8
#
\"Местное время\";\"T\";\"DD\";\"Ff\";\"WW\"
\"02.06.2024 21:00\";\"18.4\";\"Ветер, дующий с севера\";\"4\";\"\"
\"02.06.2024 18:00\";\"21.0\";\"Ветер, дующий с северо-северо-востока\";\"5,5\";\"\"
\"02.06.2024 15:00\";\"22.3\";\"Ветер, дующий с юго-востока\";\"3\";\"\"
\"02.06.2024 12:00\";\"20.1\";\"Штиль, безветрие\";\"0\";\"\"
\"02.06.2024 09:00\";\"15.7\";\"Переменное направление\";\"1\";\"\"
\"02.06.2024 06:00\";\"12.2\";\"Ветер, дующий с севера\";\"2,4\";\"\"
\"02.06.2024 03:00\";\"11.0\";\"Ветер, дующий с запада\";\"\";\"\"
";

fn write_csv(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write temp file");
    file
}

fn small_processor() -> UploadProcessor {
    UploadProcessor::new(
        WindCsvReader::new(),
        RasterRoseRenderer::new().with_size(256),
    )
}

#[test]
fn test_rp5_export_to_png() {
    let file = write_csv(RP5_EXPORT.as_bytes());
    let report = small_processor().process_file(file.path()).unwrap();

    assert_eq!(report.summary.source_rows, 7);
    assert_eq!(report.summary.records, 4);
    assert_eq!(report.summary.max_speed, Some(5.5));
    assert_eq!(report.summary.dominant_direction, Some(CompassPoint::N));

    assert_eq!(report.chart.mime_type, "image/png");
    assert_eq!((report.chart.width, report.chart.height), (256, 256));
    let decoded = image::load_from_memory(&report.chart.bytes).unwrap();
    assert_eq!(decoded.width(), 256);

    assert_eq!(report.chart.legend.len(), 6);
    assert_eq!(report.chart.legend.last().map(String::as_str), Some(">=5.5"));
}

#[test]
fn test_utf8_export_with_stray_byte() {
    let mut bytes = RP5_EXPORT.as_bytes().to_vec();
    bytes.splice(2..2, [0xFF]);
    let file = write_csv(&bytes);

    let report = small_processor().process_file(file.path()).unwrap();
    assert_eq!(report.summary.records, 4);
}

#[test]
fn test_windows_1251_export() {
    let (encoded, _, _) = encoding_rs::WINDOWS_1251.encode(RP5_EXPORT);
    let file = write_csv(&encoded);

    let report = small_processor().process_file(file.path()).unwrap();
    assert_eq!(report.summary.records, 4);
}

#[test]
fn test_only_calm_rows_is_empty_result() {
    let file = write_csv("DD;Ff\nШтиль;0\nШтиль;0\n".as_bytes());
    let err = small_processor().process_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyResult);
}

#[test]
fn test_missing_columns_is_input_format() {
    let file = write_csv("Время;Температура\n12:00;20\n".as_bytes());
    let err = small_processor().process_file(file.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputFormat);
}

#[test]
fn test_upload_name_check() {
    assert!(UploadProcessor::check_file_name(Some("moscow.CSV")).is_ok());
    let err = UploadProcessor::check_file_name(Some("moscow.xlsx")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputFormat);
    assert!(UploadProcessor::check_file_name(None).is_err());
}

#[test]
fn test_download_scratch_is_removed() {
    let dir_path;
    {
        let download = TempDownload::new("export.csv").unwrap();
        std::fs::write(download.path(), RP5_EXPORT).unwrap();
        let report = UploadProcessor::from_settings(&Settings::default())
            .process_file(download.path())
            .unwrap();
        assert_eq!(report.summary.records, 4);
        dir_path = download.dir_path().unwrap().to_path_buf();
        assert!(dir_path.exists());
    }
    assert!(!dir_path.exists());
}

#[test]
fn test_settings_file_changes_chart_size() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("windrose.toml");
    std::fs::write(&config_path, "[chart]\nsize = 300\nspeed_bins = 3\n").unwrap();

    let settings = Settings::load(Some(config_path.as_path())).unwrap();
    let file = write_csv(RP5_EXPORT.as_bytes());
    let report = UploadProcessor::from_settings(&settings)
        .process_file(file.path())
        .unwrap();
    assert_eq!(report.chart.width, 300);
}

#[test]
fn test_game_round() {
    let reply = GameState::default().apply(GameAction::StartGame, Move::Rock);
    assert_eq!(reply.state, GameState::AwaitingMove);
    assert_eq!(reply.menu, Menu::MoveSelection);

    let reply = reply
        .state
        .apply(GameAction::Play(Move::Paper), Move::Rock);
    assert_eq!(reply.state, GameState::Idle);
    assert_eq!(reply.menu, Menu::PlayAgain);
    assert!(reply.text.contains(Outcome::UserWins.message()));

    assert_eq!(determine_winner(Move::Scissors, Move::Rock), Outcome::BotWins);
    assert_eq!(determine_winner(Move::Rock, Move::Rock), Outcome::Draw);
}
