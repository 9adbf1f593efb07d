//! End-to-end sessions through the terminal wizard.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use reno_cli::config::Settings;
use reno_cli::{EstimatorApp, Flow, SharedOutput, load_pricing_table};
use reno_core::reveal::{DEFAULT_REVEAL_DURATION, FRAME_INTERVAL};
use reno_core::{PricingTable, WizardStage};
use rust_decimal_macros::dec;
use tokio::io::{AsyncWriteExt, BufReader, DuplexStream};
use tokio::time::Instant;

/// Condominium, 1,001 - 1,500 sq ft, living room and kitchen, partial,
/// modern, then submit: RM 51,000 - RM 64,000.
const SUBMITTED: &str = "1\nn\n2\nn\n1,3\nn\n3\nn\n1\ns\n";
const FINAL_RANGE: &str = "RM 51,000 - RM 64,000";

fn app_with_buffer(reveal: Duration) -> (EstimatorApp, Arc<Mutex<Vec<u8>>>) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let out: SharedOutput = buffer.clone();
    let app = EstimatorApp::new(Arc::new(PricingTable::standard()), reveal, out);
    (app, buffer)
}

fn text(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
}

/// Input that types `before` at once and `after` once `pause` has passed.
fn typed(
    before: &str,
    pause: Duration,
    after: &str,
) -> BufReader<DuplexStream> {
    let (mut keyboard, terminal) = tokio::io::duplex(1024);
    let (before, after) = (before.to_string(), after.to_string());
    tokio::spawn(async move {
        keyboard.write_all(before.as_bytes()).await.unwrap();
        tokio::time::sleep(pause).await;
        keyboard.write_all(after.as_bytes()).await.unwrap();
    });
    BufReader::new(terminal)
}

#[tokio::test(start_paused = true)]
async fn full_session_reveals_range_and_breakdown() {
    let (mut app, buffer) = app_with_buffer(DEFAULT_REVEAL_DURATION);

    let estimate = app
        .run(typed(SUBMITTED, Duration::from_secs(2), "q\n"))
        .await
        .expect("session runs")
        .expect("estimate shown");

    assert_eq!(estimate.min, dec!(51000));
    assert_eq!(estimate.max, dec!(64000));

    let output = text(&buffer);
    assert!(output.contains("Estimated cost: RM 51,000 - RM 64,000"));
    let breakdown = output.find("Your selections:").expect("breakdown shown");
    assert!(breakdown < output.find("Goodbye.").expect("farewell shown"));
    assert!(output.contains("Property Type    Condominium"));
    assert!(output.contains("Areas            Living Room, Kitchen"));
    assert!(output.contains("Goodbye."));
}

#[tokio::test(start_paused = true)]
async fn range_is_revealed_before_breakdown() {
    let (mut app, buffer) = app_with_buffer(DEFAULT_REVEAL_DURATION);
    let started = Instant::now();

    app.run(SUBMITTED.as_bytes()).await.expect("session runs");

    assert!(started.elapsed() >= DEFAULT_REVEAL_DURATION);
    let output = text(&buffer);
    let range = output.rfind(FINAL_RANGE).expect("range shown");
    let breakdown = output.find("Your selections:").expect("breakdown shown");
    assert!(range < breakdown);
}

#[tokio::test(start_paused = true)]
async fn restart_during_count_up_abandons_it() {
    let (mut app, buffer) = app_with_buffer(DEFAULT_REVEAL_DURATION);
    let started = Instant::now();

    let estimate = app
        .run(typed(SUBMITTED, Duration::from_millis(500), "r\nq\n"))
        .await
        .expect("session runs");

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed < DEFAULT_REVEAL_DURATION);
    assert_eq!(estimate, None);
    assert!(!app.is_revealing());

    let output = text(&buffer);
    assert!(output.contains("Estimated cost: RM "));
    assert!(!output.contains(FINAL_RANGE));
    assert!(!output.contains("Your selections:"));
    assert!(output.contains("Starting over."));
    assert_eq!(app.controller().stage(), WizardStage::Step(1));
}

#[tokio::test(start_paused = true)]
async fn restart_typed_ahead_skips_count_up() {
    let (mut app, buffer) = app_with_buffer(DEFAULT_REVEAL_DURATION);
    let started = Instant::now();
    let script = format!("{SUBMITTED}r\nq\n");

    app.run(script.as_bytes()).await.expect("session runs");

    assert!(started.elapsed() < FRAME_INTERVAL);
    let output = text(&buffer);
    assert!(!output.contains(FINAL_RANGE));
    assert!(output.contains("Starting over."));
    assert!(output.contains("Goodbye."));
}

#[tokio::test(start_paused = true)]
async fn quit_during_count_up_stops_it() {
    let (mut app, buffer) = app_with_buffer(DEFAULT_REVEAL_DURATION);
    let started = Instant::now();

    let estimate = app
        .run(typed(SUBMITTED, Duration::from_millis(300), "q\n"))
        .await
        .expect("session runs")
        .expect("estimate was on screen");

    assert!(started.elapsed() < DEFAULT_REVEAL_DURATION);
    assert_eq!(estimate.max, dec!(64000));
    let output = text(&buffer);
    assert!(!output.contains(FINAL_RANGE));
    assert!(output.contains("Goodbye."));
}

#[tokio::test]
async fn next_without_answer_shows_feedback() {
    let (mut app, buffer) = app_with_buffer(Duration::ZERO);

    app.run("n\nq\n".as_bytes()).await.expect("session runs");

    assert!(text(&buffer).contains("Please answer step 1 (Property Type) before continuing."));
    assert_eq!(app.controller().stage(), WizardStage::Step(1));
}

#[tokio::test]
async fn bad_option_number_is_explained() {
    let (mut app, buffer) = app_with_buffer(Duration::ZERO);

    app.run("9\n".as_bytes()).await.expect("session runs");

    assert!(text(&buffer).contains("Option 9 does not exist; Property Type has options 1 to 5."));
}

#[tokio::test]
async fn restart_after_results_starts_over() {
    let (mut app, buffer) = app_with_buffer(Duration::ZERO);
    let script = format!("{SUBMITTED}r\n");

    let estimate = app.run(script.as_bytes()).await.expect("session runs");

    assert_eq!(estimate, None);
    assert_eq!(app.controller().stage(), WizardStage::Step(1));
    assert!(app.controller().answers().is_empty());
    assert!(text(&buffer).contains("Starting over."));
}

#[tokio::test]
async fn answers_on_results_are_rejected() {
    let (mut app, buffer) = app_with_buffer(Duration::ZERO);
    app.run(SUBMITTED.as_bytes()).await.expect("session runs");

    let flow = app.handle_line("2").expect("line handled");

    assert_eq!(flow, Flow::Continue);
    assert_eq!(app.controller().stage(), WizardStage::Results);
    assert!(text(&buffer).contains("'2' is not a command here."));
}

#[tokio::test]
async fn whole_house_on_small_condo() {
    let (mut app, _buffer) = app_with_buffer(Duration::ZERO);

    let estimate = app
        .run("condo\nn\nsmall\nn\nall\nn\nfull\nn\nmodern\ns\n".as_bytes())
        .await
        .expect("session runs")
        .expect("estimate shown");

    assert_eq!(estimate.min, dec!(48000));
    assert_eq!(estimate.max, dec!(60000));
}

#[test]
fn settings_without_table_use_built_in_rates() {
    let table = load_pricing_table(&Settings::default()).expect("table loads");

    assert_eq!(table, PricingTable::standard());
}

#[test]
fn settings_with_shipped_table_load_it() {
    let settings = Settings {
        pricing_table: Some(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../pricing/standard.csv"),
        ),
        ..Settings::default()
    };

    let table = load_pricing_table(&settings).expect("table loads");

    assert_eq!(table, PricingTable::standard());
}

#[test]
fn missing_table_file_is_an_error() {
    let settings = Settings {
        pricing_table: Some("no/such/table.csv".into()),
        ..Settings::default()
    };

    let err = load_pricing_table(&settings).expect_err("should fail");

    assert!(err.to_string().contains("no/such/table.csv"));
}
