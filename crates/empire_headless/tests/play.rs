//! End-to-end tests of the JSON-lines play loop and scripted simulation.

use std::io::Write;
use std::time::Duration;

use empire_advisor::{Advisor, AdvisorBackend, ScriptedBackend, FALLBACK_CHAT, FALLBACK_LORE};
use empire_core::age::Age;
use empire_core::units::UnitKind;
use empire_headless::protocol::Command;
use empire_headless::runner::{HeadlessRunner, PlayConfig};
use empire_headless::simulate::{load_script, parse_script, simulate};
use empire_headless::Session;
use empire_test_utils::fixtures::new_empire;
use serde_json::Value;

fn scripted(replies: &[&str]) -> Advisor {
    Advisor::new(AdvisorBackend::Scripted(ScriptedBackend::new(
        replies.iter().copied(),
    )))
    .unwrap()
}

/// A cycle long enough that no production tick fires during a test.
fn idle_config() -> PlayConfig {
    PlayConfig {
        cycle: Duration::from_secs(3600),
    }
}

fn offline_runner() -> HeadlessRunner {
    HeadlessRunner::new(
        Session::new(new_empire()),
        Advisor::offline().unwrap(),
        idle_config(),
    )
}

fn parse_lines(output: &[u8]) -> Vec<Value> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn of_type<'a>(lines: &'a [Value], kind: &str) -> Vec<&'a Value> {
    lines.iter().filter(|v| v["type"] == kind).collect()
}

#[tokio::test]
async fn session_starts_ready_and_ends_bye() {
    let runner = offline_runner();
    let mut output = Vec::new();
    runner.run(&b""[..], &mut output).await.unwrap();

    let lines = parse_lines(&output);
    assert_eq!(lines.first().unwrap()["type"], "ready");
    assert_eq!(lines.first().unwrap()["advisor"], "offline");
    assert_eq!(lines.last().unwrap()["type"], "bye");
}

#[tokio::test]
async fn commands_mutate_state_and_report() {
    let input = concat!(
        "{\"cmd\":\"grant\"}\n",
        "{\"cmd\":\"train\",\"unit\":\"Knight\"}\n",
        "{\"cmd\":\"train\",\"unit\":\"unicorn\"}\n",
        "not json\n",
        "\n",
        "{\"cmd\":\"query\"}\n",
    );
    let runner = offline_runner();
    let mut output = Vec::new();
    let session = runner.run(input.as_bytes(), &mut output).await.unwrap();

    assert_eq!(session.state().roster().count(UnitKind::Knight), 1);
    assert_eq!(session.state().resources().gold.floor(), 1700);

    let lines = parse_lines(&output);
    assert_eq!(of_type(&lines, "notice").len(), 2);
    assert_eq!(of_type(&lines, "error").len(), 2);
    let state = of_type(&lines, "state")[0];
    assert_eq!(state["resources"]["gold"], 1700);
    assert_eq!(state["power"], 35);
}

#[tokio::test]
async fn advisor_answers_arrive_after_input_closes() {
    let input = concat!(
        "{\"cmd\":\"advance_age\"}\n",
        "{\"cmd\":\"chat\",\"message\":\"Counsel me.\"}\n",
    );
    let runner = offline_runner();
    let mut output = Vec::new();
    let session = runner.run(input.as_bytes(), &mut output).await.unwrap();

    let state = session.state();
    assert_eq!(state.age(), Age::Feudal);
    assert_eq!(state.chronicle().latest().unwrap().summary, FALLBACK_LORE);
    assert_eq!(state.transcript().len(), 2);
    assert_eq!(state.transcript().messages()[1].text, FALLBACK_CHAT);
    assert!(!state.advisor_busy());

    let lines = parse_lines(&output);
    assert_eq!(of_type(&lines, "ack").len(), 2);
    assert!(lines
        .iter()
        .any(|v| v["type"] == "notice" && v["message"] == "EPOCH REACHED: Feudal Age"));
}

#[tokio::test]
async fn quit_stops_reading() {
    let input = "{\"cmd\":\"quit\"}\n{\"cmd\":\"grant\"}\n";
    let runner = offline_runner();
    let mut output = Vec::new();
    let session = runner.run(input.as_bytes(), &mut output).await.unwrap();

    assert_eq!(session.state().resources().gold.floor(), 1000);
    assert_eq!(parse_lines(&output).last().unwrap()["type"], "bye");
}

#[tokio::test]
async fn timer_credits_production_with_auto_state() {
    let config = PlayConfig {
        cycle: Duration::from_millis(5),
    };
    let session = Session::new(new_empire()).with_auto_state(true);
    // Keep input open briefly so a few cycles elapse.
    let (client, server) = tokio::io::duplex(1024);
    let runner = HeadlessRunner::new(session, Advisor::offline().unwrap(), config);
    let mut output = Vec::new();

    let closer = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(60)).await;
        drop(client);
    });
    let session = runner
        .run(tokio::io::BufReader::new(server), &mut output)
        .await
        .unwrap();
    closer.await.unwrap();

    let cycles = session.state().cycles();
    assert!(cycles >= 1);
    let lines = parse_lines(&output);
    assert_eq!(of_type(&lines, "state").len() as u64, cycles);
}

#[tokio::test]
async fn scripted_simulation_is_reproducible() {
    let script = parse_script(include_str!("../scripts/opening.jsonl")).unwrap();
    let replies = [
        "Knights of the Grove.",
        "The Feudal banners rise.",
        "Build walls, my liege.",
        r#"{"name":"Sunspear","description":"Bright.","rarity":"Rare","bonusType":"Power","bonusValue":20}"#,
        r#"{"name":"Long Winter","effect":"Wood is scarce."}"#,
    ];

    let mut first = Session::new(new_empire());
    let a = simulate(&mut first, &scripted(&replies), &script, 5).await;
    let mut second = Session::new(new_empire());
    let b = simulate(&mut second, &scripted(&replies), &script, 5).await;

    assert_eq!(first.state().state_hash(), second.state().state_hash());
    assert_eq!(a.len(), b.len());

    let state = first.state();
    assert_eq!(state.age(), Age::Feudal);
    assert_eq!(state.battles(), 1);
    assert_eq!(state.hero_title(), "Knights of the Grove.");
    assert_eq!(state.chronicle().latest().unwrap().summary, "The Feudal banners rise.");
    assert_eq!(state.artifacts()[0].name, "Sunspear");
    assert_eq!(state.world_event().unwrap().name, "Long Winter");
    assert_eq!(state.cycles(), 25);
}

#[tokio::test]
async fn simulation_stops_at_quit() {
    let script = vec![Command::Grant, Command::Quit, Command::Grant];
    let mut session = Session::new(new_empire());
    simulate(&mut session, &Advisor::offline().unwrap(), &script, 0).await;
    assert_eq!(session.state().resources().gold.floor(), 2000);
}

#[test]
fn script_files_load_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# warm-up").unwrap();
    writeln!(file, "{{\"cmd\":\"tick\",\"count\":3}}").unwrap();
    writeln!(file, "{{\"cmd\":\"align\",\"alignment\":\"Conqueror\"}}").unwrap();

    let script = load_script(file.path()).unwrap();
    assert_eq!(script.len(), 2);
    assert_eq!(script[0], Command::Tick { count: 3 });
}
