use raumbot::protocol::Protocol;
use raumbot::board::Color;
use raumbot::search::Difficulty;

fn reply(p: &mut Protocol, line: &str) -> Vec<String> {
    p.handle_line(line).expect("not a quit")
}

#[test]
fn isready_and_quit() {
    let mut p = Protocol::default();
    assert_eq!(reply(&mut p, "isready"), vec!["readyok"]);
    assert!(reply(&mut p, "").is_empty());
    assert!(p.handle_line("quit").is_none());
}

#[test]
fn position_with_moves_updates_side_to_move() {
    let mut p = Protocol::default();
    assert!(reply(&mut p, "position startpos moves Bb2-Bb3 Dc4-Dc3").is_empty());
    assert_eq!(p.side_to_move(), Color::White);
    assert!(p.board().piece_at("Bb3".parse().unwrap()).is_some());
    assert!(reply(&mut p, "position startpos moves Bb2-Bb3").is_empty());
    let shown = reply(&mut p, "show");
    assert_eq!(shown.last().map(String::as_str), Some("turn black"));
    assert!(shown.iter().any(|l| l.starts_with("Level E")));

    assert!(reply(&mut p, "newgame").is_empty());
    assert_eq!(p.side_to_move(), Color::White);
}

#[test]
fn bad_input_is_reported_not_fatal() {
    let mut p = Protocol::default();
    let r = reply(&mut p, "position startpos moves Bb2-Bb5");
    assert!(r[0].starts_with("error illegal move"), "{r:?}");
    let r = reply(&mut p, "position placement KAa1");
    assert!(r[0].starts_with("error"), "{r:?}");
    let r = reply(&mut p, "difficulty 7");
    assert!(r[0].starts_with("error unknown difficulty"), "{r:?}");
    let r = reply(&mut p, "fly");
    assert!(r[0].starts_with("error"), "{r:?}");
    assert_eq!(reply(&mut p, "isready"), vec!["readyok"]);
}

#[test]
fn go_answers_with_the_mate() {
    let mut p = Protocol::new(Difficulty::Medium);
    assert_eq!(reply(&mut p, "difficulty hard"), vec!["difficulty hard"]);
    assert!(reply(&mut p, "position placement kAa1 rAa2 rAb1 rBa1 REb2 QBe2 KEe5 turn white").is_empty());
    assert_eq!(reply(&mut p, "go depth 2"), vec!["bestmove Be2-Bb2"]);
    assert!(reply(&mut p, "position placement kAa1 rAa2 rAb1 rBa1 REb2 QBe2 KEe5 turn white moves Be2-Bb2").is_empty());
    assert_eq!(reply(&mut p, "go"), vec!["bestmove none checkmate"]);
    assert!(reply(&mut p, "position placement kAa1 RAe2 RBe2 RBe1 REb1 KEe5 turn black").is_empty());
    assert_eq!(reply(&mut p, "go depth 1"), vec!["bestmove none stalemate"]);
}

#[test]
fn position_with_the_idle_king_in_check_is_rejected() {
    let mut p = Protocol::default();
    let r = reply(&mut p, "position placement KAa1 RAa5 kAa3 pEe4 turn white moves Aa5-Aa3 Ee4-De4");
    assert_eq!(r.len(), 1);
    assert!(r[0].starts_with("error") && r[0].contains("in check"), "{r:?}");
    // the previous game is kept
    assert_eq!(p.side_to_move(), Color::White);
    assert_eq!(p.board().count_alive(Color::Black), 20);
    assert!(reply(&mut p, "position placement KAa1 RAa5 kAa3 pEe4 turn black").is_empty());
    assert_eq!(p.side_to_move(), Color::Black);
}
