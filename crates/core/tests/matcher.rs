use quiz_helper_core::dataset::ReferenceEntry;
use quiz_helper_core::matcher::{pick_best, score_answer_sets, AnswerSetScore, MatchOutcome};
use quiz_helper_core::page::PageElement;
use quiz_helper_core::{find_match, match_question};

fn page(texts: &[&str]) -> Vec<PageElement<usize>> {
    texts.iter().enumerate().map(|(idx, text)| PageElement::new(*text, idx)).collect()
}

fn entry(question: &str, answers: &[&str], correct: usize) -> ReferenceEntry {
    ReferenceEntry::new(
        question,
        answers.iter().enumerate().map(|(idx, text)| ((idx + 1).to_string(), *text)),
        &correct.to_string(),
    )
}

fn sign_dataset() -> Vec<ReferenceEntry> {
    vec![
        entry("Which sign is this?", &["Stop", "Yield", "Go"], 1),
        entry("Which sign is this?", &["Merge", "Stop", "Yield", "Go", "Caution"], 3),
    ]
}

#[test]
fn unique_question_is_used_regardless_of_answer_overlap() {
    let dataset = vec![
        entry("Which sign is this?", &["Stop", "Yield"], 1),
        entry(
            "What does a red light mean?",
            &["Stop", "Speed up", "Turn left", "Honk"],
            1,
        ),
        entry("Which sign is this?", &["Merge", "Caution"], 2),
    ];
    // Only the correct answer is on the page; overlap is 1/4.
    let candidates = page(&["Home", "Stop", "Next"]);

    let result = find_match(&dataset, "  What does a RED light mean? ", &candidates);
    assert_eq!(result.matched_entry.as_ref(), Some(&dataset[1]));
    let element = result.matched_element.expect("element");
    assert_eq!(element.handle, 1);
    assert_eq!(element.raw_text, "Stop");

    let outcome = match_question(&dataset, "What does a red light mean?", &candidates);
    assert!(outcome.scores().is_empty(), "unique match should not score answer sets");
}

#[test]
fn duplicate_tie_keeps_the_earlier_entry() {
    let dataset = sign_dataset();
    let candidates = page(&["Stop", "Yield", "Go", "Other"]);

    let outcome = match_question(&dataset, "Which sign is this?", &candidates);
    let scores = outcome.scores().to_vec();
    assert_eq!(scores.len(), 2);
    assert_eq!((scores[0].match_score, scores[0].total_answers), (3, 3));
    assert_eq!((scores[1].match_score, scores[1].total_answers), (3, 5));
    assert!((scores[0].match_percentage - 1.0).abs() < f64::EPSILON);
    assert!((scores[1].match_percentage - 0.6).abs() < 1e-9);
    assert!(scores.iter().all(|s| s.eligible));

    match outcome {
        MatchOutcome::Matched { entry, element, .. } => {
            assert_eq!(entry, dataset[0]);
            assert_eq!(element.raw_text, "Stop");
            assert_eq!(element.handle, 0);
        }
        other => panic!("expected a match, got {}", other.kind()),
    }
}

#[test]
fn duplicate_order_decides_the_tie() {
    let mut dataset = sign_dataset();
    dataset.reverse();
    let candidates = page(&["Stop", "Yield", "Go", "Other"]);

    let result = find_match(&dataset, "Which sign is this?", &candidates);
    // Entry B is now first; its correct answer is "Yield".
    assert_eq!(result.matched_entry.as_ref(), Some(&dataset[0]));
    assert_eq!(result.matched_element.expect("element").raw_text, "Yield");
}

#[test]
fn higher_overlap_beats_earlier_entry() {
    let dataset = vec![
        entry("Which sign is this?", &["Stop", "Yield", "Merge", "Caution"], 1),
        entry("Which sign is this?", &["Stop", "Yield", "Go"], 3),
    ];
    let candidates = page(&["Stop", "Yield", "Go"]);

    let result = find_match(&dataset, "Which sign is this?", &candidates);
    assert_eq!(result.matched_entry.as_ref(), Some(&dataset[1]));
    assert_eq!(result.matched_element.expect("element").raw_text, "Go");
}

#[test]
fn insufficient_overlap_is_rejected() {
    let dataset = vec![
        entry("Which sign is this?", &["Stop", "Merge", "Caution", "Detour"], 1),
        entry("Which sign is this?", &["Left", "Right", "Ahead"], 1),
    ];
    // One of four answers on the page: score 1, 25%.
    let candidates = page(&["Stop", "Yield", "Go"]);

    let outcome = match_question(&dataset, "Which sign is this?", &candidates);
    match &outcome {
        MatchOutcome::NoEligibleDuplicate { scores } => {
            assert_eq!(scores[0].match_score, 1);
            assert!(!scores[0].eligible);
            assert_eq!(scores[1].match_score, 0);
        }
        other => panic!("expected no eligible duplicate, got {}", other.kind()),
    }
    assert!(find_match(&dataset, "Which sign is this?", &candidates).is_empty());
}

#[test]
fn single_overlap_is_eligible_only_by_ratio() {
    let one_of_one = AnswerSetScore {
        entry_index: 0,
        match_score: 1,
        total_answers: 1,
        match_percentage: 1.0,
        eligible: true,
    };
    let dataset = vec![
        entry("Pick one:", &["Stop", "Go"], 1),
        entry("Pick one:", &["Stop"], 1),
    ];
    let candidates = page(&["Stop", "Yield"]);
    let matching: Vec<(usize, &ReferenceEntry)> = dataset.iter().enumerate().collect();

    let scores = score_answer_sets(&matching, &candidates);
    assert!(!scores[0].eligible, "1/2 answers is below both floors");
    assert_eq!(scores[1], AnswerSetScore { entry_index: 1, ..one_of_one });
    assert_eq!(pick_best(&scores).map(|s| s.entry_index), Some(1));
}

#[test]
fn pick_best_ignores_ineligible_scores() {
    let scores = vec![
        AnswerSetScore {
            entry_index: 0,
            match_score: 5,
            total_answers: 20,
            match_percentage: 0.25,
            eligible: false,
        },
        AnswerSetScore {
            entry_index: 1,
            match_score: 2,
            total_answers: 3,
            match_percentage: 2.0 / 3.0,
            eligible: true,
        },
    ];
    assert_eq!(pick_best(&scores).map(|s| s.entry_index), Some(1));
    assert!(pick_best(&[]).is_none());
}

#[test]
fn correct_answer_requires_exact_normalized_text() {
    let dataset = vec![entry(
        "Who has priority at a zebra crossing?",
        &["Drivers", "Yield to pedestrians", "Cyclists"],
        2,
    )];

    let quoted = page(&["Drivers", "  YIELD to \u{201C}pedestrians\u{201D}. ", "Cyclists"]);
    let result = find_match(&dataset, "Who has priority at a zebra crossing?", &quoted);
    // Quotes survive normalization, so this is not an exact match.
    assert!(result.is_empty());

    let exact = page(&["Drivers", "  YIELD   to pedestrians ", "Cyclists"]);
    let result = find_match(&dataset, "Who has priority at a zebra crossing?", &exact);
    assert_eq!(result.matched_element.expect("element").handle, 1);

    let partial = page(&["Drivers", "Yield to all pedestrians and cyclists", "Cyclists"]);
    let outcome = match_question(&dataset, "Who has priority at a zebra crossing?", &partial);
    match outcome {
        MatchOutcome::NoElement { correct_answer, .. } => {
            assert_eq!(correct_answer, "Yield to pedestrians");
        }
        other => panic!("expected no element, got {}", other.kind()),
    }
}

#[test]
fn first_exact_element_wins() {
    let dataset = vec![entry("Which sign is this?", &["Stop", "Go"], 1)];
    let candidates = page(&["Go", "Stop", "stop"]);

    let result = find_match(&dataset, "Which sign is this?", &candidates);
    assert_eq!(result.matched_element.expect("element").handle, 1);
}

#[test]
fn missing_correct_answer_id_is_an_empty_result() {
    let dataset = vec![entry("Which sign is this?", &["Stop", "Go"], 7)];
    let candidates = page(&["Stop", "Go"]);

    let outcome = match_question(&dataset, "Which sign is this?", &candidates);
    match &outcome {
        MatchOutcome::MissingCorrectAnswer { error, .. } => {
            assert!(error.to_string().contains("'7'"));
        }
        other => panic!("expected integrity failure, got {}", other.kind()),
    }
    assert_eq!(outcome.entry(), Some(&dataset[0]));
    assert!(find_match(&dataset, "Which sign is this?", &candidates).is_empty());
}

#[test]
fn unknown_and_blank_questions_are_empty() {
    let dataset = sign_dataset();
    let candidates = page(&["Stop"]);

    let outcome = match_question(&dataset, "Which road is this?", &candidates);
    assert_eq!(outcome, MatchOutcome::NoEntry);

    let outcome = match_question(&dataset, "  ?? ", &candidates);
    assert_eq!(outcome, MatchOutcome::NoQuestion);
}

#[test]
fn question_lookup_ignores_case_punctuation_and_quotes() {
    let dataset = vec![entry("What does \u{201C}STOP\u{201D} mean?", &["Halt", "Go"], 1)];
    let candidates = page(&["halt", "go"]);

    let result = find_match(&dataset, "what does \"stop\"   mean", &candidates);
    assert_eq!(result.matched_element.expect("element").raw_text, "halt");
}

#[test]
fn empty_correct_answer_never_matches_symbol_only_elements() {
    let dataset = vec![ReferenceEntry::new("Which sign is this?", [("1", ""), ("2", "Stop")], "1")];
    let candidates = page(&["\u{00D7}", "Stop"]);
    assert_eq!(candidates[0].normalized_text, "");

    let outcome = match_question(&dataset, "Which sign is this?", &candidates);
    assert_eq!(outcome.kind(), "missing_correct_answer");
    assert!(find_match(&dataset, "Which sign is this?", &candidates).is_empty());
}

#[test]
fn symbol_only_elements_do_not_count_as_overlap() {
    let dataset = vec![
        ReferenceEntry::new("Which sign is this?", [("1", "\u{2190}"), ("2", "Stop")], "2"),
        ReferenceEntry::new("Which sign is this?", [("1", "Left"), ("2", "Right")], "1"),
    ];
    // "»" and "←" both normalize to "", which must not look like a shared answer.
    let candidates = page(&["\u{00BB}", "Exit"]);

    let outcome = match_question(&dataset, "Which sign is this?", &candidates);
    let scores = outcome.scores();
    assert_eq!(scores[0].match_score, 0);
    assert_eq!(outcome.kind(), "no_eligible_duplicate");
}
