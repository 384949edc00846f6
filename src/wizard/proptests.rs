//! Property-based tests for the wizard
//!
//! These verify the step-ordering invariants across arbitrary inputs.

use super::state::*;
use super::transition::*;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn requester() -> Requester {
    Requester {
        user_id: 7,
        chat_id: 7,
        first_name: "Test".to_string(),
        last_name: None,
        username: None,
    }
}

fn session_at(step: Step) -> Session {
    Session {
        draft: Draft {
            date: Some("2025-06-01".to_string()),
            time: Some("19:30".to_string()),
            full_name: Some("Jane Doe".to_string()),
            num_people: Some(2),
            restaurant_link: Some("https://example.com/r/1".to_string()),
            notes: None,
        },
        step,
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::AwaitDate),
        Just(Step::AwaitTime),
        Just(Step::AwaitName),
        Just(Step::AwaitPeople),
        Just(Step::AwaitLink),
        Just(Step::AwaitNotes),
    ]
}

fn arb_session() -> impl Strategy<Value = Session> {
    arb_step().prop_map(session_at)
}

/// Free text that does not parse as an integer.
fn arb_non_integer_text() -> impl Strategy<Value = String> {
    "[a-zA-Z !?.]{1,30}".prop_filter("must not parse as i64", |s| s.trim().parse::<i64>().is_err())
}

fn arb_wizard_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("2025-06-01".to_string()),
        Just("time_19:30".to_string()),
        Just("num_3".to_string()),
        Just("num_other".to_string()),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    // /start always discards, whatever the prior step was.
    #[test]
    fn prop_start_always_resets(session in arb_session()) {
        let result = transition(Some(&session), &requester(), Event::Start);
        prop_assert_eq!(result.session, SessionChange::Clear);
        prop_assert!(
            matches!(
                result.effects.as_slice(),
                [Effect::Reply { keyboard: Some(KeyboardSpec::MainMenu), .. }]
            ),
            "expected single Reply with MainMenu keyboard"
        );
    }

    // Non-integer party-size text never advances the step.
    #[test]
    fn prop_non_integer_people_never_advances(text in arb_non_integer_text()) {
        let session = session_at(Step::AwaitPeople);
        let result = transition(Some(&session), &requester(), Event::text(text));

        prop_assert_eq!(result.session, SessionChange::Keep);
        prop_assert!(
            matches!(
                result.effects.as_slice(),
                [Effect::Reply { keyboard: None, .. }]
            ),
            "expected single Reply with no keyboard"
        );
    }

    // Any integer is accepted verbatim, range unchecked.
    #[test]
    fn prop_integer_people_accepted_verbatim(n in any::<i32>()) {
        let session = session_at(Step::AwaitPeople);
        let result = transition(Some(&session), &requester(), Event::text(n.to_string()));

        match result.session {
            SessionChange::Put(next) => {
                prop_assert_eq!(next.step, Step::AwaitLink);
                prop_assert_eq!(next.draft.num_people, Some(i64::from(n)));
            }
            other => prop_assert!(false, "expected Put, got {:?}", other),
        }
    }

    // Quick-pick and free text leave observably equivalent sessions.
    #[test]
    fn prop_quick_pick_equals_free_text(n in 1i64..=5) {
        let session = session_at(Step::AwaitPeople);

        let picked = transition(Some(&session), &requester(), Event::selection(format!("num_{n}")));
        let typed = transition(Some(&session), &requester(), Event::text(n.to_string()));

        prop_assert_eq!(picked.session, typed.session);
        prop_assert_eq!(picked.effects, typed.effects);
    }

    // Wizard inputs without a session never create or mutate one.
    #[test]
    fn prop_no_session_inputs_never_mutate(token in arb_wizard_token()) {
        let result = transition(None, &requester(), Event::selection(token));
        prop_assert_eq!(result.session, SessionChange::Keep);
    }

    // Free text without a session yields guidance only.
    #[test]
    fn prop_no_session_text_gets_guidance(text in "[a-zA-Z0-9 ]{0,40}") {
        let result = transition(None, &requester(), Event::text(text));
        prop_assert_eq!(result.session, SessionChange::Keep);
        prop_assert!(
            matches!(
                result.effects.as_slice(),
                [Effect::Reply { keyboard: None, .. }]
            ),
            "expected single Reply with no keyboard"
        );
    }

    // The save effect, when present, is always first, and the session is
    // always cleared in the same transition.
    #[test]
    fn prop_save_is_first_and_clears(notes in "[a-zA-Z0-9 ]{0,40}") {
        let session = session_at(Step::AwaitNotes);
        let result = transition(Some(&session), &requester(), Event::text(notes));

        prop_assert_eq!(result.session, SessionChange::Clear);
        prop_assert!(
            matches!(result.effects.first(), Some(Effect::SaveReservation { .. })),
            "expected SaveReservation first"
        );
        let saves = result
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::SaveReservation { .. }))
            .count();
        prop_assert_eq!(saves, 1);
    }

    // Free-text name and link are trimmed but otherwise stored untouched.
    #[test]
    fn prop_free_text_fields_trimmed_only(text in "[a-zA-Z0-9 :/?.=-]{1,60}") {
        let session = session_at(Step::AwaitLink);
        let result = transition(Some(&session), &requester(), Event::text(format!(" {text} ")));

        match result.session {
            SessionChange::Put(next) => {
                prop_assert_eq!(next.draft.restaurant_link.as_deref(), Some(text.trim()));
                prop_assert_eq!(next.step, Step::AwaitNotes);
            }
            other => prop_assert!(false, "expected Put, got {:?}", other),
        }
    }
}

// ============================================================================
// Sequence Test - Full Flow
// ============================================================================

/// Walk the whole wizard in order and check the final reservation fields.
#[test]
fn test_full_flow_in_order() {
    let requester = requester();
    let mut session: Option<Session> = None;

    let steps: Vec<Event> = vec![
        Event::selection("reserve"),
        Event::selection("2025-06-01"),
        Event::selection("time_19:30"),
        Event::text("Jane Doe"),
        Event::selection("num_2"),
        Event::text("https://example.com/r/1"),
    ];

    for event in steps {
        let result = transition(session.as_ref(), &requester, event);
        match result.session {
            SessionChange::Put(next) => session = Some(next),
            other => panic!("mid-flow transitions must Put, got {other:?}"),
        }
    }

    let result = transition(session.as_ref(), &requester, Event::text(""));
    assert_eq!(result.session, SessionChange::Clear);

    let Some(Effect::SaveReservation { reservation }) = result.effects.first() else {
        panic!("completion must save first");
    };
    assert_eq!(reservation.full_name, "Jane Doe");
    assert_eq!(reservation.num_people, 2);
    assert_eq!(reservation.date_text(), "2025-06-01");
    assert_eq!(reservation.time_text(), "19:30");
    assert_eq!(
        reservation.restaurant_link.as_deref(),
        Some("https://example.com/r/1")
    );
    assert_eq!(reservation.notes.as_deref(), Some(""));
}
