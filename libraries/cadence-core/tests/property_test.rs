//! Property-based tests for the domain types
//!
//! Uses proptest to verify invariants across many random inputs.
//! No shallow tests - every property test verifies meaningful invariants.

use cadence_core::{MembershipOutcome, Playlist, PlaylistId, TrackFieldEdit, TrackId};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

fn arbitrary_track_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]{1,2}", 0..40)
}

// ===== Property Tests =====

proptest! {
    /// Property: Membership orders are dense from 1 and each track appears once
    #[test]
    fn playlist_membership_is_dense_and_unique(ids in arbitrary_track_ids()) {
        let mut playlist = Playlist::new(PlaylistId::new("p"), "P");
        let mut seen = HashSet::new();

        for id in &ids {
            let outcome = playlist.append_track(TrackId::new(id.clone()));
            if seen.insert(id.clone()) {
                prop_assert_eq!(outcome, MembershipOutcome::Added { order: seen.len() as u32 });
            } else {
                prop_assert_eq!(outcome, MembershipOutcome::AlreadyPresent);
            }
        }

        let orders: Vec<u32> = playlist.entries.iter().map(|e| e.order).collect();
        let expected: Vec<u32> = (1..=seen.len() as u32).collect();
        prop_assert_eq!(orders, expected);
        prop_assert_eq!(playlist.track_count(), seen.len());
    }

    /// Property: Any non-negative integer is a valid tempo, anything else is rejected
    #[test]
    fn tempo_parsing_accepts_only_integers(value in "[0-9]{1,6}|[a-z .-]{1,6}") {
        let parsed = TrackFieldEdit::parse("tempo", &value);
        match value.trim().parse::<u32>() {
            Ok(bpm) => prop_assert_eq!(parsed.unwrap(), TrackFieldEdit::Tempo(bpm)),
            Err(_) => prop_assert!(parsed.is_err()),
        }
    }

    /// Property: Text fields keep the submitted value verbatim
    #[test]
    fn text_edits_are_verbatim(value in ".{0,30}") {
        let parsed = TrackFieldEdit::parse("album", &value).unwrap();
        prop_assert_eq!(parsed, TrackFieldEdit::Album(value));
    }
}
