//! Property-based tests for the playlist view model
//!
//! Uses proptest to verify navigation and filter invariants across random
//! catalogs and operation sequences.

use chrono::Utc;
use mus_core::{Track, TrackId, TrackOwner, UserId};
use mus_playlist::{PlaylistConfig, PlaylistError, PlaylistViewModel, TogglePolicy};
use proptest::prelude::*;

// ===== Helpers =====

fn track(index: usize, favorite: bool) -> Track {
    Track {
        id: TrackId::new(format!("track-{}", index)),
        title: format!("Track {}", index),
        audio_url: format!("http://localhost:8080/api/storage/song-{}", index),
        cover_url: None,
        owner: TrackOwner {
            id: UserId::new("owner"),
            display_name: "Owner".to_string(),
            avatar_url: None,
        },
        favorite,
        created_at: Utc::now(),
    }
}

fn arbitrary_catalog() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(any::<bool>(), 0..30).prop_map(|flags| {
        flags
            .into_iter()
            .enumerate()
            .map(|(i, favorite)| track(i, favorite))
            .collect()
    })
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    Toggle,
    Select(usize),
    SelectUnknown(usize),
    Snapshot(Vec<bool>),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::Toggle),
        (0usize..30).prop_map(Op::Select),
        (0usize..30).prop_map(Op::SelectUnknown),
        prop::collection::vec(any::<bool>(), 0..30).prop_map(Op::Snapshot),
    ]
}

fn arbitrary_policy() -> impl Strategy<Value = TogglePolicy> {
    prop_oneof![Just(TogglePolicy::Recompute), Just(TogglePolicy::ClearIndex)]
}

fn apply(vm: &mut PlaylistViewModel, op: &Op) {
    match op {
        Op::Next => {
            vm.next().unwrap();
        }
        Op::Previous => {
            vm.previous().unwrap();
        }
        Op::Toggle => {
            vm.toggle_favorites_only();
        }
        Op::Select(i) => {
            let picked = vm.catalog().unwrap().get(*i).cloned();
            if let Some(track) = picked {
                vm.select(&track).unwrap();
            }
        }
        Op::SelectUnknown(i) => {
            let mut ghost = track(*i, false);
            ghost.id = TrackId::new(format!("ghost-{}", i));
            let before = vm.selection().clone();

            let result = vm.select(&ghost);
            assert!(matches!(result, Err(PlaylistError::TrackNotInCatalog(_))));
            assert_eq!(vm.selection(), &before);
        }
        Op::Snapshot(flags) => {
            let tracks = flags
                .iter()
                .enumerate()
                .map(|(i, favorite)| track(i, *favorite))
                .collect();
            vm.apply_snapshot(tracks);
        }
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: `next` applied `len` times returns to the starting index
    #[test]
    fn next_is_cyclic(catalog in arbitrary_catalog(), favorites_only in any::<bool>()) {
        let mut vm = PlaylistViewModel::default();
        vm.apply_snapshot(catalog);
        if favorites_only {
            vm.toggle_favorites_only();
        }

        let len = vm.filtered_view().len();
        prop_assume!(len > 0);

        vm.next().unwrap();
        let start = vm.selection().index;
        for _ in 0..len {
            vm.next().unwrap();
        }
        prop_assert_eq!(vm.selection().index, start);
    }

    /// Property: `previous` applied `len` times returns to the starting index
    #[test]
    fn previous_is_cyclic(catalog in arbitrary_catalog(), favorites_only in any::<bool>()) {
        let mut vm = PlaylistViewModel::default();
        vm.apply_snapshot(catalog);
        if favorites_only {
            vm.toggle_favorites_only();
        }

        let len = vm.filtered_view().len();
        prop_assume!(len > 0);

        vm.previous().unwrap();
        let start = vm.selection().index;
        for _ in 0..len {
            vm.previous().unwrap();
        }
        prop_assert_eq!(vm.selection().index, start);
    }

    /// Property: `previous` undoes `next` once an index is established
    #[test]
    fn previous_undoes_next(catalog in arbitrary_catalog(), steps in 1usize..40) {
        let mut vm = PlaylistViewModel::default();
        vm.apply_snapshot(catalog);
        prop_assume!(!vm.filtered_view().is_empty());

        for _ in 0..steps {
            vm.next().unwrap();
        }
        let before = vm.selection().clone();

        vm.next().unwrap();
        vm.previous().unwrap();
        prop_assert_eq!(vm.selection(), &before);
    }

    /// Property: toggling twice under Recompute restores the view and index
    #[test]
    fn double_toggle_restores_view_and_index(catalog in arbitrary_catalog(), steps in 1usize..40) {
        let mut vm = PlaylistViewModel::new(PlaylistConfig {
            toggle_policy: TogglePolicy::Recompute,
        });
        vm.apply_snapshot(catalog);
        prop_assume!(!vm.filtered_view().is_empty());

        for _ in 0..steps {
            vm.next().unwrap();
        }
        let before = vm.selection().clone();
        let view_before: Vec<TrackId> = vm.filtered_view().iter().map(|t| t.id.clone()).collect();

        vm.toggle_favorites_only();
        vm.toggle_favorites_only();

        let view_after: Vec<TrackId> = vm.filtered_view().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(view_after, view_before);
        prop_assert_eq!(vm.selection(), &before);
    }

    /// Property: toggling twice restores the view whatever the starting filter
    #[test]
    fn double_toggle_restores_view(catalog in arbitrary_catalog(), start_filtered in any::<bool>()) {
        let mut vm = PlaylistViewModel::default();
        vm.apply_snapshot(catalog);
        if start_filtered {
            vm.toggle_favorites_only();
        }
        let view_before: Vec<TrackId> = vm.filtered_view().iter().map(|t| t.id.clone()).collect();

        vm.toggle_favorites_only();
        vm.toggle_favorites_only();

        let view_after: Vec<TrackId> = vm.filtered_view().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(view_after, view_before);
        prop_assert_eq!(vm.favorites_only(), start_filtered);
    }

    /// Property: the view is exactly the favorite subset, in catalog order
    #[test]
    fn filtered_view_is_ordered_subset(catalog in arbitrary_catalog()) {
        let mut vm = PlaylistViewModel::default();
        vm.apply_snapshot(catalog.clone());
        prop_assert_eq!(vm.filtered_view().len(), catalog.len());

        vm.toggle_favorites_only();
        let expected: Vec<&TrackId> = catalog.iter().filter(|t| t.favorite).map(|t| &t.id).collect();
        let actual: Vec<&TrackId> = vm.filtered_view().iter().map(|t| &t.id).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: after any operation sequence the index, when present,
    /// points at the selected track inside the current view
    #[test]
    fn index_always_points_at_selection(
        catalog in arbitrary_catalog(),
        policy in arbitrary_policy(),
        ops in prop::collection::vec(arbitrary_op(), 0..60),
    ) {
        let mut vm = PlaylistViewModel::new(PlaylistConfig { toggle_policy: policy });
        vm.apply_snapshot(catalog);

        for op in &ops {
            apply(&mut vm, op);

            let selection = vm.selection();
            if let Some(index) = selection.index {
                let view = vm.filtered_view();
                prop_assert!(index < view.len());
                prop_assert_eq!(Some(&view[index].id), selection.track_id());
            }

            if let Some(id) = selection.track_id() {
                let in_catalog = vm.catalog().unwrap().iter().any(|t| &t.id == id);
                prop_assert!(in_catalog, "selection references a vanished track");
            }
        }
    }
}
