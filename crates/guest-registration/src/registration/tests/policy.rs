use super::common::*;
use crate::registration::domain::{GuestRecord, Nationality, Sex};
use crate::registration::policy::{requires_marriage_certificate, GuestCompositionSignals};

#[test]
fn empty_and_single_guest_lists_never_require_certificate() {
    assert!(!requires_marriage_certificate(&[]));
    for sex in [Sex::Male, Sex::Female] {
        for nationality in Nationality::catalog() {
            let guests = [guest("Solo Guest", sex, nationality)];
            assert!(!requires_marriage_certificate(&guests));
        }
    }
}

#[test]
fn moroccan_woman_with_foreign_man_requires_certificate() {
    let guests = [
        guest("Salma Idrissi", Sex::Female, Nationality::Moroccan),
        guest("Pierre Durand", Sex::Male, Nationality::French),
    ];

    assert!(requires_marriage_certificate(&guests));
}

#[test]
fn moroccan_couple_requires_certificate() {
    let guests = [
        guest("Salma Idrissi", Sex::Female, Nationality::Moroccan),
        guest("Youssef Idrissi", Sex::Male, Nationality::Moroccan),
    ];

    assert!(requires_marriage_certificate(&guests));
}

#[test]
fn moroccan_man_with_foreign_woman_requires_certificate() {
    let guests = [
        guest("Youssef Idrissi", Sex::Male, Nationality::Moroccan),
        guest("Emily Stone", Sex::Female, Nationality::American),
    ];

    assert!(requires_marriage_certificate(&guests));
}

#[test]
fn foreign_mixed_group_does_not_require_certificate() {
    let guests = [
        guest("Claire Martin", Sex::Female, Nationality::French),
        guest("John Miller", Sex::Male, Nationality::American),
    ];

    assert!(!requires_marriage_certificate(&guests));
}

#[test]
fn single_sex_groups_do_not_require_certificate() {
    let moroccan_women = [
        guest("Salma Idrissi", Sex::Female, Nationality::Moroccan),
        guest("Nadia Alaoui", Sex::Female, Nationality::Moroccan),
        guest("Claire Martin", Sex::Female, Nationality::French),
    ];
    let men = [
        guest("Youssef Idrissi", Sex::Male, Nationality::Moroccan),
        guest("John Miller", Sex::Male, Nationality::American),
    ];

    assert!(!requires_marriage_certificate(&moroccan_women));
    assert!(!requires_marriage_certificate(&men));
}

#[test]
fn nationality_match_is_exact() {
    for raw in ["", "moroccan", "Moroccan ", "Marocaine"] {
        let guests = [
            guest_with_raw_nationality(Sex::Female, raw),
            guest("Claire Martin", Sex::Female, Nationality::French),
            guest("John Miller", Sex::Male, Nationality::American),
        ];
        assert!(
            !requires_marriage_certificate(&guests),
            "{raw:?} must count as non-Moroccan"
        );
    }

    let guests = [
        guest_with_raw_nationality(Sex::Female, "Moroccan"),
        guest("John Miller", Sex::Male, Nationality::American),
    ];
    assert!(requires_marriage_certificate(&guests));
}

#[test]
fn guests_without_sex_contribute_nothing() {
    let mut undecided = guest("Youssef Idrissi", Sex::Male, Nationality::Moroccan);
    undecided.sex = None;
    let guests = [
        undecided,
        guest("Salma Idrissi", Sex::Female, Nationality::Moroccan),
    ];

    let signals = GuestCompositionSignals::observe(&guests);

    assert!(signals.moroccan_female);
    assert!(!signals.moroccan_male);
    assert!(!requires_marriage_certificate(&guests));
}

#[test]
fn recomputation_is_idempotent() {
    let guests = [
        guest("Salma Idrissi", Sex::Female, Nationality::Moroccan),
        guest("Pierre Durand", Sex::Male, Nationality::French),
    ];

    let first = requires_marriage_certificate(&guests);
    let second = requires_marriage_certificate(&guests);

    assert_eq!(first, second);
    assert_eq!(
        GuestCompositionSignals::observe(&guests),
        GuestCompositionSignals::observe(&guests)
    );
}

/// "A Moroccan guest and a guest of the opposite sex are both present."
fn simplified_rule(guests: &[GuestRecord]) -> bool {
    guests.iter().any(|moroccan| {
        moroccan.is_moroccan()
            && moroccan.sex.is_some_and(|sex| {
                guests
                    .iter()
                    .any(|other| other.sex == Some(sex.opposite()))
            })
    })
}

#[test]
fn explicit_rule_matches_simplified_rule_for_every_composition() {
    let archetypes = [
        guest("Moroccan Woman", Sex::Female, Nationality::Moroccan),
        guest("Moroccan Man", Sex::Male, Nationality::Moroccan),
        guest("Foreign Woman", Sex::Female, Nationality::French),
        guest("Foreign Man", Sex::Male, Nationality::American),
    ];

    for mask in 0u8..16 {
        let guests = archetypes
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1u8 << *bit) != 0)
            .map(|(_, record)| record.clone())
            .collect::<Vec<_>>();

        assert_eq!(
            requires_marriage_certificate(&guests),
            simplified_rule(&guests),
            "composition mask {mask:04b}"
        );
    }
}
