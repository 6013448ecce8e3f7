//! Item metadata: tags, attributes, events, and frame application.

mod fixtures;

use std::collections::BTreeMap;

use fixtures::{account, name, registry_with_item, MANAGER};
use marque::{ErrorKind, Serial, Timestamp};

#[test]
fn tags_are_manager_only_and_unique_per_item() {
    let (mut reg, serial) = registry_with_item();

    // The owner has no metadata rights.
    let err = reg
        .new_tag(&account("u1"), serial, name("rarity"), "common", None, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    reg.new_tag(&account(MANAGER), serial, name("rarity"), "common", None, None)
        .unwrap();
    let err = reg
        .new_tag(&account(MANAGER), serial, name("rarity"), "rare", None, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let tag = reg.state().tags().get(&serial, &name("rarity")).unwrap();
    assert_eq!(tag.content, "common");
    assert_eq!(tag.checksum, "");
    assert_eq!(tag.algorithm, "");
}

#[test]
fn tag_update_defaults_checksum_keeps_algorithm() {
    let (mut reg, serial) = registry_with_item();
    reg.new_tag(
        &account(MANAGER),
        serial,
        name("art"),
        "ipfs://v1",
        Some("aabb".into()),
        Some("sha256".into()),
    )
    .unwrap();

    reg.update_tag(&account(MANAGER), serial, &name("art"), "ipfs://v2", None, None)
        .unwrap();
    let tag = reg.state().tags().get(&serial, &name("art")).unwrap();
    assert_eq!(tag.content, "ipfs://v2");
    assert_eq!(tag.checksum, "");
    assert_eq!(tag.algorithm, "sha256");

    let err = reg
        .update_tag(&account(MANAGER), serial, &name("nope"), "x", None, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn tag_removal() {
    let (mut reg, serial) = registry_with_item();
    reg.new_tag(&account(MANAGER), serial, name("rarity"), "common", None, None)
        .unwrap();

    reg.remove_tag(&account(MANAGER), serial, &name("rarity"), "obsolete")
        .unwrap();
    assert!(reg.state().tags().get(&serial, &name("rarity")).is_none());

    let err = reg
        .remove_tag(&account(MANAGER), serial, &name("rarity"), "")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn metadata_on_missing_item_is_not_found() {
    let (mut reg, _) = registry_with_item();
    let ghost = Serial::new(99);

    let err = reg
        .new_tag(&account(MANAGER), ghost, name("rarity"), "x", None, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = reg
        .new_attribute(&account(MANAGER), ghost, name("power"), 1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = reg
        .new_event(&account(MANAGER), ghost, name("forged"), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn attribute_points_arithmetic() {
    let (mut reg, serial) = registry_with_item();

    // Negative initial points are allowed.
    reg.new_attribute(&account(MANAGER), serial, name("karma"), -5)
        .unwrap();
    let err = reg
        .new_attribute(&account(MANAGER), serial, name("karma"), 0)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    reg.set_points(&account(MANAGER), serial, &name("karma"), 10)
        .unwrap();
    reg.increase_points(&account(MANAGER), serial, &name("karma"), 7)
        .unwrap();
    assert_eq!(
        reg.state().attributes().get(&serial, &name("karma")).unwrap().points,
        17
    );

    // No clamping: decreases may cross zero.
    reg.decrease_points(&account(MANAGER), serial, &name("karma"), 20)
        .unwrap();
    assert_eq!(
        reg.state().attributes().get(&serial, &name("karma")).unwrap().points,
        -3
    );
}

#[test]
fn point_deltas_must_be_strictly_positive() {
    let (mut reg, serial) = registry_with_item();
    reg.new_attribute(&account(MANAGER), serial, name("power"), 1)
        .unwrap();

    let err = reg
        .increase_points(&account(MANAGER), serial, &name("power"), 0)
        .unwrap_err();
    assert_eq!(err.to_string(), "must add greater than zero points");
    let err = reg
        .decrease_points(&account(MANAGER), serial, &name("power"), 0)
        .unwrap_err();
    assert_eq!(err.to_string(), "must subtract greater than zero points");
    assert_eq!(
        reg.state().attributes().get(&serial, &name("power")).unwrap().points,
        1
    );
}

#[test]
fn attribute_removal() {
    let (mut reg, serial) = registry_with_item();
    reg.new_attribute(&account(MANAGER), serial, name("power"), 1)
        .unwrap();

    reg.remove_attribute(&account(MANAGER), serial, &name("power"))
        .unwrap();
    let err = reg
        .remove_attribute(&account(MANAGER), serial, &name("power"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn event_time_defaults_to_host_clock() {
    let (mut reg, serial) = registry_with_item();

    reg.new_event(&account(MANAGER), serial, name("forged"), None)
        .unwrap();
    let event = reg.state().events().get(&serial, &name("forged")).unwrap();
    assert_eq!(event.event_time, reg.host().now);

    reg.new_event(
        &account(MANAGER),
        serial,
        name("minted"),
        Some(Timestamp::from_secs(42)),
    )
    .unwrap();
    let event = reg.state().events().get(&serial, &name("minted")).unwrap();
    assert_eq!(event.event_time, Timestamp::from_secs(42));

    let err = reg
        .new_event(&account(MANAGER), serial, name("forged"), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn set_event_time_adds_to_the_stored_value() {
    let (mut reg, serial) = registry_with_item();
    reg.new_event(
        &account(MANAGER),
        serial,
        name("forged"),
        Some(Timestamp::from_secs(100)),
    )
    .unwrap();

    reg.set_event_time(&account(MANAGER), serial, &name("forged"), Timestamp::from_secs(50))
        .unwrap();
    let event = reg.state().events().get(&serial, &name("forged")).unwrap();
    assert_eq!(event.event_time, Timestamp::from_secs(150));

    reg.remove_event(&account(MANAGER), serial, &name("forged"))
        .unwrap();
    let err = reg
        .set_event_time(&account(MANAGER), serial, &name("forged"), Timestamp::from_secs(1))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

fn starter_frame(reg: &mut marque::Registry<fixtures::TestHost>) {
    let tags = BTreeMap::from([(name("rarity"), "common".to_string())]);
    let attrs = BTreeMap::from([(name("power"), 10)]);
    reg.new_frame(&account(MANAGER), name("starter"), &name("widgets"), tags, attrs)
        .unwrap();
}

#[test]
fn frame_application_respects_overwrite_policy() {
    let (mut reg, serial) = registry_with_item();
    starter_frame(&mut reg);

    reg.apply_frame(&account(MANAGER), &name("starter"), serial, false)
        .unwrap();
    assert_eq!(
        reg.state().tags().get(&serial, &name("rarity")).unwrap().content,
        "common"
    );
    assert_eq!(
        reg.state().attributes().get(&serial, &name("power")).unwrap().points,
        10
    );

    // A second frame with different defaults: no overwrite, no change.
    let tags = BTreeMap::from([(name("rarity"), "epic".to_string())]);
    let attrs = BTreeMap::from([(name("power"), 99)]);
    reg.new_frame(&account(MANAGER), name("upgrade"), &name("widgets"), tags, attrs)
        .unwrap();
    reg.apply_frame(&account(MANAGER), &name("upgrade"), serial, false)
        .unwrap();
    assert_eq!(
        reg.state().tags().get(&serial, &name("rarity")).unwrap().content,
        "common"
    );
    assert_eq!(
        reg.state().attributes().get(&serial, &name("power")).unwrap().points,
        10
    );

    // With overwrite, the defaults win.
    reg.apply_frame(&account(MANAGER), &name("upgrade"), serial, true)
        .unwrap();
    assert_eq!(
        reg.state().tags().get(&serial, &name("rarity")).unwrap().content,
        "epic"
    );
    assert_eq!(
        reg.state().attributes().get(&serial, &name("power")).unwrap().points,
        99
    );
}

#[test]
fn frame_overwrite_resets_tag_checksum() {
    let (mut reg, serial) = registry_with_item();
    reg.new_tag(
        &account(MANAGER),
        serial,
        name("rarity"),
        "rare",
        Some("aabb".into()),
        Some("sha256".into()),
    )
    .unwrap();
    starter_frame(&mut reg);

    reg.apply_frame(&account(MANAGER), &name("starter"), serial, true)
        .unwrap();
    let tag = reg.state().tags().get(&serial, &name("rarity")).unwrap();
    assert_eq!(tag.content, "common");
    assert_eq!(tag.checksum, "");
    assert_eq!(tag.algorithm, "");
}

#[test]
fn frame_lifecycle_and_authorization() {
    let (mut reg, serial) = registry_with_item();
    starter_frame(&mut reg);

    let err = reg
        .new_frame(
            &account(MANAGER),
            name("starter"),
            &name("widgets"),
            BTreeMap::new(),
            BTreeMap::new(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // Only the frame's group manager may apply or remove it.
    let err = reg
        .apply_frame(&account("u1"), &name("starter"), serial, false)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let err = reg
        .apply_frame(&account(MANAGER), &name("ghost"), serial, false)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    reg.remove_frame(&account(MANAGER), &name("starter"), "unused")
        .unwrap();
    let err = reg
        .remove_frame(&account(MANAGER), &name("starter"), "")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
