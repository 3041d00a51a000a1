/// INTEGRATION TESTS: the three reference sessions, end to end through the relay
///
/// 1. A red box is added and moved
/// 2. A vase asset loads in 2 ms while a translate for it is already waiting
/// 3. A translate for an object nobody added

use std::time::Duration;

use meetup_shared::{
    GeometryKind, Mutation, ObjectHandle, ObjectKind, ObjectSpec, SceneEvent, SyncError,
    TransformChannel,
};
use meetup_test::{init_logging, TestScene};

#[test]
fn red_box_is_added_and_moved() {
    init_logging();
    let mut scene = TestScene::new();
    let alice = scene.connect("alice", Duration::ZERO);

    let client = scene.client(alice);
    client
        .send(&Mutation::add(
            "Box1",
            ObjectSpec::primitive(GeometryKind::Box, "0xFF0000"),
        ))
        .unwrap();
    client
        .send(&Mutation::translate("Box1", [1.0, 2.0, 3.0]))
        .unwrap();

    scene.receive_all();

    let client = scene.client(alice);
    let handle = ObjectHandle::from("Box1");
    let record = client.registry().get(&handle).expect("Box1 should exist");
    assert_eq!(record.kind(), ObjectKind::Geometry(GeometryKind::Box));
    assert_eq!(record.position(), [1.0, 2.0, 3.0]);
    assert_eq!(record.rotation(), [0.0, 0.0, 0.0]);
    assert_eq!(record.scale(), [1.0, 1.0, 1.0]);
    assert_eq!(
        record.renderable().and_then(|renderable| renderable.color()).map(|color| color.hex()),
        Some(0xFF0000)
    );

    assert_eq!(
        client.take_events(),
        vec![
            SceneEvent::Created(handle.clone()),
            SceneEvent::Transformed(handle, TransformChannel::Position),
        ]
    );
}

#[test]
fn vase_translate_waits_for_the_asset() {
    init_logging();
    let mut scene = TestScene::new();
    let alice = scene.connect("alice", Duration::from_millis(2));

    let client = scene.client(alice);
    client
        .send(&Mutation::add("Vase1", ObjectSpec::asset("vase")))
        .unwrap();
    client
        .send(&Mutation::translate("Vase1", [0.0, 0.0, 5.0]))
        .unwrap();

    scene.receive_all();

    let handle = ObjectHandle::from("Vase1");
    {
        let client = scene.client(alice);
        let record = client.registry().get(&handle).expect("Vase1 is registered while loading");
        assert!(record.is_pending());
        assert_eq!(record.position(), [0.0, 0.0, 0.0]);
        assert_eq!(client.dispatcher().deferred().waiting_for(&handle), 1);
    }

    scene.clock.advance_ms(2);
    scene.receive_all();

    let client = scene.client(alice);
    let record = client.registry().get(&handle).unwrap();
    assert!(!record.is_pending());
    assert_eq!(record.position(), [0.0, 0.0, 5.0]);
    assert!(client.dispatcher().deferred().is_empty());
    assert_eq!(client.dispatcher().loads_in_flight(), 0);

    assert_eq!(
        client.take_events(),
        vec![
            SceneEvent::Loading(handle.clone()),
            SceneEvent::Created(handle.clone()),
            SceneEvent::Transformed(handle, TransformChannel::Position),
        ]
    );
}

#[test]
fn ghost_translate_is_reported_and_ignored() {
    init_logging();
    let mut scene = TestScene::new();
    let alice = scene.connect("alice", Duration::ZERO);

    scene
        .client(alice)
        .send(&Mutation::translate("Ghost", [1.0, 1.0, 1.0]))
        .unwrap();
    scene.receive_all();

    let client = scene.client(alice);
    assert!(client.registry().is_empty());
    assert_eq!(
        client.take_events(),
        vec![SceneEvent::Error(SyncError::UnknownHandle {
            handle: "Ghost".to_string(),
            operation: "translate",
        })]
    );

    // a ghost never blocks later work
    let handle = client.add_primitive(GeometryKind::Cone, "#00FF00").unwrap();
    scene.receive_all();
    assert!(scene.client(alice).registry().contains(&handle));
}

#[test]
fn remove_cancels_a_pending_load_and_its_waiters() {
    init_logging();
    let mut scene = TestScene::new();
    let alice = scene.connect("alice", Duration::from_millis(50));

    let client = scene.client(alice);
    let handle = client.add_asset("vase").unwrap();
    client.rotate(&handle, [0.0, 1.5, 0.0]).unwrap();
    client.remove(&handle).unwrap();

    scene.receive_all();
    scene.run_for(Duration::from_millis(200), Duration::from_millis(10));

    let client = scene.client(alice);
    assert!(client.registry().is_empty());
    assert!(client.dispatcher().deferred().is_empty());
    assert_eq!(client.dispatcher().loads_in_flight(), 0);

    let events = client.take_events();
    assert_eq!(
        events,
        vec![
            SceneEvent::Loading(handle.clone()),
            SceneEvent::Error(SyncError::TargetRemoved {
                handle: handle.to_string(),
                operation: "rotate",
            }),
            SceneEvent::Removed(handle.clone()),
        ]
    );
    assert!(!events.contains(&SceneEvent::Created(handle)));
}

#[test]
fn missing_asset_is_removed_with_a_load_failure() {
    init_logging();
    let mut scene = TestScene::new();
    let alice = scene.connect("alice", Duration::from_millis(5));

    let client = scene.client(alice);
    let handle = client.add_asset("nonexistent").unwrap();
    client.scale(&handle, [2.0, 2.0, 2.0]).unwrap();

    scene.receive_all();
    scene.run_for(Duration::from_millis(20), Duration::from_millis(5));

    let client = scene.client(alice);
    assert!(!client.registry().contains(&handle));

    let events = client.take_events();
    assert_eq!(events[0], SceneEvent::Loading(handle.clone()));
    assert_eq!(events[1], SceneEvent::Removed(handle.clone()));
    assert!(matches!(
        &events[2],
        SceneEvent::Error(SyncError::LoadFailure { handle: failed, .. }) if failed == handle.as_str()
    ));
    assert!(matches!(
        &events[3],
        SceneEvent::Error(SyncError::TargetNeverResolved { operation: "scale", .. })
    ));
    assert_eq!(events.len(), 4);
}
