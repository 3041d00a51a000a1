/// INTEGRATION TESTS: several clients sharing one relay
///
/// Every client applies the relayed stream in the same order, so once all asset
/// loads have settled their scenes must match, whatever each client's load latency.

use std::time::Duration;

use meetup_client::SceneClient;
use meetup_shared::{GeometryKind, ObjectHandle, SceneEvent, SyncError, Vector3};
use meetup_test::{init_logging, TestScene};

type Snapshot = Vec<(ObjectHandle, String, bool, Vector3, Vector3, Vector3)>;

fn snapshot(client: &SceneClient) -> Snapshot {
    client
        .registry()
        .iter()
        .map(|record| {
            (
                record.handle().clone(),
                record.kind().to_string(),
                record.is_pending(),
                record.position(),
                record.rotation(),
                record.scale(),
            )
        })
        .collect()
}

#[test]
fn clients_with_different_latencies_converge() {
    init_logging();
    let mut scene = TestScene::new();
    let alice = scene.connect("alice", Duration::from_millis(1));
    let bob = scene.connect("bob", Duration::from_millis(400));
    let carol = scene.connect("carol", Duration::ZERO);

    let box_handle = scene
        .client(alice)
        .add_primitive(GeometryKind::Box, "0xFF0000")
        .unwrap();
    let vase = scene.client(bob).add_asset("vase").unwrap();
    scene.receive_all();

    scene.client(carol).translate(&vase, [1.0, 0.0, -1.0]).unwrap();
    scene.client(alice).rotate(&vase, [0.0, 1.5, 0.0]).unwrap();
    scene.client(bob).scale(&box_handle, [2.0, 2.0, 2.0]).unwrap();
    scene.run_for(Duration::from_millis(50), Duration::from_millis(10));

    // bob is still loading; the others already show the vase
    assert!(scene.client(bob).registry().get(&vase).unwrap().is_pending());
    assert!(!scene.client(alice).registry().get(&vase).unwrap().is_pending());

    scene.client(carol).translate(&vase, [5.0, 5.0, 5.0]).unwrap();
    scene.run_for(Duration::from_millis(500), Duration::from_millis(10));

    let expected = snapshot(&scene.clients[alice]);
    assert_eq!(snapshot(&scene.clients[bob]), expected);
    assert_eq!(snapshot(&scene.clients[carol]), expected);

    let vase_record = scene.clients[bob].registry().get(&vase).unwrap();
    assert_eq!(vase_record.position(), [5.0, 5.0, 5.0]);
    assert_eq!(vase_record.rotation(), [0.0, 1.5, 0.0]);
    assert_eq!(
        scene.clients[bob].registry().list_handles(),
        &[box_handle, vase][..]
    );
}

#[test]
fn handles_from_different_clients_never_collide() {
    init_logging();
    let mut scene = TestScene::new();
    let alice = scene.connect("alice", Duration::ZERO);
    let bob = scene.connect("bob", Duration::ZERO);

    let from_alice = scene
        .client(alice)
        .add_primitive(GeometryKind::Sphere, "0x0000FF")
        .unwrap();
    let from_bob = scene
        .client(bob)
        .add_primitive(GeometryKind::Sphere, "0x00FF00")
        .unwrap();
    assert_ne!(from_alice, from_bob);

    scene.receive_all();
    for client in scene.clients.iter_mut() {
        assert_eq!(client.registry().len(), 2);
        assert!(!client
            .take_events()
            .iter()
            .any(|event| matches!(event, SceneEvent::Error(_))));
    }
}

#[test]
fn late_joiner_starts_with_an_empty_scene() {
    init_logging();
    let mut scene = TestScene::new();
    let alice = scene.connect("alice", Duration::ZERO);

    let handle = scene
        .client(alice)
        .add_primitive(GeometryKind::Plane, "#808080")
        .unwrap();
    scene.receive_all();

    let dave = scene.connect("dave", Duration::ZERO);
    scene.receive_all();
    assert!(scene.client(dave).registry().is_empty());

    // dave's edit reaches everyone, but dave has never seen the object
    scene.client(dave).translate(&handle, [0.0, 1.0, 0.0]).unwrap();
    scene.receive_all();

    assert_eq!(
        scene.client(alice).registry().get(&handle).unwrap().position(),
        [0.0, 1.0, 0.0]
    );
    assert_eq!(
        scene.client(dave).take_events(),
        vec![SceneEvent::Error(SyncError::UnknownHandle {
            handle: handle.to_string(),
            operation: "translate",
        })]
    );
}

#[test]
fn duplicate_add_is_rejected_on_every_client() {
    init_logging();
    let mut scene = TestScene::new();
    let alice = scene.connect("alice", Duration::ZERO);
    let bob = scene.connect("bob", Duration::ZERO);

    let add = meetup_shared::Mutation::add(
        "Box1",
        meetup_shared::ObjectSpec::primitive(GeometryKind::Box, "0xFF0000"),
    );
    scene.client(alice).send(&add).unwrap();
    scene.client(bob).send(&add).unwrap();
    scene.receive_all();

    for client in scene.clients.iter_mut() {
        assert_eq!(client.registry().len(), 1);
        let errors: Vec<SceneEvent> = client
            .take_events()
            .into_iter()
            .filter(|event| matches!(event, SceneEvent::Error(_)))
            .collect();
        assert_eq!(
            errors,
            vec![SceneEvent::Error(SyncError::DuplicateHandle {
                handle: "Box1".to_string()
            })]
        );
    }
}

#[test]
fn disconnected_client_stops_receiving() {
    init_logging();
    let mut scene = TestScene::new();
    let alice = scene.connect("alice", Duration::ZERO);
    let _bob = scene.connect("bob", Duration::ZERO);
    assert_eq!(scene.relay.connection_count(), 2);

    scene.clients.remove(alice);
    assert_eq!(scene.relay.connection_count(), 1);

    let bob = 0;
    scene
        .client(bob)
        .add_primitive(GeometryKind::Box, "0x123456")
        .unwrap();
    scene.receive_all();
    assert_eq!(scene.client(bob).registry().len(), 1);
    assert_eq!(scene.relay.relayed_count(), 1);
}
