//! Integration tests for SpliceService across both partitions.

mod support;

use splice_store::{
    Cable, CablePatch, CableType, Circuit, CircuitPatch, CircuitUpdate, FileStore, Mode,
    NewCable, NewCircuit, RecordStore, ServiceConfig, ServiceError, SnapshotBlob, SpliceService,
};
use support::{circuit_at, service, service_with, trunk};

#[test]
fn created_cable_reads_back_with_mode_default_ribbon_size() {
    let service = service();
    for (mode, expected) in [(Mode::Fiber, 12), (Mode::Copper, 25)] {
        let cable = service
            .create_cable(NewCable::new("Trunk1", CableType::Trunk), mode)
            .unwrap();
        let stored = service.get_cable(&cable.id, mode).unwrap().unwrap();
        assert_eq!(stored.id, cable.id);
        assert_eq!(stored.ribbon_size, expected);

        let overridden = service
            .create_cable(NewCable::new("Odd", CableType::Trunk).with_ribbon_size(4), mode)
            .unwrap();
        assert_eq!(
            service.get_cable(&overridden.id, mode).unwrap().unwrap().ribbon_size,
            4
        );
    }
}

#[test]
fn configured_ribbon_defaults_are_used() {
    let config = ServiceConfig::default().with_ribbon_defaults(splice_store::RibbonDefaults {
        fiber: 24,
        copper: 50,
    });
    let service = service_with(config);
    assert_eq!(trunk(&service, "F", Mode::Fiber).ribbon_size, 24);
    assert_eq!(trunk(&service, "C", Mode::Copper).ribbon_size, 50);
}

#[test]
fn deleting_cable_removes_all_its_circuits() {
    let service = service();
    let cable = trunk(&service, "Trunk1", Mode::Fiber);
    for position in 0..7 {
        service
            .create_circuit(circuit_at(&cable.id, position), Mode::Fiber)
            .unwrap();
    }
    assert_eq!(
        service.list_circuits_by_cable(&cable.id, Mode::Fiber).unwrap().len(),
        7
    );

    assert!(service.delete_cable(&cable.id, Mode::Fiber).unwrap());

    assert!(service.get_cable(&cable.id, Mode::Fiber).unwrap().is_none());
    assert!(service
        .list_circuits(Mode::Fiber)
        .unwrap()
        .iter()
        .all(|circuit| circuit.cable_id != cable.id));
}

#[test]
fn circuits_by_cable_are_ordered_by_position_for_any_insertion_order() {
    let service = service();
    let cable = trunk(&service, "Trunk1", Mode::Fiber);
    let other = trunk(&service, "Other", Mode::Fiber);

    for position in [5, 3, 9, 1, 3, 0, 7, -2, 4] {
        service
            .create_circuit(circuit_at(&cable.id, position), Mode::Fiber)
            .unwrap();
    }
    service
        .create_circuit(circuit_at(&other.id, 2), Mode::Fiber)
        .unwrap();

    let positions: Vec<i64> = service
        .list_circuits_by_cable(&cable.id, Mode::Fiber)
        .unwrap()
        .iter()
        .map(|circuit| circuit.position)
        .collect();
    assert_eq!(positions, vec![-2, 0, 1, 3, 3, 4, 5, 7, 9]);
}

#[test]
fn created_circuit_is_always_unspliced_and_unfed() {
    let service = service();
    let cable = trunk(&service, "Trunk1", Mode::Fiber);

    // The editor's payload may carry splice/feed fields; they never reach
    // the stored circuit.
    let payload = serde_json::json!({
        "cableId": cable.id,
        "circuitId": "ABC,1-2",
        "position": 0,
        "fiberStart": 1,
        "fiberEnd": 2,
        "isSpliced": 1,
        "feedCableId": "elsewhere",
        "feedFiberStart": 1,
        "feedFiberEnd": 2
    });
    let input: NewCircuit = serde_json::from_value(payload).unwrap();

    let circuit = service.create_circuit(input, Mode::Fiber).unwrap();
    let stored = service.get_circuit(&circuit.id, Mode::Fiber).unwrap().unwrap();
    assert_eq!(stored.circuit_id, "ABC,1-2");
    assert_eq!(stored.is_spliced, 0);
    assert_eq!(stored.feed_cable_id, None);
    assert_eq!(stored.feed_fiber_start, None);
    assert_eq!(stored.feed_fiber_end, None);
}

#[test]
fn fifty_one_saves_leave_the_fifty_most_recent() {
    let service = service();
    let created: Vec<_> = (0..51)
        .map(|n| service.create_save(format!("save {n}"), Mode::Fiber).unwrap())
        .collect();

    let listed = service.list_saves(Mode::Fiber).unwrap();
    assert_eq!(listed.len(), 50);

    let mut expected: Vec<_> = created[1..].to_vec();
    expected.reverse();
    assert_eq!(listed, expected);
    assert!(service.get_save(&created[0].id, Mode::Fiber).unwrap().is_none());
}

#[test]
fn saves_are_listed_newest_first() {
    let service = service();
    let first = service.create_save("first", Mode::Fiber).unwrap();
    let second = service.create_save("second", Mode::Fiber).unwrap();
    assert!(second.created_at > first.created_at);
    assert_eq!(
        service.list_saves(Mode::Fiber).unwrap(),
        vec![second, first]
    );
}

#[test]
fn loading_missing_save_fails_without_touching_state() {
    let service = service();
    let cable = trunk(&service, "Trunk1", Mode::Fiber);
    let circuit = service
        .create_circuit(circuit_at(&cable.id, 1), Mode::Fiber)
        .unwrap();

    let err = service.load_save("missing", Mode::Fiber).unwrap_err();
    assert!(matches!(err, ServiceError::SaveNotFound(ref id) if id == "missing"));

    assert_eq!(service.list_cables(Mode::Fiber).unwrap(), vec![cable]);
    assert_eq!(service.list_circuits(Mode::Fiber).unwrap(), vec![circuit]);
}

#[test]
fn save_then_load_restores_exact_records_after_mutations() {
    let service = service();
    let a = trunk(&service, "A", Mode::Fiber);
    let b = trunk(&service, "B", Mode::Fiber);
    let fed = service
        .create_circuit(circuit_at(&a.id, 1), Mode::Fiber)
        .unwrap();
    service
        .update_circuit(
            &fed.id,
            CircuitPatch::default().spliced(1).feed(&b.id, 1, 1),
            Mode::Fiber,
        )
        .unwrap();
    service
        .create_circuit(circuit_at(&b.id, 2), Mode::Fiber)
        .unwrap();

    let mut cables_before = service.list_cables(Mode::Fiber).unwrap();
    let mut circuits_before = service.list_circuits(Mode::Fiber).unwrap();
    let save = service.create_save("baseline", Mode::Fiber).unwrap();

    // Intervening work that must disappear on restore.
    service.delete_cable(&a.id, Mode::Fiber).unwrap();
    service
        .update_cable(&b.id, CablePatch::default().name("Renamed"), Mode::Fiber)
        .unwrap();
    let c = trunk(&service, "C", Mode::Fiber);
    service
        .create_circuit(circuit_at(&c.id, 1), Mode::Fiber)
        .unwrap();

    service.load_save(&save.id, Mode::Fiber).unwrap();

    let mut cables_after = service.list_cables(Mode::Fiber).unwrap();
    let mut circuits_after = service.list_circuits(Mode::Fiber).unwrap();
    cables_before.sort_by(|x, y| x.id.cmp(&y.id));
    cables_after.sort_by(|x, y| x.id.cmp(&y.id));
    circuits_before.sort_by(|x, y| x.id.cmp(&y.id));
    circuits_after.sort_by(|x, y| x.id.cmp(&y.id));
    assert_eq!(cables_after, cables_before);
    assert_eq!(circuits_after, circuits_before);

    let blob = SnapshotBlob::decode(&save.data).unwrap();
    assert_eq!(blob.cables.len(), 2);
    assert_eq!(blob.circuits.len(), 2);
}

#[test]
fn loading_a_corrupt_save_leaves_state_untouched() {
    let service = service();
    let cable = trunk(&service, "Trunk1", Mode::Fiber);

    service
        .partitions()
        .resolve(Mode::Fiber)
        .insert(&splice_store::Save {
            id: "broken".into(),
            name: "broken".into(),
            created_at: chrono::Utc::now(),
            data: "{\"cables\": 5}".into(),
        })
        .unwrap();

    let err = service.load_save("broken", Mode::Fiber).unwrap_err();
    assert!(matches!(err, ServiceError::Snapshot(_)));
    assert_eq!(service.list_cables(Mode::Fiber).unwrap(), vec![cable]);
}

#[test]
fn scenario_two_circuits_listed_by_position() {
    let service = service();
    let a = service
        .create_cable(NewCable::new("Trunk1", CableType::Trunk), Mode::Fiber)
        .unwrap();
    let second = service
        .create_circuit(NewCircuit::new(&a.id, 2, 1, 1), Mode::Fiber)
        .unwrap();
    let first = service
        .create_circuit(NewCircuit::new(&a.id, 1, 2, 2), Mode::Fiber)
        .unwrap();

    let listed = service.list_circuits_by_cable(&a.id, Mode::Fiber).unwrap();
    assert_eq!(listed, vec![first, second]);
}

#[test]
fn partitions_never_interact() {
    let service = service();
    let copper = trunk(&service, "Copper1", Mode::Copper);
    assert!(service.list_cables(Mode::Fiber).unwrap().is_empty());
    assert!(service.get_cable(&copper.id, Mode::Fiber).unwrap().is_none());

    // Same id in both partitions.
    let twin = Cable {
        id: copper.id.clone(),
        name: "Fiber twin".into(),
        cable_type: CableType::Feeder,
        ribbon_size: 12,
    };
    service
        .partitions()
        .resolve(Mode::Fiber)
        .insert(&twin)
        .unwrap();

    service.delete_cable(&copper.id, Mode::Copper).unwrap();
    assert_eq!(service.list_cables(Mode::Fiber).unwrap(), vec![twin]);
    assert!(service.list_cables(Mode::Copper).unwrap().is_empty());

    service.create_save("fiber only", Mode::Fiber).unwrap();
    assert!(service.list_saves(Mode::Copper).unwrap().is_empty());

    service.reset_all_data(Mode::Copper).unwrap();
    assert_eq!(service.list_cables(Mode::Fiber).unwrap().len(), 1);
}

#[test]
fn bulk_update_applies_every_change() {
    let service = service();
    let from = trunk(&service, "From", Mode::Fiber);
    let to = trunk(&service, "To", Mode::Fiber);
    let circuits: Vec<Circuit> = (0..50)
        .map(|position| {
            service
                .create_circuit(circuit_at(&from.id, position), Mode::Fiber)
                .unwrap()
        })
        .collect();

    let updates = circuits
        .iter()
        .map(|circuit| {
            CircuitUpdate::new(
                &circuit.id,
                CircuitPatch::default()
                    .cable_id(&to.id)
                    .position(circuit.position + 100),
            )
        })
        .collect();

    let outcome = service.bulk_update_circuits(updates, Mode::Fiber).unwrap();
    assert_eq!(outcome.applied.len(), 50);
    assert!(outcome.missing.is_empty());

    assert!(service
        .list_circuits_by_cable(&from.id, Mode::Fiber)
        .unwrap()
        .is_empty());
    let moved = service.list_circuits_by_cable(&to.id, Mode::Fiber).unwrap();
    assert_eq!(moved.len(), 50);
    assert_eq!(moved.first().map(|c| c.position), Some(100));
    assert_eq!(moved.last().map(|c| c.position), Some(149));
}

#[test]
fn file_backed_service_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServiceConfig::default().with_data_dir(dir.path());

    let (cable, save) = {
        let service = SpliceService::<FileStore>::open(config.clone()).unwrap();
        let cable = trunk(&service, "Trunk1", Mode::Copper);
        service
            .create_circuit(circuit_at(&cable.id, 1), Mode::Copper)
            .unwrap();
        let save = service.create_save("persisted", Mode::Copper).unwrap();
        (cable, save)
    };

    let reopened = SpliceService::<FileStore>::open(config).unwrap();
    assert_eq!(reopened.list_cables(Mode::Copper).unwrap(), vec![cable.clone()]);
    assert_eq!(
        reopened.list_saves(Mode::Copper).unwrap(),
        vec![save.clone()]
    );
    assert!(reopened.list_cables(Mode::Fiber).unwrap().is_empty());

    reopened.reset_all_data(Mode::Copper).unwrap();
    reopened.load_save(&save.id, Mode::Copper).unwrap();
    assert_eq!(
        reopened.list_circuits_by_cable(&cable.id, Mode::Copper).unwrap().len(),
        1
    );
}

#[test]
fn opening_without_data_dir_fails() {
    let Err(err) = SpliceService::<FileStore>::open(ServiceConfig::default()) else {
        panic!("opening without a data directory should fail");
    };
    assert!(matches!(err, ServiceError::Store(_)));
}
