use voxelnav_core::{sample_route, LocationCatalog, NavSession};

#[test]
fn a_session_can_start_and_arrive() {
    let catalog = LocationCatalog::sample();
    let destination = catalog.destinations()[0].clone();

    let mut session = NavSession::default();
    session
        .start(destination.clone(), sample_route(&destination))
        .expect("session starts");

    let mut guard = 0;
    while !session.is_arrived() {
        session.tick();
        guard += 1;
        assert!(guard < 100, "session should arrive within the step count");
    }
    assert_eq!(session.progress_percent(), 100.0);
    assert_eq!(session.destination(), destination);
}
