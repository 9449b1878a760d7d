use std::f64::consts::PI;

use opmcoil::geo_3d::Point;
use opmcoil::store::{Artifact, ArtifactKind, LoopStore, StoreError};
use opmcoil::windings::{self, Loop, OrientationLabel};

fn unit_square() -> Loop {
    Loop::from_coords(&[
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, -1.0, 0.0],
    ]).unwrap()
}

#[test]
fn unit_square_flatten_and_classify() {
    let square = unit_square();

    let flat = windings::flatten_loop(&square);
    let expected = [0.0, PI / 2.0, PI, 3.0 * PI / 2.0];
    assert_eq!(flat.len(), 4);
    for (p, x) in flat.points().iter().zip(expected) {
        assert!((p.x - x).abs() < 1e-12, "x={} expected {}", p.x, x);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.z, 0.0);
    }

    let forward = windings::classify_loops(&[square.clone(), square.clone()], Point::zero());
    assert_eq!(forward[0], forward[1]);

    let backward = windings::classify_loops(&[square.reversed()], Point::zero());
    assert_eq!(backward[0], forward[0].opposite());
}

#[test]
fn stored_loops_flatten_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let store = LoopStore::new(dir.path());
    let loops = vec![unit_square(), unit_square().reversed()];

    store.save(&Artifact::Loops(loops.clone()), "Z").unwrap();
    let restored = match store.load(ArtifactKind::Loops, "Z").unwrap() {
        Artifact::Loops(restored) => restored,
        other => panic!("Expected loops, got {:?}", other.kind()),
    };
    assert_eq!(restored, loops);
    assert_eq!(windings::flatten_loops(&restored), windings::flatten_loops(&loops));

    let labels = windings::classify_loops(&restored, Point::zero());
    assert_eq!(labels, vec![OrientationLabel::Inward, OrientationLabel::Outward]);
}

#[test]
fn empty_store_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = LoopStore::new(dir.path());
    assert!(matches!(
        store.load(ArtifactKind::Loops, "nonexistent_key"),
        Err(StoreError::NotFound{..})
    ));
}
