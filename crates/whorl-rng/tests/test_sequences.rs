//! Low-discrepancy sequence properties: known leading values, cursor
//! discipline, resumability, and basic equidistribution.

use pretty_assertions::assert_eq;
use whorl_rng::seq::{Halton, PointSequence, RSequence};

/// Halton with bases (2, 3): the first point is the van der Corput values
/// of index 1, i.e. (1/2, 1/3).
#[test]
fn test_halton_2_3_leading_values() {
    let mut h = Halton::with_bases(vec![2, 3]);
    let mut p = [0.0; 2];
    h.next_point(&mut p);
    assert!((p[0] - 0.5).abs() < 1e-15);
    assert!((p[1] - 1.0 / 3.0).abs() < 1e-15);

    // The next few values of the base-2 axis: 1/4, 3/4, 1/8.
    h.next_point(&mut p);
    assert!((p[0] - 0.25).abs() < 1e-15);
    h.next_point(&mut p);
    assert!((p[0] - 0.75).abs() < 1e-15);
    h.next_point(&mut p);
    assert!((p[0] - 0.125).abs() < 1e-15);
}

/// Default bases are the first N primes.
#[test]
fn test_halton_default_bases() {
    let h = Halton::new(5);
    assert_eq!(h.bases(), &[2, 3, 5, 7, 11]);
    assert_eq!(h.dimension(), 5);
}

/// The cursor advances by exactly one per call and resumes exactly.
#[test]
fn test_cursor_discipline() {
    let mut h = Halton::new(2);
    let mut r = RSequence::new(2);
    let mut p = [0.0; 2];
    for expected in 1..=100u64 {
        h.next_point(&mut p);
        r.next_point(&mut p);
        assert_eq!(h.index(), expected);
        assert_eq!(r.index(), expected);
    }

    let mut resumed = Halton::new(2);
    resumed.set_index(100);
    let mut a = [0.0; 2];
    let mut b = [0.0; 2];
    h.next_point(&mut a);
    resumed.next_point(&mut b);
    assert_eq!(a, b);
}

/// `skip` is equivalent to discarding that many points.
#[test]
fn test_skip_equivalence() {
    let mut walked_h = Halton::new(3);
    let mut skipped_h = Halton::new(3);
    let mut walked_r = RSequence::new(3);
    let mut skipped_r = RSequence::new(3);
    let mut p = [0.0; 3];
    for _ in 0..123 {
        walked_h.next_point(&mut p);
        walked_r.next_point(&mut p);
    }
    skipped_h.skip(123);
    skipped_r.skip(123);

    let mut a = [0.0; 3];
    let mut b = [0.0; 3];
    walked_h.next_point(&mut a);
    skipped_h.next_point(&mut b);
    assert_eq!(a, b);
    walked_r.next_point(&mut a);
    skipped_r.next_point(&mut b);
    assert_eq!(a, b);
}

/// Reset returns both sequences to their initial state.
#[test]
fn test_reset() {
    let mut h = Halton::new(2);
    let mut r = RSequence::new(2);
    let mut first_h = [0.0; 2];
    let mut first_r = [0.0; 2];
    h.next_point(&mut first_h);
    r.next_point(&mut first_r);
    for _ in 0..50 {
        let mut p = [0.0; 2];
        h.next_point(&mut p);
        r.next_point(&mut p);
    }
    h.reset();
    r.reset();
    assert_eq!(h.index(), 0);
    assert_eq!(r.index(), 0);
    let mut again_h = [0.0; 2];
    let mut again_r = [0.0; 2];
    h.next_point(&mut again_h);
    r.next_point(&mut again_r);
    assert_eq!(first_h, again_h);
    assert_eq!(first_r, again_r);
}

/// Every coordinate of every point lies in [0, 1), and the points spread
/// across the unit square rather than clustering.
#[test]
fn test_equidistribution_rough() {
    for seq in [
        Box::new(Halton::new(2)) as Box<dyn PointSequence>,
        Box::new(RSequence::new(2)),
    ] {
        let mut seq = seq;
        let mut counts = [[0usize; 4]; 4];
        let mut p = [0.0; 2];
        const POINTS: usize = 4096;
        for _ in 0..POINTS {
            seq.next_point(&mut p);
            assert!((0.0..1.0).contains(&p[0]));
            assert!((0.0..1.0).contains(&p[1]));
            let cx = (p[0] * 4.0) as usize;
            let cy = (p[1] * 4.0) as usize;
            counts[cx.min(3)][cy.min(3)] += 1;
        }
        let expected = POINTS / 16;
        for row in &counts {
            for &c in row {
                // Low-discrepancy sequences beat random sampling easily;
                // a 25% band is generous.
                assert!(
                    c > expected * 3 / 4 && c < expected * 5 / 4,
                    "cell count {c} vs expected {expected}"
                );
            }
        }
    }
}
