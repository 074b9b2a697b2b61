//! Behavioural coverage for the route difference heuristic.

use std::cell::{Cell, RefCell};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use safar_core::test_support::straight_route;
use safar_core::{DifferenceThresholds, RouteCandidate, routes_differ};

#[fixture]
fn reference() -> RefCell<Option<RouteCandidate>> {
    RefCell::new(None)
}

#[fixture]
fn verdict() -> Cell<Option<bool>> {
    Cell::new(None)
}

fn route_of(distance_km: f64) -> RouteCandidate {
    let points = straight_route((28.60, 77.20), (28.615, 77.21), 25);
    match RouteCandidate::new(points, distance_km, 8.0) {
        Ok(candidate) => candidate,
        Err(err) => panic!("build route: {err}"),
    }
}

fn compare(
    reference: &RefCell<Option<RouteCandidate>>,
    verdict: &Cell<Option<bool>>,
    other_km: f64,
    thresholds: &DifferenceThresholds,
) {
    let binding = reference.borrow();
    let base = binding
        .as_ref()
        .unwrap_or_else(|| panic!("reference route must be initialised"));
    let other = RouteCandidate::new(base.points().to_vec(), other_km, base.duration_min())
        .unwrap_or_else(|err| panic!("build comparison route: {err}"));
    verdict.set(Some(routes_differ(base, &other, thresholds)));
}

#[given("a reference route of 2.0 km")]
fn reference_route(reference: &RefCell<Option<RouteCandidate>>) {
    *reference.borrow_mut() = Some(route_of(2.0));
}

#[when("I compare it with an identical copy")]
fn compare_identical(reference: &RefCell<Option<RouteCandidate>>, verdict: &Cell<Option<bool>>) {
    compare(reference, verdict, 2.0, &DifferenceThresholds::general());
}

#[when("I compare it with a copy reporting 2.6 km")]
fn compare_longer(reference: &RefCell<Option<RouteCandidate>>, verdict: &Cell<Option<bool>>) {
    compare(reference, verdict, 2.6, &DifferenceThresholds::general());
}

#[when("I compare it with a copy reporting 2.4 km using uniqueness thresholds")]
fn compare_uniqueness(reference: &RefCell<Option<RouteCandidate>>, verdict: &Cell<Option<bool>>) {
    compare(reference, verdict, 2.4, &DifferenceThresholds::uniqueness());
}

#[then("the routes are not different")]
fn not_different(verdict: &Cell<Option<bool>>) {
    assert_eq!(verdict.get(), Some(false));
}

#[then("the routes are different")]
fn different(verdict: &Cell<Option<bool>>) {
    assert_eq!(verdict.get(), Some(true));
}

#[scenario(path = "tests/features/route_difference.feature", index = 0)]
fn identical_routes_scenario(
    reference: RefCell<Option<RouteCandidate>>,
    verdict: Cell<Option<bool>>,
) {
    let _ = (reference, verdict);
}

#[scenario(path = "tests/features/route_difference.feature", index = 1)]
fn longer_route_scenario(reference: RefCell<Option<RouteCandidate>>, verdict: Cell<Option<bool>>) {
    let _ = (reference, verdict);
}

#[scenario(path = "tests/features/route_difference.feature", index = 2)]
fn uniqueness_threshold_scenario(
    reference: RefCell<Option<RouteCandidate>>,
    verdict: Cell<Option<bool>>,
) {
    let _ = (reference, verdict);
}
