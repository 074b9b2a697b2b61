//! Behavioural coverage for fetching and collapsing route variants.

use std::cell::RefCell;
use std::time::Duration;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use safar_core::test_support::{point, straight_route};
use safar_core::{RouteCandidate, RouteFetchError, RoutePreference, RouteRequest};
use safar_data::routing::test_support::StubRouteProvider;
use safar_data::routing::{FetchOutcome, fetch_candidates};

#[fixture]
fn provider() -> RefCell<StubRouteProvider> {
    RefCell::new(StubRouteProvider::new())
}

#[fixture]
fn outcome() -> RefCell<Option<FetchOutcome>> {
    RefCell::new(None)
}

fn main_road(distance_km: f64) -> RouteCandidate {
    RouteCandidate::new(straight_route((28.60, 77.20), (28.70, 77.30), 30), distance_km, 24.0)
        .expect("valid route")
}

fn side_road() -> RouteCandidate {
    RouteCandidate::new(straight_route((28.60, 77.20), (28.66, 77.36), 30), 16.5, 29.0)
        .expect("valid route")
}

fn configure(provider: &RefCell<StubRouteProvider>, update: impl FnOnce(StubRouteProvider) -> StubRouteProvider) {
    let current = provider.replace(StubRouteProvider::new());
    provider.replace(update(current));
}

fn fetched(outcome: &RefCell<Option<FetchOutcome>>) -> FetchOutcome {
    outcome.borrow().clone().expect("routes must be fetched first")
}

#[given("a provider whose balanced and short routes are the same path")]
fn duplicate_variants(provider: &RefCell<StubRouteProvider>) {
    configure(provider, |stub| {
        stub.with_route(RoutePreference::Balanced, main_road(14.0))
            .with_route(RoutePreference::Short, main_road(14.1))
    });
}

#[given("whose less-maneuvers route takes a different road")]
fn distinct_variant(provider: &RefCell<StubRouteProvider>) {
    configure(provider, |stub| {
        stub.with_route(RoutePreference::LessManeuvers, side_road())
    });
}

#[given("a provider whose balanced variant fails with HTTP 503")]
fn failing_variant(provider: &RefCell<StubRouteProvider>) {
    configure(provider, |stub| {
        stub.with_error(
            RoutePreference::Balanced,
            RouteFetchError::Http {
                url: "stub".to_owned(),
                status: 503,
                message: "service unavailable".to_owned(),
            },
        )
        .with_error(
            RoutePreference::Short,
            RouteFetchError::NoRoute {
                url: "stub".to_owned(),
            },
        )
    });
}

#[given("a provider with no routes")]
fn empty_provider(provider: &RefCell<StubRouteProvider>) {
    provider.replace(StubRouteProvider::new());
}

#[when("I fetch every route variant")]
fn fetch_all(provider: &RefCell<StubRouteProvider>, outcome: &RefCell<Option<FetchOutcome>>) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let request = RouteRequest::new(point(28.60, 77.20), point(28.70, 77.30));
    let stub = provider.borrow();
    let result = runtime.block_on(fetch_candidates(
        &*stub,
        &request,
        &RoutePreference::ALL,
        Duration::from_secs(2),
    ));
    *outcome.borrow_mut() = Some(result);
}

#[then("{count} candidate routes are returned")]
fn candidate_count(count: usize, outcome: &RefCell<Option<FetchOutcome>>) {
    assert_eq!(fetched(outcome).candidates.len(), count);
}

#[then("no variant failed")]
fn no_failures(outcome: &RefCell<Option<FetchOutcome>>) {
    assert!(fetched(outcome).failures.is_empty());
}

#[then("the balanced variant is reported as failed")]
fn balanced_failed(outcome: &RefCell<Option<FetchOutcome>>) {
    let failures = fetched(outcome).failures;
    assert!(failures.iter().any(|(preference, error)| {
        *preference == RoutePreference::Balanced
            && matches!(error, RouteFetchError::Http { status: 503, .. })
    }));
}

#[scenario(path = "tests/features/route_fetch.feature", index = 0)]
fn near_identical_variants_collapse(
    provider: RefCell<StubRouteProvider>,
    outcome: RefCell<Option<FetchOutcome>>,
) {
    let _ = (provider, outcome);
}

#[scenario(path = "tests/features/route_fetch.feature", index = 1)]
fn failing_variant_is_isolated(
    provider: RefCell<StubRouteProvider>,
    outcome: RefCell<Option<FetchOutcome>>,
) {
    let _ = (provider, outcome);
}

#[scenario(path = "tests/features/route_fetch.feature", index = 2)]
fn empty_provider_yields_nothing(
    provider: RefCell<StubRouteProvider>,
    outcome: RefCell<Option<FetchOutcome>>,
) {
    let _ = (provider, outcome);
}
