//! Behavioural tests for the user directory endpoint over a fixture upstream.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use roster::Trace;
use roster::domain::ports::FixtureUserSource;
use roster::domain::{PaginationDefaults, User, UserDirectoryService};
use roster::inbound::http::state::HttpState;
use roster::inbound::http::{api_scope, not_found};
use roster::outbound::cache::CachedUserSource;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;

struct DirectoryWorld {
    runtime: actix_rt::SystemRunner,
    users: RefCell<Vec<User>>,
    response: RefCell<Option<(u16, Value)>>,
}

impl DirectoryWorld {
    fn new() -> Self {
        Self {
            runtime: actix_rt::System::new(),
            users: RefCell::new(Vec::new()),
            response: RefCell::new(None),
        }
    }

    fn request(&self, uri: &str) {
        let users = self.users.borrow().clone();
        let outcome = self.runtime.block_on(async move {
            let source = FixtureUserSource::new(users);
            let cached = CachedUserSource::new(
                Arc::new(source),
                Duration::from_secs(600),
                100,
                Arc::new(DefaultClock),
            );
            let directory = UserDirectoryService::new(Arc::new(cached));
            let state = HttpState::new(Arc::new(directory), PaginationDefaults::default());
            let app = actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .wrap(Trace)
                    .service(api_scope())
                    .default_service(web::to(not_found)),
            )
            .await;
            let req = actix_test::TestRequest::get().uri(uri).to_request();
            let res = actix_test::call_service(&app, req).await;
            let status = res.status().as_u16();
            let body: Value = actix_test::read_body_json(res).await;
            (status, body)
        });
        *self.response.borrow_mut() = Some(outcome);
    }

    fn with_body<F>(&self, f: F)
    where
        F: FnOnce(&Value),
    {
        let response = self.response.borrow();
        let (_, body) = response.as_ref().expect("a request should have been sent");
        f(body);
    }
}

#[fixture]
fn world() -> DirectoryWorld {
    DirectoryWorld::new()
}

#[given("an upstream directory of {count} users")]
fn an_upstream_directory_of_users(world: &DirectoryWorld, count: i64) {
    *world.users.borrow_mut() = (1..=count)
        .map(|i| {
            User::new(i)
                .with_first_name(format!("FirstName{i}"))
                .with_last_name(format!("LastName{i}"))
                .with_username(format!("user{i}"))
        })
        .collect();
}

#[when("the client lists users without parameters")]
fn the_client_lists_users_without_parameters(world: &DirectoryWorld) {
    world.request("/api/users");
}

#[when("the client lists users on page {page} of size {size}")]
fn the_client_lists_users_on_page(world: &DirectoryWorld, page: i64, size: i64) {
    world.request(&format!("/api/users?page={page}&size={size}"));
}

#[when("the client searches for name {name:string}")]
fn the_client_searches_for_name(world: &DirectoryWorld, name: String) {
    world.request(&format!("/api/users?name={}", name.trim_matches('"')));
}

#[when("the client searches for name {name:string} and username {username:string}")]
fn the_client_searches_for_name_and_username(
    world: &DirectoryWorld,
    name: String,
    username: String,
) {
    world.request(&format!(
        "/api/users?name={}&username={}",
        name.trim_matches('"'),
        username.trim_matches('"')
    ));
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &DirectoryWorld, status: u16) {
    let response = world.response.borrow();
    let (actual, _) = response.as_ref().expect("a request should have been sent");
    assert_eq!(*actual, status);
}

#[then("the page holds users {first} through {last}")]
fn the_page_holds_users(world: &DirectoryWorld, first: i64, last: i64) {
    world.with_body(|body| {
        let ids: Vec<i64> = body["data"]
            .as_array()
            .expect("data is an array")
            .iter()
            .map(|user| user["id"].as_i64().expect("id is an integer"))
            .collect();
        assert_eq!(ids, (first..=last).collect::<Vec<_>>());
    });
}

#[then("the page holds users with ids {first} and {second}")]
fn the_page_holds_users_with_ids(world: &DirectoryWorld, first: i64, second: i64) {
    world.with_body(|body| {
        let ids: Vec<Option<i64>> = body["data"]
            .as_array()
            .expect("data is an array")
            .iter()
            .map(|user| user["id"].as_i64())
            .collect();
        assert_eq!(ids, vec![Some(first), Some(second)]);
    });
}

#[then("the page is empty")]
fn the_page_is_empty(world: &DirectoryWorld) {
    world.with_body(|body| {
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    });
}

#[then("the envelope reports page {page} of size {size} with {items} total items across {pages} pages")]
fn the_envelope_reports(world: &DirectoryWorld, page: u64, size: u64, items: u64, pages: u64) {
    world.with_body(|body| {
        assert_eq!(body["page"], page);
        assert_eq!(body["size"], size);
        assert_eq!(body["totalItems"], items);
        assert_eq!(body["totalPages"], pages);
    });
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &DirectoryWorld, code: String) {
    world.with_body(|body| assert_eq!(body["code"], code.trim_matches('"')));
}

#[scenario(
    path = "tests/features/user_directory.feature",
    name = "Listing the first page with defaults"
)]
fn listing_the_first_page_with_defaults(world: DirectoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_directory.feature",
    name = "Listing the last page"
)]
fn listing_the_last_page(world: DirectoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_directory.feature",
    name = "Listing a page beyond the end"
)]
fn listing_a_page_beyond_the_end(world: DirectoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_directory.feature",
    name = "Filtering by an exact first name"
)]
fn filtering_by_an_exact_first_name(world: DirectoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_directory.feature",
    name = "Combining name and username filters"
)]
fn combining_name_and_username_filters(world: DirectoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_directory.feature",
    name = "Filters that disagree select nobody"
)]
fn filters_that_disagree_select_nobody(world: DirectoryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_directory.feature",
    name = "Rejecting a zero page"
)]
fn rejecting_a_zero_page(world: DirectoryWorld) {
    drop(world);
}
