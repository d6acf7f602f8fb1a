//! Navigation lock, authentication gating and primitive-priority behavior.

mod common;

use std::sync::Arc;
use std::time::Duration;

use clubgate::nav::{NavOptions, NavigationController};
use clubgate::routes::RouteTable;
use clubgate::session::SessionStore;
use clubgate::storage::MemoryStorage;

use common::RecordingNavigator;

const SETTLE: Duration = Duration::from_millis(30);

fn controller() -> (NavigationController, Arc<RecordingNavigator>, Arc<SessionStore>) {
    let table = Arc::new(RouteTable::club_default());
    let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
    let navigator = Arc::new(RecordingNavigator::new());
    let nav = NavigationController::with_settle(table, session.clone(), navigator.clone(), SETTLE);
    (nav, navigator, session)
}

#[tokio::test]
async fn rapid_navigations_fire_exactly_one_transition() {
    let (nav, recorder, session) = controller();
    session.set_token("t");

    nav.navigate("clubsDetail", &[("id", "1")], NavOptions::default()).await;
    nav.navigate("clubsDetail", &[("id", "2")], NavOptions::default()).await;
    nav.back(1).await;
    assert_eq!(recorder.events().len(), 1, "only the first call may dispatch");
    assert_eq!(recorder.events()[0], ("push".to_string(), "/pages/clubs/detail?id=1".to_string()));

    // After the settle delay the lock releases and navigation resumes
    tokio::time::sleep(SETTLE * 3).await;
    nav.navigate("clubsDetail", &[("id", "3")], NavOptions::default()).await;
    assert_eq!(recorder.events().len(), 2);
}

#[tokio::test]
async fn gated_destination_without_token_relaunches_login() {
    let (nav, recorder, _session) = controller();

    // mineHome is both auth-gated and a tab root; the gate wins
    nav.navigate("mineHome", &[], NavOptions::default()).await;
    assert_eq!(
        recorder.events(),
        vec![("relaunch".to_string(), "/pages/login/form".to_string())],
        "must relaunch to login, never tab-switch to the gated destination"
    );
}

#[tokio::test]
async fn gated_destination_with_token_switches_tab() {
    let (nav, recorder, session) = controller();
    session.set_token("t");

    nav.navigate("mineHome", &[], NavOptions::default()).await;
    assert_eq!(
        recorder.events(),
        vec![("switch_tab".to_string(), "/pages/mine/memberships".to_string())]
    );
}

#[tokio::test]
async fn raw_tab_path_is_tab_switched() {
    let (nav, recorder, _session) = controller();
    nav.navigate("/pages/activities/list", &[], NavOptions::default()).await;
    assert_eq!(recorder.events()[0].0, "switch_tab");
}

#[tokio::test]
async fn explicit_relaunch_beats_tab_root() {
    let (nav, recorder, _session) = controller();
    nav.navigate("clubsList", &[], NavOptions { relaunch: true, replace: false }).await;
    assert_eq!(recorder.events()[0].0, "relaunch");
}

#[tokio::test]
async fn replace_option_redirects_instead_of_pushing() {
    let (nav, recorder, _session) = controller();
    nav.navigate("clubsDetail", &[("id", "9")], NavOptions { replace: true, relaunch: false })
        .await;
    assert_eq!(
        recorder.events(),
        vec![("replace".to_string(), "/pages/clubs/detail?id=9".to_string())]
    );
}

#[tokio::test]
async fn failed_primitive_falls_back_to_relaunch_same_url() {
    let (nav, recorder, _session) = controller();
    recorder.fail_on("push");

    nav.navigate("clubsDetail", &[("id", "4")], NavOptions::default()).await;
    assert_eq!(
        recorder.events(),
        vec![("relaunch".to_string(), "/pages/clubs/detail?id=4".to_string())]
    );

    // The failure path still schedules the release
    tokio::time::sleep(SETTLE * 3).await;
    assert!(!nav.lock().is_locked());
}

#[tokio::test]
async fn back_follows_lock_discipline_without_gating() {
    let (nav, recorder, _session) = controller();

    // No token, yet back is never auth-gated
    nav.back(2).await;
    nav.back(1).await;
    assert_eq!(recorder.events(), vec![("back".to_string(), "back:2".to_string())]);

    tokio::time::sleep(SETTLE * 3).await;
    nav.back(1).await;
    assert_eq!(recorder.events().len(), 2);
}

#[tokio::test]
async fn convenience_wrappers_map_to_primitives() {
    let (nav, recorder, _session) = controller();

    nav.relaunch_to("clubsDetail", &[("id", "5")]).await;
    tokio::time::sleep(SETTLE * 3).await;
    nav.switch_to("announcementsList").await;

    let events = recorder.events();
    assert_eq!(events[0].0, "relaunch");
    assert_eq!(events[1], ("switch_tab".to_string(), "/pages/announcements/list".to_string()));
}
