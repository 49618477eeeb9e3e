use super::*;
use chrono::TimeZone;
use shared::seating::ArrivalPreference;

use crate::venue::demo_layout;

const TZ: Tz = chrono_tz::Europe::Madrid;

fn test_config() -> Config {
    Config {
        work_dir: "/tmp/pod-test".into(),
        http_port: 0,
        timezone: TZ,
        layout_path: None,
        default_turnover_minutes: 35,
        turnover_window: 20,
        notify_channel_capacity: 256,
    }
}

/// Demo layout: singles 1-4, dual pair 5↔6, open 11:00-22:00,
/// ordering window [10:30, 21:15).
fn create_test_manager() -> SeatingManager {
    let venue = Arc::new(VenueDirectory::from_layout(demo_layout()).unwrap());
    SeatingManager::new(venue, &test_config())
}

/// 2025-06-10 (Tuesday) 14:00, well inside the ordering window
fn midday() -> DateTime<Tz> {
    TZ.with_ymd_and_hms(2025, 6, 10, 14, 0, 0).unwrap()
}

/// Two minutes after closing time
fn after_close() -> DateTime<Tz> {
    TZ.with_ymd_and_hms(2025, 6, 10, 22, 2, 0).unwrap()
}

fn new_order(party_size: u32) -> NewOrder {
    NewOrder {
        location_id: 1,
        guest_name: "Test Guest".to_string(),
        guest_phone: Some("+34600000000".to_string()),
        party_size,
        arrival: ArrivalPreference::Asap,
    }
}

fn paid_order(manager: &SeatingManager, party_size: u32) -> String {
    manager
        .register_paid_order_at(new_order(party_size), midday())
        .unwrap()
        .order_id
}

fn expect_assigned(outcome: CheckInOutcome) -> Vec<u32> {
    match outcome {
        CheckInOutcome::Assigned { pods } => pods,
        other => panic!("expected assignment, got {other:?}"),
    }
}

fn expect_queued(outcome: CheckInOutcome) -> (u32, u32) {
    match outcome {
        CheckInOutcome::Queued {
            position,
            estimated_wait_minutes,
        } => (position, estimated_wait_minutes),
        other => panic!("expected queued, got {other:?}"),
    }
}

/// Register + check in a party, asserting it got an assignment
fn seat_party(manager: &SeatingManager, party_size: u32) -> (String, Vec<u32>) {
    let order_id = paid_order(manager, party_size);
    let pods = expect_assigned(manager.check_in_at(&order_id, midday()).unwrap());
    (order_id, pods)
}

/// Drive an assigned order through to SERVING
fn run_to_serving(manager: &SeatingManager, order_id: &str) {
    manager.confirm_pod(order_id).unwrap();
    manager.mark_ready(order_id).unwrap();
    manager.mark_serving(order_id).unwrap();
}

fn pod_state(manager: &SeatingManager, pod: u32) -> shared::models::PodState {
    manager
        .pods(1)
        .unwrap()
        .into_iter()
        .find(|p| p.number == pod)
        .unwrap()
        .state
}

mod test_checkin;
mod test_release;
mod test_lifecycle;
