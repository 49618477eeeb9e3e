use super::*;

#[test]
fn test_single_parties_fill_singles_ascending() {
    let manager = create_test_manager();
    for expected in 1..=4u32 {
        let (_, pods) = seat_party(&manager, 1);
        assert_eq!(pods, vec![expected]);
    }
}

#[test]
fn test_dual_party_takes_the_pair() {
    let manager = create_test_manager();
    let (_, pods) = seat_party(&manager, 2);
    assert_eq!(pods, vec![5, 6]);
}

#[test]
fn test_single_party_never_takes_dual_pair() {
    let manager = create_test_manager();
    for _ in 0..4 {
        seat_party(&manager, 1);
    }
    // Singles exhausted; the free dual pair is not an option
    let order_id = paid_order(&manager, 1);
    let (position, _) = expect_queued(manager.check_in_at(&order_id, midday()).unwrap());
    assert_eq!(position, 1);
    assert_eq!(pod_state(&manager, 5), shared::models::PodState::Available);
}

#[test]
fn test_party_of_three_rejected_at_intake() {
    let manager = create_test_manager();
    let err = manager
        .register_paid_order_at(new_order(3), midday())
        .unwrap_err();
    assert!(matches!(err, SeatingError::PartyTooLarge(3)));
}

#[test]
fn test_intake_rejected_outside_window() {
    let manager = create_test_manager();
    let err = manager
        .register_paid_order_at(new_order(1), after_close())
        .unwrap_err();
    // 拒绝信息携带下一个下单窗口起点
    match err {
        SeatingError::OutOfWindow {
            next_open_millis, ..
        } => {
            assert!(next_open_millis.is_some());
        }
        other => panic!("expected OutOfWindow, got {other:?}"),
    }
}

#[test]
fn test_check_in_rejected_after_close() {
    let manager = create_test_manager();
    let order_id = paid_order(&manager, 1);
    // 打烊 2 分钟后赶到：拒绝且无任何状态变更
    let err = manager.check_in_at(&order_id, after_close()).unwrap_err();
    assert!(matches!(err, SeatingError::OutOfWindow { .. }));
    let order = manager.order_status(&order_id).unwrap();
    assert_eq!(order.status, FulfillmentStatus::Paid);
    assert!(order.assigned_pods.is_empty());
}

#[test]
fn test_check_in_is_idempotent_when_assigned() {
    let manager = create_test_manager();
    let (order_id, pods) = seat_party(&manager, 1);
    // 重复投递的签到返回同一分配，不预订第二个舱
    let again = expect_assigned(manager.check_in_at(&order_id, midday()).unwrap());
    assert_eq!(again, pods);
    let occupied = manager
        .pods(1)
        .unwrap()
        .iter()
        .filter(|p| p.state == shared::models::PodState::Occupied)
        .count();
    assert_eq!(occupied, 1);
}

#[test]
fn test_check_in_is_idempotent_when_queued() {
    let manager = create_test_manager();
    for _ in 0..4 {
        seat_party(&manager, 1);
    }
    let order_id = paid_order(&manager, 1);
    let (position, _) = expect_queued(manager.check_in_at(&order_id, midday()).unwrap());
    let (again, _) = expect_queued(manager.check_in_at(&order_id, midday()).unwrap());
    assert_eq!(again, position);
}

#[test]
fn test_queue_positions_and_estimate() {
    let manager = create_test_manager();
    for _ in 0..4 {
        seat_party(&manager, 1);
    }
    let first = paid_order(&manager, 1);
    let second = paid_order(&manager, 1);
    let (pos1, est1) = expect_queued(manager.check_in_at(&first, midday()).unwrap());
    let (pos2, est2) = expect_queued(manager.check_in_at(&second, midday()).unwrap());
    assert_eq!(pos1, 1);
    assert_eq!(pos2, 2);
    // 默认翻台 35 分钟，4 个单人单元: ceil(35*1/4)=9, ceil(35*2/4)=18
    assert_eq!(est1, 9);
    assert_eq!(est2, 18);
}

#[test]
fn test_invalid_arrival_offset_rejected() {
    let manager = create_test_manager();
    let mut req = new_order(1);
    req.arrival = ArrivalPreference::Offset { minutes: 90 };
    let err = manager.register_paid_order_at(req, midday()).unwrap_err();
    assert!(matches!(err, SeatingError::InvalidArrivalOffset(90)));
}

#[test]
fn test_late_arrival_offset_filtered_near_close() {
    let manager = create_test_manager();
    // 21:10 + 60 分钟落在打烊之后
    let late = TZ.with_ymd_and_hms(2025, 6, 10, 21, 10, 0).unwrap();
    let mut req = new_order(1);
    req.arrival = ArrivalPreference::Offset { minutes: 60 };
    let err = manager.register_paid_order_at(req, late).unwrap_err();
    assert!(matches!(err, SeatingError::InvalidArrivalOffset(60)));

    let mut req = new_order(1);
    req.arrival = ArrivalPreference::Offset { minutes: 45 };
    assert!(manager.register_paid_order_at(req, late).is_ok());
}

#[test]
fn test_unknown_location_rejected() {
    let manager = create_test_manager();
    let mut req = new_order(1);
    req.location_id = 999;
    let err = manager.register_paid_order_at(req, midday()).unwrap_err();
    assert!(matches!(err, SeatingError::LocationNotFound(999)));
}

#[test]
fn test_unknown_order_rejected() {
    let manager = create_test_manager();
    let err = manager.check_in_at("ghost", midday()).unwrap_err();
    assert!(matches!(err, SeatingError::OrderNotFound(_)));
}
