use super::*;

fn drain_events(rx: &mut broadcast::Receiver<LifecycleEvent>) -> Vec<(FulfillmentStatus, FulfillmentStatus)> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push((event.from, event.to));
    }
    out
}

#[test]
fn test_full_lifecycle_emits_ordered_events() {
    let manager = create_test_manager();
    let mut rx = manager.subscribe();

    let order_id = paid_order(&manager, 1);
    expect_assigned(manager.check_in_at(&order_id, midday()).unwrap());
    run_to_serving(&manager, &order_id);
    manager.complete(&order_id).unwrap();

    use FulfillmentStatus::*;
    assert_eq!(
        drain_events(&mut rx),
        vec![
            (PendingPayment, Paid),
            (Paid, Assigned),
            (Assigned, Prepping),
            (Prepping, Ready),
            (Ready, Serving),
            (Serving, Completed),
        ]
    );
}

#[test]
fn test_rejected_operation_emits_no_event() {
    let manager = create_test_manager();
    let (order_id, _) = seat_party(&manager, 1);
    let mut rx = manager.subscribe();
    // ASSIGNED 不能直接 READY
    assert!(manager.mark_ready(&order_id).is_err());
    assert!(drain_events(&mut rx).is_empty());
    // 状态机不动
    let order = manager.order_status(&order_id).unwrap();
    assert_eq!(order.status, FulfillmentStatus::Assigned);
}

#[test]
fn test_confirm_pod_repeat_is_noop() {
    let manager = create_test_manager();
    let (order_id, _) = seat_party(&manager, 1);
    manager.confirm_pod(&order_id).unwrap();
    let mut rx = manager.subscribe();
    // 重复扫码：成功但无状态变更、无事件
    let order = manager.confirm_pod(&order_id).unwrap();
    assert_eq!(order.status, FulfillmentStatus::Prepping);
    assert!(drain_events(&mut rx).is_empty());
}

#[test]
fn test_confirm_pod_requires_assignment() {
    let manager = create_test_manager();
    let order_id = paid_order(&manager, 1);
    let err = manager.confirm_pod(&order_id).unwrap_err();
    assert!(matches!(err, SeatingError::Conflict { .. }));
}

#[test]
fn test_completed_order_is_archived_but_queryable() {
    let manager = create_test_manager();
    let (order_id, _) = seat_party(&manager, 1);
    run_to_serving(&manager, &order_id);
    manager.complete(&order_id).unwrap();

    let order = manager.order_status(&order_id).unwrap();
    assert_eq!(order.status, FulfillmentStatus::Completed);
    assert!(order.completed_at.is_some());

    // 终态订单拒绝一切变更操作
    assert!(matches!(
        manager.cancel(&order_id).unwrap_err(),
        SeatingError::Conflict { .. }
    ));
    assert!(matches!(
        manager.check_in_at(&order_id, midday()).unwrap_err(),
        SeatingError::Conflict { .. }
    ));
}

#[test]
fn test_event_carries_pods_on_assignment() {
    let manager = create_test_manager();
    let mut rx = manager.subscribe();
    let (order_id, pods) = seat_party(&manager, 2);

    let mut assigned_pods = None;
    while let Ok(event) = rx.try_recv() {
        if event.to == FulfillmentStatus::Assigned {
            assert_eq!(event.order_id, order_id);
            assert_eq!(event.location_id, 1);
            assigned_pods = Some(event.pods);
        }
    }
    assert_eq!(assigned_pods, Some(pods));
}

#[test]
fn test_board_hides_guest_contact() {
    let manager = create_test_manager();
    for _ in 0..4 {
        seat_party(&manager, 1);
    }
    let waiting = paid_order(&manager, 1);
    expect_queued(manager.check_in_at(&waiting, midday()).unwrap());

    let board = manager.board(1).unwrap();
    assert_eq!(board.location_id, 1);
    assert_eq!(board.queued.len(), 1);
    assert_eq!(board.in_progress.len(), 4);

    let entry = &board.queued[0];
    assert_eq!(entry.position, Some(1));
    assert!(entry.estimated_wait_minutes.is_some());
    // 看板只给短码，不泄露姓名/电话/完整订单号
    assert_eq!(entry.code.len(), 6);
    assert_ne!(entry.code, waiting);
    let json = serde_json::to_string(&board).unwrap();
    assert!(!json.contains("Test Guest"));
    assert!(!json.contains("+34600000000"));
}

#[test]
fn test_epoch_is_stable_per_instance() {
    let manager = create_test_manager();
    let epoch = manager.epoch().to_string();
    assert_eq!(manager.epoch(), epoch);
    assert!(!epoch.is_empty());
    // 另一个实例有不同的 epoch
    let other = create_test_manager();
    assert_ne!(other.epoch(), epoch);
}
