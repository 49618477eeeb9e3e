use super::*;
use shared::models::PodState;

#[test]
fn test_complete_releases_pod_to_cleaning() {
    let manager = create_test_manager();
    let (order_id, pods) = seat_party(&manager, 1);
    run_to_serving(&manager, &order_id);
    manager.complete(&order_id).unwrap();
    // 释放后进清洁，不直接可用
    assert_eq!(pod_state(&manager, pods[0]), PodState::Cleaning);
    manager.cleaning_done(1, pods[0]).unwrap();
    assert_eq!(pod_state(&manager, pods[0]), PodState::Available);
}

#[test]
fn test_cleaning_done_assigns_waiting_order() {
    let manager = create_test_manager();
    let mut seated = Vec::new();
    for _ in 0..4 {
        seated.push(seat_party(&manager, 1));
    }
    let waiting = paid_order(&manager, 1);
    expect_queued(manager.check_in_at(&waiting, midday()).unwrap());

    let (done_id, done_pods) = seated.remove(0);
    run_to_serving(&manager, &done_id);
    manager.complete(&done_id).unwrap();
    let assigned = manager.cleaning_done(1, done_pods[0]).unwrap();
    assert_eq!(assigned, Some(waiting.clone()));

    let order = manager.order_status(&waiting).unwrap();
    assert_eq!(order.status, FulfillmentStatus::Assigned);
    assert_eq!(order.assigned_pods, done_pods);
}

#[test]
fn test_cleaning_done_is_idempotent() {
    let manager = create_test_manager();
    let (order_id, pods) = seat_party(&manager, 1);
    run_to_serving(&manager, &order_id);
    manager.complete(&order_id).unwrap();
    manager.cleaning_done(1, pods[0]).unwrap();
    // 重复信号是无操作，不触发第二次分配
    assert_eq!(manager.cleaning_done(1, pods[0]).unwrap(), None);
}

#[test]
fn test_head_of_line_skip_across_pod_types() {
    let manager = create_test_manager();
    let mut singles = Vec::new();
    for _ in 0..4 {
        singles.push(seat_party(&manager, 1));
    }
    seat_party(&manager, 2); // 占住双人舱

    // 队首是双人请求，其后是单人请求
    let dual_waiting = paid_order(&manager, 2);
    let single_waiting = paid_order(&manager, 1);
    expect_queued(manager.check_in_at(&dual_waiting, midday()).unwrap());
    expect_queued(manager.check_in_at(&single_waiting, midday()).unwrap());

    // 空出一个单人舱：跳过队首的双人请求
    let (done_id, done_pods) = singles.remove(0);
    run_to_serving(&manager, &done_id);
    manager.complete(&done_id).unwrap();
    let assigned = manager.cleaning_done(1, done_pods[0]).unwrap();
    assert_eq!(assigned, Some(single_waiting));

    // 双人请求仍然在队首等它的舱型
    let order = manager.order_status(&dual_waiting).unwrap();
    assert_eq!(order.status, FulfillmentStatus::Queued);
}

#[test]
fn test_dual_pair_cleaned_as_unit() {
    let manager = create_test_manager();
    let (order_id, pods) = seat_party(&manager, 2);
    assert_eq!(pods, vec![5, 6]);
    run_to_serving(&manager, &order_id);
    manager.complete(&order_id).unwrap();
    assert_eq!(pod_state(&manager, 5), PodState::Cleaning);
    assert_eq!(pod_state(&manager, 6), PodState::Cleaning);
    // 任一半的清洁完成信号恢复整个单元
    manager.cleaning_done(1, 6).unwrap();
    assert_eq!(pod_state(&manager, 5), PodState::Available);
    assert_eq!(pod_state(&manager, 6), PodState::Available);
}

#[test]
fn test_freed_pod_stays_available_when_no_match() {
    let manager = create_test_manager();
    let mut singles = Vec::new();
    for _ in 0..4 {
        singles.push(seat_party(&manager, 1));
    }
    seat_party(&manager, 2);
    // 队列里只有双人请求
    let dual_waiting = paid_order(&manager, 2);
    expect_queued(manager.check_in_at(&dual_waiting, midday()).unwrap());

    let (done_id, done_pods) = singles.remove(0);
    run_to_serving(&manager, &done_id);
    manager.complete(&done_id).unwrap();
    assert_eq!(manager.cleaning_done(1, done_pods[0]).unwrap(), None);
    // 舱保持可用等待下一次签到，队列不动
    assert_eq!(pod_state(&manager, done_pods[0]), PodState::Available);
    let order = manager.order_status(&dual_waiting).unwrap();
    assert_eq!(order.status, FulfillmentStatus::Queued);
}

#[test]
fn test_cancel_queued_order_shifts_positions() {
    let manager = create_test_manager();
    for _ in 0..4 {
        seat_party(&manager, 1);
    }
    let first = paid_order(&manager, 1);
    let second = paid_order(&manager, 1);
    expect_queued(manager.check_in_at(&first, midday()).unwrap());
    expect_queued(manager.check_in_at(&second, midday()).unwrap());

    let cancelled = manager.cancel(&first).unwrap();
    assert_eq!(cancelled.status, FulfillmentStatus::Cancelled);
    // 后面的订单前移
    let (position, _) = expect_queued(manager.check_in_at(&second, midday()).unwrap());
    assert_eq!(position, 1);
}

#[test]
fn test_cancel_assigned_order_frees_the_pod() {
    let manager = create_test_manager();
    let (order_id, pods) = seat_party(&manager, 1);
    manager.cancel(&order_id).unwrap();
    // 取消视同释放：舱进清洁
    assert_eq!(pod_state(&manager, pods[0]), PodState::Cleaning);
}

#[test]
fn test_cancel_rejected_once_prepping() {
    let manager = create_test_manager();
    let (order_id, _) = seat_party(&manager, 1);
    manager.confirm_pod(&order_id).unwrap();
    let err = manager.cancel(&order_id).unwrap_err();
    assert!(matches!(err, SeatingError::Conflict { .. }));
}

#[test]
fn test_out_of_service_pod_skipped_by_assignment() {
    let manager = create_test_manager();
    manager.set_pod_out_of_service(1, 1, true).unwrap();
    let (_, pods) = seat_party(&manager, 1);
    assert_eq!(pods, vec![2]);
    manager.set_pod_out_of_service(1, 1, false).unwrap();
    assert_eq!(pod_state(&manager, 1), PodState::Available);
}

#[test]
fn test_complete_rejected_before_serving_keeps_pod_occupied() {
    let manager = create_test_manager();
    let (order_id, pods) = seat_party(&manager, 1);
    let err = manager.complete(&order_id).unwrap_err();
    assert!(matches!(err, SeatingError::Conflict { .. }));
    // 拒绝时订单和舱位都原样不动
    assert_eq!(pod_state(&manager, pods[0]), PodState::Occupied);
    let order = manager.order_status(&order_id).unwrap();
    assert_eq!(order.status, FulfillmentStatus::Assigned);
}

#[test]
fn test_reenabled_pod_assigns_waiting_order() {
    let manager = create_test_manager();
    manager.set_pod_out_of_service(1, 1, true).unwrap();
    for _ in 0..3 {
        seat_party(&manager, 1);
    }
    let waiting = paid_order(&manager, 1);
    expect_queued(manager.check_in_at(&waiting, midday()).unwrap());

    // 恢复的舱直接给已排队的订单，而不是留给下一次签到
    manager.set_pod_out_of_service(1, 1, false).unwrap();
    let order = manager.order_status(&waiting).unwrap();
    assert_eq!(order.status, FulfillmentStatus::Assigned);
    assert_eq!(order.assigned_pods, vec![1]);

    // 后来者排队，抢不到刚恢复的舱
    let late = paid_order(&manager, 1);
    let (position, _) = expect_queued(manager.check_in_at(&late, midday()).unwrap());
    assert_eq!(position, 1);
}

#[test]
fn test_out_of_service_dual_half_disables_unit() {
    let manager = create_test_manager();
    manager.set_pod_out_of_service(1, 5, true).unwrap();
    assert_eq!(pod_state(&manager, 6), PodState::OutOfService);
    let order_id = paid_order(&manager, 2);
    let (position, _) = expect_queued(manager.check_in_at(&order_id, midday()).unwrap());
    assert_eq!(position, 1);
}
