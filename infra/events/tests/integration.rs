use ihub_event_bus::*;

#[derive(Clone, Debug, PartialEq, Eq)]
struct TestEvent(pub usize);

#[tokio::test]
async fn test_event_flow() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<TestEvent>().unwrap();

    let event = TestEvent(42);
    bus.publish(event.clone()).unwrap();

    let received = rx.recv().await.unwrap();
    assert_eq!(*received, event);
}

#[tokio::test]
async fn test_receiver_lagged_recovery() {
    let bus = EventBus::new();
    let capacity = 2;
    let mut rx = bus.subscribe_with_capacity::<TestEvent>(capacity).unwrap();

    let total_messages = 100;
    for i in 0..total_messages {
        bus.publish(TestEvent(i)).unwrap();
    }

    // The ext trait absorbs the lag and resumes from the fresh tail.
    let first_received = rx.recv_event().await.expect("should recover from lag");
    assert!(
        first_received.0 >= (total_messages - capacity),
        "Should have skipped to the fresh tail of the buffer. Expected >= {}, got {}",
        total_messages - capacity,
        first_received.0
    );

    let second_received = rx.recv_event().await.expect("Should continue receiving");
    assert_eq!(second_received.0, first_received.0 + 1);
}

#[tokio::test]
async fn test_multiple_subscribers_isolation() {
    let bus = EventBus::new();
    let mut rx1 = bus.subscribe::<TestEvent>().unwrap();
    let mut rx2 = bus.subscribe::<TestEvent>().unwrap();

    bus.publish(TestEvent(100)).unwrap();

    let res1 = rx1.recv().await.unwrap();
    let res2 = rx2.recv().await.unwrap();

    assert_eq!(res1.0, res2.0);
}

#[tokio::test]
async fn test_multiple_event_types_are_isolated() {
    #[derive(Clone, Debug, PartialEq, Eq)]
    struct OtherEvent(pub usize);

    let bus = EventBus::new();
    let mut rx_test = bus.subscribe::<TestEvent>().unwrap();
    let mut rx_other = bus.subscribe::<OtherEvent>().unwrap();

    bus.publish(TestEvent(7)).unwrap();
    bus.publish(OtherEvent(13)).unwrap();

    let got_test = rx_test.recv().await.unwrap();
    let got_other = rx_other.recv().await.unwrap();

    assert_eq!(got_test.0, 7);
    assert_eq!(got_other.0, 13);
}

#[tokio::test]
async fn test_publish_without_subscribers_is_dropped() {
    let bus = EventBus::new();
    let reached = bus.publish(TestEvent(1)).unwrap();
    assert_eq!(reached, 0);
}

#[tokio::test]
async fn test_zero_capacity_rejected() {
    let bus = EventBus::new();
    let err = bus.subscribe_with_capacity::<TestEvent>(0).unwrap_err();
    assert!(matches!(err, EventBusError::InvalidCapacity(0)));
}

#[tokio::test]
async fn test_shutdown_closes_all_channels() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<TestEvent>().unwrap();

    let closed = bus.shutdown();
    assert_eq!(closed, 1, "expected a single event channel to be closed");

    let result = rx.recv_event().await;
    assert!(result.is_none(), "receiver should observe channel closure after shutdown");
}
