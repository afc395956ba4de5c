// ==========================================
// 实时推送集成测试
// ==========================================
// 测试目标: 推送次数 / 周期等待 / 快照内容
// ==========================================

use std::time::Duration;

use iiot_monitor::domain::MachineStatus;
use iiot_monitor::engine::{LiveSnapshot, LiveStatusFeed};

#[tokio::test(start_paused = true)]
async fn test_run_emits_requested_ticks() {
    let mut feed = LiveStatusFeed::new(42);
    let mut snapshots: Vec<LiveSnapshot> = Vec::new();

    let start = tokio::time::Instant::now();
    let emitted = feed
        .run(3, Duration::from_secs(2), |s| snapshots.push(s))
        .await;

    assert_eq!(emitted, 3);
    assert_eq!(snapshots.len(), 3);
    assert_eq!(
        snapshots.iter().map(|s| s.tick).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    // 首次立即推送，之后每 2 秒一次
    assert!(start.elapsed() >= Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_zero_ticks_emits_nothing() {
    let mut feed = LiveStatusFeed::new(1);
    let mut count = 0;
    let emitted = feed.run(0, Duration::from_secs(2), |_| count += 1).await;
    assert_eq!(emitted, 0);
    assert_eq!(count, 0);
}

#[test]
fn test_same_seed_same_status_sequence() {
    let mut a = LiveStatusFeed::new(5);
    let mut b = LiveStatusFeed::new(5);

    for tick in 1..=3 {
        let sa = a.snapshot(tick);
        let sb = b.snapshot(tick);
        let key = |s: &LiveSnapshot| {
            s.readings
                .iter()
                .map(|r| (r.machine_id.clone(), r.status, r.rpm))
                .collect::<Vec<_>>()
        };
        assert_eq!(key(&sa), key(&sb));
    }
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut feed = LiveStatusFeed::new(7);
    let snapshot = feed.snapshot(4);
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["tick"], 4);
    assert_eq!(json["readings"].as_array().map(|r| r.len()), Some(10));
    let status = json["readings"][0]["status"].as_str().unwrap();
    assert!(status == "RUNNING" || status == "STOPPED");
    assert!(snapshot.readings.iter().all(|r| r.status != MachineStatus::Fault));
}
