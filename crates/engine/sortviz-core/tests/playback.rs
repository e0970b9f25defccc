use sortviz_core::{
    Algorithm, BarColor, Config, RecordingSink, RunState, SinkCall, StepProducer, Task,
    VirtualClock, VirtualScheduler, Visualizer, HISTORY_CAPACITY,
};
use sortviz_test_fixtures::scenarios;

type Harness = Visualizer<VirtualScheduler, RecordingSink, VirtualClock>;

fn harness(cfg: Config) -> Harness {
    Visualizer::virtual_time(cfg, RecordingSink::new())
}

fn bars_only(calls: &[SinkCall]) -> Vec<SinkCall> {
    calls
        .iter()
        .filter(|c| !matches!(c, SinkCall::ShowElapsed { .. }))
        .cloned()
        .collect()
}

fn event_count(alg: Algorithm, data: &[i64]) -> u64 {
    StepProducer::new(alg, data).count() as u64
}

/// it should finish after one tick per event at the default delay and record the duration
#[test]
fn default_delay_timing() {
    let s = scenarios::load("reference").unwrap();
    let n = event_count(Algorithm::Bubble, &s.input);
    let mut v = harness(Config::default());
    v.start(&s.input);
    assert!(v.run_to_completion());

    assert_eq!(v.events_applied(), n);
    assert_eq!(v.port().now_ms(), n * 800);
    let record = v.history().latest().unwrap();
    assert_eq!(record.sequence, 1);
    assert_eq!(record.label, "Bubble Sort");
    assert_eq!(record.duration_ms, (n * 800) as f64);
    assert_eq!(v.sink().last_elapsed(), Some((n * 800) as f64));
    assert_eq!(v.bars().unwrap().values(), &[1, 2, 3, 4, 5]);
    assert_eq!(v.port().pending(), 0);
}

/// it should clamp tiny delays to the 10 ms floor
#[test]
fn delay_floor() {
    let mut v = harness(Config::default().with_animation_delay_ms(1));
    v.start(&[2, 1]);
    assert!(v.run_to_completion());
    assert_eq!(v.port().now_ms(), event_count(Algorithm::Bubble, &[2, 1]) * 10);
}

/// it should produce the same render calls with or without a pause in the middle
#[test]
fn pause_resume_preserves_event_order() {
    let s = scenarios::load("duplicates").unwrap();
    for alg in Algorithm::ALL {
        let cfg = Config::default().with_algorithm(alg);

        let mut straight = harness(cfg.clone());
        straight.start(&s.input);
        assert!(straight.run_to_completion());

        let mut paused = harness(cfg);
        paused.start(&s.input);
        paused.run_for(2_000);
        assert!(paused.pause());
        assert_eq!(paused.run_for(5_000), 0, "{alg}: nothing fires while paused");
        assert_eq!(paused.events_applied(), 3);
        assert!(paused.resume());
        assert!(paused.run_to_completion());

        assert_eq!(
            bars_only(straight.sink().calls()),
            bars_only(paused.sink().calls()),
            "{alg}"
        );

        // Paused time is excluded; resume applied event 4 at 2000 ms instead of 2400 ms.
        let a = straight.history().latest().unwrap().duration_ms;
        let b = paused.history().latest().unwrap().duration_ms;
        assert_eq!(b, a - 400.0, "{alg}");
    }
}

/// it should keep publishing the timer while running and stop while paused
#[test]
fn timer_poll_follows_run_state() {
    let mut v = harness(Config::default().with_algorithm(Algorithm::Heap));
    v.start(&[4, 8, 1, 3]);
    v.sink_mut().take();
    v.run_for(100);
    let readings: Vec<f64> = v
        .sink()
        .calls()
        .iter()
        .filter_map(|c| match c {
            SinkCall::ShowElapsed { elapsed_ms } => Some(*elapsed_ms),
            _ => None,
        })
        .collect();
    assert_eq!(readings, vec![20.0, 40.0, 60.0, 80.0, 100.0]);

    v.pause();
    assert_eq!(v.sink().last_elapsed(), Some(100.0));
    assert_eq!(v.port().pending_of(Task::TimerPoll), 0);
    v.sink_mut().take();
    v.run_for(1_000);
    assert!(v.sink().calls().is_empty());
    assert_eq!(v.elapsed_ms(), 100.0);
}

/// it should discard everything on reset while paused and start the next run fresh
#[test]
fn reset_while_paused() {
    let s = scenarios::load("classroom").unwrap();
    let cfg = Config::default().with_algorithm(Algorithm::Merge);

    let mut fresh = harness(cfg.clone());
    fresh.start(&s.input);
    fresh.run_to_completion();

    let mut v = harness(cfg);
    v.start(&[3, 2, 1]);
    v.run_to_completion();
    v.start(&s.input);
    v.run_for(4_000);
    let stale = v.pending_step();
    v.pause();
    v.reset();

    assert_eq!(v.state(), RunState::Idle);
    assert!(v.bars().is_none());
    assert!(v.history().is_empty());
    assert_eq!(v.events_applied(), 0);
    assert_eq!(v.port().pending(), 0);
    assert_eq!(v.elapsed_ms(), 0.0);
    let tail = v.sink_mut().take();
    assert_eq!(
        &tail[tail.len() - 2..],
        &[SinkCall::Clear, SinkCall::ShowElapsed { elapsed_ms: 0.0 }]
    );
    if let Some(handle) = stale {
        assert!(!v.dispatch(handle, Task::Step));
    }

    v.start(&s.input);
    assert!(v.run_to_completion());
    assert_eq!(bars_only(v.sink().calls()), bars_only(fresh.sink().calls()));
    assert_eq!(v.history().len(), 1);
    assert_eq!(v.history().latest().unwrap().sequence, 1);
    assert_eq!(
        v.history().latest().unwrap().duration_ms,
        fresh.history().latest().unwrap().duration_ms
    );
}

/// it should ignore a step callback that fires after reset
#[test]
fn stale_callbacks_after_reset() {
    let mut v = harness(Config::default());
    v.start(&[5, 4, 3]);
    let handle = v.pending_step().unwrap();
    v.reset();
    assert!(!v.dispatch(handle, Task::Step));
    assert_eq!(v.state(), RunState::Idle);
    assert!(v.bars().is_none());
    assert_eq!(v.events_applied(), 0);
}

/// it should keep only the ten most recent runs in history
#[test]
fn history_is_bounded() {
    let mut v = harness(Config::default().with_animation_delay_ms(10));
    for _ in 0..11 {
        assert!(v.start(&[2, 1]));
        assert!(v.run_to_completion());
    }
    assert_eq!(v.history().len(), HISTORY_CAPACITY);
    assert_eq!(v.history().total_runs(), 11);
    let sequences: Vec<u64> = v.history().iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, (2..=11).collect::<Vec<_>>());
}

/// it should leave every bar green after a run finishes
#[test]
fn finished_bars_are_sorted_color() {
    let s = scenarios::load("descending").unwrap();
    for alg in Algorithm::ALL {
        let mut v = harness(Config::default().with_algorithm(alg));
        v.start(&s.input);
        assert!(v.run_to_completion());
        let bars = v.bars().unwrap();
        assert!(bars.all_sorted(), "{alg}");
        assert!(bars.colors().iter().all(|c| *c == BarColor::Sorted), "{alg}");
        for i in 0..bars.len() {
            assert_eq!(v.sink().last_color(i), Some(BarColor::Sorted), "{alg} bar {i}");
        }
    }
}

/// it should allow a new start after a finished run and reuse the selected algorithm
#[test]
fn restart_after_finish() {
    let mut v = harness(Config::default());
    v.start(&[2, 1]);
    v.run_to_completion();
    assert!(v.select_algorithm(Algorithm::Quick));
    assert!(v.start(&[3, 1, 2]));
    assert_eq!(v.state(), RunState::Running);
    assert!(v.run_to_completion());
    assert_eq!(v.history().latest().unwrap().label, "Quick Sort");
    assert_eq!(v.bars().unwrap().values(), &[1, 2, 3]);
}

/// it should give the same event order when paused and resumed before any tick fires
#[test]
fn immediate_pause_resume() {
    let data = [9, 4, 7, 1];
    let mut straight = harness(Config::default());
    straight.start(&data);
    straight.run_to_completion();

    let mut v = harness(Config::default());
    v.start(&data);
    assert!(v.pause());
    assert!(v.resume());
    assert_eq!(v.port().pending_of(Task::Step), 1);
    assert!(v.run_to_completion());
    assert_eq!(bars_only(v.sink().calls()), bars_only(straight.sink().calls()));
    assert_eq!(v.events_applied(), straight.events_applied());
}

/// it should count only swaps and overwrites as writes, and start each run from zero
#[test]
fn writes_follow_mutating_events() {
    let s = scenarios::load("ascending").unwrap();
    let mut v = harness(Config::default());
    v.start(&s.input);
    assert!(v.run_to_completion());
    assert_eq!(v.writes_applied(), 0);

    let data = [4, -1, 4, 0, -7, 9];
    for alg in Algorithm::ALL {
        let expected = StepProducer::new(alg, &data).filter(|e| e.mutates()).count() as u64;
        assert!(v.select_algorithm(alg));
        v.start(&data);
        assert!(v.run_to_completion());
        assert_eq!(v.writes_applied(), expected, "{alg}");
    }
    v.reset();
    assert_eq!(v.writes_applied(), 0);
}
