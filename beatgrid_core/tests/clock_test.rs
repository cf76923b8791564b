use std::thread;
use std::time::Duration;

use beatgrid_core::GameClock;

#[test]
fn elapsed_time_advances_monotonically() {
    let clock = GameClock::start();
    let first = clock.elapsed_ms();

    thread::sleep(Duration::from_millis(30));
    let second = clock.elapsed_ms();

    assert!(second >= first + 25, "{first} -> {second}");
    assert!(second < 5000);
}

#[test]
fn copies_share_the_same_epoch() {
    let clock = GameClock::start();
    let copy = clock;

    thread::sleep(Duration::from_millis(10));
    let a = clock.elapsed_ms();
    let b = copy.elapsed_ms();
    assert!(a.abs_diff(b) < 10);
}
