use std::thread;
use std::time::Duration;

use beatgrid_chart::ChartEvent;
use beatgrid_core::InputHandle;

/// Presses every lane at its event's exact target time. Handy as a demo and
/// as a smoke test of the whole loop: a healthy engine scores it all
/// perfect.
pub fn spawn(handle: InputHandle, events: Vec<ChartEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for event in events {
            loop {
                let now = handle.elapsed_ms();
                if now >= event.time_ms {
                    break;
                }
                thread::sleep(Duration::from_millis((event.time_ms - now).min(20)));
            }
            if !handle.press(event.lane, Some(event.time_ms)) {
                break;
            }
        }
    })
}
