use beatgrid_chart::ChartEvent;

/// Per-lane grid of intensity cells, `frame[lane][cell]`. Cell 0 is where
/// an event first appears; the last cell sits just before the hit line.
pub type Frame = Vec<Vec<bool>>;

pub const DEFAULT_CELLS_PER_LANE: usize = 5;

/// Maps active, unresolved events onto the lane grid. Recomputed from
/// scratch every tick so the frame always agrees with the latest
/// resolutions; multiple events may light the same cell.
pub fn project<'a>(
    events: impl IntoIterator<Item = &'a ChartEvent>,
    now_ms: u64,
    lead_time_ms: u64,
    lane_count: usize,
    cells_per_lane: usize,
) -> Frame {
    let mut frame = vec![vec![false; cells_per_lane]; lane_count];
    if lead_time_ms == 0 || cells_per_lane == 0 {
        return frame;
    }

    for event in events {
        let progress = 1.0 - (event.time_ms as f64 - now_ms as f64) / lead_time_ms as f64;
        if !(0.0..=1.0).contains(&progress) {
            continue;
        }
        let cell = (progress * cells_per_lane as f64).floor() as usize;
        if cell < cells_per_lane && event.lane < lane_count {
            frame[event.lane][cell] = true;
        }
    }
    frame
}
