//! Outbound surface: hands the latest snapshot and metrics to whatever
//! renderer is attached, without the core knowing how frames are drawn.

use bevy::prelude::App;
use crossbeam_channel::{unbounded, Receiver, Sender};
use ops_proto::OpsSnapshot;

use crate::{metrics::OpsMetrics, snapshot::SnapshotHistory};

/// One displayable unit of state, captured at the end of a tick.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub snapshot: OpsSnapshot,
    pub metrics: OpsMetrics,
}

/// Anything that can present a frame. Implementations must not block the
/// tick loop.
pub trait RenderSink {
    fn present(&self, frame: RenderFrame);
}

/// Discards every frame. Useful for benchmarks and tests that only care
/// about simulation state.
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&self, _frame: RenderFrame) {}
}

/// Forwards frames over a channel to a consumer on another thread. Frames
/// are dropped with a warning once the receiver goes away.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<RenderFrame>,
}

impl ChannelSink {
    pub fn new() -> (Self, Receiver<RenderFrame>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl RenderSink for ChannelSink {
    fn present(&self, frame: RenderFrame) {
        if self.tx.send(frame).is_err() {
            log::warn!("render sink receiver dropped, frame discarded");
        }
    }
}

/// Push the most recent capture to the sink. Call after `run_tick`; does
/// nothing before the first capture.
pub fn broadcast_latest(app: &App, sink: &dyn RenderSink) {
    let history = app.world.resource::<SnapshotHistory>();
    let Some(snapshot) = history.last_snapshot.clone() else {
        return;
    };
    let metrics = app.world.resource::<OpsMetrics>().clone();
    sink.present(RenderFrame { snapshot, metrics });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_sink_delivers_frames_in_order() {
        let (sink, rx) = ChannelSink::new();
        for tick in 0..3u64 {
            let mut frame = RenderFrame {
                snapshot: OpsSnapshot::default(),
                metrics: OpsMetrics::default(),
            };
            frame.snapshot.header.tick = tick;
            sink.present(frame);
        }
        let ticks: Vec<u64> = rx.try_iter().map(|f| f.snapshot.header.tick).collect();
        assert_eq!(ticks, vec![0, 1, 2]);
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.present(RenderFrame {
            snapshot: OpsSnapshot::default(),
            metrics: OpsMetrics::default(),
        });
    }
}
