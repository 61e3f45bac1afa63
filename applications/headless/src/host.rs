//! Host audio element that only logs what it is asked to do

use cadence_playback::HostAudio;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Default)]
pub struct LoggingHost;

impl HostAudio for LoggingHost {
    fn load(&mut self, src: &str) {
        info!(src, "load");
    }

    fn play(&mut self) {
        info!("play");
    }

    fn pause(&mut self) {
        info!("pause");
    }

    fn seek(&mut self, position: Duration) {
        info!(position_secs = position.as_secs_f64(), "seek");
    }

    fn set_volume(&mut self, gain: f32) {
        info!(gain, "volume");
    }

    fn subscribe_timing(&mut self) {
        info!("timing feed subscribed");
    }

    fn unsubscribe_timing(&mut self) {
        info!("timing feed unsubscribed");
    }
}
