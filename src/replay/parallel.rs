//! Parallel Replay
//!
//! Uses Rayon to replay completed logs on several threads at once. Every
//! replay gets its own cursor; the logs are only read.

use rayon::prelude::*;

use super::adapter::{replay_to_vec_with, Replayer};
use super::config::ReplayConfig;
use crate::error::Result;
use crate::log::EventLog;
use crate::sax::{ContentHandler, SaxEvent};

/// Replay one log into every handler in parallel
pub fn replay_each<H>(log: &EventLog, config: ReplayConfig, handlers: &mut [H]) -> Vec<Result<()>>
where
    H: ContentHandler + Send,
{
    handlers
        .par_iter_mut()
        .map(|handler| Replayer::with_config(log, config).run(handler))
        .collect()
}

/// Replay several logs in parallel, collecting each into events
pub fn replay_all(logs: &[EventLog], config: ReplayConfig) -> Vec<Result<Vec<SaxEvent>>> {
    logs.par_iter()
        .map(|log| replay_to_vec_with(log, config))
        .collect()
}
