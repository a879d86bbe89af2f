// SPDX-License-Identifier: GPL-3.0-only

//! Cancelable deferred messages
//!
//! One pending timer per [`TimerSlot`]. Arming a slot aborts the timer that
//! was pending there; dropping [`Timers`] aborts everything, so nothing
//! fires into a coordinator that has shut down.

use crate::app::state::{Message, TimerSlot};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Timers {
    pending: HashMap<TimerSlot, JoinHandle<()>>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `message` on `sender` after `after`, replacing the slot's timer
    pub fn arm(
        &mut self,
        slot: TimerSlot,
        after: Duration,
        message: Message,
        sender: UnboundedSender<Message>,
    ) {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = sender.send(message);
        });

        if let Some(previous) = self.pending.insert(slot, handle)
            && !previous.is_finished()
        {
            debug!(?slot, "Re-armed timer, cancelling previous");
            previous.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
