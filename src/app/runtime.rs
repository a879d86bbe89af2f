// SPDX-License-Identifier: GPL-3.0-only

//! Coordinator event loop
//!
//! A single task owns the [`AppModel`] and drains one message queue. Input
//! from front-ends, timer expiries, capture completions, and background
//! results all arrive on that queue, so state is only ever touched from one
//! place, one message at a time. After every message the screen is
//! re-rendered.

use crate::app::state::{AppModel, Message, Task};
use crate::app::timers::Timers;
use crate::app::view::ScreenView;
use crate::confetti::ConfettiCannon;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Draws screen snapshots
pub trait Renderer: Send {
    fn render(&mut self, view: &ScreenView);
}

/// Publishes every snapshot on a watch channel
impl Renderer for watch::Sender<ScreenView> {
    fn render(&mut self, view: &ScreenView) {
        self.send_replace(view.clone());
    }
}

/// Cloneable sender for feeding events into a running coordinator
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    sender: mpsc::UnboundedSender<Message>,
}

impl CoordinatorHandle {
    /// Queue a message. Returns false once the coordinator has stopped.
    pub fn send(&self, message: impl Into<Message>) -> bool {
        self.sender.send(message.into()).is_ok()
    }

    pub fn shutdown(&self) {
        let _ = self.sender.send(Message::Shutdown);
    }
}

pub struct Coordinator<R: Renderer> {
    model: AppModel,
    renderer: R,
    timers: Timers,
    confetti: ConfettiCannon,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
}

impl<R: Renderer> Coordinator<R> {
    /// Wire the model to a fresh queue and register the capture callback
    pub fn new(mut model: AppModel, renderer: R) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let capture_sender = sender.clone();
        model
            .camera
            .set_photo_captured_callback(Arc::new(move |filename: String| {
                if capture_sender.send(Message::PhotoCaptured(filename)).is_err() {
                    warn!("Photo captured after the coordinator stopped");
                }
            }));

        let confetti = ConfettiCannon::new(
            model.config.confetti_particles,
            model.config.confetti_radius,
            model.config.confetti_duration(),
        );

        Self {
            model,
            renderer,
            timers: Timers::new(),
            confetti,
            sender,
            receiver,
        }
    }

    pub fn handle(&self) -> CoordinatorHandle {
        CoordinatorHandle {
            sender: self.sender.clone(),
        }
    }

    /// Process messages until [`Message::Shutdown`]; returns the final state
    pub async fn run(mut self) -> AppModel {
        info!("Coordinator started");

        let init = self.model.init();
        self.execute(init);
        self.render();

        while let Some(message) = self.receiver.recv().await {
            if message == Message::Shutdown {
                break;
            }
            self.dispatch(message);
        }

        // Nothing may fire into a stopped coordinator
        self.timers.cancel_all();
        info!("Coordinator stopped");
        self.model
    }

    fn dispatch(&mut self, message: Message) {
        if message != Message::AnimationFrame {
            debug!(?message, "Dispatching");
        }

        let task = self.model.update(message);
        if !task.is_none() {
            debug!(?task, "Follow-up work");
        }
        self.execute(task);
        self.confetti
            .observe(self.model.confetti_counter, Instant::now());
        self.render();
    }

    fn execute(&mut self, task: Task) {
        match task {
            Task::None => {}
            Task::Schedule {
                slot,
                after,
                message,
            } => self.timers.arm(slot, after, message, self.sender.clone()),
            Task::Perform(future) => {
                let sender = self.sender.clone();
                tokio::spawn(async move {
                    let _ = sender.send(future.await);
                });
            }
            Task::Batch(tasks) => {
                for task in tasks {
                    self.execute(task);
                }
            }
        }
    }

    fn render(&mut self) {
        let mut view = self.model.view();
        view.confetti = self.confetti.particles(Instant::now());
        self.renderer.render(&view);
    }
}
