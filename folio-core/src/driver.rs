//! Tokio host for [`CarouselController`].
//!
//! The controller itself never sleeps; this driver owns it on a task, sleeps
//! until the next pending step, applies commands as they arrive and fans the
//! resulting events out over a broadcast channel.

use std::time::Instant;

use folio_config::CarouselMode;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::carousel::{CarouselController, CarouselEvent};

const COMMAND_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 256;

/// Host-side requests forwarded to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    Next,
    Previous,
    /// Transition without touching autoplay.
    GoTo(usize),
    /// Manual selection: pause autoplay and resume after the grace delay.
    Select(usize),
    StartAutoplay,
    StopAutoplay,
    SetMode(CarouselMode),
    Shutdown,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("carousel driver has stopped")]
    Closed,

    #[error("carousel driver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Current time on the tokio clock, so paused test time drives the
/// controller too.
pub fn clock_now() -> Instant {
    tokio::time::Instant::now().into_std()
}

#[derive(Debug)]
pub struct CarouselDriver {
    commands: mpsc::Sender<DriverCommand>,
    events: broadcast::Sender<CarouselEvent>,
    shutdown: CancellationToken,
    task: JoinHandle<CarouselController>,
}

impl CarouselDriver {
    /// Move `controller` onto a new task. Must be called inside a tokio
    /// runtime.
    pub fn spawn(controller: CarouselController) -> Self {
        let (commands, rx) = mpsc::channel(COMMAND_CAPACITY);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let shutdown = CancellationToken::new();

        let task = tokio::spawn(run(
            controller,
            rx,
            events.clone(),
            shutdown.clone(),
        ));

        Self {
            commands,
            events,
            shutdown,
            task,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.events.subscribe()
    }

    /// A sender for UI code that outlives this handle's borrow.
    pub fn commands(&self) -> mpsc::Sender<DriverCommand> {
        self.commands.clone()
    }

    pub async fn send(&self, command: DriverCommand) -> Result<(), DriverError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| DriverError::Closed)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the task and hand back the torn-down controller.
    pub async fn shutdown(mut self) -> Result<CarouselController, DriverError> {
        self.shutdown.cancel();
        Ok((&mut self.task).await?)
    }
}

impl Drop for CarouselDriver {
    fn drop(&mut self) {
        // The task tears the controller down on its own once cancelled.
        self.shutdown.cancel();
    }
}

async fn run(
    mut controller: CarouselController,
    mut commands: mpsc::Receiver<DriverCommand>,
    events: broadcast::Sender<CarouselEvent>,
    shutdown: CancellationToken,
) -> CarouselController {
    info!(cards = controller.len(), mode = %controller.mode(), "carousel driver started");

    // Entrance of the first card and the armed autoplay are already in the
    // controller's state; flush anything it queued while being built.
    publish(&events, controller.take_events());

    loop {
        let deadline = controller.next_deadline();
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            command = commands.recv() => match command {
                None | Some(DriverCommand::Shutdown) => break,
                Some(command) => apply(&mut controller, command, clock_now()),
            },
            _ = wait_until(deadline) => {}
        }
        let batch = controller.advance(clock_now());
        publish(&events, batch);
    }

    controller.teardown();
    info!("carousel driver stopped");
    controller
}

fn apply(controller: &mut CarouselController, command: DriverCommand, now: Instant) {
    debug!(?command, "carousel command");
    let accepted = match command {
        DriverCommand::Next => controller.next(now),
        DriverCommand::Previous => controller.previous(now),
        DriverCommand::GoTo(index) => controller.go_to(index, now),
        DriverCommand::Select(index) => controller.select(index, now),
        DriverCommand::StartAutoplay => controller.start_autoplay(now),
        DriverCommand::StopAutoplay => {
            controller.stop_autoplay();
            true
        }
        DriverCommand::SetMode(mode) => {
            controller.set_mode(mode, now);
            true
        }
        DriverCommand::Shutdown => false,
    };
    if !accepted {
        debug!(?command, "carousel command had no effect");
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
        }
        None => std::future::pending().await,
    }
}

fn publish(events: &broadcast::Sender<CarouselEvent>, batch: Vec<CarouselEvent>) {
    for event in batch {
        // No subscribers is fine; the UI may not be listening yet.
        if events.send(event).is_err() {
            break;
        }
    }
}
