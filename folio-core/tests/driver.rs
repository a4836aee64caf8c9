use std::time::Duration;

use folio_config::{CarouselMode, HeroCarouselConfig};
use folio_core::driver::clock_now;
use folio_core::{CarouselController, CarouselDriver, CarouselEvent, DriverCommand};
use folio_model::{CardId, Cta, CtaAction, HeroCard};
use tokio::sync::broadcast;

fn cards(n: usize) -> Vec<HeroCard> {
    (0..n)
        .map(|i| HeroCard {
            id: CardId::new(format!("card-{i}")),
            audience: String::new(),
            title: format!("Card {i}"),
            text: vec![format!("Body {i}")],
            cta: Cta {
                label: "Contact".into(),
                action: CtaAction::Scroll {
                    target: "contact".into(),
                },
            },
            background: Vec::new(),
        })
        .collect()
}

fn spawn(n: usize, mode: CarouselMode) -> CarouselDriver {
    let controller = CarouselController::new(
        cards(n),
        HeroCarouselConfig::default(),
        mode,
        clock_now(),
    );
    CarouselDriver::spawn(controller)
}

async fn next_matching(
    rx: &mut broadcast::Receiver<CarouselEvent>,
    pred: impl Fn(&CarouselEvent) -> bool,
) -> CarouselEvent {
    loop {
        let event = rx.recv().await.expect("event stream open");
        if pred(&event) {
            return event;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn autoplay_advances_on_the_configured_interval() {
    let start = tokio::time::Instant::now();
    let driver = spawn(3, CarouselMode::Default);
    let mut rx = driver.subscribe();

    let tick = next_matching(&mut rx, |e| matches!(e, CarouselEvent::AutoplayTick { .. })).await;
    assert_eq!(tick.at(), start.into_std() + Duration::from_secs(10));

    let finished = next_matching(&mut rx, |e| {
        matches!(e, CarouselEvent::TransitionFinished { .. })
    })
    .await;
    assert!(matches!(finished, CarouselEvent::TransitionFinished { index: 1, .. }));

    let controller = driver.shutdown().await.expect("driver joins");
    assert_eq!(controller.active_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn manual_selection_runs_through_the_driver() {
    let driver = spawn(4, CarouselMode::Reading);
    let mut rx = driver.subscribe();

    driver
        .send(DriverCommand::Select(3))
        .await
        .expect("driver running");

    let started = next_matching(&mut rx, |e| {
        matches!(e, CarouselEvent::TransitionStarted { .. })
    })
    .await;
    assert!(matches!(started, CarouselEvent::TransitionStarted { from: 0, to: 3, .. }));

    next_matching(&mut rx, |e| matches!(e, CarouselEvent::AutoplayResumed { .. })).await;
    next_matching(&mut rx, |e| matches!(e, CarouselEvent::TransitionFinished { .. })).await;

    let controller = driver.shutdown().await.expect("driver joins");
    assert_eq!(controller.active_index(), 3);
    assert!(!controller.is_mounted());
    assert_eq!(controller.pending_timers(), 0, "no dangling timers after shutdown");
}

#[tokio::test(start_paused = true)]
async fn commands_after_shutdown_report_closed() {
    let driver = spawn(2, CarouselMode::Default);
    let commands = driver.commands();
    let controller = driver.shutdown().await.expect("driver joins");
    assert!(!controller.is_mounted());

    let result = commands.send(DriverCommand::Next).await;
    assert!(result.is_err(), "receiver dropped with the task");
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_the_task() {
    let driver = spawn(3, CarouselMode::Default);
    let commands = driver.commands();
    drop(driver);

    tokio::time::timeout(Duration::from_secs(1), commands.closed())
        .await
        .expect("task exits once the handle is gone");
}
