//! Terminal event loop driving the funnel.
//!
//! The loop renders the current screen and feeds key presses to the
//! controller. Network operations run on spawned tasks so the screen stays
//! responsive; a route-listener task reconciles the funnel with every
//! navigation event.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::sync::Mutex;

use crate::AppError;
use crate::api::ScoringApi;
use crate::data;
use crate::router::Router;
use crate::store::SessionStore;
use crate::terminal::TerminalGuard;

use super::controller::{Controller, SharedApp};
use super::state::{FunnelApp, Step};
use super::ui;

const TICK: Duration = Duration::from_millis(50);

/// Run the funnel against `api`, starting at `initial_path`.
pub async fn run(
    api: Arc<dyn ScoringApi>,
    store: SessionStore,
    initial_path: &str,
) -> Result<(), AppError> {
    let session = store.load();
    let app: SharedApp = Arc::new(Mutex::new(FunnelApp::new(session)));
    let router = Router::new(initial_path);
    let controller = Controller::new(Arc::clone(&app), api, Arc::new(store), router.clone());

    // Reconcile with the startup location before drawing anything.
    controller.sync_route().await;

    let mut routes = router.subscribe();
    let route_controller = controller.clone();
    let route_task = tokio::spawn(async move {
        while routes.changed().await.is_ok() {
            route_controller.sync_route().await;
        }
    });

    let mut terminal = TerminalGuard::init()?;
    let result = run_loop(&mut terminal, &app, &controller).await;

    route_task.abort();
    controller.stop_poller().await;

    result
}

async fn run_loop(
    terminal: &mut TerminalGuard,
    app: &SharedApp,
    controller: &Controller,
) -> Result<(), AppError> {
    loop {
        {
            let app = app.lock().await;
            if app.should_quit {
                break;
            }
            terminal.draw(|frame| ui::render(frame, &app))?;
        }

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(app, controller, key.code).await;
            }
        }
    }

    Ok(())
}

async fn handle_key(app: &SharedApp, controller: &Controller, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.lock().await.should_quit = true;
            return;
        }
        KeyCode::Char('x') | KeyCode::Char('X') => {
            controller.dismiss_error().await;
            return;
        }
        _ => {}
    }

    let step = app.lock().await.step;
    match step {
        Step::Home => handle_home_key(app, controller, key).await,
        Step::Landing => handle_landing_key(app, controller, key).await,
        Step::Quiz => handle_quiz_key(app, controller, key).await,
        Step::Preview => handle_preview_key(app, controller, key).await,
        Step::Payment => handle_payment_key(controller, key).await,
        Step::Result => handle_result_key(app, controller, key).await,
    }
}

async fn handle_home_key(app: &SharedApp, controller: &Controller, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.lock().await.home_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.lock().await.home_next(),
        KeyCode::Enter => {
            let kind = {
                let app = app.lock().await;
                if app.loading {
                    return;
                }
                data::CATALOG[app.home_selected].kind
            };
            let controller = controller.clone();
            tokio::spawn(async move {
                controller.select_test(kind).await;
            });
        }
        _ => {}
    }
}

async fn handle_landing_key(app: &SharedApp, controller: &Controller, key: KeyCode) {
    match key {
        KeyCode::Enter => {
            if app.lock().await.loading {
                return;
            }
            let controller = controller.clone();
            tokio::spawn(async move {
                controller.start_quiz().await;
            });
        }
        KeyCode::Esc => controller.go_home(),
        _ => {}
    }
}

async fn handle_quiz_key(app: &SharedApp, controller: &Controller, key: KeyCode) {
    let has_question = app.lock().await.current_question().is_some();
    if !has_question {
        if key == KeyCode::Enter {
            controller.back_to_landing().await;
        }
        return;
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.lock().await.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.lock().await.select_next_option(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => {
            app.lock().await.previous_question();
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.lock().await.submitting {
                return;
            }
            if controller.answer_current().await {
                let controller = controller.clone();
                tokio::spawn(async move {
                    controller.submit_result().await;
                });
            }
        }
        KeyCode::Esc => controller.back_to_landing().await,
        _ => {}
    }
}

async fn handle_preview_key(app: &SharedApp, controller: &Controller, key: KeyCode) {
    let has_result = app.lock().await.session.result.is_some();
    match key {
        KeyCode::Enter if !has_result => controller.back_to_landing().await,
        KeyCode::Enter | KeyCode::Char('u') => controller.request_unlock().await,
        KeyCode::Esc => controller.go_home(),
        _ => {}
    }
}

async fn handle_payment_key(controller: &Controller, key: KeyCode) {
    match key {
        KeyCode::Enter | KeyCode::Char('c') => {
            let controller = controller.clone();
            tokio::spawn(async move {
                controller.check_unlock(true).await;
            });
        }
        KeyCode::Esc => controller.cancel_payment().await,
        _ => {}
    }
}

async fn handle_result_key(app: &SharedApp, controller: &Controller, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.lock().await.scroll_result_down(),
        KeyCode::Up | KeyCode::Char('k') => app.lock().await.scroll_result_up(),
        KeyCode::Enter => {
            if app.lock().await.session.result.is_none() {
                controller.go_home();
            }
        }
        KeyCode::Esc => controller.go_home(),
        _ => {}
    }
}
