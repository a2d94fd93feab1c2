//! Runtime entry point: CLI parsing, logging and panic-hook setup,
//! terminal/input/scheduler/dispatcher wiring, and a small demo
//! application exercising the whole pipeline.

mod args;
mod demo;
mod executor;
mod logging;

use anyhow::Result;
use args::Args;
use clap::Parser;
use demo::{DemoComponent, DemoMsg, DemoState, RootOnly};
use executor::TokioExecutor;
use std::time::Instant;
use termloop_events::Dispatcher;
use termloop_render::FrameWriter;
use termloop_terminal::{InitOptions, TerminalController};
use termloop_types::{BufferPair, ComponentId, Event};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(args.log_file.clone())?;
    logging::install_panic_hook(termloop_terminal::emergency_shutdown);

    let mut config = termloop_config::load(args.config.clone())?;
    if let Some(fps) = args.fps {
        config.file.fps = fps;
    }
    if let Some(mouse) = args.mouse {
        config.file.mouse_tracking = mouse.into();
    }
    termloop_config::apply_context(&mut config.file);

    tracing::info!(target: "runtime", fps = config.file.fps, "startup");

    let mouse_mode = match config.file.mouse_tracking {
        termloop_config::MouseTracking::None => None,
        termloop_config::MouseTracking::Click => Some(termloop_terminal::MouseMode::Click),
        termloop_config::MouseTracking::Drag => Some(termloop_terminal::MouseMode::Drag),
        termloop_config::MouseTracking::All => Some(termloop_terminal::MouseMode::All),
    };

    let mut controller = TerminalController::init(InitOptions {
        alternate_screen: config.file.alternate_screen,
        hide_cursor: config.file.hide_cursor,
        mouse_tracking: mouse_mode,
        explicit_size: None,
    })?;

    let run_result = run(&mut controller, &config).await;

    controller.shutdown();
    tracing::info!(target: "runtime", "shutdown complete");
    run_result
}

async fn run(controller: &mut TerminalController, config: &termloop_config::Config) -> Result<()> {
    let (rows, cols) = controller.size();
    let mut buffers = BufferPair::new(rows, cols)?;
    let mut writer = FrameWriter::new();
    let mut scheduler = termloop_scheduler::FrameScheduler::new(config.file.fps);

    let mut dispatcher: Dispatcher<DemoState, DemoMsg> = Dispatcher::new(config.file.message_queue_cap);
    let mut state = DemoState::new((rows, cols));
    dispatcher
        .table_mut()
        .register(ComponentId::ROOT, None, Box::new(DemoComponent), &state);

    let (input_tx, mut input_rx) = mpsc::channel::<Event>(256);
    let (_reader_shutdown, _reader_handle) = termloop_input::spawn_reader(input_tx);

    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<(ComponentId, DemoMsg)>();
    let mut executor = TokioExecutor::new(result_tx);

    let focus = RootOnly;
    let hit = RootOnly;

    // Establish the first full frame before entering the tick loop.
    demo::view(&state, &mut buffers.current);
    let ops = termloop_render::diff(&buffers.current, &buffers.previous);
    writer.emit(&ops, &buffers.current);
    flush_frame(&mut writer)?;
    buffers.swap();

    #[cfg(unix)]
    let mut resize_signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::window_change())?;

    loop {
        if dispatcher.is_shutting_down() {
            break;
        }

        let wait = scheduler.wait_duration(Instant::now());

        #[cfg(unix)]
        let resize_tick = resize_signal.recv();
        #[cfg(not(unix))]
        let resize_tick = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(target: "runtime", "ctrl_c received");
                dispatcher.request_shutdown();
            }
            _ = resize_tick => {
                if let Ok((rows, cols)) = controller.refresh_size() {
                    buffers.resize(rows, cols)?;
                    dispatcher.dispatch_event(Event::Resize { rows, cols }, &focus, &hit, &state);
                    scheduler.mark_dirty();
                }
            }
            Some(event) = input_rx.recv() => {
                dispatcher.dispatch_event(event, &focus, &hit, &state);
                scheduler.mark_dirty();
            }
            Some((component, msg)) = result_rx.recv() => {
                dispatcher.enqueue(component, msg);
                scheduler.mark_dirty();
            }
            _ = tokio::time::sleep(wait) => {}
        }

        let now = Instant::now();
        scheduler.tick(now, || {
            let (new_state, report) = dispatcher.run_cycle(state.clone(), &mut executor);
            state = new_state;
            if report.state_changed {
                demo::view(&state, &mut buffers.current);
                let ops = termloop_render::diff(&buffers.current, &buffers.previous);
                let _ = writer.emit(&ops, &buffers.current);
                if let Err(err) = flush_frame(&mut writer) {
                    tracing::warn!(%err, "frame write failed");
                }
                buffers.swap();
            }
        });
    }

    Ok(())
}

fn flush_frame(writer: &mut FrameWriter) -> std::io::Result<()> {
    use std::io::Write;
    let bytes = writer.flush();
    if bytes.is_empty() {
        return Ok(());
    }
    let mut out = std::io::stdout();
    out.write_all(&bytes)?;
    out.flush()
}
