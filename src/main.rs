use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use joycursor::config::{AppConfig, DisplayBackend};
use joycursor::control::ControlLoop;
use joycursor::display::{Frame, FrameSurface, SimulatorWindow, SurfaceGeometry, TraceSurface};
use joycursor::input::{open_sampler, InputSnapshot};
use tokio::sync::watch;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config_path = AppConfig::default_path();
    let config = AppConfig::load_or_create(&config_path)
        .await
        .map_err(|e| eyre!("Failed to load {}: {}", config_path.display(), e))?;
    setup_logging(config.log_level()?);
    info!("Loaded configuration from {}", config_path.display());
    info!("Configuration: {:?}", config);

    match config.display.backend {
        DisplayBackend::Headless => run_headless(config).await,
        DisplayBackend::Window => run_window(config),
    }
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    Ok(())
}

fn setup_logging(level: Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

async fn run_headless(config: AppConfig) -> Result<()> {
    let sampler = open_sampler(&config.input, None)?;
    let surface = TraceSurface::new(SurfaceGeometry::DEFAULT);

    let control = ControlLoop::create(sampler, Box::new(surface)).start()?;

    tokio::select! {
        _ = control.run() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!("Failed to listen for Ctrl-C: {}", e);
            }
            info!("Shutting down");
        }
    }
    Ok(())
}

fn run_window(config: AppConfig) -> Result<()> {
    let geometry = SurfaceGeometry::DEFAULT;
    let (frame_tx, frame_rx) = watch::channel(Frame::blank(geometry));
    let (input_tx, input_rx) = watch::channel(InputSnapshot::default());

    let sampler = open_sampler(&config.input, Some(input_rx))?;
    let surface = FrameSurface::new(geometry, frame_tx);
    let control = ControlLoop::create(sampler, Box::new(surface)).start()?;

    let _control_handle = tokio::spawn(control.run());

    info!("Starting simulator window");
    let [width, height] =
        SimulatorWindow::inner_size(geometry.width as usize, geometry.height as usize);
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_title("joycursor")
        .with_inner_size([width, height])
        .with_fullscreen(config.display.fullscreen);

    eframe::run_native(
        "joycursor",
        native_options,
        Box::new(|_cc| Ok(Box::new(SimulatorWindow::new(frame_rx, input_tx)))),
    )
    .map_err(|e| eyre!("Simulator window failed: {}", e))
}
