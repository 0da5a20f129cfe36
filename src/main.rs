use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use iced::widget::{button, column, row, text, Column};
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod actions;
mod bridge;
mod devices;
mod headless;
mod state;
mod ui;

use bridge::{ActionReport, AdbBridge, DeviceBridge};
use headless::Command;
use state::data::DeviceId;
use state::session::Session;
use state::settings::{FailurePolicy, Settings, DEFAULT_STORAGE_DIR};
use ui::drop_zone::DropTracker;
use ui::status::{self, Action};

/// Push an image to adb-connected laser projectors and display it.
///
/// Without a subcommand, opens the drag-and-drop window.
#[derive(Debug, Parser)]
#[command(name = "laser-display", version)]
struct Cli {
    /// Path to the adb executable
    #[arg(long, default_value = bridge::adb::DEFAULT_ADB, env = "LASER_DISPLAY_ADB")]
    adb: PathBuf,

    /// Directory on the device that receives pushed images
    #[arg(long, default_value = DEFAULT_STORAGE_DIR, env = "LASER_DISPLAY_STORAGE_DIR")]
    storage_dir: String,

    /// Abort a sequence at the first failing adb command
    #[arg(long, env = "LASER_DISPLAY_STRICT")]
    strict: bool,

    /// Do not configure devices after enumerating them
    #[arg(long)]
    skip_preflight: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            storage_dir: self.storage_dir.clone(),
            policy: if self.strict {
                FailurePolicy::Strict
            } else {
                FailurePolicy::BestEffort
            },
            preflight: !self.skip_preflight,
        }
    }
}

/// Main application state
struct LaserDisplay {
    bridge: Arc<dyn DeviceBridge>,
    settings: Settings,
    session: Session,
    /// Status message to display to the user
    status: String,
    /// A device sequence is running; action buttons are disabled
    busy: bool,
    /// Drag-and-drop state of the drop zone
    drop: DropTracker,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    FileHovered,
    FileHoverLeft,
    FileDropped(PathBuf),
    /// User clicked "Browse..."
    BrowseImage,
    RefreshDevices,
    ProjectImage,
    Shutdown,
    /// Background enumeration (and preflight) finished
    Connected(Result<(Vec<DeviceId>, ActionReport), String>),
    /// Background projection or shutdown finished
    Finished(Action, Result<ActionReport, String>),
}

impl LaserDisplay {
    fn new(
        bridge: Arc<dyn DeviceBridge>,
        settings: Settings,
        connected: Result<(Vec<DeviceId>, ActionReport), String>,
    ) -> (Self, Task<Message>) {
        let mut app = LaserDisplay {
            bridge,
            settings,
            session: Session::default(),
            status: String::new(),
            busy: false,
            drop: DropTracker::default(),
        };
        app.apply_connect(connected);
        (app, Task::none())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FileHovered => {
                self.drop.hover();
                Task::none()
            }
            Message::FileHoverLeft => {
                self.drop.leave();
                Task::none()
            }
            Message::FileDropped(path) => {
                if self.drop.accept() {
                    self.load_image(path);
                } else {
                    info!(path = %path.display(), "ignoring extra dropped file");
                }
                Task::none()
            }
            Message::BrowseImage => {
                let picked = FileDialog::new()
                    .set_title("Select Image to Project")
                    .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp", "tiff"])
                    .pick_file();

                if let Some(path) = picked {
                    self.load_image(path);
                }
                Task::none()
            }
            Message::RefreshDevices => {
                self.begin(Action::Connect);
                Task::perform(
                    actions::connect_async(self.bridge.clone(), self.settings.clone()),
                    Message::Connected,
                )
            }
            Message::ProjectImage => {
                if !self.session.has_image() {
                    warn!("No image loaded.");
                    self.status = "No image loaded.".to_string();
                    return Task::none();
                }
                self.begin(Action::Project);
                Task::perform(
                    actions::project_async(
                        self.bridge.clone(),
                        self.settings.clone(),
                        self.session.clone(),
                    ),
                    |result| Message::Finished(Action::Project, result),
                )
            }
            Message::Shutdown => {
                self.begin(Action::Shutdown);
                Task::perform(
                    actions::shutdown_async(
                        self.bridge.clone(),
                        self.settings.clone(),
                        self.session.clone(),
                    ),
                    |result| Message::Finished(Action::Shutdown, result),
                )
            }
            Message::Connected(result) => {
                self.busy = false;
                self.apply_connect(result);
                Task::none()
            }
            Message::Finished(action, result) => {
                self.busy = false;
                if let Err(err) = &result {
                    error!("{}: {}", action.label(), err);
                }
                self.status = status::describe(action, &result);
                Task::none()
            }
        }
    }

    fn begin(&mut self, action: Action) {
        self.busy = true;
        self.status = action.in_progress().to_string();
    }

    fn load_image(&mut self, path: PathBuf) {
        match self.session.load_image(&path) {
            Ok(image) => self.status = format!("Loaded {}", image.file_name),
            Err(err) => {
                warn!("{err}");
                self.status = err.to_string();
            }
        }
    }

    fn apply_connect(&mut self, result: Result<(Vec<DeviceId>, ActionReport), String>) {
        let report = match result {
            Ok((devices, report)) => {
                self.session.devices = devices;
                Ok(report)
            }
            Err(err) => {
                error!("device setup: {err}");
                Err(err)
            }
        };
        self.status = status::describe(Action::Connect, &report);
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let devices = if self.session.devices.is_empty() {
            "No devices connected".to_string()
        } else {
            let serials: Vec<&str> = self.session.devices.iter().map(DeviceId::as_str).collect();
            format!("Devices: {}", serials.join(", "))
        };
        let idle = !self.busy;

        let content: Column<Message> = column![
            ui::drop_zone::view(self.session.current_image.as_ref(), self.drop.is_hovering()),
            row![
                button("Browse...").on_press(Message::BrowseImage).padding(10),
                button("Refresh devices")
                    .on_press_maybe(idle.then_some(Message::RefreshDevices))
                    .padding(10),
            ]
            .spacing(10),
            button("Project Image")
                .on_press_maybe(idle.then_some(Message::ProjectImage))
                .width(Length::Fill)
                .padding(10),
            button("Shut Down Projectors >>> Ship mode")
                .on_press_maybe(idle.then_some(Message::Shutdown))
                .width(Length::Fill)
                .padding(10),
            text(devices).size(14),
            text(&self.status).size(14),
        ]
        .spacing(12)
        .padding(16)
        .align_x(Alignment::Center);

        content.into()
    }

    /// Translate window drag-and-drop events into messages
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FileHoverLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> anyhow::Result<()> {
    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = cli.settings();
    let adb = AdbBridge::new(&cli.adb);
    info!(adb = %adb.program().display(), storage_dir = %settings.storage_dir, "starting");
    let bridge: Arc<dyn DeviceBridge> = Arc::new(adb);

    match cli.command {
        Some(command) => headless::run(command, bridge.as_ref(), &settings).map(|_| ()),
        None => run_gui(bridge, settings),
    }
}

/// Enumerate and configure devices, then open the window
fn run_gui(bridge: Arc<dyn DeviceBridge>, settings: Settings) -> anyhow::Result<()> {
    let connected = actions::connect(bridge.as_ref(), &settings).map_err(|e| e.to_string());

    iced::application("Laser Display", LaserDisplay::update, LaserDisplay::view)
        .subscription(LaserDisplay::subscription)
        .theme(LaserDisplay::theme)
        .window_size((400.0, 400.0))
        .centered()
        .run_with(move || LaserDisplay::new(bridge, settings, connected))
        .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
