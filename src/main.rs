use clap::Parser;
use log::{error, info};
use resort_map::map::{
    BookingOutcome, EntityRef, InputEvent, MapConfig, PlacementConfig, PointerPos, ResortMap,
    UnitId, DEFAULT_MAX_RADIUS, DEFAULT_MIN_RADIUS, DEFAULT_PER_ZONE,
};

#[derive(Parser)]
#[command(name = "resort_map")]
#[command(about = "Interactive orbital resort map with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Seed for unit placement and status draws
    #[arg(long, default_value = "2024")]
    seed: u64,

    /// Units generated per zone
    #[arg(long, default_value_t = DEFAULT_PER_ZONE)]
    per_zone: u32,

    /// Inner edge of the placement band, in plane units
    #[arg(long, default_value_t = DEFAULT_MIN_RADIUS)]
    min_radius: f32,

    /// Outer edge of the placement band, in plane units
    #[arg(long, default_value_t = DEFAULT_MAX_RADIUS)]
    max_radius: f32,

    /// Number of idle auto-rotate ticks to simulate in headless mode
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Select and book this unit id in headless mode
    #[arg(long)]
    book: Option<u32>,
}

impl Cli {
    fn map_config(&self) -> MapConfig {
        MapConfig {
            placement: PlacementConfig {
                per_zone: self.per_zone,
                min_radius: self.min_radius,
                max_radius: self.max_radius,
            },
            ..MapConfig::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            if let Err(err) = run_with_ui(&cli) {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        if let Err(err) = run_headless(&cli) {
            error!("{:#}", err);
            std::process::exit(1);
        }
    }
}

/// Run a scripted session against the map core (no graphics)
fn run_headless(cli: &Cli) -> anyhow::Result<()> {
    println!("Running resort map in headless mode...");
    println!("Seed: {}, Ticks: {}", cli.seed, cli.ticks);
    println!();

    let mut map = ResortMap::with_seed(cli.map_config(), cli.seed)?;

    println!("Initial state:");
    map.print_summary();
    map.draw_map();

    // Scripted orbit: drag right and up, then zoom in
    map.handle_input(InputEvent::PointerDown(Some(PointerPos::new(100.0, 100.0))));
    map.handle_input(InputEvent::PointerMove(Some(PointerPos::new(200.0, 80.0))));
    map.handle_input(InputEvent::PointerUp);
    map.handle_input(InputEvent::Wheel { delta_y: -100.0 });

    let interval = map.config().camera.tick_interval;
    let mut applied = 0;
    for _ in 0..cli.ticks {
        applied += map.advance(interval);
        map.advance_preview_frame();
    }
    info!("Applied {} idle ticks", applied);

    if let Some(id) = cli.book {
        let id = UnitId(id);
        map.hover_enter(EntityRef::Unit(id));
        if map.select_unit(id) {
            let mut sink = |label: &str| println!(">>> Booking requested: {}", label);
            match map.request_book(&mut sink) {
                BookingOutcome::Booked(label) => info!("Booked {}", label),
                BookingOutcome::Unavailable { unit, status } => {
                    println!("Unit {} is {} and cannot be booked", unit, status)
                }
                BookingOutcome::NoSelection => println!("No unit selected"),
            }
        } else {
            println!("Unit {} does not exist", id);
        }
        map.hover_leave(EntityRef::Unit(id));
    }

    println!();
    println!("=== Final State ===");
    map.print_summary();
    map.draw_map();

    map.reset();
    map.deactivate();
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(cli: &Cli) -> anyhow::Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    let map = ResortMap::with_seed(cli.map_config(), cli.seed)?;

    println!("Starting Resort Map UI...");
    println!();
    println!("Controls:");
    println!("  Click+Drag  - Orbit the map");
    println!("  Scroll      - Zoom");
    println!("  Click unit  - Open info panel");
    println!("  B           - Book selected unit");
    println!("  R           - Reset view");
    println!("  ESC         - Close panel / Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,resort_map=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Resort Masterplan".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(resort_map::ui::ResortMapUIPlugin { map })
        .run();
    Ok(())
}
