use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use lichtband::color;
use lichtband::intervaltimer::IntervalTimer;
use lichtband::modifiers::{FadeIn, HueRotate};
use lichtband::olaoutput::OlaOutput;
use lichtband::settings::Settings;
use lichtband::sink::{Sink, TerminalSink};
use lichtband::visuals::{self, Animation};
use lichtband::{Color, Error, Image, Strip};

#[derive(Parser)]
struct Cli {
    /// TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Effect to show: rainbow, blink or balls
    #[arg(short, long, default_value = "rainbow")]
    effect: String,

    /// Number of pixels, overrides the settings file
    #[arg(short, long)]
    pixels: Option<usize>,

    /// Overlay the diagnostic index marker at pixel 0
    #[arg(long)]
    show_index: bool,

    /// OLA daemon address (e.g. 127.0.0.1:7770); renders to the
    /// terminal when absent
    #[arg(long, value_name = "ADDR")]
    ola: Option<String>,
}

fn load_settings(args: &Cli) -> Settings {
    let mut settings = match &args.config {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(err) => panic!("Cannot load settings: {}", err),
        },
        None => Settings::default(),
    };

    if let Some(pixels) = args.pixels {
        settings.pixels = pixels;
    }
    if args.show_index {
        settings.show_index = true;
    }
    if args.ola.is_some() {
        settings.ola_addr = args.ola.clone();
    }
    settings
}

fn create_sink(settings: &Settings) -> Result<Box<dyn Sink>, Error> {
    if let Some(addr) = &settings.ola_addr {
        let addr = SocketAddr::from_str(addr)
            .map_err(|err| Error::InvalidArgument(format!("bad OLA address: {err}")))?;
        return Ok(Box::new(OlaOutput::new(addr, settings.universe)?));
    }
    Ok(Box::new(TerminalSink::new()))
}

/// Rainbow gradient across the whole strip, faded in and endlessly
/// rotating its hues.
fn setup_rainbow(strip: &mut Strip) {
    let pixels = strip.len();
    let image = strip.image();
    {
        let mut image = image.lock().unwrap();
        for i in 0..pixels {
            let pos = i as f32 * 765.0 / pixels as f32;
            image.set(i, color::wheel(pos)).expect("index in range");
        }
    }
    let fade = FadeIn::new(60).expect("nonzero duration");
    strip.chain_mut().append(Box::new(fade));
    strip.chain_mut().append(Box::new(HueRotate::new(3.0)));
}

fn create_animation(effect: &str, pixels: usize) -> Option<Animation> {
    match effect {
        "blink" => {
            let frames = visuals::blink(pixels, Color::AZURE, Color::BLACK, 15, 15)
                .expect("valid blink parameters");
            Some(Animation::new(Box::new(frames), pixels).expect("nonzero pixel count"))
        }
        "balls" => {
            let frames = visuals::bouncing_ball(
                pixels,
                color::random_tertiary(),
                4,
                0.9,
                0.0,
                pixels as f32 - 1.0,
            )
            .expect("valid ball parameters");
            Some(Animation::new(Box::new(frames), pixels).expect("nonzero pixel count"))
        }
        _ => None,
    }
}

fn main() {
    env_logger::init();
    let args = Cli::parse();
    let settings = load_settings(&args);

    let sink = match create_sink(&settings) {
        Ok(sink) => sink,
        Err(err) => panic!("Cannot set up output sink: {}", err),
    };

    let mut strip = match Strip::new(settings.pixels, sink, settings.show_index) {
        Ok(strip) => strip,
        Err(err) => panic!("Cannot set up strip: {}", err),
    };

    let mut animation = match args.effect.as_str() {
        "rainbow" => {
            setup_rainbow(&mut strip);
            None
        }
        effect => match create_animation(effect, settings.pixels) {
            Some(animation) => Some(animation),
            None => panic!("Unknown effect: {}", effect),
        },
    };

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    if let Err(err) = ctrlc::set_handler(move || {
        handler_flag.store(false, Ordering::SeqCst);
    }) {
        panic!("Failed to install Ctrl-C handler: {}", err);
    }

    let mut timer = IntervalTimer::new(settings.fps, true);
    let mut tick: u64 = 0;
    while running.load(Ordering::SeqCst) {
        if let Some(animation) = animation.as_mut() {
            let frame: Image = animation.advance().clone();
            *strip.image().lock().unwrap() = frame;
        }

        match strip.render_tick(tick) {
            Ok(()) => {}
            Err(err @ Error::ModifierFailure { .. }) => {
                // The frame is dropped, the show goes on.
                log::warn!("Skipping frame {}: {}", tick, err);
            }
            Err(err) => {
                log::error!("Render failed: {}", err);
                break;
            }
        }

        tick += 1;
        timer.sleep_until_next_tick();
    }
    println!();
}
