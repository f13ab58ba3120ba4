//! playground: headless driver for the hot_potato routing simulation.
//!
//! Builds a controller, attaches it to a frame scheduler, and plays a
//! scripted session: packets are added every `--add-every` frames and the
//! surface is resized once at `--resize-at`.  With `--json` every network and
//! frame is printed to stdout as one JSON object per line, which is what a
//! renderer would draw.  Logs go to stderr (`RUST_LOG` overrides the level).
//!
//! ```text
//! playground --seed 7 --frames 600 --add-every 45 --json > frames.jsonl
//! ```

use std::cell::RefCell;
use std::fs;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use hp_core::{SimConfig, Tick, Viewport};
use hp_network::Network;
use hp_sim::{attach, PacketView, Scheduler, SimBuilder, SimObserver, StepReport};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "playground")]
#[command(about = "Run the hot potato routing simulation without a window", long_about = None)]
struct Args {
    /// RNG seed; overrides the config file.  Omit for a random layout.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Frames to run.
    #[arg(short, long, default_value = "600")]
    frames: u64,

    /// JSON file with `SimConfig` overrides; missing fields keep defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Add a packet every N frames (0 = never).
    #[arg(long, default_value = "60")]
    add_every: u64,

    /// Starting speed multiplier.
    #[arg(long)]
    speed: Option<f64>,

    /// Resize the surface at this frame.
    #[arg(long)]
    resize_at: Option<u64>,

    /// Surface width after `--resize-at`.
    #[arg(long, default_value = "1024")]
    resize_width: f64,

    /// Surface height after `--resize-at`.
    #[arg(long, default_value = "640")]
    resize_height: f64,

    /// Pace frames at the configured tick rate instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Print networks and frames as JSON lines on stdout.
    #[arg(long)]
    json: bool,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

// ── JSON-lines observer ───────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Line<'a> {
    Network { network: &'a Network },
    Frame { tick: Tick, packets: Vec<FramePacket<'a>> },
    Count { count: usize },
    Step { tick: Tick, live: usize, rerouted: usize, stuck: usize, delivered: usize },
}

#[derive(Serialize)]
struct FramePacket<'a> {
    #[serde(flatten)]
    view: &'a PacketView,
    x:    f64,
    y:    f64,
}

/// Writes one JSON object per notification, or only tallies when disabled.
struct JsonLines {
    out:        Option<BufWriter<Stdout>>,
    error:      Option<io::Error>,
    lines:      u64,
    peak_count: usize,
}

impl JsonLines {
    fn new(enabled: bool) -> Self {
        Self {
            out:        enabled.then(|| BufWriter::new(io::stdout())),
            error:      None,
            lines:      0,
            peak_count: 0,
        }
    }

    fn emit(&mut self, line: &Line<'_>) {
        if self.error.is_some() {
            return;
        }
        let Some(out) = self.out.as_mut() else { return };
        let res = serde_json::to_writer(&mut *out, line)
            .map_err(io::Error::from)
            .and_then(|()| out.write_all(b"\n"));
        match res {
            Ok(()) => self.lines += 1,
            Err(e) => self.error = Some(e),
        }
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e).context("writing JSON lines");
        }
        if let Some(out) = self.out.as_mut() {
            out.flush().context("flushing stdout")?;
        }
        Ok(())
    }
}

impl SimObserver for JsonLines {
    fn on_network(&mut self, network: &Network) {
        self.emit(&Line::Network { network });
    }

    fn on_packets(&mut self, tick: Tick, packets: &[PacketView]) {
        let packets = packets
            .iter()
            .map(|view| {
                let p = view.draw_position();
                FramePacket { view, x: p.x, y: p.y }
            })
            .collect();
        self.emit(&Line::Frame { tick, packets });
    }

    fn on_count_changed(&mut self, count: usize) {
        self.peak_count = self.peak_count.max(count);
        self.emit(&Line::Count { count });
    }

    fn on_step(&mut self, tick: Tick, report: &StepReport) {
        if report.stuck.is_empty() && report.delivered.is_empty() {
            return;
        }
        self.emit(&Line::Step {
            tick,
            live:      report.after,
            rerouted:  report.rerouted,
            stuck:     report.stuck.len(),
            delivered: report.delivered.len(),
        });
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args)?;
    let frame_interval = config.frame_interval();
    info!(
        seed = ?config.seed,
        nodes = config.node_count,
        exits = config.exit_count,
        viewport = %config.viewport,
        frames = args.frames,
        "starting playground"
    );

    let ctl = SimBuilder::new(config)
        .observer(JsonLines::new(args.json))
        .build()
        .context("building simulation")?;
    let ctl = Rc::new(RefCell::new(ctl));
    if let Some(speed) = args.speed {
        ctl.borrow_mut().set_speed(speed);
    }

    let mut sched = Scheduler::new();
    let attachment = attach(&ctl, &mut sched);

    let started = Instant::now();
    for frame in 1..=args.frames {
        let frame_start = Instant::now();

        if args.add_every > 0 && frame % args.add_every == 0 {
            if let Some(id) = ctl.borrow_mut().add_packet() {
                debug!(%id, frame, "packet added");
            }
        }
        if args.resize_at == Some(frame) {
            sched.resize(Viewport::new(args.resize_width, args.resize_height));
        }

        if sched.request_frame().is_none() || !sched.run_frame() {
            warn!(frame, "scheduler stopped");
            break;
        }

        if args.realtime {
            if let Some(rest) = frame_interval.checked_sub(frame_start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    attachment.detach(&mut sched);
    sched.teardown();

    let mut ctl = ctl.borrow_mut();
    let stats = ctl.stats();
    info!(
        frames = sched.frames().0,
        ticks = ctl.current_tick().0,
        spawned = stats.spawned,
        delivered = stats.delivered,
        stuck = stats.stuck,
        in_flight = ctl.packet_count(),
        networks = stats.networks,
        peak = ctl.observer().peak_count,
        lines = ctl.observer().lines,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run complete"
    );
    ctl.observer_mut().finish()
}
