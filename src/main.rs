//! Terminal peg solitaire runner (default binary).
//!
//! Keyboard play through crossterm and the framebuffer renderer, with the
//! optional TCP adapter letting a remote client drive or watch the same game.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use peg_solitaire::adapter::{Adapter, Dispatcher, LastEvent, OutboundMessage};
use peg_solitaire::config::{AppConfig, DEFAULT_CONFIG_PATH};
use peg_solitaire::core::{ActionOutcome, GameEvent, GameSnapshot, Layout, PegGame};
use peg_solitaire::input::{handle_key_event, should_quit, Cursor};
use peg_solitaire::term::{
    AdapterStatusView, FrameBuffer, GameView, Hud, TerminalRenderer, Viewport,
};

const POLL_MS: u64 = 30;
const WIN_NOTICE: &str = "YOU WON!";

/// Play peg solitaire in the terminal.
#[derive(Parser)]
#[command(
    name = "peg-solitaire",
    about = "Terminal peg solitaire with a remote control adapter"
)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Board preset: english, european or mini
    #[arg(long)]
    preset: Option<String>,

    /// Layout file, one row per line (o peg, . empty, x void)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Do not start the remote adapter
    #[arg(long)]
    no_remote: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(preset) = cli.preset {
        config.board.preset = preset;
        config.board.layout = None;
        config.board.layout_file = None;
    }
    if let Some(path) = cli.layout {
        config.board.layout = None;
        config.board.layout_file = Some(path);
    }
    if cli.no_remote {
        config.remote.enabled = false;
    }
    config.validate()?;
    let layout = config.board_layout().context("loading board layout")?;

    // The alternate screen owns stdout from here on; keep the server silent.
    let mut server_config = config.server_config().with_env_overrides();
    server_config.quiet = true;
    let adapter = Adapter::start(server_config).context("starting remote adapter")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, layout, adapter);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Notice line shown under the board.
fn update_notice(
    notice: &mut Option<&'static str>,
    outcome: &ActionOutcome,
    events: &[GameEvent],
) {
    if matches!(outcome, ActionOutcome::Restarted) {
        *notice = None;
    }
    let won = |e: &GameEvent| matches!(e, GameEvent::Won { .. });
    if events.iter().any(won) {
        *notice = Some(WIN_NOTICE);
    }
}

fn run(
    term: &mut TerminalRenderer,
    config: &AppConfig,
    layout: Layout,
    mut adapter: Option<Adapter>,
) -> Result<()> {
    let mut game = PegGame::new(layout);
    let mut cursor = Cursor::centered(game.size());
    let view = GameView::new(config.view.cell_width);
    let mut dispatcher = Dispatcher::new();

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_viewport = None;
    let mut notice: Option<&'static str> = None;

    loop {
        // Remote commands, in arrival order.
        if let Some(adapter) = adapter.as_mut() {
            while let Some(inbound) = adapter.try_recv() {
                let handled = dispatcher.handle(&mut game, inbound);
                if let Some(outcome) = handled.outcome.as_ref() {
                    update_notice(&mut notice, outcome, &handled.events);
                }
                for msg in handled.outbound {
                    adapter.send(msg);
                }
            }
        }
        cursor.resize(game.size());

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        if last_viewport != Some(viewport) {
            term.invalidate();
            last_viewport = Some(viewport);
        }
        game.snapshot_into(&mut snap);
        let status = adapter.as_ref().map(|a| {
            let st = a.status();
            AdapterStatusView {
                enabled: true,
                client_count: st.client_count,
                controller_id: st.controller_id,
                streaming_count: st.streaming_count,
            }
        });
        let hud = Hud {
            cursor: Some(cursor.position()),
            adapter: status.as_ref(),
            notice,
        };
        view.render_into(&snap, hud, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Local input.
        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if should_quit(key) {
            return Ok(());
        }

        let Some(action) = handle_key_event(key).and_then(|a| cursor.to_game_action(a)) else {
            continue;
        };
        let outcome = game.apply_action(action);
        let events = game.take_events();
        update_notice(&mut notice, &outcome, &events);

        if outcome != ActionOutcome::Ignored {
            if let Some(adapter) = adapter.as_ref() {
                let last_event = LastEvent::from_outcome(&outcome, &events);
                let obs = dispatcher.observation(&game, Some(last_event));
                adapter.send(OutboundMessage::BroadcastObservation { obs });
            }
        }
    }
}
