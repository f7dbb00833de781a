//! Pokedex TUI - browse the PokeAPI catalog

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokedex::action::Action;
use pokedex::api::{CatalogClient, PokeApiClient};
use pokedex::components::{Component, PokedexScreen, PokedexScreenProps};
use pokedex::config::{CatalogConfig, PageRequest, API_BASE, DEFAULT_PAGE_LIMIT, SPRITE_BASE};
use pokedex::effect::Effect;
use pokedex::logging;
use pokedex::reducer::reducer;
use pokedex::sprite_backend::{SpriteBackend, SpriteOverlay};
use pokedex::state::AppState;
use pokedex::store::perform_effect;
use ratatui::Terminal;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Pokedex - list, filter and inspect Pokemon from PokeAPI
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the PokeAPI catalog in the terminal")]
struct Args {
    /// Catalog API base URL
    #[arg(long, default_value = API_BASE)]
    base_url: String,

    /// Sprite URL prefix used when an entry has no sprite of its own
    #[arg(long, default_value = SPRITE_BASE)]
    sprite_base: String,

    /// Number of entries per page (minimum 1)
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Index of the first entry to load
    #[arg(long, default_value_t = 0)]
    offset: u32,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    Screen,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    Main,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        Some(PokedexComponentId::Screen)
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        None
    }

    fn binding_context(&self, _id: PokedexComponentId) -> PokedexContext {
        PokedexContext::Main
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::Main
    }
}

/// Fetches are never cancelled, so each one gets its own task key
static FETCH_SEQ: AtomicU64 = AtomicU64::new(0);

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        base_url,
        sprite_base,
        limit,
        offset,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = logging::init_tracing() {
        tracing::info!(log = %path.display(), %base_url, limit, offset, "starting pokedex");
    }

    let debug = DebugSession::new(debug_args);
    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let client: Arc<dyn CatalogClient> = Arc::new(PokeApiClient::new(CatalogConfig {
        base_url,
        sprite_base,
    }));
    let page = PageRequest { limit, offset };

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
    }
    let overlay = SpriteOverlay::new();
    let backend = SpriteBackend::new(stdout, overlay.clone());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        replay_actions,
        PokedexScreen::with_overlay(overlay),
        client,
        page,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

/// Screen plus the glue between its component API and the event bus
struct PokedexUi {
    screen: PokedexScreen,
}

impl PokedexUi {
    fn handle_screen_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        if !matches!(event, EventKind::Key(_)) {
            return HandlerResponse::ignored();
        }
        let actions: Vec<_> = self
            .screen
            .handle_event(event, PokedexScreenProps { state })
            .into_iter()
            .collect();
        // Cursor moves and search mode are view-local, so redraw on every key
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: true,
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    screen: PokedexScreen,
    client: Arc<dyn CatalogClient>,
    page: PageRequest,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi { screen }));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> =
        EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_screen = Rc::clone(&ui);
    bus.register(PokedexComponentId::Screen, move |event, state| {
        ui_screen
            .borrow_mut()
            .handle_screen_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::PokedexFetch),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, _render_ctx, event_ctx| {
                event_ctx.set_component_area(PokedexComponentId::Screen, area);
                ui.borrow_mut()
                    .screen
                    .render(frame, area, PokedexScreenProps { state });
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client, page),
        )
        .await
}

/// Spawn one task per fetch; results come back as actions
fn handle_effect(
    effect: Effect,
    ctx: &mut EffectContext<Action>,
    client: &Arc<dyn CatalogClient>,
    page: PageRequest,
) {
    let seq = FETCH_SEQ.fetch_add(1, Ordering::Relaxed);
    let key = TaskKey::new(format!("{}_{seq}", effect.kind()));
    ctx.tasks()
        .spawn(key, perform_effect(Arc::clone(client), page, effect));
}
