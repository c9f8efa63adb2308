use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use savenav::args::Args;
use savenav::browser::BrowserApp;
use savenav::context::{NavContext, Volumes};
use savenav::favorites::FavoritesStore;
use savenav::model::{BrowserOutcome, TopMenuOutcome};
use savenav::render;
use savenav::settings::load_settings;
use savenav::slot::FileSlot;
use savenav::topmenu::TopMenuApp;
use savenav::transfer::FileTransfer;

/// One display refresh. The event poll below blocks for at most this long,
/// which is the session's only suspension point.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings();

    let mut geometry = settings.geometry();
    if let Some(rows) = args.rows {
        geometry.visible_rows = rows.max(1);
    }
    if let Some(page) = args.page {
        geometry.page_length = page.max(1);
    }

    // With no volume configured, the current directory plays the flashcard.
    let flash = args
        .flash
        .clone()
        .or_else(|| args.removable.is_none().then(|| PathBuf::from(".")));
    let volumes = Volumes::new(flash, args.removable.clone());
    if !volumes.any_mounted() {
        bail!("no volume is mounted; pass --flash or --removable with an existing directory");
    }

    let favorites = args
        .favorites
        .clone()
        .or_else(|| volumes.default_favorites_path())
        .map(FavoritesStore::new);
    let card_save = volumes
        .default_card_save_path()
        .context("a mounted volume implies a data root")?;

    let mut ctx = NavContext {
        volumes,
        favorites,
        slot: Box::new(FileSlot::new(args.cart.clone())),
        transfer: Box::new(FileTransfer::new(args.cart.clone(), card_save)),
        geometry,
    };
    let extensions = args.resolve_extensions();
    let navigation = !args.no_dir_nav;

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
    terminal.clear().context("failed to clear terminal")?;

    let result = run_picker(&mut terminal, &mut ctx, &extensions, navigation);

    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    match result? {
        Some(path) => println!("{}", path.display()),
        None => println!("no selection"),
    }
    Ok(())
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Outer loop alternating the two screens: the top menu until it yields a
/// volume root or a concrete path, then the browser, which hands control
/// back whenever the user backs out of a volume root.
fn run_picker(
    terminal: &mut Term,
    ctx: &mut NavContext,
    extensions: &[String],
    navigation: bool,
) -> Result<Option<PathBuf>> {
    let mut show_top_menu = navigation;
    let mut cwd = ctx
        .volumes
        .data_root()
        .context("a mounted volume implies a data root")?
        .to_path_buf();

    loop {
        if show_top_menu {
            let mut app = TopMenuApp::new(ctx);
            match run_top_menu(terminal, &mut app, ctx)? {
                TopMenuOutcome::OpenRoot(root) => {
                    cwd = root;
                    show_top_menu = false;
                }
                TopMenuOutcome::ChosePath(path) => return Ok(Some(path)),
                TopMenuOutcome::Quit => return Ok(None),
            }
        } else {
            let mut app = BrowserApp::new(cwd.clone(), extensions.to_vec(), navigation, ctx);
            match run_browser(terminal, &mut app, ctx)? {
                BrowserOutcome::Chosen(path) => return Ok(Some(path)),
                BrowserOutcome::ToTopMenu => show_top_menu = true,
                BrowserOutcome::NoSelection => return Ok(None),
                BrowserOutcome::Quit => return Ok(None),
            }
        }
    }
}

fn run_top_menu(
    terminal: &mut Term,
    app: &mut TopMenuApp,
    ctx: &mut NavContext,
) -> Result<TopMenuOutcome> {
    loop {
        terminal
            .draw(|frame| render::draw_top_menu(frame, app))
            .context("failed to draw frame")?;

        if event::poll(FRAME).context("failed to poll for events")? {
            if let Event::Key(key) = event::read().context("failed to read event")? {
                if let Some(outcome) = app.handle_key(key, ctx) {
                    return Ok(outcome);
                }
            }
        }

        // The cartridge poll advances once per frame whether or not a key
        // arrived, so a held key can never starve it.
        app.tick(ctx);
    }
}

fn run_browser(
    terminal: &mut Term,
    app: &mut BrowserApp,
    ctx: &mut NavContext,
) -> Result<BrowserOutcome> {
    loop {
        terminal
            .draw(|frame| render::draw_browser(frame, app))
            .context("failed to draw frame")?;

        if event::poll(FRAME).context("failed to poll for events")? {
            if let Event::Key(key) = event::read().context("failed to read event")? {
                if let Some(outcome) = app.handle_key(key, ctx) {
                    return Ok(outcome);
                }
            }
        }
    }
}
