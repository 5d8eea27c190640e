use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use typrace::{
    app::{App, Control},
    config::{ConfigStore, FileConfigStore},
    language::Language,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, RaceEvent, Runner},
    session::{Session, SessionConfig},
    ui,
    word_generator::WordGenerator,
};

/// race against the clock on random sentences, right in your terminal
#[derive(Parser, Debug)]
#[clap(
    name = "typrace",
    version,
    about,
    long_about = "An interactive typing trainer: type a random sentence, watch mistakes light up as you go, and get your words per minute and accuracy when you finish."
)]
pub struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// start a typing race against a random sentence
    #[clap(visible_aliases = ["r", "type", "practice"])]
    Race(RaceArgs),
}

#[derive(Args, Debug)]
struct RaceArgs {
    /// number of words in the sentence [default: 20, or the value in config.json]
    #[clap(short = 'w', long = "words")]
    number_of_words: Option<usize>,
}

const WELCOME: &str = "Welcome to typrace!
Start typing: typrace race
Show help: typrace --help";

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let Some(Command::Race(args)) = cli.command else {
        println!("{WELCOME}");
        return Ok(());
    };

    if let Err(err) = logging::init() {
        eprintln!("logging disabled: {err}");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = FileConfigStore::new().load();
    let number_of_words = config.resolve_words(args.number_of_words);
    let generator = WordGenerator::new(Box::new(Language::english()?))?;
    let mut app = App::new(Session::new(SessionConfig { number_of_words }, generator));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.on_event(RaceEvent::Resize(size.width, size.height));

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        if app.on_event(runner.step()) == Control::Quit {
            log::debug!("quit requested");
            break;
        }
    }

    Ok(())
}
