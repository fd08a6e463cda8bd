// 🎛️ Command Dispatcher - numbered menu over the catalog
//
// States: Running → (0) → Exited. Unknown input reports and stays Running.
// Every handler except Exit waits for Enter before the menu is redrawn.

use crate::config::{Config, Tone};
use crate::error::CatalogError;
use crate::fetcher::MetadataLookup;
use crate::movie::{format_rating, parse_rating, validate_title};
use crate::report;
use crate::stats;
use crate::storage::MovieStorage;
use crate::webpage;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Exited,
}

// ============================================================================
// COMMANDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    List,
    Add,
    Delete,
    Update,
    Stats,
    Random,
    Search,
    SortByRating,
    GenerateWebpage,
}

impl Command {
    /// Menu order; the index is the command code
    pub const ALL: [Command; 10] = [
        Command::Exit,
        Command::List,
        Command::Add,
        Command::Delete,
        Command::Update,
        Command::Stats,
        Command::Random,
        Command::Search,
        Command::SortByRating,
        Command::GenerateWebpage,
    ];

    pub fn code(self) -> char {
        match self {
            Command::Exit => '0',
            Command::List => '1',
            Command::Add => '2',
            Command::Delete => '3',
            Command::Update => '4',
            Command::Stats => '5',
            Command::Random => '6',
            Command::Search => '7',
            Command::SortByRating => '8',
            Command::GenerateWebpage => '9',
        }
    }

    /// Accepts exactly one code character, surrounding whitespace ignored
    pub fn from_code(input: &str) -> Option<Command> {
        let mut chars = input.trim().chars();
        let code = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Command::ALL.iter().copied().find(|c| c.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::Exit => "Exit",
            Command::List => "List movies",
            Command::Add => "Add movie",
            Command::Delete => "Delete movie",
            Command::Update => "Update movie",
            Command::Stats => "Stats",
            Command::Random => "Random movie",
            Command::Search => "Search movie",
            Command::SortByRating => "Movies sorted by rating",
            Command::GenerateWebpage => "Generate webpage",
        }
    }
}

pub type Handler<R, W> = fn(&mut Menu<R, W>) -> Result<MenuState>;

// ============================================================================
// MENU
// ============================================================================

pub struct Menu<R, W> {
    storage: Box<dyn MovieStorage>,
    lookup: Box<dyn MetadataLookup>,
    config: Config,
    rng: StdRng,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(
        storage: Box<dyn MovieStorage>,
        lookup: Box<dyn MetadataLookup>,
        config: Config,
        input: R,
        output: W,
    ) -> Self {
        Self {
            storage,
            lookup,
            config,
            rng: StdRng::from_entropy(),
            input,
            output,
        }
    }

    /// Replace the random source (seeded picks)
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Handler table
    pub fn handler(command: Command) -> Handler<R, W> {
        match command {
            Command::Exit => Self::exit,
            Command::List => Self::list_movies,
            Command::Add => Self::add_movie,
            Command::Delete => Self::delete_movie,
            Command::Update => Self::update_movie,
            Command::Stats => Self::show_stats,
            Command::Random => Self::random_movie,
            Command::Search => Self::search_movie,
            Command::SortByRating => Self::sort_by_rating,
            Command::GenerateWebpage => Self::generate_webpage,
        }
    }

    /// Runs until the exit command or end of input
    pub fn run(&mut self) -> Result<()> {
        self.print_header()?;

        let mut state = MenuState::Running;
        while state == MenuState::Running {
            self.print_menu()?;
            let choice = match self.read_line("\nEnter choice (0-9): ")? {
                Some(choice) => choice,
                None => {
                    tracing::debug!("input closed, leaving menu");
                    break;
                }
            };
            state = self.dispatch(&choice)?;
        }

        Ok(())
    }

    /// One step of the state machine
    pub fn dispatch(&mut self, choice: &str) -> Result<MenuState> {
        let Some(command) = Command::from_code(choice) else {
            self.say_in(Tone::Error, "Invalid choice! Please enter a number between 0-9")?;
            self.pause()?;
            return Ok(MenuState::Running);
        };

        tracing::debug!(?command, "dispatching");
        match Self::handler(command)(self) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::error!(?command, error = %e, "command failed");
                self.say_in(Tone::Error, &format!("Error: {:#}", e))?;
                self.pause()?;
                Ok(MenuState::Running)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Terminal helpers
    // ------------------------------------------------------------------------

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    fn say_in(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        let painted = self.config.display.paint(tone, text);
        writeln!(self.output, "{}", painted)
    }

    fn report(&mut self, err: &CatalogError) -> io::Result<()> {
        self.say_in(Tone::Error, &format!("Error: {}", err))
    }

    /// None once input is exhausted
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self.read_line(prompt)?.unwrap_or_default())
    }

    fn pause(&mut self) -> io::Result<()> {
        let prompt = self
            .config
            .display
            .paint(Tone::Prompt, "\nPress Enter to continue...");
        self.read_line(&prompt)?;
        Ok(())
    }

    fn print_header(&mut self) -> io::Result<()> {
        let stars = "*".repeat(15);
        self.say_in(Tone::Header, &format!("{} My Movies Database {}", stars, stars))
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let mut text = String::from("Menu:");
        for command in Command::ALL {
            text.push_str(&format!("\n{}. {}", command.code(), command.label()));
        }
        self.say("")?;
        self.say_in(Tone::Menu, &text)
    }

    // ------------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------------

    fn exit(&mut self) -> Result<MenuState> {
        self.say_in(Tone::Notice, "\nGoodbye! Exiting the program...")?;
        Ok(MenuState::Exited)
    }

    fn list_movies(&mut self) -> Result<MenuState> {
        let catalog = self.storage.list()?;
        for line in report::listing(&catalog) {
            self.say(&line)?;
        }
        self.pause()?;
        Ok(MenuState::Running)
    }

    fn add_movie(&mut self) -> Result<MenuState> {
        let input = self.ask("Enter movie name to add: ")?;
        match validate_title(&input) {
            Ok(title) => self.add_from_lookup(&title)?,
            Err(e) => self.report(&e)?,
        }
        self.pause()?;
        Ok(MenuState::Running)
    }

    fn add_from_lookup(&mut self, title: &str) -> Result<()> {
        let Some(found) = self.lookup.fetch(title) else {
            self.report(&CatalogError::LookupFailed(title.to_string()))?;
            return Ok(());
        };

        let movie = match found.into_record() {
            Ok(movie) => movie,
            Err(e) => {
                self.report(&e)?;
                return Ok(());
            }
        };

        self.storage
            .add(&movie.title, movie.year, movie.rating, &movie.poster_url)?;
        tracing::info!(title = %movie.title, "movie added");

        self.say(&format!(
            "The movie {} ({}) was successfully added with rating {}",
            movie.title,
            movie.year,
            format_rating(movie.rating)
        ))?;
        self.say(&format!("Poster URL: {}", movie.poster_url))?;
        Ok(())
    }

    fn delete_movie(&mut self) -> Result<MenuState> {
        let input = self.ask("Enter movie name to delete: ")?;
        match validate_title(&input) {
            Ok(title) => {
                if self.storage.delete(&title)? {
                    tracing::info!(%title, "movie deleted");
                    self.say(&format!("Movie {} successfully deleted", title))?;
                } else {
                    self.report(&CatalogError::MovieNotFound(title))?;
                }
            }
            Err(e) => self.report(&e)?,
        }
        self.pause()?;
        Ok(MenuState::Running)
    }

    fn update_movie(&mut self) -> Result<MenuState> {
        let input = self.ask("Enter movie's name: ")?;
        let title = match validate_title(&input) {
            Ok(title) => title,
            Err(e) => {
                self.report(&e)?;
                self.pause()?;
                return Ok(MenuState::Running);
            }
        };

        let raw = self.ask("Enter new movie rating (0-10): ")?;
        match parse_rating(&raw) {
            Ok(rating) => {
                if self.storage.update(&title, rating)? {
                    tracing::info!(%title, rating, "rating updated");
                    self.say(&format!("Movie {} successfully updated", title))?;
                } else {
                    self.report(&CatalogError::MovieNotFound(title))?;
                }
            }
            Err(e) => self.report(&e)?,
        }
        self.pause()?;
        Ok(MenuState::Running)
    }

    fn show_stats(&mut self) -> Result<MenuState> {
        let catalog = self.storage.list()?;
        match stats::summarize(&catalog) {
            Ok(summary) => {
                self.say(&format!("Average rating: {:.2}", summary.average))?;
                self.say(&format!("Median rating: {:.1}", summary.median))?;
                self.say("\nBest movie(s):")?;
                for movie in &summary.best {
                    self.say(&report::format_summary_line(movie))?;
                }
                self.say("\nWorst movie(s):")?;
                for movie in &summary.worst {
                    self.say(&report::format_summary_line(movie))?;
                }
            }
            Err(e) => self.report(&e)?,
        }
        self.pause()?;
        Ok(MenuState::Running)
    }

    fn random_movie(&mut self) -> Result<MenuState> {
        let catalog = self.storage.list()?;
        match report::pick_random(&catalog, &mut self.rng) {
            Ok(movie) => {
                let line = report::format_pick(movie);
                self.say(&line)?;
            }
            Err(e) => self.report(&e)?,
        }
        self.pause()?;
        Ok(MenuState::Running)
    }

    fn search_movie(&mut self) -> Result<MenuState> {
        let catalog = self.storage.list()?;
        let query = self.ask("Enter part of movie name: ")?;
        let hits = report::search(&catalog, &query);

        if hits.is_empty() {
            self.report(&CatalogError::MovieNotFound(query))?;
        }
        for movie in hits {
            self.say(&report::format_rated_line(movie))?;
        }
        self.pause()?;
        Ok(MenuState::Running)
    }

    fn sort_by_rating(&mut self) -> Result<MenuState> {
        let catalog = self.storage.list()?;
        for movie in report::sorted_by_rating(&catalog) {
            self.say(&report::format_rated_line(movie))?;
        }
        self.pause()?;
        Ok(MenuState::Running)
    }

    fn generate_webpage(&mut self) -> Result<MenuState> {
        let catalog = self.storage.list()?;
        let page = self.config.webpage.clone();

        match webpage::generate(&page.template, &page.output, &page.page_title, &catalog) {
            Ok(_) => self.say("\nWebsite was generated successfully.")?,
            Err(e) => self.report(&e)?,
        }
        self.pause()?;
        Ok(MenuState::Running)
    }
}
