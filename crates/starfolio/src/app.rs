use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use starfolio_background::{BackgroundState, WarpConfig};
use starfolio_config::Config;
use starfolio_core::Clock;
use starfolio_posts::{FsDocumentStore, PostCollection};
use tracing::{debug, info, warn};

use crate::cli::Overrides;
use crate::pages::{self, AboutPage, BlogPage, Page, PostPage};

/// Poll timeout while the starfield animates (about 60 frames per second).
const ANIMATION_POLL: Duration = Duration::from_millis(16);

/// Poll timeout on static pages.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Rows moved by Page Up / Page Down in a post.
const PAGE_ROWS: u16 = 10;

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Settings as loaded, written back when the user changes them.
    config: Config,
    /// Explicit settings file; `None` saves to the default location.
    config_path: Option<PathBuf>,
    posts: PostCollection<FsDocumentStore>,
    page: Page,
    background: BackgroundState,
    about: AboutPage,
    blog: BlogPage,
    post: Option<PostPage>,
    /// Start of the animation timeline.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        overrides: &Overrides,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let posts = PostCollection::new(FsDocumentStore::new(overrides.posts_dir(&config)));
        let mut background = BackgroundState::new(WarpConfig {
            star_count: config.star_count,
            base_speed: config.animation_speed.warp_speed(),
            seed: overrides.seed(&config),
        });
        background.set_tint(Some(config.color_theme));
        background.activate();

        let blog = BlogPage::load(&posts);
        Self {
            running: false,
            config,
            config_path,
            posts,
            page: Page::About,
            background,
            about: AboutPage::new(clock),
            blog,
            post: None,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        info!(posts_dir = %self.posts.store().root().display(), "starfolio started");
        while self.running {
            self.about.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        info!("starfolio stopped");
        Ok(())
    }

    #[cfg(test)]
    pub fn page(&self) -> Page {
        self.page
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.render_at(frame, elapsed_ms);
    }

    fn render_at(&mut self, frame: &mut Frame, elapsed_ms: u64) {
        // Starfield first, everything else is drawn over it
        self.background.render(frame, elapsed_ms);

        let accent = self.config.color_theme.color();
        let [nav, _, body, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let profile = &self.config.profile;
        let city_time = self.about.city_time(profile.utc_offset_hours);
        let status = pages::city_status(&profile.name, &city_time, self.config.time_format);
        pages::render_nav(frame, nav, self.page, &status, accent);

        match self.page {
            Page::About => {
                self.about
                    .render(frame, body, profile, self.config.time_format, accent)
            }
            Page::Blog => self.blog.render(frame, body, accent),
            Page::Post => {
                if let Some(post) = self.post.as_mut() {
                    post.render(frame, body);
                }
            }
        }

        pages::render_help(frame, help, self.page, accent);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls faster while the starfield is moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = if self.background.is_running() {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let in_post = self.page == Page::Post;
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b')) if in_post => {
                self.close_post()
            }
            (_, KeyCode::Esc | KeyCode::Char('q')) => self.quit(),
            (_, KeyCode::Tab) => self.switch_page(self.page.next()),
            (_, KeyCode::Char('1')) => self.switch_page(Page::About),
            (_, KeyCode::Char('2')) => self.switch_page(Page::Blog),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('t')) => self.toggle_time_format(),
            (_, KeyCode::Char('s')) => self.cycle_animation_speed(),
            (_, KeyCode::Char('r')) => self.reload(),
            (_, KeyCode::Char('?')) if self.page == Page::About => self.about.toggle_note(),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.move_down(1),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.move_up(1),
            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.move_down(PAGE_ROWS),
            (_, KeyCode::PageUp) => self.move_up(PAGE_ROWS),
            (_, KeyCode::Home | KeyCode::Char('g')) => self.move_top(),
            (_, KeyCode::Enter) if self.page == Page::Blog => self.open_selected(),
            _ => {}
        }
    }

    /// Show a page. The starfield only runs behind the About page.
    fn switch_page(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        info!(from = ?self.page, to = ?page, "navigate");
        self.page = page;
        if page == Page::About {
            self.background.activate();
        } else {
            self.background.deactivate();
        }
    }

    fn open_selected(&mut self) {
        let Some(slug) = self.blog.selected_slug() else {
            return;
        };
        let post = PostPage::load(&self.posts, slug, self.config.color_theme.color());
        self.post = Some(post);
        self.switch_page(Page::Post);
    }

    fn close_post(&mut self) {
        self.post = None;
        self.switch_page(Page::Blog);
    }

    fn move_down(&mut self, rows: u16) {
        match self.page {
            Page::Blog => self.blog.select_next(),
            Page::Post => {
                if let Some(post) = self.post.as_mut() {
                    post.scroll_down(rows);
                }
            }
            Page::About => {}
        }
    }

    fn move_up(&mut self, rows: u16) {
        match self.page {
            Page::Blog => self.blog.select_previous(),
            Page::Post => {
                if let Some(post) = self.post.as_mut() {
                    post.scroll_up(rows);
                }
            }
            Page::About => {}
        }
    }

    fn move_top(&mut self) {
        match self.page {
            Page::Blog => self.blog.select_first(),
            Page::Post => {
                if let Some(post) = self.post.as_mut() {
                    post.scroll_top();
                }
            }
            Page::About => {}
        }
    }

    /// Re-read the posts directory.
    fn reload(&mut self) {
        self.blog.reload(&self.posts);
        if let Some(post) = self.post.as_mut() {
            info!(slug = post.slug(), "reloading post");
            post.reload(&self.posts);
        }
    }

    /// Toggle between 12-hour and 24-hour time format.
    fn toggle_time_format(&mut self) {
        self.config.time_format = self.config.time_format.toggle();
        self.save_config();
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.config.color_theme = self.config.color_theme.next();
        self.background.set_tint(Some(self.config.color_theme));
        if let Some(post) = self.post.as_mut() {
            post.set_accent(self.config.color_theme.color());
        }
        self.save_config();
    }

    /// Cycle the starfield speed.
    fn cycle_animation_speed(&mut self) {
        self.config.animation_speed = self.config.animation_speed.next();
        self.background.set_speed(self.config.animation_speed);
        info!(speed = self.config.animation_speed.label(), "animation speed");
        self.save_config();
    }

    fn save_config(&self) {
        let saved = match &self.config_path {
            Some(path) => self.config.save_to(path).map(|()| path.clone()),
            None => self.config.save(),
        };
        match saved {
            Ok(path) => debug!(path = %path.display(), "settings saved"),
            Err(e) => warn!(error = %e, "failed to save settings"),
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
