//! the core app
use {
    super::{
        cli::{Cli, Command, MirrorCommand},
        logging,
    },
    crate::{
        config::instance::init_config,
        context::ThemeContext,
        error::ThemeError,
        getopt,
        settings::{Notice, RemoteSettingsMirror, RestRecordStore},
        store::PersistedThemeStore,
        switcher::{SwitcherEntry, ThemeSwitcher},
        theme::{ThemeCatalog, ThemeVariant, palette::hex_to_rgb},
        tokens::{CssFileSurface, CssVarSurface, TokenSurface},
    },
    clap::Parser,
    color_eyre::{
        Section,
        eyre::{Context, Result},
    },
    owo_colors::OwoColorize,
    std::io::{BufRead, Write},
    tracing::info,
};

/// the sitetheme app
#[derive(Debug)]
pub struct SiteThemeApp {
    /// the theme state everything goes through
    ctx: ThemeContext,
}

impl SiteThemeApp {
    /// initialize sitetheme
    ///
    /// - 1. parses the cli and runs any generator flags
    /// - 2. loads and validates the config file
    /// - 3. sets up logging
    /// - 4. builds the theme context from the config
    ///
    /// returns `None` if a generator flag ran and there's nothing left to do
    ///
    /// # Errors
    ///
    /// returns an error if a generator fails
    /// returns an error if the config is invalid
    /// returns an error if it fails to setup logging
    /// returns an error if the starting theme can't be painted
    pub async fn init() -> Result<Option<(Self, Command)>> {
        let argv = Cli::parse();

        if argv.run_generators()? {
            return Ok(None);
        }

        init_config()?;
        logging::setup()?;

        let app = Self::from_config()?;
        Ok(Some((app, argv.command.unwrap_or(Command::List { variant: None }))))
    }

    /// build the theme context the config describes
    fn from_config() -> Result<Self> {
        let store = if getopt!(theme.persist) {
            PersistedThemeStore::open_or_disabled(getopt!(theme.store_path))
        } else {
            PersistedThemeStore::disabled()
        };

        let surface: Box<dyn TokenSurface> = match getopt!(raw theme.stylesheet) {
            Some(path) => Box::new(CssFileSurface::new(path)),
            None => Box::new(CssVarSurface::new()),
        };

        let ctx = ThemeContext::new(ThemeCatalog::builtin(), store, surface)
            .wrap_err("failed to apply the starting theme")
            .suggestion("check that `theme.stylesheet` points somewhere writable")?;

        Ok(Self::with_context(ctx))
    }

    /// wrap an existing context
    pub fn with_context(ctx: ThemeContext) -> Self {
        Self { ctx }
    }

    /// the theme state
    pub fn context(&self) -> &ThemeContext {
        &self.ctx
    }

    /// run a single command
    ///
    /// # Errors
    ///
    /// returns an error if the command fails
    pub async fn run(&mut self, command: Command) -> Result<()> {
        let mut stdout = std::io::stdout().lock();

        match command {
            Command::List { variant } => self.list(variant, &mut stdout)?,
            Command::Current => {
                let theme = self.ctx.theme();
                writeln!(stdout, "{} ({})", theme.id, theme.name)?;
            }
            Command::Set { id } => self.set(&id, &mut stdout)?,
            Command::Css => write!(stdout, "{}", self.ctx.surface().render())?,
            Command::Switch => {
                let stdin = std::io::stdin().lock();
                self.switch(stdin, &mut stdout)?;
            }
            Command::Mirror { action } => {
                drop(stdout);
                self.mirror(action).await?;
            }
        }

        Ok(())
    }

    /// print the catalog with preview swatches, optionally only one variant
    ///
    /// rows keep their catalog numbers so they match the `switch` picker
    fn list(&self, variant: Option<ThemeVariant>, out: &mut impl Write) -> Result<()> {
        let entries = ThemeSwitcher::new().entries(&self.ctx);
        let shown = variant.map(|variant| self.ctx.themes().list_by_variant(variant));

        write_entries(
            entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| shown.as_ref().is_none_or(|ids| ids.contains(&entry.id))),
            out,
        )
    }

    /// switch to `id`
    fn set(&mut self, id: &str, out: &mut impl Write) -> Result<()> {
        let theme = self
            .ctx
            .set_theme(id)
            .suggestion("run `sitetheme list` to see the available themes")?;

        writeln!(out, "{} switched to {}", "✓".green().bold(), theme.name)?;
        Ok(())
    }

    /// drive the switcher from `input`, returning whether a theme was picked
    ///
    /// a number or an id picks a theme, an empty line or `q` dismisses
    pub fn switch(&mut self, mut input: impl BufRead, out: &mut impl Write) -> Result<bool> {
        let mut switcher = ThemeSwitcher::new();
        switcher.activate();

        loop {
            let entries = switcher.entries(&self.ctx);
            write_entries(entries.iter().enumerate(), out)?;
            write!(out, "theme (number or id, empty to cancel): ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                switcher.dismiss();
                return Ok(false);
            }

            let choice = line.trim();
            if choice.is_empty() || choice.eq_ignore_ascii_case("q") {
                switcher.dismiss();
                return Ok(false);
            }

            let id = match choice.parse::<usize>() {
                Ok(n) if (1..=entries.len()).contains(&n) => entries[n - 1].id,
                _ => choice,
            };

            match switcher.select(&mut self.ctx, id) {
                Ok(_) => {
                    writeln!(
                        out,
                        "{} switched to {}",
                        "✓".green().bold(),
                        self.ctx.theme().name
                    )?;
                    return Ok(true);
                }
                Err(ThemeError::InvalidThemeId(id)) => {
                    writeln!(out, "{} no theme called `{}`", "✗".red().bold(), id)?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// talk to the hosted settings table
    async fn mirror(&self, action: MirrorCommand) -> Result<()> {
        let base_url = getopt!(raw remote.base_url)
            .ok_or(ThemeError::RemoteNotConfigured)
            .suggestion("set `remote.base_url` in sitetheme.toml or SITETHEME_REMOTE__BASE_URL")?;
        let store = RestRecordStore::new(
            &base_url,
            &getopt!(remote.table),
            getopt!(raw remote.api_key),
        )?;
        let mirror = RemoteSettingsMirror::new(store);

        match action {
            MirrorCommand::Save => {
                let result = mirror.save_theme_snapshot(&self.ctx).await;
                let notice = Notice::from_save(&result);

                if notice.is_success() {
                    println!("{} {}", "✓".green().bold(), notice);
                } else {
                    println!("{} {}", "✗".red().bold(), notice);
                }

                result?;
            }
            MirrorCommand::Show => match mirror.load_theme_snapshot().await? {
                Some(snapshot) => {
                    info!("fetched remote theme snapshot");
                    println!("current:   {}", snapshot.current.bold());
                    println!("available: {}", snapshot.available.join(", "));
                }
                None => println!("no theme snapshot has been saved yet"),
            },
        }

        Ok(())
    }
}

/// print picker rows, numbered from 1 by catalog position
fn write_entries<'a>(
    rows: impl IntoIterator<Item = (usize, &'a SwitcherEntry)>,
    out: &mut impl Write,
) -> Result<()> {
    for (i, entry) in rows {
        let marker = if entry.active { "*" } else { " " };

        writeln!(
            out,
            "{} {:>2}. {} {} {:<10} {}",
            marker.green().bold(),
            i + 1,
            swatch(&entry.primary),
            swatch(&entry.accent),
            entry.id,
            entry.name.dimmed(),
        )?;
    }

    Ok(())
}

/// a colored block for a hex color, or the raw value if it isn't one
fn swatch(color: &str) -> String {
    match hex_to_rgb(color) {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::store::MemoryBackend,
        std::io::Cursor,
    };

    fn app(backend: &MemoryBackend) -> SiteThemeApp {
        let ctx = ThemeContext::new(
            ThemeCatalog::builtin(),
            PersistedThemeStore::new(backend.clone()),
            Box::new(CssVarSurface::new()),
        )
        .unwrap();

        SiteThemeApp::with_context(ctx)
    }

    #[test]
    fn test_switch_by_number_and_id() {
        let backend = MemoryBackend::new();
        let mut app = app(&backend);
        let mut out = Vec::new();

        assert!(app.switch(Cursor::new("2\n"), &mut out).unwrap());
        assert_eq!(app.context().current_id(), "classic");

        assert!(app.switch(Cursor::new("emerald\n"), &mut out).unwrap());
        assert_eq!(app.context().current_id(), "emerald");
        assert_eq!(backend.value().as_deref(), Some("emerald"));
    }

    #[test]
    fn test_switch_retries_unknown_and_dismisses() {
        let mut app = app(&MemoryBackend::new());
        let mut out = Vec::new();

        assert!(app.switch(Cursor::new("nonexistent\nmodern\n"), &mut out).unwrap());
        assert_eq!(app.context().current_id(), "modern");
        assert!(String::from_utf8_lossy(&out).contains("no theme called `nonexistent`"));

        assert!(!app.switch(Cursor::new("\n"), &mut out).unwrap());
        assert!(!app.switch(Cursor::new(""), &mut out).unwrap());
        assert_eq!(app.context().current_id(), "modern");
    }

    #[test]
    fn test_list_marks_active() {
        let mut app = app(&MemoryBackend::new());
        app.set("minimal", &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        app.list(None, &mut out).unwrap();
        let out = String::from_utf8_lossy(&out);

        assert_eq!(out.lines().count(), 5);
        assert!(out.lines().nth(3).unwrap().contains("minimal"));
    }

    #[test]
    fn test_list_filters_by_variant_keeping_numbers() {
        let app = app(&MemoryBackend::new());

        let mut out = Vec::new();
        app.list(Some(ThemeVariant::Dark), &mut out).unwrap();
        let out = String::from_utf8_lossy(&out);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" 1.") && lines[0].contains("luxury"));
        assert!(lines[1].contains(" 5.") && lines[1].contains("emerald"));
    }

    #[test]
    fn test_set_unknown_keeps_theme() {
        let mut app = app(&MemoryBackend::new());

        assert!(app.set("nonexistent", &mut Vec::new()).is_err());
        assert_eq!(app.context().current_id(), "luxury");
    }
}
