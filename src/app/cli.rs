//! cli stuff
use {
    crate::{config::options::SiteThemeCfg, theme::ThemeVariant},
    clap::{Parser, Subcommand},
    color_eyre::{Report, eyre::Result},
    schemars::generate::SchemaSettings,
    std::{
        fs::OpenOptions,
        io::{BufWriter, Write},
    },
};

/// the CLI
#[derive(Parser, Debug)]
#[command(version, about = "pick, persist and mirror the site theme")]
pub struct Cli {
    /// Save instead of printing
    #[arg(long)]
    pub save: bool,

    /// Generate a JSON schemafile based on the defaults
    #[arg(short = 's', long)]
    pub gen_schema: bool,

    /// Generate the default config file
    #[arg(short = 'd', long)]
    pub gen_default: bool,

    /// What to do
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// the things sitetheme can do
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every theme, marking the active one
    List {
        /// Only show light or dark themes
        #[arg(long)]
        variant: Option<ThemeVariant>,
    },

    /// Show the active theme
    Current,

    /// Switch to a theme
    Set {
        /// The theme id
        id: String,
    },

    /// Print the active theme's stylesheet
    Css,

    /// Pick a theme interactively
    Switch,

    /// Work with the hosted settings table
    Mirror {
        /// What to do with it
        #[command(subcommand)]
        action: MirrorCommand,
    },
}

/// remote settings actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorCommand {
    /// Save the active theme and the catalog ids
    Save,

    /// Show the last saved theme snapshot
    Show,
}

impl Cli {
    /// handle the generator flags
    ///
    /// returns `true` if one of them ran, in which case there's nothing else to do
    ///
    /// # Errors
    ///
    /// returns an error if it fails to generate and/or save the json schema
    /// returns an error if it fails to generate and/or save the default config
    pub fn run_generators(&self) -> Result<bool> {
        if self.gen_schema {
            Self::gen_schema(self.save)?;
        }

        if self.gen_default {
            Self::gen_defaults(self.save)?;
        }

        Ok(self.gen_schema || self.gen_default)
    }

    /// save a string to a file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to open `path`
    pub fn write_to_file(path: &str, contents: &str) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;
        let mut w = BufWriter::new(file);
        w.write_all(contents.as_bytes()).map_err(Report::new)
    }

    /// generate/save the config schema
    ///
    /// # Errors
    ///
    /// returns an error if it fails to convert the schema to a JSON string
    /// returns an error if it fails to save the schema to `sitetheme.schema.json`
    pub fn gen_schema(save: bool) -> Result<()> {
        let settings = SchemaSettings::draft2020_12().for_serialize();
        let generator = settings.into_generator();
        let schema = generator.into_root_schema_for::<SiteThemeCfg>();
        let schema_str = serde_json::to_string_pretty(&schema)?;

        if save {
            Self::write_to_file("sitetheme.schema.json", &schema_str)?;
        } else {
            println!("{}", schema_str);
        }

        Ok(())
    }

    /// generate/save the default config file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to convert the default config to TOML
    /// returns an error if it fails to save the default config to `sitetheme.toml`
    pub fn gen_defaults(save: bool) -> Result<()> {
        if save {
            SiteThemeCfg::default().save_to_file("sitetheme.toml")?;
        } else {
            println!("{}", toml::to_string_pretty(&SiteThemeCfg::default())?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["sitetheme", "set", "classic"]).unwrap();
        assert_eq!(cli.command, Some(Command::Set { id: "classic".to_string() }));

        let cli = Cli::try_parse_from(["sitetheme", "mirror", "save"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Mirror { action: MirrorCommand::Save })
        );

        let cli = Cli::try_parse_from(["sitetheme", "list", "--variant", "dark"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::List { variant: Some(ThemeVariant::Dark) })
        );
        assert!(Cli::try_parse_from(["sitetheme", "list", "--variant", "sepia"]).is_err());

        let cli = Cli::try_parse_from(["sitetheme", "--gen-default"]).unwrap();
        assert!(cli.gen_default);
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_set_needs_an_id() {
        assert!(Cli::try_parse_from(["sitetheme", "set"]).is_err());
    }
}
