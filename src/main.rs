use clap::{ArgAction, Args, Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use version_json::commands::{self, Overrides};
use version_json::core::config::DefineMode;
use version_json::core::error::{ManifestError, print_error};
use version_json::logging;

/// Derive a version manifest from package.json and git
#[derive(Parser)]
#[command(name = "version-json")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(flatten)]
  global: GlobalArgs,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
  /// Project root containing the package descriptor
  #[arg(long, global = true, default_value = ".")]
  root: PathBuf,
  /// Artifact file name (overrides version-json.toml)
  #[arg(long, global = true)]
  output: Option<String>,
  /// Constants to inject: full, minimal, or disabled (overrides version-json.toml)
  #[arg(long, global = true)]
  define: Option<DefineMode>,
  /// Namespace for constant names (overrides version-json.toml)
  #[arg(long, global = true)]
  namespace: Option<String>,
  /// More log output (repeatable)
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,
  /// Less log output (repeatable)
  #[arg(short, long, global = true, action = ArgAction::Count)]
  quiet: u8,
}

#[derive(Subcommand)]
enum Commands {
  /// Write the manifest into the build output directory
  Build {
    /// Build output directory, relative to the root
    #[arg(long, default_value = "dist")]
    out_dir: PathBuf,
  },

  /// Print the compile-time constants as JSON
  Defines,

  /// Print the manifest as the dev server serves it
  Show,

  /// Serve the project root with the manifest endpoint in front
  Serve {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,
    /// Port to bind
    #[arg(short, long, default_value_t = 5173)]
    port: u16,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();
  let global = cli.global;

  logging::init(global.verbose.min(4) as i8 - global.quiet.min(4) as i8);

  let overrides = Overrides {
    output: global.output,
    define: global.define,
    namespace: global.namespace,
  };
  let root = global.root;

  let result = match cli.command {
    Commands::Build { out_dir } => commands::run_build(&root, out_dir, &overrides),
    Commands::Defines => commands::run_defines(&root, &overrides),
    Commands::Show => commands::run_show(&root, &overrides),
    Commands::Serve { host, port } => commands::run_serve(&root, SocketAddr::new(host, port), &overrides),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ManifestError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
