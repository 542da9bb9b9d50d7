//! # Output Formatting
//!
//! Status lines and highlighting for the build report printed to stdout.

use owo_colors::OwoColorize;

/// Value of the global `--colors` flag.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  Yes,
  /// Same as `yes`
  Always,
  /// Color only when stdout is a terminal
  Auto,
  No,
  /// Same as `no`
  Never,
}

impl ColorMode {
  /// Install the mode as the process-wide owo-colors override.
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      ColorMode::Auto => {}
    }
  }
}

/// Kind of status line printed while building a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
  Done,
  Note,
  Caution,
}

impl Status {
  /// Emoji shortcode and the plain glyph used when the shortcode is unknown.
  fn marker(self) -> (&'static str, &'static str) {
    match self {
      Status::Done => ("white_check_mark", "✓"),
      Status::Note => ("information_source", "ℹ"),
      Status::Caution => ("warning", "⚠"),
    }
  }

  fn render(self, message: &str) -> String {
    let (shortcode, fallback) = self.marker();
    let glyph = emojis::get_by_shortcode(shortcode).map_or(fallback, |emoji| emoji.as_str());
    let glyph = match self {
      Status::Done => glyph.green().bold().to_string(),
      Status::Note => glyph.blue().bold().to_string(),
      Status::Caution => glyph.yellow().bold().to_string(),
    };
    format!("{glyph} {message}")
  }
}

/// Report a finished step, such as the dataset being written.
pub fn print_success(message: &str) {
  println!("{}", Status::Done.render(message));
}

/// Report something the user should look at, e.g. an empty dataset.
pub fn print_warning(message: &str) {
  println!("{}", Status::Caution.render(message));
}

/// Report a build statistic.
pub fn print_info(message: &str) {
  println!("{}", Status::Note.render(message));
}

/// Print the heading that opens a build.
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Highlight a dataset or checkout path.
pub fn format_path(path: &str) -> String {
  path.bright_green().to_string()
}

/// Highlight a project name.
pub fn format_project_name(name: &str) -> String {
  name.bright_cyan().bold().to_string()
}
