//! Terminal output utilities

use console::style;

/// Width of the text between the `#` borders of a banner
const BANNER_INNER_WIDTH: usize = 25;

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{}: {}", style("error").red().bold(), message);
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", style("warning").yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}: {}", style("success").green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{}: {}", style("info").blue().bold(), message);
}

/// Render a phase banner such as
///
/// ```text
/// ###########################
/// #    Parsing settings     #
/// ###########################
/// ```
pub fn banner(title: &str) -> String {
    let border = "#".repeat(BANNER_INNER_WIDTH + 2);
    format!(
        "\n{border}\n#{title:^width$}#\n{border}\n",
        border = border,
        title = title,
        width = BANNER_INNER_WIDTH
    )
}

/// Print a phase banner to stdout
pub fn print_banner(title: &str) {
    println!("{}", banner(title));
}
