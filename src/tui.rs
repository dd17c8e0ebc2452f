//! Utilities for terminal output during scanning.
//!
//! Colouring goes through `colored`; the binary switches it off globally in
//! accessible mode, so the macros only decide whether to print the prefix.

#[doc(hidden)]
pub use colored::Color;

/// Terminal warning, printed with a red `[!]` prefix.
#[macro_export]
macro_rules! warning {
    ($name:expr) => {
        println!("{} {}", $crate::tui::paint_prefix("[!]", $crate::tui::Color::Red), $name);
    };
    ($name:expr, $accessible:expr) => {
        if $accessible {
            println!("{}", $name);
        } else {
            $crate::warning!($name);
        }
    };
}

/// Progress detail, printed with a blue `[~]` prefix.
#[macro_export]
macro_rules! detail {
    ($name:expr) => {
        println!("{} {}", $crate::tui::paint_prefix("[~]", $crate::tui::Color::Blue), $name);
    };
    ($name:expr, $accessible:expr) => {
        if $accessible {
            println!("{}", $name);
        } else {
            $crate::detail!($name);
        }
    };
}

/// Result output, printed with a green `[>]` prefix.
#[macro_export]
macro_rules! output {
    ($name:expr) => {
        println!("{} {}", $crate::tui::paint_prefix("[>]", $crate::tui::Color::Green), $name);
    };
    ($name:expr, $accessible:expr) => {
        if $accessible {
            println!("{}", $name);
        } else {
            $crate::output!($name);
        }
    };
}

#[doc(hidden)]
pub fn paint_prefix(prefix: &str, color: Color) -> colored::ColoredString {
    use colored::Colorize;
    prefix.color(color).bold()
}

/// Startup banner for the command line tool.
#[must_use]
pub fn banner(accessible: bool) -> String {
    use colored::Colorize;

    let title = format!("Welcome to portsweep {}", env!("CARGO_PKG_VERSION"));
    let rule = "-".repeat(title.len());
    if accessible {
        format!("{title}\n{rule}")
    } else {
        format!("{}\n{}", title.green().bold(), rule.dimmed())
    }
}
