use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Deserialize;
use std::io::IsTerminal;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// Styles used when rendering result blocks. A disabled palette renders plain text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    pub fn plain() -> Self {
        Palette::new(false)
    }

    pub fn from_choice(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Always => Palette::new(true),
            ColorChoice::Never => Palette::plain(),
            ColorChoice::Auto => Palette::new(should_use_colors()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn task_id(&self, id: usize) -> String {
        let text = format!("[{}]", id);
        if self.enabled {
            text.cyan().to_string()
        } else {
            text
        }
    }

    pub fn success(&self) -> String {
        if self.enabled {
            format!("{}{}{}", "[".green(), "SUCCESS".green().bold(), "]".green())
        } else {
            String::from("[SUCCESS]")
        }
    }

    pub fn failure(&self) -> String {
        if self.enabled {
            format!("{}{}{}", "[".red(), "FAILURE".red().bold(), "]".red())
        } else {
            String::from("[FAILURE]")
        }
    }

    pub fn failure_detail(&self, detail: &str) -> String {
        if self.enabled {
            detail.red().to_string()
        } else {
            detail.to_string()
        }
    }

    pub fn stdout_label(&self) -> String {
        if self.enabled {
            "Stdout:".green().to_string()
        } else {
            String::from("Stdout:")
        }
    }

    pub fn stderr_label(&self) -> String {
        if self.enabled {
            "Stderr:".red().to_string()
        } else {
            String::from("Stderr:")
        }
    }
}

/// Colour only when stdout is a terminal, `NO_COLOR` is unset and `TERM` is not `dumb`.
pub fn should_use_colors() -> bool {
    if !std::io::stdout().is_terminal() {
        return false;
    }

    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    !matches!(std::env::var("TERM"), Ok(term) if term == "dumb")
}
