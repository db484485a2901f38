use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub name: fn(&str) -> String,
    pub price: fn(&str) -> String,
    pub category: fn(&str) -> String,
    pub active: fn(&str) -> String,
    pub inactive: fn(&str) -> String,
    pub hint: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "plain" | "" => Self::plain(),
            "vivid" => Self::vivid(),
            "mono" => Self::mono(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::plain()
            }
        }
    }

    fn plain() -> Self {
        Self {
            title: |s| s.bold().underline().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            name: |s| s.white().to_string(),
            price: |s| s.yellow().to_string(),
            category: |s| s.cyan().to_string(),
            active: |s| s.green().to_string(),
            inactive: |s| s.red().to_string(),
            hint: |s| s.bright_white().dimmed().italic().to_string(),
        }
    }

    fn vivid() -> Self {
        Self {
            title: |s| s.bright_magenta().italic().bold().underline().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_cyan().bold().to_string(),
            name: |s| s.bright_white().bold().to_string(),
            price: |s| s.bright_yellow().to_string(),
            category: |s| s.bright_blue().italic().to_string(),
            active: |s| s.bright_green().bold().to_string(),
            inactive: |s| s.bright_red().bold().to_string(),
            hint: |s| s.magenta().italic().to_string(),
        }
    }

    fn mono() -> Self {
        Self {
            title: |s| s.bold().to_string(),
            line: |s| s.normal().to_string(),
            idx: |s| s.normal().to_string(),
            name: |s| s.normal().to_string(),
            price: |s| s.normal().to_string(),
            category: |s| s.normal().to_string(),
            active: |s| s.normal().to_string(),
            inactive: |s| s.dimmed().to_string(),
            hint: |s| s.italic().to_string(),
        }
    }

    pub fn status(&self, active: bool, label: &str) -> String {
        if active {
            (self.active)(label)
        } else {
            (self.inactive)(label)
        }
    }
}
