use assetcopy::api::{CmdMessage, MessageLevel};
use assetcopy::config::{AssetLibrary, CopyConfig, FLAG_KEYS};
use colored::*;
use unicode_width::UnicodeWidthStr;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        println!(" {} {}", "►".yellow(), warning);
    }
}

fn pad_to_width(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

pub fn print_libraries(libraries: &[AssetLibrary]) {
    let width = libraries.iter().map(|l| l.name.width()).max().unwrap_or(0);
    for lib in libraries {
        let name = pad_to_width(&lib.name, width);
        println!(
            "  {}  {}",
            name.bold(),
            lib.path.display().to_string().dimmed()
        );
    }
}

pub fn print_config(config: &CopyConfig) {
    for key in FLAG_KEYS {
        if let Some(value) = config.flag(key) {
            println!("{} = {}", key, value);
        }
    }
    if !config.libraries.is_empty() {
        println!("libraries:");
        print_libraries(&config.libraries);
    }
}
