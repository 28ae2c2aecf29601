//! Browse command: a line-driven viewer session

use anyhow::{Context, Result};
use log::warn;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;
use vista_core::Size;
use vista_overlay::StdFileSystem;
use vista_viewer::{DirectoryWatcher, ExtensionLoader, MenuAction, ViewerHost};

pub struct BrowseArgs {
    pub models: Vec<PathBuf>,
    pub path: Option<String>,
    pub config: Option<String>,
    pub width: f32,
    pub height: f32,
    pub watch: bool,
}

type Host = ViewerHost<StdFileSystem, ExtensionLoader>;

/// One line of session input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionCommand {
    Activate(usize),
    Ok,
    Cancel,
    Dismiss,
    Menu(MenuAction),
    Models,
}

impl SessionCommand {
    fn parse(line: &str) -> Result<Self> {
        let command = match line {
            "ok" => SessionCommand::Ok,
            "cancel" => SessionCommand::Cancel,
            "dismiss" => SessionCommand::Dismiss,
            "open" => SessionCommand::Menu(MenuAction::OpenModel),
            "remove" => SessionCommand::Menu(MenuAction::RemoveModels),
            "quit" | "exit" => SessionCommand::Menu(MenuAction::Quit),
            "models" => SessionCommand::Models,
            other => {
                let index = other.parse().with_context(|| {
                    format!(
                        "Unknown command '{}' (expected an entry index, ok, cancel, dismiss, open, remove, models or quit)",
                        other
                    )
                })?;
                SessionCommand::Activate(index)
            }
        };
        Ok(command)
    }
}

pub fn run(args: BrowseArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref(), args.path.as_deref())?;
    let mut host = ViewerHost::new(
        Size::new(args.width, args.height),
        StdFileSystem,
        ExtensionLoader,
        &config,
    )
    .context("Failed to open directory browser")?;

    open_models(&mut host, &args.models);

    let mut watcher = if args.watch {
        Some(DirectoryWatcher::new(Duration::from_millis(300))?)
    } else {
        None
    };

    host.menu(MenuAction::OpenModel);
    sync_watch(&mut host, watcher.as_mut());
    print_state(&host);

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match SessionCommand::parse(line) {
            Ok(command) => execute(&mut host, command),
            Err(e) => {
                println!("{:#}", e);
                continue;
            }
        }

        if host.quit_requested() {
            break;
        }
        sync_watch(&mut host, watcher.as_mut());
        print_state(&host);
    }

    Ok(())
}

/// Load models named on the command line; failures are logged and skipped
fn open_models(host: &mut Host, models: &[PathBuf]) {
    for path in models {
        if let Err(e) = host.open_model(path) {
            warn!("Failed to load {}: {}", path.display(), e);
        }
    }
}

fn execute(host: &mut Host, command: SessionCommand) {
    let accepted = match command {
        SessionCommand::Activate(index) => {
            let list = host.browser().list();
            host.ui_mut().activate(list, index)
        }
        SessionCommand::Ok => {
            let button = host.browser().ok_button();
            host.ui_mut().click(button)
        }
        SessionCommand::Cancel => {
            let button = host.browser().cancel_button();
            host.ui_mut().click(button)
        }
        SessionCommand::Dismiss => {
            let button = host.dialog().ok_button();
            host.ui_mut().click(button)
        }
        SessionCommand::Menu(action) => {
            host.menu(action);
            true
        }
        SessionCommand::Models => {
            for model in host.models() {
                match &model.material {
                    Some(mtl) => println!(
                        "  {} [{}] material {}",
                        model.path.display(),
                        model.format.name(),
                        mtl.display()
                    ),
                    None => println!("  {} [{}]", model.path.display(), model.format.name()),
                }
            }
            true
        }
    };

    if !accepted {
        println!("(input ignored)");
    }
    host.process_events();
}

/// Refresh on pending changes, then follow the browser to its current directory
fn sync_watch(host: &mut Host, watcher: Option<&mut DirectoryWatcher>) {
    let Some(watcher) = watcher else {
        return;
    };
    if watcher.poll() {
        host.refresh_listing();
    }
    let current = host.browser().current_path().to_path_buf();
    if let Err(e) = watcher.watch(&current) {
        warn!("{}", e);
    }
}

fn print_state(host: &Host) {
    if host.dialog().is_visible(host.ui()) {
        println!("[alert] {}", host.dialog().message());
        return;
    }

    let browser = host.browser();
    if !browser.is_visible(host.ui()) {
        println!("(browser hidden, {} model(s) loaded)", host.models().len());
        return;
    }

    println!("{}", browser.current_path().display());
    for (i, entry) in browser.entries().iter().enumerate() {
        let suffix = if entry.is_dir() { "/" } else { "" };
        let marker = if browser.selected_index() == Some(i) { "*" } else { " " };
        println!("{:>3}{} {}{}", i, marker, entry.name, suffix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_overlay::OverlayConfig;

    #[test]
    fn test_parse_commands() {
        assert_eq!(SessionCommand::parse("3").unwrap(), SessionCommand::Activate(3));
        assert_eq!(SessionCommand::parse("ok").unwrap(), SessionCommand::Ok);
        assert_eq!(
            SessionCommand::parse("open").unwrap(),
            SessionCommand::Menu(MenuAction::OpenModel)
        );
        assert_eq!(
            SessionCommand::parse("exit").unwrap(),
            SessionCommand::Menu(MenuAction::Quit)
        );
        assert!(SessionCommand::parse("-1").is_err());
        assert!(SessionCommand::parse("load").is_err());
    }

    #[test]
    fn test_open_models_skips_failures() {
        let dir = std::env::temp_dir().join(format!("vista_browse_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("teapot.obj"), b"v 0 0 0").unwrap();
        std::fs::write(dir.join("notes.txt"), b"hello").unwrap();

        let mut config = OverlayConfig::default();
        config.browser.start_dir = Some(dir.clone());
        let mut host =
            ViewerHost::new(Size::new(800.0, 600.0), StdFileSystem, ExtensionLoader, &config).unwrap();

        open_models(
            &mut host,
            &[dir.join("notes.txt"), dir.join("missing.obj"), dir.join("teapot.obj")],
        );
        assert_eq!(host.models().len(), 1);
        assert_eq!(host.models()[0].path, dir.join("teapot.obj"));
        assert!(!host.dialog().is_visible(host.ui()));

        std::fs::remove_dir_all(&dir).ok();
    }
}
