use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gtk4::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;

use acebridge_core::settings::{self, Settings};
use acebridge_core::{assets, ChangeEvent, Editor, HighlightMode, Theme};

use crate::engine::WebKitEngine;
use crate::status_bar::StatusBar;

type SharedEditor = Rc<Editor<WebKitEngine>>;

pub fn build_window(app: &adw::Application) {
    let settings = Rc::new(RefCell::new(settings::load()));

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Ace Bridge")
        .default_width(settings.borrow().window_width)
        .default_height(settings.borrow().window_height)
        .build();

    let header = adw::HeaderBar::new();

    let mode_names: Vec<String> = HighlightMode::ALL.iter().map(|m| m.to_string()).collect();
    let mode_refs: Vec<&str> = mode_names.iter().map(String::as_str).collect();
    let mode_dropdown = gtk4::DropDown::from_strings(&mode_refs);
    mode_dropdown.set_tooltip_text(Some("Highlight mode"));

    let theme_names: Vec<String> = Theme::ALL.iter().map(|t| t.to_string()).collect();
    let theme_refs: Vec<&str> = theme_names.iter().map(String::as_str).collect();
    let theme_dropdown = gtk4::DropDown::from_strings(&theme_refs);
    theme_dropdown.set_tooltip_text(Some("Theme"));

    let read_only_button = gtk4::ToggleButton::with_label("Read-only");

    header.pack_start(&mode_dropdown);
    header.pack_start(&theme_dropdown);
    header.pack_end(&read_only_button);

    let status_bar = Rc::new(StatusBar::new());

    let background =
        gtk4::gdk::RGBA::parse("#272822").unwrap_or(gtk4::gdk::RGBA::new(0.15, 0.16, 0.13, 1.0));
    let engine = WebKitEngine::new(&background);
    let webview = engine.widget().clone();

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    content.append(&header);
    content.append(&webview);
    content.append(&status_bar.widget);
    window.set_content(Some(&content));
    window.present();

    let ace_dir = settings.borrow().ace_dir.clone();
    let editor = match assets::ensure_extracted(ace_dir.as_deref())
        .and_then(|bundle| Editor::new(engine, bundle))
    {
        Ok(editor) => Rc::new(editor),
        Err(e) => {
            log::error!("Failed to start editor: {}", e);
            let error_html = format!(
                "<html><body style='background:#272822;color:#f8f8f2;font-family:monospace;padding:2em'>\
                 <h3>Editor failed to load</h3><p>{}</p></body></html>",
                e
            );
            webview.load_html(&error_html, None);
            mode_dropdown.set_sensitive(false);
            theme_dropdown.set_sensitive(false);
            read_only_button.set_sensitive(false);
            return;
        }
    };

    // The hook messages from set_text reach the UI process ahead of the reply
    // to the trailing lines() call, so they are queued by the time this returns.
    let events = wire_notifications(&editor, &status_bar);
    apply_initial_settings(&editor, &settings.borrow(), &status_bar);
    mode_dropdown.set_selected(index_of(&HighlightMode::ALL, settings.borrow().highlight_mode));
    theme_dropdown.set_selected(index_of(&Theme::ALL, settings.borrow().theme));
    read_only_button.set_active(settings.borrow().read_only);

    // Loading the initial text is not a modification.
    events.try_iter().for_each(drop);
    status_bar.set_modified(false);

    {
        let editor = editor.clone();
        let settings = settings.clone();
        let status_bar = status_bar.clone();
        mode_dropdown.connect_selected_notify(move |dropdown| {
            let Some(&mode) = HighlightMode::ALL.get(dropdown.selected() as usize) else {
                return;
            };
            match editor.set_highlight_mode(mode) {
                Ok(()) => {
                    settings.borrow_mut().highlight_mode = mode;
                    status_bar.update_mode(mode.id());
                }
                Err(e) => log::warn!("Failed to set mode {}: {}", mode, e),
            }
        });
    }

    {
        let editor = editor.clone();
        let settings = settings.clone();
        let status_bar = status_bar.clone();
        theme_dropdown.connect_selected_notify(move |dropdown| {
            let Some(&theme) = Theme::ALL.get(dropdown.selected() as usize) else {
                return;
            };
            match editor.set_theme(theme) {
                Ok(()) => {
                    settings.borrow_mut().theme = theme;
                    status_bar.update_theme(theme.id());
                }
                Err(e) => log::warn!("Failed to set theme {}: {}", theme, e),
            }
        });
    }

    {
        let editor = editor.clone();
        let settings = settings.clone();
        read_only_button.connect_toggled(move |button| {
            let read_only = button.is_active();
            match editor.set_read_only(read_only) {
                Ok(()) => settings.borrow_mut().read_only = read_only,
                Err(e) => log::warn!("Failed to toggle read-only: {}", e),
            }
        });
    }

    {
        let settings = settings.clone();
        window.connect_close_request(move |window| {
            let mut s = settings.borrow_mut();
            s.window_width = window.width();
            s.window_height = window.height();
            if let Err(e) = settings::save(&s) {
                log::warn!("{}", e);
            }
            gtk4::glib::Propagation::Proceed
        });
    }
}

fn index_of<T: PartialEq>(all: &[T], value: T) -> u32 {
    all.iter().position(|v| *v == value).unwrap_or(0) as u32
}

fn apply_initial_settings(editor: &SharedEditor, settings: &Settings, status_bar: &StatusBar) {
    let result = editor
        .set_theme(settings.theme)
        .and_then(|_| editor.set_highlight_mode(settings.highlight_mode))
        .and_then(|_| editor.set_text(&settings.initial_text))
        .and_then(|_| editor.set_read_only(settings.read_only))
        .and_then(|_| editor.lines());
    match result {
        Ok(lines) => status_bar.update_lines(lines),
        Err(e) => log::warn!("Failed to apply settings to editor: {}", e),
    }
    status_bar.update_mode(settings.highlight_mode.id());
    status_bar.update_theme(settings.theme.id());
}

/// Route relayed notifications to the status bar.
///
/// Observers must be `Send`, so they only forward into a channel; a main-loop
/// timer drains it and touches the widgets. The returned receiver shares that
/// queue.
fn wire_notifications(
    editor: &SharedEditor,
    status_bar: &Rc<StatusBar>,
) -> crossbeam_channel::Receiver<ChangeEvent> {
    let (tx, rx) = crossbeam_channel::unbounded::<ChangeEvent>();
    editor.subscribe(move |event| {
        let _ = tx.send(*event);
    });

    let status_bar = status_bar.clone();
    let queue = rx.clone();
    gtk4::glib::timeout_add_local(Duration::from_millis(50), move || {
        while let Ok(event) = queue.try_recv() {
            match event {
                ChangeEvent::TextChanged => status_bar.set_modified(true),
                ChangeEvent::LinesChanged { count } => status_bar.update_lines(count),
            }
        }
        gtk4::glib::ControlFlow::Continue
    });
    rx
}
