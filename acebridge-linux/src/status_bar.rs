use gtk4::prelude::*;

/// Status bar under the editor showing line count, mode, theme and whether
/// the buffer changed since it was loaded.
pub struct StatusBar {
    pub widget: gtk4::Box,
    modified_label: gtk4::Label,
    lines_label: gtk4::Label,
    mode_label: gtk4::Label,
    theme_label: gtk4::Label,
}

impl StatusBar {
    pub fn new() -> Self {
        let widget = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
        widget.add_css_class("status-bar");
        widget.set_margin_start(8);
        widget.set_margin_end(8);
        widget.set_margin_top(2);
        widget.set_margin_bottom(2);

        let modified_label = gtk4::Label::new(Some("Modified"));
        modified_label.add_css_class("modified");
        modified_label.set_halign(gtk4::Align::Start);
        modified_label.set_visible(false);

        let lines_label = gtk4::Label::new(None);
        lines_label.add_css_class("line-count");

        let mode_label = gtk4::Label::new(None);
        mode_label.add_css_class("language-name");

        let theme_label = gtk4::Label::new(None);
        theme_label.add_css_class("theme-name");

        // Keeps the right-hand labels right-aligned while "Modified" is hidden
        let spacer = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
        spacer.set_hexpand(true);

        widget.append(&modified_label);
        widget.append(&spacer);
        widget.append(&mode_label);
        widget.append(&theme_label);
        widget.append(&lines_label);

        StatusBar {
            widget,
            modified_label,
            lines_label,
            mode_label,
            theme_label,
        }
    }

    pub fn update_lines(&self, lines: i64) {
        let text = if lines == 1 {
            "1 line".to_string()
        } else {
            format!("{} lines", lines)
        };
        self.lines_label.set_text(&text);
    }

    pub fn update_mode(&self, mode: &str) {
        self.mode_label.set_text(mode);
    }

    pub fn update_theme(&self, theme: &str) {
        self.theme_label.set_text(theme);
    }

    pub fn set_modified(&self, modified: bool) {
        self.modified_label.set_visible(modified);
    }
}
