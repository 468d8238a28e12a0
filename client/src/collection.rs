use crate::api::ApiError;
use log::warn;

/// One fetched list with its loading and error flags
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
}

/// What a list should draw
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    Loading,
    Error(&'a str),
    Empty,
    Rows(&'a [T]),
}

/// Row level request coming out of a table
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction<E, K> {
    None,
    Edit(E),
    Delete(K),
}

impl<T> Default for Collection<T> {
    // lists are requested as soon as the app starts
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl<T> Collection<T> {
    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// previous items are kept when the fetch fails
    pub fn finish(&mut self, result: Result<Vec<T>, ApiError>, failure: &str) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                warn!("{failure} ({e})");
                self.error = Some(failure.to_string());
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> ListView<'_, T> {
        if self.loading {
            ListView::Loading
        } else if let Some(error) = &self.error {
            ListView::Error(error)
        } else if self.items.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(&self.items)
        }
    }
}

impl<'a, T> ListView<'a, T> {
    /// Draws everything but the table itself, the rows are handed back when there is one to draw
    pub fn show_placeholder(self, ui: &mut egui::Ui, empty_text: &str) -> Option<&'a [T]> {
        match self {
            ListView::Loading => {
                ui.add(egui::Spinner::new());
                None
            }
            ListView::Error(error) => {
                ui.colored_label(ui.visuals().error_fg_color, error);
                None
            }
            ListView::Empty => {
                ui.label(empty_text);
                None
            }
            ListView::Rows(rows) => Some(rows),
        }
    }
}

/// Rounded coloured label used for status columns
pub fn chip(ui: &mut egui::Ui, text: &str, fill: egui::Color32) {
    egui::Frame::none()
        .fill(fill)
        .rounding(8.0)
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE).small());
        });
}

/// Bold first row of a table
pub fn header(ui: &mut egui::Ui, columns: &[&str]) {
    for column in columns {
        ui.strong(*column);
    }
    ui.end_row();
}
