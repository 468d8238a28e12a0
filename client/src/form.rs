use crate::api::{ApiError, Submission};
use crate::invalidation::Mutation;
use egui::{Color32, RichText};

/// Last outcome shown under a form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feedback {
    error: Option<String>,
    success: Option<String>,
}

impl Feedback {
    pub fn clear(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.success = None;
        self.error = Some(error.into());
    }

    pub fn set_success(&mut self, success: impl Into<String>) {
        self.error = None;
        self.success = Some(success.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if let Some(success) = &self.success {
            ui.label(RichText::new(success).color(Color32::from_rgb(46, 125, 50)));
        }
        if let Some(error) = &self.error {
            ui.label(RichText::new(error).color(ui.visuals().error_fg_color));
        }
    }
}

/// Wording of the failures a given form can run into
pub struct ErrorMessages {
    pub not_found: Option<&'static str>,
    pub conflict: Option<&'static str>,
    pub network: &'static str,
    /// any other status
    pub other: fn(u16, &str) -> String,
}

pub fn describe(error: &ApiError, messages: &ErrorMessages) -> String {
    match error {
        ApiError::Status {
            status: 404,
            ..
        } if messages.not_found.is_some() => messages.not_found.unwrap_or_default().to_string(),
        ApiError::Status {
            status: 409,
            ..
        } if messages.conflict.is_some() => messages.conflict.unwrap_or_default().to_string(),
        ApiError::Status {
            status: 400,
            messages: Some(list),
            ..
        } if !list.is_empty() => list.join(", "),
        ApiError::Status {
            status,
            status_text,
            ..
        } => (messages.other)(*status, status_text),
        ApiError::Network(_) => messages.network.to_string(),
        ApiError::Decode(_) => "Respuesta inesperada del servidor.".to_string(),
        ApiError::Encode(_) => "No se pudo preparar la solicitud.".to_string(),
    }
}

pub const REQUIRED_FIELDS: &str = "Complete los campos obligatorios";

/// labels of the required fields left blank
pub fn missing<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect()
}

pub fn missing_message(labels: &[&str]) -> String {
    format!("{REQUIRED_FIELDS}: {}.", labels.join(", "))
}

pub enum FormEvent {
    None,
    Submit(Submission),
    Cancel,
}

/// Create/edit form of an entity living in a dialog
pub trait EntityForm {
    type Entity: Clone;

    fn create() -> Self;
    fn edit(entity: &Self::Entity) -> Self;
    fn is_edit(&self) -> bool;
    /// local checks, then the request to send
    fn submit(&mut self) -> Option<Submission>;
    /// true on success, the draft is reset then
    fn on_response(&mut self, result: Result<Self::Entity, ApiError>) -> bool;
    fn update(&mut self, ui: &mut egui::Ui) -> FormEvent;

    fn mutation(&self) -> Mutation {
        if self.is_edit() {
            Mutation::Updated
        } else {
            Mutation::Created
        }
    }
}

/// one labelled single line input
pub fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).hint_text(hint).desired_width(280.0));
    ui.end_row();
}

/// Cancel and save buttons, save can be greyed out
pub fn buttons(ui: &mut egui::Ui, save_label: &str, can_save: bool) -> (bool, bool) {
    ui.horizontal(|ui| {
        let cancel = ui.button("Cancelar").clicked();
        let save = ui
            .add_enabled(can_save, egui::Button::new(save_label))
            .clicked();
        (cancel, save)
    })
    .inner
}
